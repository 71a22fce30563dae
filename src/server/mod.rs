//! # HTTP Server for Items and Label Sheets
//!
//! JSON API over the item store and the label sheet generator.
//!
//! ## Usage
//!
//! ```bash
//! kairoframe serve --listen 0.0.0.0:8080 --store items.json --logo logo.png
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/api/items/next-code` | Next free item code |
//! | POST | `/api/items` | Create an item |
//! | GET | `/api/items/:code` | Look up an item |
//! | GET | `/api/items/:code/qr` | QR code PNG for an item |
//! | GET | `/api/shelves/:code/items` | Items on a shelf (`ES-NNNN`) |
//! | GET | `/api/locations/:code/items` | Items at a location (`UB-NNNN`) |
//! | GET | `/api/labels/sizes` | Label presets |
//! | POST | `/api/labels/summary` | Preview a range selection |
//! | POST | `/api/labels/pdf` | Download a label sheet |
//! | POST | `/api/scan` | Resolve a scanned QR payload |

mod handlers;
mod state;

pub use handlers::ApiError;
pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::KairoError;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Items
        .route("/api/items", post(handlers::items::create))
        .route("/api/items/next-code", get(handlers::items::next_code))
        .route("/api/items/:code", get(handlers::items::get))
        .route("/api/items/:code/qr", get(handlers::items::qr_png))
        // Storage
        .route(
            "/api/shelves/:code/items",
            get(handlers::placements::shelf_items),
        )
        .route(
            "/api/locations/:code/items",
            get(handlers::placements::location_items),
        )
        // Labels
        .route("/api/labels/sizes", get(handlers::labels::sizes))
        .route("/api/labels/summary", post(handlers::labels::summary))
        .route("/api/labels/pdf", post(handlers::labels::pdf))
        // Scanner
        .route("/api/scan", post(handlers::scan::scan))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use kairoframe::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), kairoframe::error::KairoError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), KairoError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state);

    info!(
        listen = %config.listen_addr,
        store = ?config.store_path,
        logo = ?config.labels.logo_path,
        base_url = %config.labels.base_url,
        "kairoframe HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            KairoError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", config.listen_addr, e),
            ))
        })?;

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::store::MemoryStore;

    fn app() -> Router {
        router(Arc::new(AppState::with_store(
            ServerConfig::default(),
            MemoryStore::new(),
        )))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_next_code_and_create() {
        let app = app();

        let resp = app.clone().oneshot(get("/api/items/next-code")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({"code": "kf-0001"}));

        let resp = app
            .clone()
            .oneshot(post_json("/api/items", json!({"name": "Tripod"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let item = json_body(resp).await;
        assert_eq!(item["code"], "kf-0001");
        assert_eq!(item["status"], "AVAILABLE");

        let resp = app.clone().oneshot(get("/api/items/next-code")).await.unwrap();
        assert_eq!(json_body(resp).await, json!({"code": "kf-0002"}));

        let resp = app.oneshot(get("/api/items/KF-0001")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["name"], "Tripod");
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let app = app();
        let body = json!({"code": "kf-0005", "name": "Light"});

        let resp = app
            .clone()
            .oneshot(post_json("/api/items", body.clone()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app.oneshot(post_json("/api/items", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let err = json_body(resp).await;
        assert_eq!(err["success"], false);
        assert!(err["error"].as_str().unwrap().contains("kf-0005"));
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_create() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            store_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let app = router(Arc::new(AppState::with_store(config, MemoryStore::new())));

        let resp = app
            .clone()
            .oneshot(post_json("/api/items", json!({"name": "Tripod"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await["success"], false);

        let resp = app.clone().oneshot(get("/api/items/kf-0001")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app.oneshot(get("/api/items/next-code")).await.unwrap();
        assert_eq!(json_body(resp).await, json!({"code": "kf-0001"}));
    }

    #[tokio::test]
    async fn test_create_saves_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let config = ServerConfig {
            store_path: Some(path.clone()),
            ..Default::default()
        };
        let app = router(Arc::new(AppState::with_store(config, MemoryStore::new())));

        let resp = app
            .oneshot(post_json("/api/items", json!({"name": "Tripod"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let saved = MemoryStore::load_json(&path).unwrap();
        assert_eq!(saved.get("kf-0001").unwrap().name, "Tripod");
    }

    #[tokio::test]
    async fn test_shelf_and_location_items() {
        let app = app();
        for body in [
            json!({"name": "Tripod", "shelfId": "ES-0001"}),
            json!({"name": "Light", "shelfId": "ES-0002"}),
            json!({"name": "Case", "locationId": "ub-0003"}),
        ] {
            let resp = app.clone().oneshot(post_json("/api/items", body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = app
            .clone()
            .oneshot(get("/api/shelves/es-0001/items"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["code"], "ES-0001");
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["name"], "Tripod");

        let resp = app
            .clone()
            .oneshot(get("/api/locations/0003/items"))
            .await
            .unwrap();
        let body = json_body(resp).await;
        assert_eq!(body["code"], "UB-0003");
        assert_eq!(body["items"][0]["code"], "kf-0003");

        let resp = app
            .clone()
            .oneshot(get("/api/shelves/es-0009/items"))
            .await
            .unwrap();
        assert_eq!(json_body(resp).await["items"], json!([]));

        let resp = app.oneshot(get("/api/shelves/rack/items")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unpadded_explicit_code_conflicts() {
        let app = app();
        let resp = app
            .clone()
            .oneshot(post_json("/api/items", json!({"code": "kf-5", "name": "A"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(json_body(resp).await["code"], "kf-0005");

        let resp = app
            .clone()
            .oneshot(post_json("/api/items", json!({"code": "kf-0005", "name": "B"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = app.oneshot(get("/api/items/next-code")).await.unwrap();
        assert_eq!(json_body(resp).await, json!({"code": "kf-0006"}));
    }

    #[tokio::test]
    async fn test_get_item_errors() {
        let resp = app().oneshot(get("/api/items/kf-0099")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app().oneshot(get("/api/items/kf-99")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_item_qr_png() {
        let resp = app().oneshot(get("/api/items/kf-0001/qr")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn test_summary_reports_rejected_tokens() {
        let resp = app()
            .oneshot(post_json(
                "/api/labels/summary",
                json!({"ranges": "1-10,15,abc,9-3"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["total"], 11);
        assert_eq!(body["summary"], "kf-0001-kf-0010, kf-0015");
        assert_eq!(body["rejected"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sizes_lists_presets() {
        let resp = app().oneshot(get("/api/labels/sizes")).await.unwrap();
        let body = json_body(resp).await;
        assert_eq!(body["presets"][0]["id"], "60x20");
        assert_eq!(body["custom"]["width"]["max"], 200.0);
    }

    #[tokio::test]
    async fn test_pdf_download() {
        let resp = app()
            .oneshot(post_json(
                "/api/labels/pdf",
                json!({"ranges": "1-3", "size": "70x25"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"labels-kf-0001-kf-0003.pdf\""
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_pdf_rejects_bad_ranges_unless_lenient() {
        let resp = app()
            .oneshot(post_json("/api/labels/pdf", json!({"ranges": "1-3,x"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app()
            .oneshot(post_json(
                "/api/labels/pdf",
                json!({"ranges": "1-3,x", "lenient": true}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_scan() {
        let resp = app()
            .oneshot(post_json(
                "/api/scan",
                json!({"payload": "https://kairoframe.lobo99.info/KF-0042"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["code"], "kf-0042");
        assert_eq!(body["item"], Value::Null);

        let resp = app()
            .oneshot(post_json("/api/scan", json!({"payload": "hello"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
