//! HTTP handlers for the server.

pub mod items;
pub mod labels;
pub mod placements;
pub mod scan;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::{KairoError, StoreError};

/// Error returned from handlers, rendered as `{"success": false, "error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub KairoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KairoError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            KairoError::Store(StoreError::DuplicateCode(_)) => StatusCode::CONFLICT,
            KairoError::Range(_)
            | KairoError::Layout(_)
            | KairoError::Validation(_)
            | KairoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E: Into<KairoError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (
            status,
            Json(serde_json::json!({"success": false, "error": self.0.to_string()})),
        )
            .into_response()
    }
}

/// Map a join failure from `spawn_blocking` onto an internal error.
pub(crate) fn task_error(e: tokio::task::JoinError) -> ApiError {
    ApiError(KairoError::Io(std::io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;

    #[test]
    fn test_status_mapping() {
        let status = |e: KairoError| ApiError(e).status();
        assert_eq!(
            status(StoreError::NotFound("kf-0001".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(StoreError::DuplicateCode("kf-0001".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(status(RangeError::Empty.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(KairoError::Pdf("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
