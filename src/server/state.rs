//! Server state and configuration.

use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::LabelSettings;
use crate::error::KairoError;
use crate::store::MemoryStore;

/// Server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// JSON file the store is loaded from and saved to; `None` keeps items
    /// in memory only.
    pub store_path: Option<PathBuf>,
    /// Label rendering options
    pub labels: LabelSettings,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub store: RwLock<MemoryStore>,
}

impl AppState {
    /// Build state, loading the store file if one is configured.
    pub fn new(config: ServerConfig) -> Result<Self, KairoError> {
        let store = match &config.store_path {
            Some(path) => MemoryStore::load_json(path)?,
            None => MemoryStore::new(),
        };
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: ServerConfig, store: MemoryStore) -> Self {
        Self {
            config,
            store: RwLock::new(store),
        }
    }

    /// Write the store back to disk, if persistence is configured.
    ///
    /// The snapshot is taken under the caller's lock; the file write runs on
    /// the blocking pool.
    pub async fn persist(&self, store: &MemoryStore) -> Result<(), KairoError> {
        let Some(path) = self.config.store_path.clone() else {
            return Ok(());
        };
        let bytes = store.to_json_bytes()?;
        let items = store.len();

        tokio::task::spawn_blocking(move || std::fs::write(&path, bytes))
            .await
            .map_err(std::io::Error::other)??;
        debug!(items, "saved store");
        Ok(())
    }
}
