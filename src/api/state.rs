use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::IndexHandle,
};

/// Shared application state
///
/// The index is published exactly once; until then every query gets
/// [`AppError::NotReady`].
#[derive(Clone)]
pub struct AppState {
    index: Arc<OnceCell<Arc<IndexHandle>>>,
    pub config: Arc<Config>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Creates state with no index published yet
    pub fn new(config: Config) -> Self {
        Self {
            index: Arc::new(OnceCell::new()),
            config: Arc::new(config),
        }
    }

    /// Creates state with an already built index
    pub fn with_index(config: Config, index: IndexHandle) -> Self {
        let state = Self::new(config);
        // a freshly created cell is always empty
        let _ = state.publish(index);
        state
    }

    /// Makes the index visible to handlers. Fails if one was already published.
    pub fn publish(&self, index: IndexHandle) -> AppResult<()> {
        self.index
            .set(Arc::new(index))
            .map_err(|_| AppError::Internal("recommendation index already published".to_string()))
    }

    pub fn index(&self) -> AppResult<Arc<IndexHandle>> {
        self.index.get().cloned().ok_or(AppError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.index.initialized()
    }

    /// Full poster URL for a catalog poster path
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.config.poster_base_url, poster_path)
    }
}
