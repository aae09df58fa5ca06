use std::path::PathBuf;

use crate::{error::AppResult, services::providers::CatalogProvider};

/// Reads the catalog from a local file
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FileCatalog {
    async fn fetch(&self) -> AppResult<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Read catalog file");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
