//! Catalog source abstraction
//!
//! The recommendation index is built from raw tab-delimited bytes. Where those
//! bytes come from (local file, remote download) is decided by the configured
//! provider, so index construction never touches the filesystem or network itself.

use std::sync::Arc;

use crate::error::AppResult;

pub mod file;
pub mod http;

pub use file::FileCatalog;
pub use http::HttpCatalog;

/// Trait for catalog data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the whole catalog as raw bytes
    async fn fetch(&self) -> AppResult<Vec<u8>>;

    /// Human-readable location for logging
    fn describe(&self) -> String;
}

/// Picks a provider for a configured catalog source
///
/// `http://` and `https://` sources are downloaded, anything else is read as a path.
pub fn from_source(source: &str) -> Arc<dyn CatalogProvider> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Arc::new(HttpCatalog::new(source))
    } else {
        Arc::new(FileCatalog::new(source))
    }
}
