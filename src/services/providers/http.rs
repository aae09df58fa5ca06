//! Remote catalog download
//!
//! Google Drive share links point at an HTML viewer page, so they are
//! rewritten to the direct download endpoint before fetching.

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    services::providers::CatalogProvider,
};

const DRIVE_SHARE_PREFIX: &str = "https://drive.google.com/file/d/";
const DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc?id=";

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http_client: HttpClient,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: download_url(url),
        }
    }

    fn load_error(&self, err: reqwest::Error) -> AppError {
        AppError::DataLoad(format!("{}: {}", self.url, err))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalog {
    async fn fetch(&self) -> AppResult<Vec<u8>> {
        tracing::info!(url = %self.url, "Downloading catalog");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| self.load_error(e))?;
        let bytes = response.bytes().await.map_err(|e| self.load_error(e))?;

        tracing::debug!(bytes = bytes.len(), "Catalog downloaded");
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Turns a Drive share link into a direct download URL, other URLs pass through
pub fn download_url(url: &str) -> String {
    url.strip_prefix(DRIVE_SHARE_PREFIX)
        .and_then(|rest| rest.split(['/', '?']).next())
        .filter(|file_id| {
            !file_id.is_empty()
                && file_id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
        .map(|file_id| format!("{}{}", DRIVE_DOWNLOAD_URL, file_id))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_share_link_is_rewritten() {
        let url = "https://drive.google.com/file/d/1d667eGYQ_CzH-ih/view?usp=drive_link";
        assert_eq!(
            download_url(url),
            "https://drive.google.com/uc?id=1d667eGYQ_CzH-ih"
        );
    }

    #[test]
    fn test_plain_url_passes_through() {
        let url = "https://example.com/catalog/films.tsv";
        assert_eq!(download_url(url), url);
        assert_eq!(HttpCatalog::new(url).describe(), url);
    }

    #[test]
    fn test_drive_link_without_id_passes_through() {
        let url = "https://drive.google.com/file/d//view";
        assert_eq!(download_url(url), url);
    }

    #[tokio::test]
    async fn test_unreachable_url_is_data_load_error() {
        let catalog = HttpCatalog::new("http://127.0.0.1:1/films.tsv");
        match catalog.fetch().await {
            Err(AppError::DataLoad(msg)) => assert!(msg.starts_with("http://127.0.0.1:1/films.tsv: ")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
