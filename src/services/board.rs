//! Board page fetching.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::utils::http::fetch_text;

/// Source of the board list markup.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// URL the markup is read from, for logging.
    fn url(&self) -> &str;

    /// Retrieve the raw board list markup.
    async fn fetch_board(&self) -> Result<String>;
}

/// Fetches the board list page over HTTP with a single GET.
pub struct BoardFetcher {
    client: Client,
    url: String,
}

impl BoardFetcher {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl BoardSource for BoardFetcher {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_board(&self) -> Result<String> {
        log::debug!("GET {}", self.url);
        let html = fetch_text(&self.client, &self.url).await?;
        log::debug!("Fetched {} bytes from {}", html.len(), self.url);
        Ok(html)
    }
}
