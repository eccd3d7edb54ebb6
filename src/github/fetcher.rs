use async_trait::async_trait;

use crate::error::Result;
use crate::models::Contributor;

/// One page of the contributors listing.
#[derive(Debug, Clone)]
pub struct Page {
    pub contributors: Vec<Contributor>,
    /// Raw `Link` response header, if the server sent one.
    pub link: Option<String>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Page>;
}
