use async_trait::async_trait;

use crate::types::{FeedSource, Readable};
use crate::Result;

/// Fetches one feed endpoint and parses it into a feed document.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch_feed(&self, source: &FeedSource) -> Result<feed_rs::model::Feed>;
}

/// Fetches the raw markup of an article page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Isolates the main readable block of a page. `None` when nothing qualifies.
pub trait ReadableExtractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &str) -> Option<Readable>;
}
