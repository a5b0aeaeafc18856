use pulse_core::sanitize::sanitize;
use pulse_core::{Error, ExtractedContent, PageFetcher, ReadableExtractor, Result};
use pulse_storage::CacheService;
use std::sync::Arc;
use url::Url;

use crate::logging::Logger;
use crate::sources::jsonld;

/// Fetches an article page on demand and returns its readable body.
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    readability: Arc<dyn ReadableExtractor>,
    cache: Arc<CacheService>,
    logger: Logger,
}

impl ContentExtractor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        readability: Arc<dyn ReadableExtractor>,
        cache: Arc<CacheService>,
    ) -> Self {
        Self {
            fetcher,
            readability,
            cache,
            logger: Logger::new().with_prefix("[content]".to_string()),
        }
    }

    pub async fn extract_content(&self, url: &str) -> Result<ExtractedContent> {
        let url = validate_url(url)?;

        if let Some(cached) = self.cache.extractions.get_fresh(&url).await {
            self.logger.debug(&format!("Cache hit for {}", url));
            return Ok(cached);
        }

        let html = self.fetcher.fetch_page(&url).await.map_err(|e| {
            self.logger.warn(&format!("Fetching {} failed: {}", url, e));
            e
        })?;
        let extracted = self.readable_content(&html, &url)?;

        self.cache.extractions.insert(&url, extracted.clone()).await;
        self.logger.debug(&format!(
            "Extracted {} characters from {}",
            extracted.length, url
        ));
        Ok(extracted)
    }

    fn readable_content(&self, html: &str, url: &str) -> Result<ExtractedContent> {
        let readable = self
            .readability
            .extract(html, url)
            .ok_or(Error::NoContent)?;

        let content = sanitize(&readable.content_html);
        if content.is_empty() {
            return Err(Error::NoContent);
        }

        let byline = readable
            .byline
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .or_else(|| jsonld::byline(html));

        Ok(ExtractedContent {
            title: readable.title,
            content,
            excerpt: readable.excerpt,
            byline,
            length: readable.length,
        })
    }
}

/// Only absolute http(s) URLs are accepted.
fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::MissingUrl);
    }
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(Error::InvalidUrl(format!("unsupported scheme: {}", scheme))),
    }
}
