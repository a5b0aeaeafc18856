use chrono::Utc;
use futures::future::join_all;
use pulse_core::{Article, ArticleSnapshot, Classifier, Config, Error, FeedFetcher, FeedSource, Result};
use pulse_storage::CacheService;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::logging::Logger;
use crate::normalize::normalize_feed;

/// Fetches every configured source, merges the results and keeps the newest
/// ones in the shared article cache.
pub struct FeedAggregator {
    fetcher: Arc<dyn FeedFetcher>,
    sources: Vec<FeedSource>,
    classifier: Classifier,
    cache: Arc<CacheService>,
    limit: usize,
    logger: Logger,
}

impl FeedAggregator {
    pub fn new(config: &Config, fetcher: Arc<dyn FeedFetcher>, cache: Arc<CacheService>) -> Self {
        Self {
            fetcher,
            sources: config.sources.clone(),
            classifier: Classifier::new(config.keywords.clone()),
            cache,
            limit: config.list_capacity,
            logger: Logger::new().with_prefix("[feeds]".to_string()),
        }
    }

    /// Serves the cached list while it is fresh, refreshing otherwise.
    ///
    /// A failed refresh falls back to the previous snapshot when there is one.
    pub async fn get_articles(&self) -> Result<Arc<ArticleSnapshot>> {
        if let Some(snapshot) = self.cache.articles.fresh().await {
            return Ok(snapshot);
        }

        match self.refresh().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match self.cache.articles.latest().await {
                Some(previous) => {
                    self.logger
                        .warn(&format!("Refresh failed, serving previous snapshot: {}", e));
                    Ok(previous)
                }
                None => Err(e),
            },
        }
    }

    /// Runs one full fetch cycle and replaces the cached snapshot.
    ///
    /// Fails only when every source failed; the cache is left untouched then.
    pub async fn refresh(&self) -> Result<Arc<ArticleSnapshot>> {
        let now = Utc::now();

        let fetches = self.sources.iter().map(|source| async move {
            let result = self.fetcher.fetch_feed(source).await;
            (source, result)
        });
        let results = join_all(fetches).await;

        let total = results.len();
        let mut succeeded = 0;
        let mut articles = Vec::new();
        for (source, result) in results {
            match result {
                Ok(feed) => {
                    succeeded += 1;
                    articles.extend(normalize_feed(feed, source, &self.classifier, now));
                }
                Err(e) => self
                    .logger
                    .warn(&format!("Skipping {}: {}", source.endpoint, e)),
            }
        }

        if total > 0 && succeeded == 0 {
            self.logger.error(&format!("All {} feeds failed", total));
            return Err(Error::AllSourcesFailed { total });
        }

        let items = newest_first(articles, self.limit);
        let snapshot = self
            .cache
            .articles
            .replace(ArticleSnapshot::new(items, now))
            .await;

        self.logger.info(&format!(
            "Fetched {} articles from {}/{} feeds",
            snapshot.items.len(),
            succeeded,
            total
        ));
        Ok(snapshot)
    }

    /// Starts a background refresh. Failure is logged and otherwise ignored,
    /// so callers can go on serving immediately.
    pub fn prefetch(self: &Arc<Self>) -> JoinHandle<()> {
        let aggregator = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = aggregator.refresh().await {
                aggregator
                    .logger
                    .error(&format!("Initial fetch failed: {}", e));
            }
        })
    }
}

/// Stable sort by publication time, newest first, then truncate.
fn newest_first(mut articles: Vec<Article>, limit: usize) -> Vec<Article> {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles.truncate(limit);
    articles
}
