use pulse_core::Config;

pub mod backends;

pub use backends::*;

/// Process-wide cache state, built once and shared by both pipelines.
pub struct CacheService {
    pub articles: ArticleListCache,
    pub extractions: ExtractionCache,
}

impl CacheService {
    pub fn new(config: &Config) -> Self {
        Self {
            articles: ArticleListCache::new(config.list_ttl),
            extractions: ExtractionCache::new(config.content_ttl, config.content_capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_service_from_config() {
        let config = Config::default();
        let cache = CacheService::new(&config);
        assert_eq!(cache.articles.ttl(), config.list_ttl);
        assert_eq!(cache.articles.len().await, 0);
        assert_eq!(cache.extractions.len().await, 0);
    }
}
