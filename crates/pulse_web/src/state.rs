use pulse_feeds::{ContentExtractor, FeedAggregator};
use pulse_storage::CacheService;
use std::sync::Arc;

pub struct AppState {
    pub aggregator: Arc<FeedAggregator>,
    pub extractor: Arc<ContentExtractor>,
    pub cache: Arc<CacheService>,
}
