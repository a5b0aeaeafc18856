pub mod aggregator;
pub mod extractor;
pub mod logging;
pub mod normalize;
pub mod sources;

pub use aggregator::FeedAggregator;
pub use extractor::ContentExtractor;
pub use logging::{init_logging, Logger};
pub use sources::{DomSmoothieExtractor, HttpFeedFetcher, HttpPageFetcher};
