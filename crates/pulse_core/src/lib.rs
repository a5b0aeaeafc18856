pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod sanitize;
pub mod types;

pub use classify::{Classifier, KeywordTable};
pub use config::{Config, Locale};
pub use error::{Error, Result};
pub use fetch::{FeedFetcher, PageFetcher, ReadableExtractor};
pub use types::{Article, ArticleSnapshot, CategoryTag, ExtractedContent, FeedSource, Readable};
