pub mod memory;

pub use memory::{ArticleListCache, CachedExtraction, ExtractionCache};
