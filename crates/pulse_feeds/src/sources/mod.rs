pub mod http;
pub mod jsonld;
pub mod readability;

pub use http::{HttpFeedFetcher, HttpPageFetcher};
pub use readability::DomSmoothieExtractor;
