use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing URL")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Feed fetch failed for {endpoint}: HTTP {status}")]
    FeedFetch { endpoint: String, status: u16 },

    #[error("Feed parsing failed for {endpoint}: {reason}")]
    FeedParse { endpoint: String, reason: String },

    #[error("All {total} feed sources failed")]
    AllSourcesFailed { total: usize },

    #[error("Failed to fetch page: HTTP {status}")]
    PageFetch { status: u16 },

    #[error("No readable content found")]
    NoContent,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True when the caller supplied bad input, as opposed to an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingUrl | Error::InvalidUrl(_) | Error::UnknownCategory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::MissingUrl.is_client_error());
        assert!(Error::InvalidUrl("ftp://x".into()).is_client_error());
        assert!(Error::UnknownCategory("gaming".into()).is_client_error());
        assert!(!Error::NoContent.is_client_error());
        assert!(!Error::PageFetch { status: 404 }.is_client_error());
        assert!(!Error::AllSourcesFailed { total: 7 }.is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::PageFetch { status: 503 }.to_string(),
            "Failed to fetch page: HTTP 503"
        );
        assert_eq!(
            Error::AllSourcesFailed { total: 3 }.to_string(),
            "All 3 feed sources failed"
        );
    }
}
