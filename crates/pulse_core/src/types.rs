use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Closed set of topics an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Ai,
    Security,
    Webdev,
    Hardware,
    Startups,
}

impl CategoryTag {
    /// Scoring order used by the classifier. Earlier tags win ties.
    pub const ALL: [CategoryTag; 5] = [
        CategoryTag::Ai,
        CategoryTag::Security,
        CategoryTag::Webdev,
        CategoryTag::Hardware,
        CategoryTag::Startups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::Ai => "ai",
            CategoryTag::Security => "security",
            CategoryTag::Webdev => "webdev",
            CategoryTag::Hardware => "hardware",
            CategoryTag::Startups => "startups",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A configured feed endpoint and the category its entries fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    pub endpoint: String,
    pub default_category: CategoryTag,
}

impl FeedSource {
    pub fn new(endpoint: impl Into<String>, default_category: CategoryTag) -> Self {
        Self {
            endpoint: endpoint.into(),
            default_category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    pub link: String,
    pub image: Option<String>,
    #[serde(serialize_with = "iso8601")]
    pub published_at: DateTime<Utc>,
    pub author: Option<String>,
    pub source_name: String,
    pub category: CategoryTag,
}

/// One complete result of a refresh cycle. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSnapshot {
    pub items: Vec<Article>,
    #[serde(serialize_with = "iso8601")]
    pub fetched_at: DateTime<Utc>,
}

impl ArticleSnapshot {
    pub fn new(items: Vec<Article>, fetched_at: DateTime<Utc>) -> Self {
        Self { items, fetched_at }
    }
}

/// Readable body of an article page, already sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub content: String,
    pub excerpt: Option<String>,
    pub byline: Option<String>,
    pub length: usize,
}

/// Raw output of a readability pass, before sanitizing.
#[derive(Debug, Clone, Default)]
pub struct Readable {
    pub title: Option<String>,
    pub content_html: String,
    pub excerpt: Option<String>,
    pub byline: Option<String>,
    pub length: usize,
}

fn iso8601<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_category_round_trip_names() {
        for tag in CategoryTag::ALL {
            assert_eq!(tag.as_str().parse::<CategoryTag>().unwrap(), tag);
        }
        assert_eq!("  WebDev ".parse::<CategoryTag>().unwrap(), CategoryTag::Webdev);
        assert!("sports".parse::<CategoryTag>().is_err());
    }

    #[test]
    fn test_article_json_shape() {
        let article = Article {
            title: "Chip news".to_string(),
            description: "desc".to_string(),
            content: "<p>body</p>".to_string(),
            link: "#".to_string(),
            image: None,
            published_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            author: None,
            source_name: "Unknown".to_string(),
            category: CategoryTag::Hardware,
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["publishedAt"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["sourceName"], "Unknown");
        assert_eq!(json["category"], "hardware");
        assert!(json["image"].is_null());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(ArticleSnapshot::new(vec![], at)).unwrap();
        assert_eq!(json["fetchedAt"], "2024-05-01T12:00:00.000Z");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
