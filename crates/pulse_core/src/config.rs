use std::time::Duration;

use crate::classify::KeywordTable;
use crate::types::{CategoryTag, FeedSource};

pub const USER_AGENT: &str = "TechPulse/1.0";

/// Feed and keyword set. Locales differ only in data, never in behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Locale {
    #[default]
    En,
    De,
}

const EN_SOURCES: &[(&str, CategoryTag)] = &[
    ("https://feeds.arstechnica.com/arstechnica/technology-lab", CategoryTag::Hardware),
    ("https://www.theverge.com/rss/index.xml", CategoryTag::Hardware),
    ("https://techcrunch.com/feed/", CategoryTag::Startups),
    ("https://feeds.feedburner.com/TheHackersNews", CategoryTag::Security),
    ("https://www.wired.com/feed/tag/ai/latest/rss", CategoryTag::Ai),
    ("https://dev.to/feed", CategoryTag::Webdev),
    ("https://hnrss.org/frontpage", CategoryTag::Webdev),
];

const DE_SOURCES: &[(&str, CategoryTag)] = &[
    ("https://www.heise.de/rss/heise-atom.xml", CategoryTag::Hardware),
    ("https://rss.golem.de/rss.php?feed=RSS2.0", CategoryTag::Hardware),
    ("https://t3n.de/rss.xml", CategoryTag::Startups),
    ("https://www.heise.de/security/rss/news-atom.xml", CategoryTag::Security),
    ("https://netzpolitik.org/feed/", CategoryTag::Security),
    ("https://www.heise.de/developer/rss/news-atom.xml", CategoryTag::Webdev),
];

const EN_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (
        CategoryTag::Ai,
        &[
            "ai", "artificial intelligence", "machine learning", "llm", "gpt", "neural",
            "deep learning", "chatbot", "openai", "anthropic", "gemini", "copilot",
        ],
    ),
    (
        CategoryTag::Security,
        &[
            "security", "hack", "breach", "vulnerability", "malware", "ransomware", "cyber",
            "phishing", "encryption", "passkey", "zero-day", "privacy",
        ],
    ),
    (
        CategoryTag::Webdev,
        &[
            "javascript", "typescript", "react", "vue", "angular", "node", "css", "html",
            "web dev", "frontend", "backend", "api", "framework", "rust", "go ", "python",
            "developer",
        ],
    ),
    (
        CategoryTag::Hardware,
        &[
            "chip", "processor", "quantum", "gpu", "cpu", "apple", "samsung", "nvidia", "amd",
            "intel", "hardware", "device", "phone", "laptop", "robot",
        ],
    ),
    (
        CategoryTag::Startups,
        &[
            "startup", "funding", "venture", "vc", "acquisition", "ipo", "valuation",
            "series a", "seed round", "unicorn",
        ],
    ),
];

const DE_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (
        CategoryTag::Ai,
        &[
            "künstliche intelligenz", " ki ", "ki-", "maschinelles lernen", "sprachmodell",
            "llm", "gpt", "neuronal", "chatbot", "openai", "anthropic", "gemini", "copilot",
        ],
    ),
    (
        CategoryTag::Security,
        &[
            "sicherheit", "hacker", "angriff", "datenleck", "schwachstelle", "malware",
            "ransomware", "cyber", "phishing", "verschlüsselung", "datenschutz", "zero-day",
        ],
    ),
    (
        CategoryTag::Webdev,
        &[
            "javascript", "typescript", "react", "vue", "angular", "node", "css", "html",
            "webentwicklung", "frontend", "backend", "api", "framework", "rust", "python",
            "entwickler", "programmier",
        ],
    ),
    (
        CategoryTag::Hardware,
        &[
            "chip", "prozessor", "quanten", "gpu", "cpu", "apple", "samsung", "nvidia", "amd",
            "intel", "hardware", "gerät", "smartphone", "notebook", "roboter",
        ],
    ),
    (
        CategoryTag::Startups,
        &[
            "startup", "start-up", "finanzierung", "investor", "risikokapital", "übernahme",
            "börsengang", "bewertung", "finanzierungsrunde", "gründer", "unicorn",
        ],
    ),
];

impl Locale {
    pub fn sources(&self) -> Vec<FeedSource> {
        let table = match self {
            Locale::En => EN_SOURCES,
            Locale::De => DE_SOURCES,
        };
        table
            .iter()
            .map(|(endpoint, category)| FeedSource::new(*endpoint, *category))
            .collect()
    }

    pub fn keywords(&self) -> KeywordTable {
        match self {
            Locale::En => KeywordTable::from_static(EN_KEYWORDS),
            Locale::De => KeywordTable::from_static(DE_KEYWORDS),
        }
    }
}

/// Everything the pipelines read at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    pub sources: Vec<FeedSource>,
    pub keywords: KeywordTable,
    pub list_ttl: Duration,
    pub content_ttl: Duration,
    pub list_capacity: usize,
    pub content_capacity: usize,
    pub feed_timeout: Duration,
    pub page_timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            sources: locale.sources(),
            keywords: locale.keywords(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Locale::En.sources(),
            keywords: Locale::En.keywords(),
            list_ttl: Duration::from_secs(10 * 60),
            content_ttl: Duration::from_secs(30 * 60),
            list_capacity: 50,
            content_capacity: 100,
            feed_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(15),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 7);
        assert_eq!(config.list_ttl, Duration::from_secs(600));
        assert_eq!(config.content_ttl, Duration::from_secs(1800));
        assert_eq!(config.list_capacity, 50);
        assert_eq!(config.content_capacity, 100);
    }

    #[test]
    fn test_keyword_tables_cover_every_category_in_order() {
        for locale in [Locale::En, Locale::De] {
            let tags: Vec<_> = locale.keywords().entries().iter().map(|(t, _)| *t).collect();
            assert_eq!(tags, CategoryTag::ALL.to_vec());
        }
    }

    #[test]
    fn test_german_locale() {
        let config = Config::for_locale(Locale::De);
        assert!(config.sources.iter().all(|s| s.endpoint.starts_with("https://")));
        assert_eq!(config.list_capacity, 50);
    }
}
