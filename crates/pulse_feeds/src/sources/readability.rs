use dom_smoothie::{Config as ReadabilityConfig, Readability};
use pulse_core::{Readable, ReadableExtractor};

const MAX_ELEMENTS: usize = 9000;

/// Readability-style scoring backed by dom_smoothie.
#[derive(Debug, Clone)]
pub struct DomSmoothieExtractor {
    max_elements: usize,
}

impl DomSmoothieExtractor {
    pub fn new() -> Self {
        Self {
            max_elements: MAX_ELEMENTS,
        }
    }
}

impl Default for DomSmoothieExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadableExtractor for DomSmoothieExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Option<Readable> {
        let cfg = ReadabilityConfig {
            max_elements_to_parse: self.max_elements,
            ..Default::default()
        };

        let mut readability = Readability::new(html, Some(base_url), Some(cfg)).ok()?;
        let article = readability.parse().ok()?;

        let content_html = article.content.to_string();
        if content_html.trim().is_empty() {
            return None;
        }

        Some(Readable {
            title: Some(article.title.trim().to_string()).filter(|t| !t.is_empty()),
            content_html,
            excerpt: article.excerpt,
            byline: article.byline,
            length: article.length,
        })
    }
}
