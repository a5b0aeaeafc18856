//! Maps parsed feed entries onto [`Article`].

use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed};
use pulse_core::sanitize::{self, description, first_image_src, strip_to_text};
use pulse_core::{Article, Classifier, FeedSource};

const UNTITLED: &str = "Untitled";
const UNKNOWN_SOURCE: &str = "Unknown";
const NO_LINK: &str = "#";

pub fn normalize_feed(
    feed: Feed,
    source: &FeedSource,
    classifier: &Classifier,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let source_name = feed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

    feed.entries
        .into_iter()
        .map(|entry| normalize_entry(entry, &source_name, source, classifier, now))
        .collect()
}

fn normalize_entry(
    entry: Entry,
    source_name: &str,
    source: &FeedSource,
    classifier: &Classifier,
    now: DateTime<Utc>,
) -> Article {
    let body = richest_body(&entry);
    let raw_title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    let category = classifier.classify(&raw_title, &strip_to_text(&body), source.default_category);
    let image = enclosure_url(&entry).or_else(|| first_image_src(&body));

    Article {
        title: if raw_title.is_empty() {
            UNTITLED.to_string()
        } else {
            raw_title
        },
        description: description(&body),
        content: sanitize::sanitize(&body),
        link: select_link(&entry).unwrap_or_else(|| NO_LINK.to_string()),
        image,
        published_at: entry.published.or(entry.updated).unwrap_or(now),
        author: entry
            .authors
            .first()
            .map(|p| p.name.trim().to_string())
            .filter(|n| !n.is_empty()),
        source_name: source_name.to_string(),
        category,
    }
}

/// Full content when present, otherwise the summary.
fn richest_body(entry: &Entry) -> String {
    entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .filter(|b| !b.trim().is_empty())
        .or_else(|| entry.summary.as_ref().map(|s| s.content.clone()))
        .unwrap_or_default()
}

fn enclosure_url(entry: &Entry) -> Option<String> {
    let from_media = entry.media.iter().find_map(|media| {
        media
            .content
            .iter()
            .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
            .or_else(|| media.thumbnails.first().map(|t| t.image.uri.clone()))
    });
    from_media.or_else(|| {
        entry
            .links
            .iter()
            .find(|l| {
                l.rel
                    .as_deref()
                    .is_some_and(|rel| rel.eq_ignore_ascii_case("enclosure"))
            })
            .map(|l| l.href.clone())
    })
}

fn select_link(entry: &Entry) -> Option<String> {
    let alternate = entry.links.iter().find(|l| {
        !l.href.trim().is_empty()
            && l
                .rel
                .as_deref()
                .map_or(true, |rel| rel.eq_ignore_ascii_case("alternate"))
    });
    if let Some(link) = alternate {
        return Some(link.href.trim().to_string());
    }
    let id = entry.id.trim();
    if id.starts_with("http://") || id.starts_with("https://") {
        return Some(id.to_string());
    }
    None
}
