//! Text-level HTML cleanup shared by the feed and extraction pipelines.
//!
//! This is a markup filter, not a security boundary: attributes on allowed
//! elements are kept verbatim.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Maximum length of an article description, in characters.
pub const DESCRIPTION_LIMIT: usize = 200;

const ALLOWED_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "img", "ul", "ol", "li", "blockquote", "em",
    "strong", "code", "pre", "br", "figure", "figcaption",
];

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap();
    static ref IMG_TAG: Regex = Regex::new(r"(?i)<img\b[^>]*>").unwrap();
    static ref PIXEL_DIMENSION: Regex =
        Regex::new(r#"(?i)\s(?:width|height)\s*=\s*(?:"1"|'1'|1(?:[\s/>]|$))"#).unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&#?[a-zA-Z0-9]+;").unwrap();
    static ref IMG_SRC: Regex = Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).unwrap();
}

/// Reduces arbitrary HTML to the allow-listed tag set.
///
/// Passes are repeated until the output stops changing, so removing one
/// construct can never leave behind a new one and the result is idempotent.
pub fn sanitize(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_pass(html: &str) -> String {
    let cleaned = SCRIPT_BLOCK.replace_all(html, "");
    let cleaned = STYLE_BLOCK.replace_all(&cleaned, "");
    let cleaned = IMG_TAG.replace_all(&cleaned, |caps: &Captures| {
        if PIXEL_DIMENSION.is_match(&caps[0]) {
            String::new()
        } else {
            caps[0].to_string()
        }
    });
    let cleaned = ANY_TAG.replace_all(&cleaned, |caps: &Captures| {
        if is_allowed(&caps[0]) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    cleaned.trim().to_string()
}

fn is_allowed(tag: &str) -> bool {
    let inner = tag.trim_start_matches('<');
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    ALLOWED_TAGS.contains(&name.as_str())
}

/// Drops every tag and replaces each entity with a single space.
pub fn strip_to_text(html: &str) -> String {
    let text = ANY_TAG.replace_all(html, "");
    ENTITY.replace_all(&text, " ").trim().to_string()
}

/// Plain-text description capped at [`DESCRIPTION_LIMIT`] characters.
pub fn description(html: &str) -> String {
    strip_to_text(html).chars().take(DESCRIPTION_LIMIT).collect()
}

/// `src` of the first `<img>` in the markup, if any.
pub fn first_image_src(html: &str) -> Option<String> {
    IMG_SRC.captures(html).map(|caps| caps[1].to_string())
}
