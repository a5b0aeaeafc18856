use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts author names from JSON-LD metadata in the HTML document.
pub fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors = Vec::new();

    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            let text = script.text().collect::<String>();
            let Ok(json) = serde_json::from_str::<Value>(text.trim()) else {
                continue;
            };
            // Pages publish either a single object or a list of them.
            let nodes = match json {
                Value::Array(items) => items,
                other => vec![other],
            };
            for node in &nodes {
                if let Some(author) = node.get("author") {
                    collect_names(author, &mut authors);
                }
            }
        }
    }

    authors.dedup();
    authors
}

fn collect_names(author: &Value, out: &mut Vec<String>) {
    match author {
        Value::Array(arr) => arr.iter().for_each(|a| collect_names(a, out)),
        Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(|n| n.as_str()) {
                push_trimmed(name, out);
            }
        }
        Value::String(s) => push_trimmed(s, out),
        _ => {}
    }
}

fn push_trimmed(name: &str, out: &mut Vec<String>) {
    let name = name.trim();
    if !name.is_empty() {
        out.push(name.to_string());
    }
}

/// Comma-joined JSON-LD authors of a raw page, if it declares any.
pub fn byline(html: &str) -> Option<String> {
    let authors = extract_authors(&Html::parse_document(html));
    if authors.is_empty() {
        None
    } else {
        Some(authors.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_and_array_authors() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type":"NewsArticle","author":[{"name":" Ada "},{"name":"Linus"}]}</script>
        </head><body></body></html>"#;
        assert_eq!(byline(html).as_deref(), Some("Ada, Linus"));
    }

    #[test]
    fn test_graph_list_and_string_author() {
        let html = r#"<script type="application/ld+json">[{"@type":"WebPage"},{"author":"Grace Hopper"}]</script>"#;
        assert_eq!(byline(html).as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn test_no_metadata() {
        assert_eq!(byline("<p>nothing</p>"), None);
        assert_eq!(
            byline(r#"<script type="application/ld+json">not json</script>"#),
            None
        );
    }
}
