use crate::types::CategoryTag;

/// Ordered keyword lists, one per category. Order decides ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(CategoryTag, Vec<String>)>,
}

impl KeywordTable {
    pub fn new(entries: Vec<(CategoryTag, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(tag, words)| {
                let words = words.into_iter().map(|w| w.to_lowercase()).collect();
                (tag, words)
            })
            .collect();
        Self { entries }
    }

    pub fn from_static(entries: &[(CategoryTag, &[&str])]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|(tag, words)| (*tag, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[(CategoryTag, Vec<String>)] {
        &self.entries
    }
}

/// Keyword-count classifier. Stateless apart from its table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: KeywordTable,
}

impl Classifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, title: &str, body: &str, fallback: CategoryTag) -> CategoryTag {
        let text = format!("{} {}", title, body).to_lowercase();

        let mut best = fallback;
        let mut best_score = 0;
        for (tag, keywords) in self.table.entries() {
            let score = keywords
                .iter()
                .filter(|kw| text.contains(kw.as_str()))
                .count();
            if score > best_score {
                best_score = score;
                best = *tag;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;

    fn english() -> Classifier {
        Classifier::new(Locale::En.keywords())
    }

    #[test]
    fn test_single_keyword_beats_fallback() {
        let classifier = english();
        assert_eq!(
            classifier.classify("", "breach", CategoryTag::Hardware),
            CategoryTag::Security
        );
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let classifier = english();
        assert_eq!(
            classifier.classify("", "", CategoryTag::Startups),
            CategoryTag::Startups
        );
    }

    #[test]
    fn test_repeats_count_once() {
        let classifier = english();
        // "funding funding funding" is one startups keyword; "gpu" + "nvidia" is two hardware keywords.
        assert_eq!(
            classifier.classify("Funding funding funding", "Nvidia GPU", CategoryTag::Webdev),
            CategoryTag::Hardware
        );
    }

    #[test]
    fn test_tie_keeps_earlier_category() {
        let table = KeywordTable::from_static(&[
            (CategoryTag::Security, &["alpha"]),
            (CategoryTag::Hardware, &["beta"]),
        ]);
        let classifier = Classifier::new(table);
        assert_eq!(
            classifier.classify("alpha beta", "", CategoryTag::Ai),
            CategoryTag::Security
        );
    }

    #[test]
    fn test_case_insensitive_and_deterministic() {
        let classifier = english();
        let first = classifier.classify("RANSOMWARE hits", "Phishing wave", CategoryTag::Ai);
        for _ in 0..10 {
            assert_eq!(
                classifier.classify("RANSOMWARE hits", "Phishing wave", CategoryTag::Ai),
                first
            );
        }
        assert_eq!(first, CategoryTag::Security);
    }

    #[test]
    fn test_german_table() {
        let classifier = Classifier::new(Locale::De.keywords());
        assert_eq!(
            classifier.classify("Neue Sicherheitslücke", "", CategoryTag::Hardware),
            CategoryTag::Security
        );
    }
}
