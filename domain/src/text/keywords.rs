//! Keyword extraction for reference checks.

use super::normalize::normalize_for_comparison;

/// Words too common in discussion turns to signal a real reference.
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "because", "between", "could", "first", "there", "their", "would",
    "these", "those", "which", "where", "while", "should", "through", "being", "under", "over",
    "using", "topic", "theme", "question", "answer", "maybe", "might", "other", "great", "agree",
    "discuss",
];

/// Extract up to `max_keywords` keywords from `text`.
///
/// A keyword is an alphabetic token of the normalized text with at least
/// `min_length` characters that is not a stopword. Duplicates are dropped
/// and first-occurrence order is kept.
pub fn extract_keywords(text: &str, min_length: usize, max_keywords: usize) -> Vec<String> {
    let normalized = normalize_for_comparison(text);
    let mut keywords: Vec<String> = Vec::new();

    for word in normalized.split(' ') {
        if keywords.len() >= max_keywords {
            break;
        }
        if word.len() < min_length
            || !word.chars().all(|c| c.is_ascii_alphabetic())
            || STOPWORDS.contains(&word)
            || keywords.iter().any(|k| k == word)
        {
            continue;
        }
        keywords.push(word.to_string());
    }

    keywords
}

/// Whether any keyword occurs as a substring of the already-normalized text.
pub fn has_keyword_hit(normalized_text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| normalized_text.contains(kw.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filters_short_and_stopwords() {
        let kws = extract_keywords(
            "Because hybrid schedules reduce commuting, there would be savings.",
            5,
            12,
        );
        assert_eq!(kws, vec!["hybrid", "schedules", "reduce", "commuting", "savings"]);
    }

    #[test]
    fn test_extract_dedupes_in_first_occurrence_order() {
        let kws = extract_keywords("Latency latency LATENCY budgets latency", 5, 12);
        assert_eq!(kws, vec!["latency", "budgets"]);
    }

    #[test]
    fn test_extract_caps_count() {
        let text = "alpha bravo charlie delta echoes foxtrot golfer hotel";
        let kws = extract_keywords(text, 5, 3);
        assert_eq!(kws, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_extract_skips_numeric_tokens() {
        let kws = extract_keywords("2024 budget 12345 abc123 planning", 5, 12);
        assert_eq!(kws, vec!["budget", "planning"]);
    }

    #[test]
    fn test_keyword_hit_is_substring_match() {
        let kws = vec!["commut".to_string()];
        assert!(has_keyword_hit("long commutes hurt", &kws));
        assert!(!has_keyword_hit("short trips", &kws));
        assert!(!has_keyword_hit("anything", &[]));
    }
}
