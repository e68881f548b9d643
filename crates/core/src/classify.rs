//! Genre and structure classification of an article.

use crate::config::Dictionaries;
use crate::context::{ContentContext, Genre};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// A second-level heading: exactly two `#` followed by whitespace.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+)$").unwrap());

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

const CONCLUSION_MARKERS: &[&str] = &["conclusion", "summary", "final thoughts"];

/// The first `chars` characters of `text`, cut at a character boundary.
fn leading_chars(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Detect the genre from the title and the start of the body.
///
/// Patterns are tried in configured order; a pattern matching either the
/// title or the body window decides. No match yields [`Genre::General`].
pub fn detect_genre(title: &str, body: &str, dictionaries: &Dictionaries) -> Genre {
    let window = leading_chars(body, dictionaries.config().genre_window);

    dictionaries
        .genres()
        .iter()
        .find(|(_, pattern)| pattern.is_match(title) || pattern.is_match(window))
        .map(|(genre, _)| *genre)
        .unwrap_or(Genre::General)
}

/// Every second-level heading text, trimmed, in document order.
pub fn extract_sections(body: &str) -> Vec<String> {
    HEADING
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Text before the first heading, and text from the last heading onward.
///
/// Without headings both are the whole body.
fn leading_and_trailing(body: &str) -> (&str, &str) {
    let mut headings = HEADING.find_iter(body);
    let Some(first) = headings.next() else {
        return (body, body);
    };
    let last = headings.last().unwrap_or(first);

    (&body[..first.start()], &body[last.start()..])
}

/// Headings first, then bold spans; trimmed, deduplicated, first appearance kept.
fn extract_topics(body: &str, sections: &[String]) -> Vec<String> {
    let bold = BOLD
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let mut seen = HashSet::new();
    sections
        .iter()
        .cloned()
        .chain(bold)
        .filter(|topic| !topic.is_empty() && seen.insert(topic.clone()))
        .collect()
}

/// Classify genre and structure of an article.
pub fn classify_content_with(title: &str, body: &str, dictionaries: &Dictionaries) -> ContentContext {
    let genre = detect_genre(title, body, dictionaries);
    let sections = extract_sections(body);
    let (leading, trailing) = leading_and_trailing(body);

    let has_introduction = leading.to_lowercase().contains("introduction")
        || leading.chars().count() > dictionaries.config().introduction_min_chars;

    let trailing = trailing.to_lowercase();
    let has_conclusion = CONCLUSION_MARKERS.iter().any(|marker| trailing.contains(marker));

    let topics = extract_topics(body, &sections);

    tracing::trace!(%genre, sections = sections.len(), has_introduction, has_conclusion, "content classified");

    ContentContext { genre, has_introduction, has_conclusion, sections, topics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalyzerConfig, GenrePattern};
    use rstest::rstest;

    fn classify(title: &str, body: &str) -> ContentContext {
        classify_content_with(title, body, &Dictionaries::default())
    }

    #[rstest]
    #[case("How to build a CLI in Rust", "", Genre::Tutorial)]
    #[case("Understanding lifetimes", "", Genre::Conceptual)]
    #[case("Why I stopped using ORMs", "", Genre::Opinion)]
    #[case("What do you use for logging?", "", Genre::Discussion)]
    #[case("Weekly notes", "Nothing in particular.", Genre::General)]
    #[case("Weekly notes", "In this tutorial we set things up.", Genre::Tutorial)]
    fn test_detect_genre(#[case] title: &str, #[case] body: &str, #[case] expected: Genre) {
        assert_eq!(detect_genre(title, body, &Dictionaries::default()), expected);
    }

    #[test]
    fn test_genre_tie_break_follows_declared_order() {
        // Matches both tutorial and opinion; tutorial is declared first.
        assert_eq!(classify("Why I wrote this tutorial", "").genre, Genre::Tutorial);

        let config = AnalyzerConfig::builder()
            .genre_patterns(vec![
                GenrePattern { genre: Genre::Opinion, pattern: r"\bwhy i\b".to_string() },
                GenrePattern { genre: Genre::Tutorial, pattern: r"\btutorial\b".to_string() },
            ])
            .build();
        let dictionaries = Dictionaries::compile(&config).unwrap();
        assert_eq!(detect_genre("Why I wrote this tutorial", "", &dictionaries), Genre::Opinion);
    }

    #[test]
    fn test_genre_only_reads_body_window() {
        let body = format!("{}this is a tutorial", "x".repeat(500));
        assert_eq!(classify("Notes", &body).genre, Genre::General);

        let body = format!("{}this is a tutorial", "x".repeat(400));
        assert_eq!(classify("Notes", &body).genre, Genre::Tutorial);
    }

    #[test]
    fn test_leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("héllo", 2), "hé");
        assert_eq!(leading_chars("abc", 10), "abc");
    }

    #[test]
    fn test_sections_only_second_level() {
        let body = "# Title\n## First \n### Nested\n##Tight\n## Second\n#### Deep";
        assert_eq!(extract_sections(body), vec!["First", "Second"]);
    }

    #[test]
    fn test_introduction_by_keyword() {
        let ctx = classify("T", "A short introduction.\n## Body\ntext");
        assert!(ctx.has_introduction);
    }

    #[test]
    fn test_introduction_by_length() {
        let body = format!("{}\n## Body\ntext", "a".repeat(201));
        assert!(classify("T", &body).has_introduction);

        let body = format!("{}\n## Body\ntext", "a".repeat(150));
        assert!(!classify("T", &body).has_introduction);
    }

    #[rstest]
    #[case("## Setup\nx\n## Conclusion\nDone.", true)]
    #[case("## Setup\nx\n## Wrap up\nIn summary, it works.", true)]
    #[case("## Setup\nx\n## Wrap up\nSome final thoughts.", true)]
    #[case("## Conclusion\nx\n## Appendix\nLinks.", false)]
    fn test_conclusion_after_last_heading(#[case] body: &str, #[case] expected: bool) {
        assert_eq!(classify("T", body).has_conclusion, expected);
    }

    #[test]
    fn test_no_headings_uses_whole_body() {
        let ctx = classify("T", "Introduction and conclusion in one paragraph.");
        assert!(ctx.has_introduction);
        assert!(ctx.has_conclusion);
        assert!(ctx.sections.is_empty());
    }

    #[test]
    fn test_topics_union_headings_then_bold() {
        let body = "Use **ownership** well.\n## Ownership\nThe **borrow checker** and **ownership**.\n## Borrowing\n** Borrowing **";
        let ctx = classify("T", body);
        assert_eq!(ctx.sections, vec!["Ownership", "Borrowing"]);
        assert_eq!(ctx.topics, vec!["Ownership", "Borrowing", "ownership", "borrow checker"]);
    }

    #[test]
    fn test_empty_body() {
        let ctx = classify("", "");
        assert_eq!(ctx.genre, Genre::General);
        assert!(!ctx.has_introduction);
        assert!(!ctx.has_conclusion);
        assert!(ctx.sections.is_empty());
        assert!(ctx.topics.is_empty());
    }
}
