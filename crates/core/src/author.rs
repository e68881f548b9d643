//! Author expertise and credibility from their article history.

use crate::config::Dictionaries;
use crate::context::AuthorContext;
use crate::model::{Article, User};
use std::collections::HashMap;

/// Most frequent tags across `articles`, at most `limit` of them.
///
/// Ties keep the order in which tags were first encountered.
pub fn expertise_tags(articles: &[Article], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in articles.iter().flat_map(|a| a.tags.iter()) {
        match index.get(tag.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(tag.as_str(), counts.len());
                counts.push((tag.as_str(), 1));
            }
        }
    }

    // Stable sort keeps first-encounter order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(tag, _)| tag.to_string()).collect()
}

/// Mean reaction count, rounded to the nearest integer; 0 for no articles.
pub fn calculate_average_reactions(articles: &[Article]) -> u64 {
    if articles.is_empty() {
        return 0;
    }

    let total: u128 = articles.iter().map(|a| u128::from(a.reactions)).sum();
    let count = articles.len() as u128;
    // Round half up in integer arithmetic.
    ((total * 2 + count) / (count * 2)) as u64
}

/// Build the author context for `user` from their `articles`.
pub fn analyze_author_with(user: &User, articles: &[Article], dictionaries: &Dictionaries) -> AuthorContext {
    AuthorContext {
        name: user.name.clone(),
        username: user.username.clone(),
        expertise: expertise_tags(articles, dictionaries.config().max_expertise_tags),
        joined_at: user.joined_at.clone(),
        article_count: articles.len(),
        average_reactions: calculate_average_reactions(articles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tagged(tags: &[&str]) -> Article {
        Article::new("id", "title", "").with_tags(tags.iter().copied())
    }

    fn with_reactions(counts: &[u64]) -> Vec<Article> {
        counts.iter().map(|&r| Article::new("id", "t", "").with_reactions(r)).collect()
    }

    #[test]
    fn test_expertise_sorted_by_frequency() {
        let mut articles = Vec::new();
        articles.extend((0..6).map(|_| tagged(&["go"])));
        articles.extend((0..3).map(|_| tagged(&["rust"])));
        articles.push(tagged(&["ts"]));

        assert_eq!(expertise_tags(&articles, 5), vec!["go", "rust", "ts"]);
    }

    #[test]
    fn test_expertise_ties_keep_first_encounter() {
        let articles = vec![tagged(&["web", "css"]), tagged(&["css", "html"]), tagged(&["html", "web"])];
        assert_eq!(expertise_tags(&articles, 5), vec!["web", "css", "html"]);
    }

    #[test]
    fn test_expertise_is_capped() {
        let articles = vec![tagged(&["a", "b", "c", "d", "e", "f", "g"])];
        assert_eq!(expertise_tags(&articles, 5), vec!["a", "b", "c", "d", "e"]);
        assert!(expertise_tags(&articles, 0).is_empty());
    }

    #[test]
    fn test_average_of_no_articles_is_zero() {
        assert_eq!(calculate_average_reactions(&[]), 0);
    }

    #[rstest]
    #[case(&[10, 20], 15)]
    #[case(&[1, 2], 2)]
    #[case(&[1, 1, 2], 1)]
    #[case(&[0, 0, 1], 0)]
    #[case(&[3], 3)]
    fn test_average_rounds_to_nearest(#[case] counts: &[u64], #[case] expected: u64) {
        assert_eq!(calculate_average_reactions(&with_reactions(counts)), expected);
    }

    #[test]
    fn test_average_of_equal_counts_is_exact() {
        for n in 1..20 {
            for r in [0, 1, 7, 999, u64::MAX] {
                let articles = with_reactions(&vec![r; n]);
                assert_eq!(calculate_average_reactions(&articles), r);
            }
        }
    }

    #[test]
    fn test_analyze_author() {
        let user = User {
            name: "Ferris".to_string(),
            username: "ferris".to_string(),
            bio: "crab".to_string(),
            joined_at: Some("2015-05-15".to_string()),
        };
        let articles = vec![tagged(&["rust"]).with_reactions(4), tagged(&["rust", "wasm"]).with_reactions(5)];
        let ctx = analyze_author_with(&user, &articles, &Dictionaries::default());

        assert_eq!(ctx.name, "Ferris");
        assert_eq!(ctx.expertise, vec!["rust", "wasm"]);
        assert_eq!(ctx.joined_at.as_deref(), Some("2015-05-15"));
        assert_eq!(ctx.article_count, 2);
        assert_eq!(ctx.average_reactions, 5);
    }
}
