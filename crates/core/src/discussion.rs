//! Comment thread analysis: quality, sentiment, topics and expert replies.
//!
//! Only comment bodies and authors are read. Nested replies are visited in
//! pre-order, so a built tree and the equivalent flat list give the same
//! result.

use crate::config::Dictionaries;
use crate::context::{DiscussionContext, QualityTier, Sentiment};
use crate::model::{Comment, walk_forest};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

const CODE_FENCE: &str = "```";

/// Whether a comment body carries evidence: a code fence or a link.
fn has_evidence(body: &str) -> bool {
    body.contains(CODE_FENCE) || body.contains("http")
}

fn body_len(body: &str) -> usize {
    body.chars().count()
}

/// Thread quality from mean body length and the presence of code or links.
pub fn assess_quality(comments: &[&Comment], dictionaries: &Dictionaries) -> QualityTier {
    if comments.is_empty() {
        return QualityTier::Low;
    }

    let total: usize = comments.iter().map(|c| body_len(&c.body)).sum();
    let mean = total as f64 / comments.len() as f64;
    let config = dictionaries.config();

    if mean > config.high_quality_mean_chars as f64 && comments.iter().any(|c| has_evidence(&c.body)) {
        QualityTier::High
    } else if mean > config.medium_quality_mean_chars as f64 {
        QualityTier::Medium
    } else {
        QualityTier::Low
    }
}

/// Sentiment from independent positive and negative match counts.
///
/// One side wins only with more than twice the other's count.
pub fn assess_sentiment(comments: &[&Comment], dictionaries: &Dictionaries) -> Sentiment {
    let positive = comments.iter().filter(|c| dictionaries.positive().is_match(&c.body)).count();
    let negative = comments.iter().filter(|c| dictionaries.negative().is_match(&c.body)).count();

    if positive > 2 * negative {
        Sentiment::Positive
    } else if negative > 2 * positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Lowercased words longer than `min_chars`, deduplicated in first-appearance
/// order, at most `limit` of them.
pub fn extract_topics<'a, I>(bodies: I, min_chars: usize, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    for body in bodies {
        for token in NON_WORD.split(body) {
            if topics.len() >= limit {
                return topics;
            }
            let word = token.to_lowercase();
            if word.chars().count() > min_chars && seen.insert(word.clone()) {
                topics.push(word);
            }
        }
    }

    topics
}

/// Analyze a comment thread, flat or already built into a tree.
pub fn analyze_discussion_with(comments: &[Comment], dictionaries: &Dictionaries) -> DiscussionContext {
    let all: Vec<&Comment> = walk_forest(comments).collect();
    let config = dictionaries.config();

    let experts: Vec<&Comment> = all
        .iter()
        .copied()
        .filter(|c| body_len(&c.body) > config.expert_min_chars && has_evidence(&c.body))
        .collect();

    let mut seen = HashSet::new();
    let expert_authors: Vec<String> = experts
        .iter()
        .filter_map(|c| c.author.as_deref())
        .filter(|author| seen.insert(*author))
        .map(str::to_string)
        .collect();

    let ctx = DiscussionContext {
        comment_count: all.len(),
        quality: assess_quality(&all, dictionaries),
        sentiment: assess_sentiment(&all, dictionaries),
        topics: extract_topics(
            all.iter().map(|c| c.body.as_str()),
            config.min_topic_word_chars,
            config.max_discussion_topics,
        ),
        expert_contributions: experts.len(),
        expert_authors,
    };

    tracing::trace!(
        comments = ctx.comment_count,
        quality = %ctx.quality,
        sentiment = %ctx.sentiment,
        experts = ctx.expert_contributions,
        "discussion analyzed"
    );

    ctx
}
