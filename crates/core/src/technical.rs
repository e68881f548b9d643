//! Technical depth analysis of an article body.
//!
//! The tier is decided from fenced code block counts and dictionary term
//! hits, checked from the most advanced tier down:
//! - advanced: more than 2 advanced terms, or more than 5 code blocks
//! - intermediate: more than 3 intermediate terms, or more than 2 code blocks
//! - beginner: everything else
//!
//! Thresholds come from [`DepthThresholds`] and can be overridden.

use crate::config::{DepthThresholds, Dictionaries};
use crate::context::{DepthTier, TechnicalContext, TermsByTier};
use regex::Regex;
use std::sync::LazyLock;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// "prerequisite(s)" with an optional colon, up to the next `##` heading or the end.
static PREREQUISITES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)prerequisites?:?\s*(.*?)(?:\n##|\z)").unwrap());

static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]+(.+)$").unwrap());

/// Count fenced code blocks (balanced triple-backtick spans).
pub fn count_code_blocks(text: &str) -> usize {
    CODE_BLOCK.find_iter(text).count()
}

/// Every term that occurs as a substring of `lowered`, in dictionary order.
///
/// `lowered` must already be lowercase; dictionary terms are lowercased at
/// compile time.
fn find_terms(lowered: &str, terms: &[String]) -> Vec<String> {
    terms.iter().filter(|term| lowered.contains(term.as_str())).cloned().collect()
}

/// Decide the depth tier. The first matching rule wins.
pub fn depth_tier(
    advanced_terms: usize, intermediate_terms: usize, code_blocks: usize, thresholds: &DepthThresholds,
) -> DepthTier {
    if advanced_terms > thresholds.advanced_terms || code_blocks > thresholds.advanced_code_blocks {
        DepthTier::Advanced
    } else if intermediate_terms > thresholds.intermediate_terms || code_blocks > thresholds.intermediate_code_blocks {
        DepthTier::Intermediate
    } else {
        DepthTier::Beginner
    }
}

/// Extract the bullet items of a prerequisites section.
///
/// Returns an empty list when there is no such section.
pub fn extract_prerequisites(text: &str) -> Vec<String> {
    let Some(section) = PREREQUISITES.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    BULLET
        .captures_iter(section.as_str())
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Analyze the technical depth of an article body.
pub fn analyze_technical_depth_with(body: &str, dictionaries: &Dictionaries) -> TechnicalContext {
    let lowered = body.to_lowercase();
    let code_block_count = count_code_blocks(body);

    let terms = TermsByTier {
        beginner: find_terms(&lowered, dictionaries.beginner_terms()),
        intermediate: find_terms(&lowered, dictionaries.intermediate_terms()),
        advanced: find_terms(&lowered, dictionaries.advanced_terms()),
    };

    let depth = depth_tier(
        terms.advanced.len(),
        terms.intermediate.len(),
        code_block_count,
        &dictionaries.config().depth,
    );

    tracing::trace!(
        %depth,
        code_block_count,
        advanced = terms.advanced.len(),
        intermediate = terms.intermediate.len(),
        "technical depth decided"
    );

    TechnicalContext { depth, code_block_count, terms, prerequisites: extract_prerequisites(body) }
}
