//! Output records produced by the analyzers.
//!
//! Every context is freshly built per call and serializes with lowercase
//! tier names, so callers can hand them on as machine-readable JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Technical skill tier of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthTier {
    Beginner,
    Intermediate,
    Advanced,
}

/// Content genre, decided by the first matching genre pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Tutorial,
    Conceptual,
    Opinion,
    Discussion,
    General,
}

/// Quality tier of a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

/// Overall sentiment of a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

macro_rules! display_lowercase {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

display_lowercase!(DepthTier { Beginner => "beginner", Intermediate => "intermediate", Advanced => "advanced" });
display_lowercase!(Genre {
    Tutorial => "tutorial",
    Conceptual => "conceptual",
    Opinion => "opinion",
    Discussion => "discussion",
    General => "general",
});
display_lowercase!(QualityTier { Low => "low", Medium => "medium", High => "high" });
display_lowercase!(Sentiment { Positive => "positive", Neutral => "neutral", Negative => "negative" });

/// Dictionary terms found in a body, partitioned by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsByTier {
    pub beginner: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

/// Technical depth of an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalContext {
    pub depth: DepthTier,
    pub code_block_count: usize,
    pub terms: TermsByTier,
    pub prerequisites: Vec<String>,
}

/// Genre and structure of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentContext {
    pub genre: Genre,
    pub has_introduction: bool,
    pub has_conclusion: bool,
    pub sections: Vec<String>,
    /// Heading texts then bold spans, deduplicated in first-appearance order.
    pub topics: Vec<String>,
}

/// Expertise signature and credibility of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorContext {
    pub name: String,
    pub username: String,
    pub expertise: Vec<String>,
    pub joined_at: Option<String>,
    pub article_count: usize,
    pub average_reactions: u64,
}

/// Quality, sentiment and salient content of a comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionContext {
    pub comment_count: usize,
    pub quality: QualityTier,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
    pub expert_contributions: usize,
    pub expert_authors: Vec<String>,
}

/// The complete profile of one article, its author and its discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub technical: TechnicalContext,
    pub content: ContentContext,
    pub author: AuthorContext,
    pub discussion: DiscussionContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DepthTier::Intermediate).unwrap(), r#""intermediate""#);
        assert_eq!(serde_json::to_string(&Genre::General).unwrap(), r#""general""#);
        assert_eq!(serde_json::to_string(&QualityTier::High).unwrap(), r#""high""#);
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), r#""neutral""#);
    }

    #[test]
    fn test_depth_tier_ordering() {
        assert!(DepthTier::Beginner < DepthTier::Intermediate);
        assert!(DepthTier::Intermediate < DepthTier::Advanced);
    }

    #[test]
    fn test_display_matches_serde_name() {
        let genre: Genre = serde_json::from_str(r#""opinion""#).unwrap();
        assert_eq!(genre.to_string(), "opinion");
        assert_eq!(QualityTier::Medium.as_str(), "medium");
    }
}
