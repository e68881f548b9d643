//! Main analysis API.
//!
//! [`Analyzer`] owns a set of compiled [`Dictionaries`] and runs the four
//! analyzers and the comment tree builder with them. The free functions at
//! the bottom of this module do the same with the default dictionaries.
//!
//! # Example
//!
//! ```rust
//! use forumctx_core::{Analyzer, AnalyzerConfig, DepthTier};
//!
//! let config = AnalyzerConfig::builder().advanced_terms(["borrow checker", "lifetime", "unsafe"]).build();
//! let analyzer = Analyzer::with_config(&config)?;
//!
//! let ctx = analyzer.technical_depth("Lifetimes, unsafe code and the borrow checker.");
//! assert_eq!(ctx.depth, DepthTier::Advanced);
//! # Ok::<(), forumctx_core::ForumCtxError>(())
//! ```

use crate::author::{analyze_author_with, calculate_average_reactions as average_reactions};
use crate::classify::classify_content_with;
use crate::comment_tree;
use crate::config::{AnalyzerConfig, Dictionaries};
use crate::context::{AuthorContext, ContentContext, DiscussionContext, Profile, TechnicalContext};
use crate::discussion::analyze_discussion_with;
use crate::model::{Article, Comment, User};
use crate::provider::{ContentProvider, Thread, fetch_thread};
use crate::technical::analyze_technical_depth_with;
use crate::Result;
use std::sync::LazyLock;

/// Analyzer with the built-in dictionaries, shared by the free functions.
static DEFAULT: LazyLock<Analyzer> = LazyLock::new(Analyzer::new);

/// Main entry point for content analysis.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    dictionaries: Dictionaries,
}

impl Analyzer {
    /// Creates an analyzer with the built-in dictionaries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer from a configuration, compiling its patterns.
    pub fn with_config(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self { dictionaries: Dictionaries::compile(config)? })
    }

    /// Creates an analyzer from already compiled dictionaries.
    pub fn with_dictionaries(dictionaries: Dictionaries) -> Self {
        Self { dictionaries }
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    /// Technical depth of an article body.
    pub fn technical_depth(&self, body: &str) -> TechnicalContext {
        analyze_technical_depth_with(body, &self.dictionaries)
    }

    /// Genre and structure of an article.
    pub fn classify(&self, title: &str, body: &str) -> ContentContext {
        classify_content_with(title, body, &self.dictionaries)
    }

    /// Expertise and credibility of an author.
    pub fn author(&self, user: &User, articles: &[Article]) -> AuthorContext {
        analyze_author_with(user, articles, &self.dictionaries)
    }

    /// Quality, sentiment, topics and expert replies of a comment thread.
    pub fn discussion(&self, comments: &[Comment]) -> DiscussionContext {
        analyze_discussion_with(comments, &self.dictionaries)
    }

    /// Builds the reply forest using the configured duplicate policy.
    pub fn build_tree(&self, records: Vec<Comment>) -> Result<Vec<Comment>> {
        comment_tree::build_comment_tree_with(records, self.dictionaries.config().duplicate_policy)
    }

    /// Profiles a complete thread.
    pub fn profile(&self, thread: &Thread) -> Profile {
        Profile {
            technical: self.technical_depth(&thread.article.body),
            content: self.classify(&thread.article.title, &thread.article.body),
            author: self.author(&thread.author, &thread.author_articles),
            discussion: self.discussion(&thread.comments),
        }
    }

    /// Fetches the thread at `url` from `provider` and profiles it.
    pub fn profile_from<P: ContentProvider + ?Sized>(&self, provider: &P, url: &str) -> Result<Profile> {
        let thread = fetch_thread(provider, url, self.dictionaries.config().duplicate_policy)?;
        Ok(self.profile(&thread))
    }
}

/// Technical depth of `body` with the default dictionaries.
pub fn analyze_technical_depth(body: &str) -> TechnicalContext {
    DEFAULT.technical_depth(body)
}

/// Genre and structure with the default dictionaries.
pub fn classify_content(title: &str, body: &str) -> ContentContext {
    DEFAULT.classify(title, body)
}

/// Author context with the default limits.
pub fn analyze_author(user: &User, articles: &[Article]) -> AuthorContext {
    DEFAULT.author(user, articles)
}

/// Discussion context with the default dictionaries.
pub fn analyze_discussion(comments: &[Comment]) -> DiscussionContext {
    DEFAULT.discussion(comments)
}

/// Mean reactions per article, rounded; 0 for an empty list.
pub fn calculate_average_reactions(articles: &[Article]) -> u64 {
    average_reactions(articles)
}
