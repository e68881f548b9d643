pub mod analyzer;
pub mod author;
pub mod classify;
pub mod comment_tree;
pub mod config;
pub mod context;
pub mod discussion;
pub mod error;
pub mod formatters;
pub mod model;
pub mod provider;
pub mod technical;

pub use analyzer::{
    Analyzer, analyze_author, analyze_discussion, analyze_technical_depth, calculate_average_reactions,
    classify_content,
};
pub use comment_tree::{build_comment_tree, build_comment_tree_with, ensure_unique_ids};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, ConfigLoader, DepthThresholds, Dictionaries, DuplicatePolicy};
pub use config::GenrePattern;
pub use context::{
    AuthorContext, ContentContext, DepthTier, DiscussionContext, Genre, Profile, QualityTier, Sentiment,
    TechnicalContext, TermsByTier,
};
pub use error::{ForumCtxError, Result};
pub use formatters::{JsonConfig, JsonFormatter, OutputFormat, Section, TomlFormatter};
pub use formatters::{profile_to_json, profile_to_text, profile_to_toml};
pub use model::{Article, Comment, RawArticle, RawComment, RawId, RawUser, User, walk_forest};
pub use provider::{ContentProvider, Thread, ThreadBundle, fetch_thread};
#[doc(hidden)]
pub use technical::{count_code_blocks, depth_tier, extract_prerequisites};
