pub mod json;
pub mod text;
pub mod toml;

pub use json::{JsonConfig, JsonFormatter, profile_to_json};
pub use text::profile_to_text;
pub use toml::{TomlFormatter, profile_to_toml};

use crate::ForumCtxError;
use std::str::FromStr;

/// Output format options for a rendered profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Structured JSON.
    #[default]
    Json,
    /// TOML tables, one per context.
    Toml,
    /// Human-readable report.
    Text,
}

impl FromStr for OutputFormat {
    type Err = ForumCtxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(ForumCtxError::ConfigError(format!(
                "Invalid format: {}. Valid options: json, toml, text",
                s
            ))),
        }
    }
}

/// Which part of a profile to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    All,
    Technical,
    Content,
    Author,
    Discussion,
}

impl Section {
    pub(crate) fn includes(self, other: Section) -> bool {
        self == Section::All || self == other
    }
}

impl FromStr for Section {
    type Err = ForumCtxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "technical" | "depth" => Ok(Self::Technical),
            "content" => Ok(Self::Content),
            "author" => Ok(Self::Author),
            "discussion" | "comments" => Ok(Self::Discussion),
            _ => Err(ForumCtxError::ConfigError(format!(
                "Invalid section: {}. Valid options: all, technical, content, author, discussion",
                s
            ))),
        }
    }
}
