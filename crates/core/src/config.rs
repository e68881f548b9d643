//! Analyzer configuration: keyword dictionaries, patterns and thresholds.
//!
//! Nothing here is a process-wide singleton. An [`AnalyzerConfig`] is plain
//! data (loadable from JSON), and [`Dictionaries`] is its compiled form,
//! handed to each analyzer call.
//!
//! # Example
//!
//! ```rust
//! use forumctx_core::{AnalyzerConfig, Dictionaries};
//!
//! let config = AnalyzerConfig::builder()
//!     .advanced_terms(["kernel", "lock-free", "simd"])
//!     .max_expertise_tags(3)
//!     .build();
//! let dictionaries = Dictionaries::compile(&config).unwrap();
//! assert_eq!(dictionaries.config().max_expertise_tags, 3);
//! ```

use crate::context::Genre;
use crate::{ForumCtxError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";

const BEGINNER_TERMS: &[&str] =
    &["variable", "function", "loop", "array", "string", "basic", "beginner", "getting started", "hello world"];

const INTERMEDIATE_TERMS: &[&str] =
    &["api", "framework", "database", "async", "promise", "module", "testing", "deployment", "middleware"];

const ADVANCED_TERMS: &[&str] = &[
    "architecture",
    "scalability",
    "optimization",
    "microservices",
    "distributed",
    "concurrency",
    "algorithm",
    "performance",
    "design pattern",
    "memory management",
];

const GENRE_PATTERNS: &[(Genre, &str)] = &[
    (Genre::Tutorial, r"\b(tutorial|how to|how-to|step[- ]by[- ]step|guide|walkthrough|build a)\b"),
    (Genre::Conceptual, r"\b(understanding|explained|what is|what are|introduction to|deep dive|concepts?)\b"),
    (Genre::Opinion, r"\b(why i|opinion|i think|i believe|unpopular|hot take|thoughts on|should you)\b"),
    (Genre::Discussion, r"\b(discuss|discussion|what do you|how do you|ask|question|debate)\b"),
];

const POSITIVE_PATTERN: &str =
    r"\b(great|awesome|excellent|thanks|thank you|helpful|love|amazing|perfect|useful|agree|nice)\b";

const NEGATIVE_PATTERN: &str =
    r"\b(wrong|bad|terrible|disagree|confusing|broken|useless|hate|awful|doesn't work|misleading)\b";

/// What the comment-tree builder does with two records sharing an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last record in input order survives; earlier ones are dropped.
    #[default]
    LastWins,
    /// Fail with [`ForumCtxError::DuplicateId`].
    Reject,
}

/// One entry in the ordered genre pattern list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenrePattern {
    pub genre: Genre,
    pub pattern: String,
}

/// Thresholds for the technical depth tier decision.
///
/// A tier is chosen when the found-term count or the code block count is
/// strictly greater than its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthThresholds {
    pub advanced_terms: usize,
    pub advanced_code_blocks: usize,
    pub intermediate_terms: usize,
    pub intermediate_code_blocks: usize,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self { advanced_terms: 2, advanced_code_blocks: 5, intermediate_terms: 3, intermediate_code_blocks: 2 }
    }
}

/// Uncompiled analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Beginner vocabulary, matched as case-insensitive substrings.
    pub beginner_terms: Vec<String>,
    /// Intermediate vocabulary.
    pub intermediate_terms: Vec<String>,
    /// Advanced vocabulary.
    pub advanced_terms: Vec<String>,
    /// Genre patterns, tested in order; the first match wins.
    pub genre_patterns: Vec<GenrePattern>,
    /// Pattern counting a comment as positive (case-insensitive).
    pub positive_pattern: String,
    /// Pattern counting a comment as negative (case-insensitive).
    pub negative_pattern: String,
    /// Depth tier thresholds.
    pub depth: DepthThresholds,
    /// Number of leading body characters examined for the genre (default: 500).
    pub genre_window: usize,
    /// Pre-heading text longer than this counts as an introduction (default: 200).
    pub introduction_min_chars: usize,
    /// Maximum expertise tags reported for an author (default: 5).
    pub max_expertise_tags: usize,
    /// Maximum discussion topics reported (default: 10).
    pub max_discussion_topics: usize,
    /// Tokens must be strictly longer than this to become topics (default: 4).
    pub min_topic_word_chars: usize,
    /// Mean comment length above which a thread can be high quality (default: 200).
    pub high_quality_mean_chars: usize,
    /// Mean comment length above which a thread is medium quality (default: 100).
    pub medium_quality_mean_chars: usize,
    /// Comments longer than this can be expert contributions (default: 300).
    pub expert_min_chars: usize,
    /// Duplicate comment identity handling (default: last wins).
    pub duplicate_policy: DuplicatePolicy,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            beginner_terms: owned(BEGINNER_TERMS),
            intermediate_terms: owned(INTERMEDIATE_TERMS),
            advanced_terms: owned(ADVANCED_TERMS),
            genre_patterns: GENRE_PATTERNS
                .iter()
                .map(|(genre, pattern)| GenrePattern { genre: *genre, pattern: pattern.to_string() })
                .collect(),
            positive_pattern: POSITIVE_PATTERN.to_string(),
            negative_pattern: NEGATIVE_PATTERN.to_string(),
            depth: DepthThresholds::default(),
            genre_window: 500,
            introduction_min_chars: 200,
            max_expertise_tags: 5,
            max_discussion_topics: 10,
            min_topic_word_chars: 4,
            high_quality_mean_chars: 200,
            medium_quality_mean_chars: 100,
            expert_min_chars: 300,
            duplicate_policy: DuplicatePolicy::LastWins,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// Parses a configuration from JSON; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ForumCtxError::ConfigError(e.to_string()))
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    pub fn beginner_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.beginner_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn intermediate_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.intermediate_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn advanced_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.advanced_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the genre patterns. Order is significant.
    pub fn genre_patterns(mut self, patterns: Vec<GenrePattern>) -> Self {
        self.config.genre_patterns = patterns;
        self
    }

    pub fn positive_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.positive_pattern = pattern.into();
        self
    }

    pub fn negative_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.negative_pattern = pattern.into();
        self
    }

    pub fn depth(mut self, thresholds: DepthThresholds) -> Self {
        self.config.depth = thresholds;
        self
    }

    pub fn genre_window(mut self, chars: usize) -> Self {
        self.config.genre_window = chars;
        self
    }

    pub fn max_expertise_tags(mut self, value: usize) -> Self {
        self.config.max_expertise_tags = value;
        self
    }

    pub fn max_discussion_topics(mut self, value: usize) -> Self {
        self.config.max_discussion_topics = value;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiled, immutable dictionaries derived from an [`AnalyzerConfig`].
#[derive(Debug, Clone)]
pub struct Dictionaries {
    config: AnalyzerConfig,
    beginner: Vec<String>,
    intermediate: Vec<String>,
    advanced: Vec<String>,
    genres: Vec<(Genre, Regex)>,
    positive: Regex,
    negative: Regex,
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ForumCtxError::InvalidPattern { name: name.to_string(), source })
}

fn lowercase_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl Dictionaries {
    /// Compiles every pattern in `config`. Term lists are lowercased once.
    pub fn compile(config: &AnalyzerConfig) -> Result<Self> {
        let genres = config
            .genre_patterns
            .iter()
            .map(|gp| compile(gp.genre.as_str(), &gp.pattern).map(|re| (gp.genre, re)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            beginner: lowercase_terms(&config.beginner_terms),
            intermediate: lowercase_terms(&config.intermediate_terms),
            advanced: lowercase_terms(&config.advanced_terms),
            genres,
            positive: compile("positive", &config.positive_pattern)?,
            negative: compile("negative", &config.negative_pattern)?,
            config: config.clone(),
        })
    }

    /// The configuration these dictionaries were compiled from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn beginner_terms(&self) -> &[String] {
        &self.beginner
    }

    pub fn intermediate_terms(&self) -> &[String] {
        &self.intermediate
    }

    pub fn advanced_terms(&self) -> &[String] {
        &self.advanced
    }

    /// Genre patterns in tie-break order.
    pub fn genres(&self) -> &[(Genre, Regex)] {
        &self.genres
    }

    pub fn positive(&self) -> &Regex {
        &self.positive
    }

    pub fn negative(&self) -> &Regex {
        &self.negative
    }
}

impl Default for Dictionaries {
    fn default() -> Self {
        // The built-in patterns are fixed and tested to compile.
        Self::compile(&AnalyzerConfig::default()).expect("built-in patterns compile")
    }
}

/// Locates and loads an [`AnalyzerConfig`] from disk.
///
/// Lookup order: an explicit file, then `config.json` in the custom
/// directory, then `config.json` in the standard directory
/// (`<platform config dir>/forumctx`). When none exists the defaults apply.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit config file path
    file: Option<PathBuf>,
    /// Custom config directory path
    custom_dir: Option<PathBuf>,
    /// Standard config directory path
    standard_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that only consults the standard directory.
    pub fn new() -> Self {
        Self { file: None, custom_dir: None, standard_dir: default_config_dir() }
    }

    /// Create a loader with explicit directories.
    pub fn with_dirs(custom_dir: Option<PathBuf>, standard_dir: Option<PathBuf>) -> Self {
        Self { file: None, custom_dir, standard_dir }
    }

    /// Use this file, which must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn custom_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.custom_dir = Some(dir.into());
        self
    }

    /// Resolve and parse the configuration.
    pub fn load(&self) -> Result<AnalyzerConfig> {
        if let Some(file) = &self.file {
            return Self::load_file(file);
        }

        for dir in [&self.custom_dir, &self.standard_dir].into_iter().flatten() {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading analyzer config");
                return Self::load_file(&path);
            }
        }

        tracing::debug!("no analyzer config file found, using defaults");
        Ok(AnalyzerConfig::default())
    }

    /// Parse a single config file.
    pub fn load_file(path: &Path) -> Result<AnalyzerConfig> {
        if !path.exists() {
            return Err(ForumCtxError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ForumCtxError::ConfigError(format!("{}: {}", path.display(), e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "config-files")]
fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("forumctx"))
}

#[cfg(not(feature = "config-files"))]
fn default_config_dir() -> Option<PathBuf> {
    None
}
