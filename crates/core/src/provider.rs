//! The content provider boundary and the on-disk thread bundle.
//!
//! A [`ContentProvider`] hands out validated records. Remote providers
//! (HTTP clients, caches, retry policies) live outside this crate; the
//! [`ThreadBundle`] is an in-memory provider over a JSON document, which is
//! what the CLI, the tests and the benches use.
//!
//! Bundle layout:
//!
//! ```json
//! {
//!   "article": { "id": 1, "title": "...", "body": "...", "tags": [], "author": "ferris" },
//!   "author": { "name": "Ferris", "username": "ferris" },
//!   "author_articles": [ { "id": 1, "title": "...", "body": "...", "author": "ferris" } ],
//!   "comments": [ { "id": 10, "parent_id": null, "body": "...", "author": "bob" } ]
//! }
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comment_tree::build_comment_tree_with;
use crate::config::DuplicatePolicy;
use crate::model::{Article, Comment, RawArticle, RawComment, RawUser, User, validate_all};
use crate::{ForumCtxError, Result};

/// Source of validated articles, users and comments.
pub trait ContentProvider {
    /// The article published at `url` (an id is accepted too).
    fn article(&self, url: &str) -> Result<Article>;

    /// The profile of `username`.
    fn user(&self, username: &str) -> Result<User>;

    /// Every article written by `username`.
    fn articles_by(&self, username: &str) -> Result<Vec<Article>>;

    /// The flat comment records of an article, in provider order.
    fn comments(&self, article_id: &str) -> Result<Vec<Comment>>;
}

/// Everything the engine needs about one article, validated, with comments
/// already built into a forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub article: Article,
    pub author: User,
    pub author_articles: Vec<Article>,
    pub comments: Vec<Comment>,
}

/// Gather a [`Thread`] from a provider, building the comment tree on the way.
pub fn fetch_thread<P: ContentProvider + ?Sized>(
    provider: &P, url: &str, duplicates: DuplicatePolicy,
) -> Result<Thread> {
    let article = provider.article(url)?;
    let author = provider.user(&article.author)?;
    let author_articles = provider.articles_by(&author.username)?;
    let records = provider.comments(&article.id)?;

    tracing::debug!(
        article = %article.id,
        author = %author.username,
        articles = author_articles.len(),
        comments = records.len(),
        "thread fetched"
    );

    let comments = build_comment_tree_with(records, duplicates)?;
    Ok(Thread { article, author, author_articles, comments })
}

/// Raw records for a single article, as stored in a bundle file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadBundle {
    pub article: RawArticle,
    pub author: RawUser,
    #[serde(default)]
    pub author_articles: Vec<RawArticle>,
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

impl ThreadBundle {
    /// Parses a bundle from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a bundle from a local file.
    pub fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ForumCtxError::FileNotFound(path.to_path_buf()));
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Reads a bundle from standard input until EOF.
    pub fn read_stdin() -> Result<Self> {
        Self::read_from(io::stdin().lock())
    }

    /// Reads a bundle from any reader until EOF.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        Self::from_json(&buffer)
    }

    /// Validates every record and builds the comment forest.
    pub fn into_thread(self, duplicates: DuplicatePolicy) -> Result<Thread> {
        let article = Article::try_from(self.article.clone())?;
        fetch_thread(&self, &article.id, duplicates)
    }

    fn matches_article(&self, key: &str) -> Result<bool> {
        let article = Article::try_from(self.article.clone())?;
        Ok(article.id == key || article.url.as_deref() == Some(key))
    }
}

impl ContentProvider for ThreadBundle {
    fn article(&self, url: &str) -> Result<Article> {
        if !self.matches_article(url)? {
            return Err(ForumCtxError::NotFound { record: "article", key: url.to_string() });
        }
        Article::try_from(self.article.clone())
    }

    fn user(&self, username: &str) -> Result<User> {
        let user = User::try_from(self.author.clone())?;
        if user.username != username {
            return Err(ForumCtxError::NotFound { record: "user", key: username.to_string() });
        }
        Ok(user)
    }

    fn articles_by(&self, username: &str) -> Result<Vec<Article>> {
        let user = self.user(username)?;
        let articles: Vec<Article> = validate_all(self.author_articles.clone())?;
        Ok(articles.into_iter().filter(|a| a.author == user.username).collect())
    }

    fn comments(&self, article_id: &str) -> Result<Vec<Comment>> {
        if !self.matches_article(article_id)? {
            return Err(ForumCtxError::NotFound { record: "article", key: article_id.to_string() });
        }
        validate_all(self.comments.clone())
    }
}
