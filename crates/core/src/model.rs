//! Articles, users and comments, in raw and validated form.
//!
//! Provider records arrive as [`RawArticle`], [`RawUser`] and [`RawComment`],
//! where every field is optional. Converting them with `TryFrom` checks the
//! required fields once, at the boundary, so the analyzers can work on
//! [`Article`], [`User`] and [`Comment`] without presence checks.

use crate::{ForumCtxError, Result};
use serde::{Deserialize, Serialize};

/// An identity as it appears in provider JSON: numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id(self) -> Option<String> {
        match self {
            RawId::Number(n) => Some(n.to_string()),
            RawId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
            }
        }
    }
}

/// An article as returned by a content provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub id: Option<RawId>,
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(alias = "body_markdown")]
    pub body: Option<String>,
    #[serde(alias = "tag_list")]
    pub tags: Option<Vec<String>>,
    pub published_at: Option<String>,
    #[serde(alias = "public_reactions_count", alias = "positive_reactions_count")]
    pub reactions: Option<u64>,
    #[serde(alias = "username")]
    pub author: Option<String>,
}

/// A user profile as returned by a content provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub name: Option<String>,
    pub username: Option<String>,
    #[serde(alias = "summary")]
    pub bio: Option<String>,
    pub joined_at: Option<String>,
}

/// A single comment record, flat, as returned by a content provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComment {
    #[serde(alias = "id_code")]
    pub id: Option<RawId>,
    #[serde(alias = "parent")]
    pub parent_id: Option<RawId>,
    #[serde(alias = "body_markdown")]
    pub body: Option<String>,
    #[serde(alias = "username")]
    pub author: Option<String>,
}

/// A validated article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub url: Option<String>,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published_at: Option<String>,
    pub reactions: u64,
    pub author: String,
}

impl Article {
    /// Creates an article with the fields the analyzers read; the rest default.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            published_at: None,
            reactions: 0,
            author: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reactions(mut self, reactions: u64) -> Self {
        self.reactions = reactions;
        self
    }
}

/// A validated user profile. Identity is the username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub joined_at: Option<String>,
}

/// A comment, optionally carrying its replies.
///
/// `children` is empty until the tree builder has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub parent_id: Option<String>,
    pub body: String,
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Comment>,
}

impl Comment {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self { id: id.into(), parent_id: None, body: body.into(), author: None, children: Vec::new() }
    }

    pub fn reply_to(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Pre-order traversal of this comment and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of comments in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }
}

impl Drop for Comment {
    /// Unlinks descendants onto a heap stack so long reply chains drop
    /// without recursing once per level.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut comment) = stack.pop() {
            stack.append(&mut comment.children);
        }
    }
}

/// Pre-order iterator over a comment forest.
///
/// Uses an explicit stack so arbitrarily deep reply chains do not recurse.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a Comment>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<Self::Item> {
        let comment = self.stack.pop()?;
        self.stack.extend(comment.children.iter().rev());
        Some(comment)
    }
}

/// Pre-order traversal over every comment in a forest (or a flat list).
pub fn walk_forest(comments: &[Comment]) -> Walk<'_> {
    Walk { stack: comments.iter().rev().collect() }
}

fn required(value: Option<String>, record: &'static str, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ForumCtxError::InvalidInput { record, field }),
    }
}

impl TryFrom<RawArticle> for Article {
    type Error = ForumCtxError;

    fn try_from(raw: RawArticle) -> Result<Self> {
        let id = raw
            .id
            .and_then(RawId::into_id)
            .ok_or(ForumCtxError::InvalidInput { record: "article", field: "id" })?;
        let title = required(raw.title, "article", "title")?;
        let body = raw.body.ok_or(ForumCtxError::InvalidInput { record: "article", field: "body" })?;
        let author = required(raw.author, "article", "author")?;

        Ok(Self {
            id,
            url: raw.url,
            title,
            body,
            tags: raw.tags.unwrap_or_default(),
            published_at: raw.published_at,
            reactions: raw.reactions.unwrap_or(0),
            author,
        })
    }
}

impl TryFrom<RawUser> for User {
    type Error = ForumCtxError;

    fn try_from(raw: RawUser) -> Result<Self> {
        let username = required(raw.username, "user", "username")?;
        let name = raw.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| username.clone());

        Ok(Self { name, username, bio: raw.bio.unwrap_or_default(), joined_at: raw.joined_at })
    }
}

impl TryFrom<RawComment> for Comment {
    type Error = ForumCtxError;

    fn try_from(raw: RawComment) -> Result<Self> {
        let id = raw
            .id
            .and_then(RawId::into_id)
            .ok_or(ForumCtxError::InvalidInput { record: "comment", field: "id" })?;
        let body = raw.body.ok_or(ForumCtxError::InvalidInput { record: "comment", field: "body" })?;

        Ok(Self {
            id,
            parent_id: raw.parent_id.and_then(RawId::into_id),
            body,
            author: raw.author.filter(|a| !a.trim().is_empty()),
            children: Vec::new(),
        })
    }
}

/// Validates a list of raw records, failing on the first malformed one.
pub fn validate_all<R, T>(raw: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = ForumCtxError>,
{
    raw.into_iter().map(T::try_from).collect()
}
