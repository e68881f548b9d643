use crate::Result;
use crate::context::{AuthorContext, ContentContext, DiscussionContext, Profile, TechnicalContext};
use crate::formatters::Section;
use std::fmt::Write;

/// Convert a profile to TOML, one table per context
///
/// Manual TOML serialization to avoid adding the toml crate dependency
pub fn profile_to_toml(profile: &Profile, section: Section) -> Result<String> {
    let mut toml = String::new();

    if section.includes(Section::Technical) {
        write_technical(&mut toml, &profile.technical);
    }
    if section.includes(Section::Content) {
        write_content(&mut toml, &profile.content);
    }
    if section.includes(Section::Author) {
        write_author(&mut toml, &profile.author);
    }
    if section.includes(Section::Discussion) {
        write_discussion(&mut toml, &profile.discussion);
    }

    Ok(toml.trim_end().to_string() + "\n")
}

fn write_technical(toml: &mut String, ctx: &TechnicalContext) {
    toml.push_str("[technical]\n");
    let _ = writeln!(toml, "depth = {}", toml_escape_string(ctx.depth.as_str()));
    let _ = writeln!(toml, "code_block_count = {}", ctx.code_block_count);
    let _ = writeln!(toml, "prerequisites = {}", toml_array(&ctx.prerequisites));
    toml.push_str("\n[technical.terms]\n");
    let _ = writeln!(toml, "beginner = {}", toml_array(&ctx.terms.beginner));
    let _ = writeln!(toml, "intermediate = {}", toml_array(&ctx.terms.intermediate));
    let _ = writeln!(toml, "advanced = {}", toml_array(&ctx.terms.advanced));
    toml.push('\n');
}

fn write_content(toml: &mut String, ctx: &ContentContext) {
    toml.push_str("[content]\n");
    let _ = writeln!(toml, "genre = {}", toml_escape_string(ctx.genre.as_str()));
    let _ = writeln!(toml, "has_introduction = {}", ctx.has_introduction);
    let _ = writeln!(toml, "has_conclusion = {}", ctx.has_conclusion);
    let _ = writeln!(toml, "sections = {}", toml_array(&ctx.sections));
    let _ = writeln!(toml, "topics = {}", toml_array(&ctx.topics));
    toml.push('\n');
}

fn write_author(toml: &mut String, ctx: &AuthorContext) {
    toml.push_str("[author]\n");
    let _ = writeln!(toml, "name = {}", toml_escape_string(&ctx.name));
    let _ = writeln!(toml, "username = {}", toml_escape_string(&ctx.username));
    let _ = writeln!(toml, "expertise = {}", toml_array(&ctx.expertise));
    if let Some(joined_at) = &ctx.joined_at {
        let _ = writeln!(toml, "joined_at = {}", toml_escape_string(joined_at));
    }
    let _ = writeln!(toml, "article_count = {}", ctx.article_count);
    let _ = writeln!(toml, "average_reactions = {}", ctx.average_reactions);
    toml.push('\n');
}

fn write_discussion(toml: &mut String, ctx: &DiscussionContext) {
    toml.push_str("[discussion]\n");
    let _ = writeln!(toml, "comment_count = {}", ctx.comment_count);
    let _ = writeln!(toml, "quality = {}", toml_escape_string(ctx.quality.as_str()));
    let _ = writeln!(toml, "sentiment = {}", toml_escape_string(ctx.sentiment.as_str()));
    let _ = writeln!(toml, "topics = {}", toml_array(&ctx.topics));
    let _ = writeln!(toml, "expert_contributions = {}", ctx.expert_contributions);
    let _ = writeln!(toml, "expert_authors = {}", toml_array(&ctx.expert_authors));
    toml.push('\n');
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c <= '\u{1f}' || c == '\u{7f}' => {
                let _ = write!(escaped, "\\u{:04X}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

fn toml_array(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|s| toml_escape_string(s)).collect();
    format!("[{}]", items.join(", "))
}

/// TOML formatter for profiles
pub struct TomlFormatter {
    section: Section,
}

impl TomlFormatter {
    pub fn new(section: Section) -> Self {
        Self { section }
    }

    pub fn format(&self, profile: &Profile) -> Result<String> {
        profile_to_toml(profile, self.section)
    }
}

impl Default for TomlFormatter {
    fn default() -> Self {
        Self::new(Section::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DepthTier, Genre, QualityTier, Sentiment, TermsByTier};

    fn profile() -> Profile {
        Profile {
            technical: TechnicalContext {
                depth: DepthTier::Intermediate,
                code_block_count: 3,
                terms: TermsByTier { advanced: vec!["performance".to_string()], ..Default::default() },
                prerequisites: vec!["node".to_string(), "npm".to_string()],
            },
            content: ContentContext {
                genre: Genre::Tutorial,
                has_introduction: true,
                has_conclusion: false,
                sections: vec!["Setup".to_string()],
                topics: vec!["Setup".to_string(), "say \"hi\"".to_string()],
            },
            author: AuthorContext {
                name: "Ferris".to_string(),
                username: "ferris".to_string(),
                expertise: vec!["rust".to_string()],
                joined_at: None,
                article_count: 2,
                average_reactions: 5,
            },
            discussion: DiscussionContext {
                comment_count: 0,
                quality: QualityTier::Low,
                sentiment: Sentiment::Neutral,
                topics: Vec::new(),
                expert_contributions: 0,
                expert_authors: Vec::new(),
            },
        }
    }

    #[test]
    fn test_profile_to_toml_all() {
        let toml = profile_to_toml(&profile(), Section::All).unwrap();
        assert!(toml.contains("[technical]\ndepth = \"intermediate\""));
        assert!(toml.contains("prerequisites = [\"node\", \"npm\"]"));
        assert!(toml.contains("[technical.terms]"));
        assert!(toml.contains("advanced = [\"performance\"]"));
        assert!(toml.contains("genre = \"tutorial\""));
        assert!(toml.contains("has_conclusion = false"));
        assert!(toml.contains("average_reactions = 5"));
        assert!(toml.contains("topics = []"));
        assert!(!toml.contains("joined_at"));
    }

    #[test]
    fn test_profile_to_toml_single_section() {
        let toml = profile_to_toml(&profile(), Section::Discussion).unwrap();
        assert!(toml.starts_with("[discussion]"));
        assert!(!toml.contains("[author]"));
    }

    #[test]
    fn test_toml_array_escapes_items() {
        let toml = profile_to_toml(&profile(), Section::Content).unwrap();
        assert!(toml.contains(r#"topics = ["Setup", "say \"hi\""]"#));
    }

    #[test]
    fn test_toml_escape_with_newlines() {
        let escaped = toml_escape_string("Line 1\nLine 2");
        assert_eq!(escaped, r#""Line 1\nLine 2""#);
    }

    #[test]
    fn test_toml_escape_control_characters() {
        assert_eq!(toml_escape_string("a\r\nb"), r#""a\r\nb""#);
        assert_eq!(toml_escape_string("col\tcol"), r#""col\tcol""#);
        assert_eq!(toml_escape_string("bell\u{7}end\u{7f}"), r#""bell\u0007end\u007F""#);
        assert_eq!(toml_escape_string("caf\u{e9}"), "\"caf\u{e9}\"");
    }

    #[test]
    fn test_toml_escape_with_backslashes() {
        let escaped = toml_escape_string(r#"Path\to\file"#);
        assert_eq!(escaped, r#""Path\\to\\file""#);
    }

    #[test]
    fn test_toml_formatter_default() {
        let formatter = TomlFormatter::default();
        assert!(formatter.format(&profile()).unwrap().contains("[author]"));
    }
}
