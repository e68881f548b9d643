use crate::context::{AuthorContext, ContentContext, DiscussionContext, Profile, TechnicalContext};
use crate::formatters::Section;
use std::fmt::Write;

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn list(items: &[String]) -> String {
    if items.is_empty() { "-".to_string() } else { items.join(", ") }
}

/// Render a profile as a plain text report.
pub fn profile_to_text(profile: &Profile, section: Section) -> String {
    let mut blocks = Vec::new();

    if section.includes(Section::Technical) {
        blocks.push(technical_block(&profile.technical));
    }
    if section.includes(Section::Content) {
        blocks.push(content_block(&profile.content));
    }
    if section.includes(Section::Author) {
        blocks.push(author_block(&profile.author));
    }
    if section.includes(Section::Discussion) {
        blocks.push(discussion_block(&profile.discussion));
    }

    blocks.join("\n")
}

fn technical_block(ctx: &TechnicalContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Technical depth: {} ({} code blocks)", ctx.depth, ctx.code_block_count);
    let _ = writeln!(out, "  Beginner terms:     {}", list(&ctx.terms.beginner));
    let _ = writeln!(out, "  Intermediate terms: {}", list(&ctx.terms.intermediate));
    let _ = writeln!(out, "  Advanced terms:     {}", list(&ctx.terms.advanced));
    let _ = writeln!(out, "  Prerequisites:      {}", list(&ctx.prerequisites));
    out
}

fn content_block(ctx: &ContentContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Content: {}", ctx.genre);
    let _ = writeln!(
        out,
        "  Introduction: {}  Conclusion: {}",
        yes_no(ctx.has_introduction),
        yes_no(ctx.has_conclusion)
    );
    let _ = writeln!(out, "  Sections: {}", list(&ctx.sections));
    let _ = writeln!(out, "  Topics:   {}", list(&ctx.topics));
    out
}

fn author_block(ctx: &AuthorContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Author: {} (@{})", ctx.name, ctx.username);
    if let Some(joined_at) = &ctx.joined_at {
        let _ = writeln!(out, "  Joined:    {}", joined_at);
    }
    let _ = writeln!(out, "  Expertise: {}", list(&ctx.expertise));
    let _ = writeln!(
        out,
        "  Articles:  {} (avg. {} reactions)",
        ctx.article_count, ctx.average_reactions
    );
    out
}

fn discussion_block(ctx: &DiscussionContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Discussion: {} comments", ctx.comment_count);
    let _ = writeln!(out, "  Quality:   {}  Sentiment: {}", ctx.quality, ctx.sentiment);
    let _ = writeln!(out, "  Topics:    {}", list(&ctx.topics));
    let _ = writeln!(
        out,
        "  Experts:   {} contributions by {}",
        ctx.expert_contributions,
        list(&ctx.expert_authors)
    );
    out
}
