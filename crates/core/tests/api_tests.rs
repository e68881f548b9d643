//! Library API integration tests
use forumctx_core::*;
use std::collections::HashSet;
use std::path::Path;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn load_thread(name: &str) -> Thread {
    ThreadBundle::read_file(Path::new(&get_fixture_path(name)))
        .expect("should read bundle")
        .into_thread(DuplicatePolicy::LastWins)
        .expect("should validate")
}

fn fence() -> &'static str {
    "```\nprintln!(\"hi\");\n```\n"
}

#[test]
fn test_profile_fixture_thread() {
    let thread = load_thread("thread.json");
    let profile = Analyzer::new().profile(&thread);

    assert_eq!(profile.technical.depth, DepthTier::Intermediate);
    assert_eq!(profile.technical.code_block_count, 3);
    assert_eq!(profile.technical.terms.advanced, vec!["concurrency"]);
    assert_eq!(profile.technical.terms.intermediate, vec!["async"]);
    assert_eq!(profile.technical.terms.beginner, vec!["basic", "getting started"]);
    assert_eq!(
        profile.technical.prerequisites,
        vec!["Rust 1.75 or newer", "Basic familiarity with cargo"]
    );

    assert_eq!(profile.content.genre, Genre::Tutorial);
    assert!(profile.content.has_introduction);
    assert!(profile.content.has_conclusion);
    assert_eq!(
        profile.content.sections,
        vec!["Prerequisites", "Setting up the runtime", "Spawning tasks", "Conclusion"]
    );
    assert_eq!(&profile.content.topics[4..], &["tokio".to_string(), "Concurrency".to_string()]);

    assert_eq!(profile.author.name, "Ferris the Crab");
    assert_eq!(profile.author.expertise, vec!["rust", "async", "tokio"]);
    assert_eq!(profile.author.article_count, 3);
    assert_eq!(profile.author.average_reactions, 20);
    assert_eq!(profile.author.joined_at.as_deref(), Some("2015-05-15"));

    assert_eq!(profile.discussion.comment_count, 6);
    assert_eq!(profile.discussion.quality, QualityTier::Medium);
    assert_eq!(profile.discussion.sentiment, Sentiment::Positive);
    assert_eq!(profile.discussion.expert_contributions, 1);
    assert_eq!(profile.discussion.expert_authors, vec!["bob"]);
    assert_eq!(profile.discussion.topics.len(), 10);
    assert_eq!(profile.discussion.topics[..3], ["great", "walkthrough", "thanks"]);
}

#[test]
fn test_fixture_comment_tree_shape() {
    let thread = load_thread("thread.json");
    let roots: Vec<&str> = thread.comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(roots, vec!["1", "3", "5"]);

    let preorder: Vec<&str> = walk_forest(&thread.comments).map(|c| c.id.as_str()).collect();
    assert_eq!(preorder, vec!["1", "2", "4", "3", "5", "6"]);
}

#[test]
fn test_prerequisites_and_code_block_tier() {
    let body = format!(
        "## Prerequisites\n- node\n- npm\n## Intro\n{}\nOur architecture favours performance.\n{}",
        "Some introduction text that is definitely longer than two hundred characters. ".repeat(3),
        fence().repeat(3)
    );
    let ctx = analyze_technical_depth(&body);

    assert_eq!(ctx.terms.advanced.len(), 2);
    assert_eq!(ctx.depth, DepthTier::Intermediate);
    assert_eq!(ctx.prerequisites, vec!["node", "npm"]);
}

#[test]
fn test_high_quality_discussion_with_code() {
    let mut comments: Vec<Comment> = (0..5).map(|i| Comment::new(i.to_string(), "a".repeat(250))).collect();
    comments[3].body = format!("{}{}", fence(), "a".repeat(250 - fence().len()));

    assert_eq!(analyze_discussion(&comments).quality, QualityTier::High);
}

#[test]
fn test_orphan_comment_scenario() {
    let thread = load_thread("orphan_comments.json");
    let roots: Vec<&str> = thread.comments.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(roots, vec!["1", "3"]);
    assert_eq!(thread.comments[0].children.len(), 1);
    assert_eq!(thread.comments[0].children[0].id, "2");
}

#[test]
fn test_expertise_scenario() {
    let mut articles = Vec::new();
    articles.extend((0..6).map(|i| Article::new(i.to_string(), "t", "").with_tags(["go"])));
    articles.extend((6..9).map(|i| Article::new(i.to_string(), "t", "").with_tags(["rust"])));
    articles.push(Article::new("9", "t", "").with_tags(["ts"]));

    let user: User = RawUser { username: Some("gopher".to_string()), ..Default::default() }.try_into().unwrap();
    let ctx = analyze_author(&user, &articles);

    assert_eq!(ctx.expertise, vec!["go", "rust", "ts"]);
    assert_eq!(ctx.article_count, 10);
}

#[test]
fn test_average_reactions_properties() {
    assert_eq!(calculate_average_reactions(&[]), 0);

    for n in 1..12 {
        let articles: Vec<Article> = (0..n).map(|i| Article::new(i.to_string(), "t", "").with_reactions(37)).collect();
        assert_eq!(calculate_average_reactions(&articles), 37);
    }
}

#[test]
fn test_empty_discussion_is_low_and_neutral() {
    let ctx = analyze_discussion(&[]);
    assert_eq!(ctx.quality, QualityTier::Low);
    assert_eq!(ctx.sentiment, Sentiment::Neutral);
}

#[test]
fn test_tier_monotonic_when_adding_code_blocks() {
    let prose = "We discuss architecture, performance and the database api.";
    let mut previous = DepthTier::Beginner;
    for blocks in 0..9 {
        let body = format!("{}\n{}", prose, fence().repeat(blocks));
        let tier = analyze_technical_depth(&body).depth;
        assert!(tier >= previous);
        previous = tier;
    }
    assert_eq!(previous, DepthTier::Advanced);
}

#[test]
fn test_tree_round_trip_preserves_identities() {
    let records: Vec<Comment> = (0..64)
        .map(|i| {
            let comment = Comment::new(i.to_string(), "");
            if i % 3 == 0 { comment } else { comment.reply_to(((i * 7) % 64).to_string()) }
        })
        .collect();
    let expected: HashSet<String> = records.iter().map(|c| c.id.clone()).collect();

    let roots = build_comment_tree(records);
    let ids: Vec<String> = walk_forest(&roots).map(|c| c.id.clone()).collect();

    assert_eq!(ids.len(), expected.len());
    assert_eq!(ids.into_iter().collect::<HashSet<_>>(), expected);
}

#[test]
fn test_analysis_is_deterministic() {
    let thread = load_thread("thread.json");
    let analyzer = Analyzer::new();
    let config = JsonConfig::default();

    let first = profile_to_json(&analyzer.profile(&thread), &config).unwrap();
    let second = profile_to_json(&analyzer.profile(&thread), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_record_is_reported() {
    let bundle = ThreadBundle::read_file(Path::new(&get_fixture_path("invalid_comment.json"))).unwrap();
    let err = bundle.into_thread(DuplicatePolicy::LastWins).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("comment"));
}

#[test]
fn test_duplicate_policies() {
    let bundle = ThreadBundle::read_file(Path::new(&get_fixture_path("duplicate_comments.json"))).unwrap();

    let thread = bundle.clone().into_thread(DuplicatePolicy::LastWins).unwrap();
    assert_eq!(thread.comments.len(), 1);
    assert_eq!(thread.comments[0].body, "again");

    assert!(matches!(
        bundle.into_thread(DuplicatePolicy::Reject),
        Err(ForumCtxError::DuplicateId(id)) if id == "1"
    ));
}

#[test]
fn test_config_file_injects_dictionaries() {
    let config = ConfigLoader::with_dirs(None, None)
        .file(get_fixture_path("config.json"))
        .load()
        .unwrap();
    let analyzer = Analyzer::with_config(&config).unwrap();
    let thread = load_thread("thread.json");
    let profile = analyzer.profile(&thread);

    assert_eq!(profile.technical.depth, DepthTier::Advanced);
    assert_eq!(profile.technical.terms.advanced, vec!["runtime", "spawn", "handle"]);
    assert_eq!(profile.discussion.topics.len(), 3);
    assert_eq!(profile.author.expertise.len(), 3);
}
