mod echo;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use forumctx_core::{
    Analyzer, ConfigLoader, DuplicatePolicy, JsonConfig, OutputFormat, Section, ThreadBundle, profile_to_json,
    profile_to_text, profile_to_toml,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Profile a forum article, its author and its discussion
#[derive(Parser, Debug)]
#[command(name = "forumctx")]
#[command(version)]
#[command(about = "Profile a forum article, its author and its discussion", long_about = None)]
struct Args {
    /// Thread bundle JSON file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, toml, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Profile section to print (all, technical, content, author, discussion)
    #[arg(short, long, default_value = "all", value_name = "SECTION")]
    section: Section,

    /// Analyzer configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory searched for config.json before the standard config directory
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Fail when two comments share an id instead of keeping the last
    #[arg(long)]
    reject_duplicates: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print per-step timings
    #[arg(long)]
    timing: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("forumctx_core=debug,forumctx=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_bundle(input: &str) -> anyhow::Result<ThreadBundle> {
    if input == "-" {
        ThreadBundle::read_stdin().context("Failed to read thread bundle from stdin")
    } else {
        ThreadBundle::read_file(Path::new(input)).with_context(|| format!("Failed to read thread bundle: {}", input))
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if args.verbose {
        echo::print_banner();
        echo::print_step(1, 4, &format!("Reading thread bundle from {}", args.input.bright_white()));
    }

    let step = Instant::now();
    let bundle = read_bundle(&args.input)?;
    timings.push(("Read".to_string(), step.elapsed()));

    if args.verbose {
        if let Ok(metadata) = fs::metadata(&args.input) {
            echo::print_detail("Size", &echo::format_size(metadata.len() as usize));
        }
        if let Some(title) = &bundle.article.title {
            echo::print_detail("Article", title);
        }
        echo::print_detail("Author articles", &bundle.author_articles.len().to_string());
        echo::print_detail("Comments", &bundle.comments.len().to_string());
        eprintln!();
        echo::print_step(2, 4, "Loading analyzer configuration");
    }

    let step = Instant::now();
    let mut loader = match &args.config_dir {
        Some(dir) => ConfigLoader::new().custom_dir(dir),
        None => ConfigLoader::new(),
    };
    if let Some(file) = &args.config {
        loader = loader.file(file);
    }
    let mut config = loader.load().context("Failed to load analyzer configuration")?;
    if args.reject_duplicates {
        config.duplicate_policy = DuplicatePolicy::Reject;
    }
    let analyzer = Analyzer::with_config(&config).context("Invalid analyzer configuration")?;
    timings.push(("Configure".to_string(), step.elapsed()));

    if args.verbose {
        echo::print_step(3, 4, "Validating records and analyzing thread");
    }

    let step = Instant::now();
    let thread = bundle
        .into_thread(config.duplicate_policy)
        .context("Invalid thread bundle")?;
    let profile = analyzer.profile(&thread);
    timings.push(("Analyze".to_string(), step.elapsed()));

    if args.verbose {
        echo::print_profile_summary(&profile);
        echo::print_step(4, 4, &format!("Writing {:?} output", args.format));
    }

    if args.pretty && args.format != OutputFormat::Json {
        echo::print_warning("--pretty only applies to JSON output");
    }

    let step = Instant::now();
    let output = match args.format {
        OutputFormat::Json => {
            let config = JsonConfig { pretty: args.pretty, section: args.section };
            profile_to_json(&profile, &config).context("Failed to render JSON")? + "\n"
        }
        OutputFormat::Toml => profile_to_toml(&profile, args.section).context("Failed to render TOML")?,
        OutputFormat::Text => profile_to_text(&profile, args.section),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", output),
    }
    timings.push(("Write".to_string(), step.elapsed()));

    if args.timing {
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            echo::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
