use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("forumctx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Profile a forum article, its author and its discussion")
        .arg(clap::arg!(<INPUT> "Thread bundle JSON file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, toml, text)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "toml", "text"]),
        )
        .arg(
            clap::arg!(-s --section <SECTION> "Profile section to print")
                .value_name("SECTION")
                .default_value("all")
                .value_parser(["all", "technical", "content", "author", "discussion"]),
        )
        .arg(
            clap::arg!(-c --config <FILE> "Analyzer configuration file (JSON)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::Arg::new("config_dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory searched for config.json")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::Arg::new("reject_duplicates")
                .long("reject-duplicates")
                .help("Fail when two comments share an id")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(clap::arg!(--timing "Print per-step timings"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "forumctx", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "forumctx", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "forumctx", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "forumctx", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
