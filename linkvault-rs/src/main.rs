//! Linkvault CLI entry point.

use clap::Parser;
use linkvault::cli::args::{Cli, Commands};
use linkvault::cli::output::Output;
use linkvault::cli::{headings, info, links, list, resolve, search, tags, watch};
use linkvault::config::Config;
use linkvault::error::{ExitCode as VaultExitCode, VaultError};
use linkvault::logging;
use linkvault::vault::Vault;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn verbosity(cli: &Cli) -> Option<LevelFilter> {
    match cli.verbose {
        0 if cli.quiet => Some(LevelFilter::ERROR),
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

fn run(cli: &Cli) -> Result<VaultExitCode, VaultError> {
    // Load config
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    logging::init(&config.logging, verbosity(cli))?;

    // Resolve vault settings, command-line flags win
    let mut settings = config.settings(cli.vault.as_deref());
    if cli.case_sensitive {
        settings.case_sensitive = true;
    }
    if let Some(replacement) = cli.space_replacement {
        settings.space_replacement = replacement.into();
    }

    let root = settings
        .vault_root
        .clone()
        .ok_or(VaultError::VaultNotConfigured)?;
    if !root.is_dir() {
        return Err(VaultError::VaultNotFound(root));
    }

    let vault = Vault::open(settings);

    // Create output helper
    let output = Output::new(cli.output_format(), cli.quiet);

    // Dispatch command
    match &cli.command {
        Commands::List(args) => list::run(&vault, args, &output),
        Commands::Resolve(args) => resolve::run(&vault, args, &output),
        Commands::Backlinks(args) => links::backlinks(&vault, args, &output),
        Commands::Tags(args) => tags::run(&vault, args, &output),
        Commands::Search(args) => search::run(&vault, args, &output),
        Commands::Headings(args) => headings::run(&vault, args, &output),
        Commands::Graph => links::graph(&vault, &output),
        Commands::BrokenLinks(args) => links::broken_links(&vault, args, &output),
        Commands::Info => info::run(&vault, &output),
        Commands::Watch(args) => watch::run(&vault, args, &output),
    }
}
