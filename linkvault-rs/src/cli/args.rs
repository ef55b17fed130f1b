//! CLI argument definitions using clap.

use crate::normalize::SpaceReplacement;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linkvault")]
#[command(author, version, about = "Wikilink, backlink, tag and search index for markdown vaults", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides the config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Match note names case-sensitively
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// How whitespace in note names is compared
    #[arg(long, global = true, value_enum)]
    pub space_replacement: Option<SpaceReplacementArg>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpaceReplacementArg {
    None,
    Hyphen,
}

impl From<SpaceReplacementArg> for SpaceReplacement {
    fn from(arg: SpaceReplacementArg) -> Self {
        match arg {
            SpaceReplacementArg::None => SpaceReplacement::None,
            SpaceReplacementArg::Hyphen => SpaceReplacement::Hyphen,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List indexed notes
    List(ListArgs),

    /// Resolve a link target (`Name` or `Name#Header`) to a note
    Resolve(ResolveArgs),

    /// List notes linking to a note
    Backlinks(NoteArgs),

    /// List tags, or the notes carrying one tag
    Tags(TagsArgs),

    /// Full-text search across notes
    Search(SearchArgs),

    /// List the headings of a note
    Headings(NoteArgs),

    /// Print the link graph
    Graph,

    /// List links whose target note does not exist
    #[command(name = "broken-links")]
    BrokenLinks(BrokenLinksArgs),

    /// Show index statistics
    Info,

    /// Keep the index live and report every change until interrupted
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only notes whose name contains this text
    #[arg(long)]
    pub name: Option<String>,

    /// Only notes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Link target, optionally with `#Header`
    pub target: String,
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Note name, or path relative to the vault
    pub note: String,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Show the notes carrying this tag instead of all tags
    pub tag: Option<String>,

    /// Omit the note lists from the tag summary
    #[arg(long)]
    pub counts_only: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to find, case-insensitive
    pub query: String,
}

#[derive(Args, Debug)]
pub struct BrokenLinksArgs {
    /// Exit with code 10 when any broken link is found
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Debounce delay in milliseconds
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,
}
