// flagstrip/src/cli.rs
//! This file defines the command-line interface (CLI) for the flagstrip application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use flagstrip_core::Enforce;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "flagstrip",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip feature-flag blocks from source files",
    long_about = "flagstrip removes code placed between feature-flag markers (such as `// @delete-start` and `// @delete-end`) from source files, the same way the build-time transform does, and can emit a source map describing the edit.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `flagstrip` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Removes feature-flag blocks and writes the transformed content.
    #[command(about = "Removes feature-flag blocks and writes the transformed content.")]
    Strip(StripCommand),

    /// Reports the blocks that would be removed without modifying anything.
    #[command(about = "Reports the feature-flag blocks that would be removed, without modifying anything.")]
    Scan(ScanCommand),

    /// Prints the active rule set.
    #[command(about = "Prints the active rule set as YAML.")]
    Rules(RulesCommand),
}

/// Options shared by every command that builds a plugin.
#[derive(Args, Debug, Clone, Default)]
pub struct PluginArgs {
    /// Path to a plugin options file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a plugin options file (YAML) with enforce/include/exclude/rules.")]
    pub config: Option<PathBuf>,

    /// Include glob patterns (replaces the default extension allow-list).
    #[arg(long = "include", value_name = "GLOB", value_delimiter = ',', help = "Only process ids matching these globs (comma-separated).")]
    pub include: Vec<String>,

    /// Include regular expression.
    #[arg(long = "include-regex", value_name = "REGEX", conflicts_with = "include", help = "Only process ids matching this regular expression.")]
    pub include_regex: Option<String>,

    /// Exclude glob patterns.
    #[arg(long = "exclude", value_name = "GLOB", value_delimiter = ',', help = "Never process ids matching these globs (comma-separated).")]
    pub exclude: Vec<String>,

    /// Exclude regular expression.
    #[arg(long = "exclude-regex", value_name = "REGEX", conflicts_with = "exclude", help = "Never process ids matching this regular expression.")]
    pub exclude_regex: Option<String>,

    /// Id (virtual path) used for content read from stdin.
    #[arg(long = "id", value_name = "ID", default_value = "stdin.js", help = "Id used for stdin input; its extension selects the rules.")]
    pub stdin_id: String,
}

/// Arguments for the `strip` command.
#[derive(Parser, Debug)]
pub struct StripCommand {
    /// Input files (reads from stdin if none are given).
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub plugin: PluginArgs,

    /// Placement hint reported to the host pipeline.
    #[arg(long = "enforce", value_enum, help = "Override the transform placement (pre or post).")]
    pub enforce: Option<EnforceChoice>,

    /// Write transformed files into this directory instead of stdout.
    #[arg(long = "out-dir", short = 'o', value_name = "DIR", help = "Write transformed files into this directory instead of stdout.")]
    pub out_dir: Option<PathBuf>,

    /// Also write `<file>.map` next to each transformed file.
    #[arg(long = "source-map", requires = "out_dir", help = "Write a `.map` source map next to each transformed file.")]
    pub source_map: bool,

    /// Show a unified diff instead of the transformed content.
    #[arg(long, short = 'D', conflicts_with = "out_dir", help = "Show a unified diff of the changes instead of the output.")]
    pub diff: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Input files (reads from stdin if none are given).
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub plugin: PluginArgs,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json", help = "Print the scan report as JSON.")]
    pub json: bool,

    /// Exit with a non-zero code if any block is found.
    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if any feature-flag block is found.")]
    pub fail_on_match: bool,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Path to a plugin options file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a plugin options file (YAML).")]
    pub config: Option<PathBuf>,
}

/// CLI mirror of the placement flag.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EnforceChoice {
    Pre,
    Post,
}

impl From<EnforceChoice> for Enforce {
    fn from(choice: EnforceChoice) -> Self {
        match choice {
            EnforceChoice::Pre => Enforce::Pre,
            EnforceChoice::Post => Enforce::Post,
        }
    }
}
