// flagstrip/src/main.rs
//! flagstrip entry point.
//!
//! Parses arguments, configures logging and dispatches to the selected command.

use anyhow::Result;
use clap::Parser;

use flagstrip::cli::{Cli, Commands};
use flagstrip::commands::{rules::run_rules, scan::run_scan, strip::run_strip};
use flagstrip::logger;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_for(args.quiet, args.debug));

    match &args.command {
        Commands::Strip(cmd) => run_strip(cmd, args.quiet),
        Commands::Scan(cmd) => run_scan(cmd),
        Commands::Rules(cmd) => run_rules(cmd, &mut std::io::stdout().lock()),
    }
}
