//! Logger setup for the flagstrip CLI.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed, in which case the
//! level applies to the flagstrip crates only.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder
            .filter_module("flagstrip", level)
            .filter_module("flagstrip_core", level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

/// Maps the global `--quiet` / `--debug` switches to a level override.
pub fn level_for(quiet: bool, debug: bool) -> Option<LevelFilter> {
    match (quiet, debug) {
        (true, _) => Some(LevelFilter::Off),
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}
