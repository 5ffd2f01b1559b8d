// flagstrip-core/src/lib.rs
//! # flagstrip Core Library
//!
//! `flagstrip-core` removes developer-marked feature-flag blocks from source text
//! at build time. Code between a start marker and an end marker (for example
//! `// @delete-start` … `// @delete-end`) is deleted, and a source map is
//! produced so positions in the output still resolve to the original file.
//!
//! The engine is purely lexical and stateless: every call is a pure function of
//! the configured rules, the admission filter, the content and its id.
//!
//! ## Modules
//!
//! * `config`: Defines `Rule`, `RuleSet` and `PluginOptions`, with YAML loading.
//! * `filter`: The include/exclude admission filter.
//! * `scanner`: Locates marker-delimited `Span`s for a file type.
//! * `editor`: Deletes spans and builds the source map.
//! * `plugin`: The `FeatureFlagPlugin` hook a build pipeline calls per file.
//! * `headless`: One-shot convenience wrapper.
//! * `errors`: The library error enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use flagstrip_core::{FeatureFlagPlugin, PluginOptions};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let plugin = FeatureFlagPlugin::new(PluginOptions::default())?;
//!
//!     let input = "a\n// @delete-start\nb\n// @delete-end\nc";
//!     let result = plugin.transform(input, "src/main.js")?.expect("js files are admitted");
//!
//!     assert_eq!(result.code, "a\n\nc");
//!     println!("{}", result.map_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible engine operations return [`FlagStripError`]; loaders return
//! `anyhow::Result` with context. An unterminated start marker, a disabled rule
//! and a non-admitted file are not errors.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod editor;
pub mod errors;
pub mod filter;
pub mod headless;
pub mod plugin;
pub mod scanner;

/// Re-exports the rule model and configuration types.
pub use config::{
    merge_rules,
    validate_rules,
    Enforce,
    FilterPattern,
    PluginOptions,
    Rule,
    RuleConfigNotFoundError,
    RuleSet,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::FlagStripError;

pub use editor::{apply_spans, TransformResult};
pub use filter::{FileFilter, DEFAULT_INCLUDE};
pub use plugin::{FeatureFlagPlugin, PLUGIN_NAME};
pub use scanner::{file_type_of, find_spans, Span};

/// Re-exports the one-shot helper for non-interactive use.
pub use headless::headless_strip_string;
