//! errors.rs - Custom error types for the flagstrip-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `flagstrip-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlagStripError {
    #[error("Invalid rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },

    #[error("Invalid filter pattern '{0}': {1}")]
    InvalidPattern(String, globset::Error),

    #[error("Invalid filter regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Failed to build source map: {0}")]
    SourceMap(#[from] sourcemap::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
