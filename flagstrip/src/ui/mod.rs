// flagstrip/src/ui/mod.rs
//! Terminal presentation helpers: status messages and diff rendering.

pub mod diff_viewer;
pub mod output_format;
