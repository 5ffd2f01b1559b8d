// flagstrip/src/lib.rs
//! # flagstrip CLI Application
//!
//! Command-line host for the `flagstrip-core` transform. It plays the part of a
//! build pipeline: reads files (or stdin), hands each one to the feature-flag
//! hook, and writes the stripped output and optional source maps.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
