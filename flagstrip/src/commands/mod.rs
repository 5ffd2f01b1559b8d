// flagstrip/src/commands/mod.rs
//! Command implementations and the input/plugin plumbing they share.

pub mod rules;
pub mod scan;
pub mod strip;

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, Read};
use std::path::PathBuf;

use flagstrip_core::{Enforce, FeatureFlagPlugin, FilterPattern, PluginOptions};

use crate::cli::PluginArgs;

/// One unit of content handed to the hook.
#[derive(Debug, Clone)]
pub struct Input {
    pub id: String,
    pub path: Option<PathBuf>,
    pub content: String,
}

/// Reads every listed file, or stdin under `stdin_id` when the list is empty.
pub fn read_inputs(paths: &[PathBuf], stdin_id: &str) -> Result<Vec<Input>> {
    if paths.is_empty() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        debug!("Read {} bytes from stdin as '{}'.", content.len(), stdin_id);
        return Ok(vec![Input {
            id: stdin_id.to_string(),
            path: None,
            content,
        }]);
    }

    paths
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            Ok(Input {
                id: path.display().to_string(),
                path: Some(path.clone()),
                content,
            })
        })
        .collect()
}

/// Combines the options file (if any) with command-line overrides.
pub fn plugin_options(args: &PluginArgs, enforce: Option<Enforce>) -> Result<PluginOptions> {
    let mut options = match &args.config {
        Some(path) => PluginOptions::load_from_file(path)?,
        None => PluginOptions::default(),
    };

    if let Some(regex) = &args.include_regex {
        options.include = Some(FilterPattern::regex(regex.clone()));
    } else if !args.include.is_empty() {
        options.include = Some(FilterPattern::globs(args.include.iter().cloned()));
    }

    if let Some(regex) = &args.exclude_regex {
        options.exclude = Some(FilterPattern::regex(regex.clone()));
    } else if !args.exclude.is_empty() {
        options.exclude = Some(FilterPattern::globs(args.exclude.iter().cloned()));
    }

    if enforce.is_some() {
        options.enforce = enforce;
    }
    Ok(options)
}

pub fn build_plugin(args: &PluginArgs, enforce: Option<Enforce>) -> Result<FeatureFlagPlugin> {
    let options = plugin_options(args, enforce)?;
    FeatureFlagPlugin::new(options).context("Failed to configure feature-flag plugin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_patterns_override_config_defaults() {
        let args = PluginArgs {
            include: vec!["*.vue".to_string()],
            exclude_regex: Some("generated".to_string()),
            ..Default::default()
        };
        let options = plugin_options(&args, Some(Enforce::Post)).unwrap();
        assert_eq!(options.include, Some(FilterPattern::globs(["*.vue"])));
        assert_eq!(options.exclude, Some(FilterPattern::regex("generated")));
        assert_eq!(options.enforce, Some(Enforce::Post));
        assert!(options.rules.is_none());
    }
}
