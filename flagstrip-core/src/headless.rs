// File: flagstrip-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot stripping outside a build pipeline.
//! Builds a plugin from the given options, runs the hook once and drops the map.

use anyhow::{Context, Result};

use crate::config::PluginOptions;
use crate::plugin::FeatureFlagPlugin;

/// Strips feature-flag blocks from `content` identified by `id`.
///
/// Returns `Ok(None)` when the options' admission filter rejects `id`.
///
/// # Arguments
///
/// * `options` - Plugin options (rules, include/exclude).
/// * `content` - The source text.
/// * `id` - The path the content belongs to; its extension selects the rules.
pub fn headless_strip_string(options: PluginOptions, content: &str, id: &str) -> Result<Option<String>> {
    let plugin = FeatureFlagPlugin::new(options).context("Failed to configure feature-flag plugin")?;
    let result = plugin
        .transform(content, id)
        .with_context(|| format!("Failed to strip feature flags from '{}'", id))?;
    Ok(result.map(|r| r.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rule;

    #[test]
    fn test_headless_strip_string_default_rules() -> Result<()> {
        let content = "keep();\n// @delete-start\ndrop();\n// @delete-end\nalsoKeep();\n";
        let stripped = headless_strip_string(PluginOptions::default(), content, "main.js")?;
        assert_eq!(stripped.as_deref(), Some("keep();\n\nalsoKeep();\n"));
        Ok(())
    }

    #[test]
    fn test_headless_strip_string_custom_rules() -> Result<()> {
        let options = PluginOptions {
            rules: Some(vec![Rule::new("/* pro */", "/* /pro */", ["css"])]),
            ..Default::default()
        };
        let stripped = headless_strip_string(options, "a{}/* pro */b{}/* /pro */c{}", "theme.css")?;
        assert_eq!(stripped.as_deref(), Some("a{}c{}"));
        Ok(())
    }

    #[test]
    fn test_headless_strip_string_not_admitted() -> Result<()> {
        let stripped = headless_strip_string(PluginOptions::default(), "anything", "data.json")?;
        assert!(stripped.is_none());
        Ok(())
    }
}
