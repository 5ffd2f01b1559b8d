// flagstrip/src/commands/rules.rs
//! `rules` command: prints the rule set a plugin would be built with.

use anyhow::{Context, Result};
use std::io::Write;

use flagstrip_core::PluginOptions;

use crate::cli::RulesCommand;

pub fn run_rules<W: Write>(cmd: &RulesCommand, out: &mut W) -> Result<()> {
    let options = match &cmd.config {
        Some(path) => PluginOptions::load_from_file(path)?,
        None => PluginOptions::default(),
    };
    let rules = options.resolve_rules()?;
    let yaml = serde_yml::to_string(&rules).context("Failed to serialize rule set")?;
    write!(out, "{}", yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_printed_with_public_field_names() {
        let mut buf = Vec::new();
        run_rules(&RulesCommand { config: None }, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("rule: true"));
        assert!(out.contains("fileTypes:"));
        assert!(out.contains("// @delete-start"));
    }
}
