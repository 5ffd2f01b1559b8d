//! Configuration management for `flagstrip-core`.
//!
//! This module defines the marker rules, the rule set that owns them, and the
//! plugin options a host passes in at construction time. It handles YAML
//! (de)serialization and validates rules before they reach the scanner.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::FlagStripError;

/// A single marker-pair rule.
///
/// The serialized field names (`rule`, `start`, `end`, `fileTypes`) are the
/// public, user-facing record shape. `rule` is the enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    /// Whether the rule participates in scanning.
    #[serde(rename = "rule")]
    pub enabled: bool,
    /// Literal text opening a deletable region.
    pub start: String,
    /// Literal text closing a deletable region.
    pub end: String,
    /// Extension tokens (without the dot) this rule applies to.
    #[serde(rename = "fileTypes")]
    pub file_types: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(start: impl Into<String>, end: impl Into<String>, file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            start: start.into(),
            end: end.into(),
            file_types: file_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a copy of this rule with the enabled flag set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// True when the rule is enabled and scoped to `file_type`.
    pub fn applies_to(&self, file_type: &str) -> bool {
        self.enabled && self.file_types.iter().any(|t| t == file_type)
    }
}

/// The ordered list of rules consulted by the scanner.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

/// Error type for missing rule configuration files.
#[derive(Debug)]
pub struct RuleConfigNotFoundError {
    pub config_name: String,
}

impl fmt::Display for RuleConfigNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rule configuration '{}' not found.", self.config_name)
    }
}

impl std::error::Error for RuleConfigNotFoundError {}

impl RuleSet {
    /// Builds a rule set, rejecting rules with empty or identical markers.
    pub fn new(rules: Vec<Rule>) -> Result<Self, FlagStripError> {
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    /// Loads marker rules from a YAML file with a top-level `rules:` list.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!(RuleConfigNotFoundError {
                config_name: path.display().to_string(),
            }));
        }
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let set: RuleSet = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        validate_rules(&set.rules)?;
        info!("Loaded {} rules from file {}.", set.rules.len(), path.display());
        Ok(set)
    }

    /// Loads the built-in rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let set: RuleSet =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", set.rules.len());
        Ok(set)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Picks the active rule set: user rules replace the defaults wholesale.
pub fn merge_rules(default_set: RuleSet, user_set: Option<RuleSet>) -> RuleSet {
    match user_set {
        Some(user) => {
            debug!(
                "User rules provided ({}), replacing {} default rules.",
                user.rules.len(),
                default_set.rules.len()
            );
            user
        }
        None => default_set,
    }
}

/// Where the host should run this transform relative to other content transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    #[default]
    Pre,
    Post,
}

impl fmt::Display for Enforce {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Enforce::Pre => f.write_str("pre"),
            Enforce::Post => f.write_str("post"),
        }
    }
}

/// An include/exclude specifier as accepted from configuration.
///
/// In YAML this is a string, a list of strings, or `{ regex: "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FilterPattern {
    Regex { regex: String },
    Single(String),
    List(Vec<String>),
}

impl FilterPattern {
    pub fn glob(pattern: impl Into<String>) -> Self {
        FilterPattern::Single(pattern.into())
    }

    pub fn globs<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPattern::List(patterns.into_iter().map(Into::into).collect())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        FilterPattern::Regex {
            regex: pattern.into(),
        }
    }
}

/// Options recognized by the feature-flag plugin. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOptions {
    pub enforce: Option<Enforce>,
    pub include: Option<FilterPattern>,
    pub exclude: Option<FilterPattern>,
    pub rules: Option<Vec<Rule>>,
}

impl PluginOptions {
    /// Loads plugin options from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading plugin options from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let options: PluginOptions = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(rules) = &options.rules {
            validate_rules(rules)?;
        }
        Ok(options)
    }

    /// Resolves the rule set these options select, falling back to the defaults.
    pub fn resolve_rules(&self) -> Result<RuleSet, FlagStripError> {
        let user = match &self.rules {
            Some(rules) => Some(RuleSet::new(rules.clone())?),
            None => None,
        };
        Ok(merge_rules(RuleSet::load_default_rules()?, user))
    }
}

/// Validates marker integrity: both markers non-empty and distinct.
///
/// Reports the first offending rule by its position in `rules`.
pub fn validate_rules(rules: &[Rule]) -> Result<(), FlagStripError> {
    for (index, rule) in rules.iter().enumerate() {
        let reason = if rule.start.is_empty() {
            "empty `start` marker".to_string()
        } else if rule.end.is_empty() {
            "empty `end` marker".to_string()
        } else if rule.start == rule.end {
            format!("`start` and `end` are both '{}'", rule.start)
        } else {
            continue;
        };
        return Err(FlagStripError::InvalidRule { index, reason });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_cover_line_and_block_markers() {
        let set = RuleSet::load_default_rules().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules[0].start, "// @delete-start");
        assert_eq!(set.rules[0].end, "// @delete-end");
        assert!(set.rules[0].applies_to("less"));
        assert_eq!(set.rules[1].start, "{/* @delete-start */}");
        assert!(set.rules[1].applies_to("tsx"));
        assert!(!set.rules[1].applies_to("js"));
    }

    #[test]
    fn test_disabled_rule_applies_nowhere() {
        let rule = Rule::new("a", "b", ["js"]).with_enabled(false);
        assert!(!rule.applies_to("js"));
    }

    #[test]
    fn test_validate_rejects_empty_and_identical_markers() {
        let err = RuleSet::new(vec![Rule::new("", "end", ["js"])]).unwrap_err();
        assert!(matches!(err, FlagStripError::InvalidRule { index: 0, .. }));
        assert_eq!(err.to_string(), "Invalid rule #0: empty `start` marker");

        let err = validate_rules(&[
            Rule::new("a", "b", ["js"]),
            Rule::new("same", "same", ["js"]),
        ])
        .unwrap_err();
        match err {
            FlagStripError::InvalidRule { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("'same'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rules_reports_invalid_rule() {
        let options = PluginOptions {
            rules: Some(vec![Rule::new("start", "", ["js"])]),
            ..Default::default()
        };
        let err = options.resolve_rules().unwrap_err();
        assert!(matches!(err, FlagStripError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn test_merge_rules_user_replaces_defaults() {
        let defaults = RuleSet::load_default_rules().unwrap();
        let user = RuleSet::new(vec![Rule::new("<!-- a -->", "<!-- b -->", ["html"])]).unwrap();
        let merged = merge_rules(defaults.clone(), Some(user.clone()));
        assert_eq!(merged, user);
        assert_eq!(merge_rules(defaults.clone(), None), defaults);
    }

    #[test]
    fn test_filter_pattern_shapes_from_yaml() {
        let options: PluginOptions = serde_yml::from_str(
            r#"
enforce: post
include: ["**/*.js", "**/*.ts"]
exclude:
  regex: "excluded"
"#,
        )
        .unwrap();
        assert_eq!(options.enforce, Some(Enforce::Post));
        assert_eq!(
            options.include,
            Some(FilterPattern::globs(["**/*.js", "**/*.ts"]))
        );
        assert_eq!(options.exclude, Some(FilterPattern::regex("excluded")));

        let single: PluginOptions = serde_yml::from_str("exclude: node_modules").unwrap();
        assert_eq!(single.exclude, Some(FilterPattern::glob("node_modules")));
    }
}
