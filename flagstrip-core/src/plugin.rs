//! The transform hook a build pipeline calls once per candidate file.
//!
//! `FeatureFlagPlugin` is built once from `PluginOptions` and is immutable
//! afterwards, so a host may call `transform` from several workers at once.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::{debug, info};

use crate::config::{Enforce, PluginOptions, RuleSet};
use crate::editor::{apply_spans, TransformResult};
use crate::errors::FlagStripError;
use crate::filter::FileFilter;
use crate::scanner::{self, file_type_of, Span};

/// Name the hook registers under with the host pipeline.
pub const PLUGIN_NAME: &str = "vite-plugin-feature-flag";

#[derive(Debug, Clone)]
pub struct FeatureFlagPlugin {
    rules: Arc<RuleSet>,
    filter: FileFilter,
    enforce: Enforce,
}

impl FeatureFlagPlugin {
    pub fn new(options: PluginOptions) -> Result<Self, FlagStripError> {
        let rules = options.resolve_rules()?;
        let filter = FileFilter::new(options.include.as_ref(), options.exclude.as_ref())?;
        let enforce = options.enforce.unwrap_or_default();

        info!(
            "{} configured with {} rule(s), enforce = {}.",
            PLUGIN_NAME,
            rules.len(),
            enforce
        );
        Ok(Self {
            rules: Arc::new(rules),
            filter,
            enforce,
        })
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn enforce(&self) -> Enforce {
        self.enforce
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether the admission filter accepts `id`.
    pub fn admits(&self, id: &str) -> bool {
        self.filter.is_match(id)
    }

    /// Spans the active rules would delete from `code`, or `None` if `id` is not admitted.
    pub fn find_spans(&self, code: &str, id: &str) -> Option<Vec<Span>> {
        if !self.admits(id) {
            return None;
        }
        Some(scanner::find_spans(&self.rules.rules, code, file_type_of(id)))
    }

    /// Strips feature-flag blocks from `code`.
    ///
    /// Returns `Ok(None)` when `id` is not admitted; the host should then keep
    /// the content exactly as given.
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<TransformResult>, FlagStripError> {
        let Some(spans) = self.find_spans(code, id) else {
            debug!("Skipping '{}': not admitted.", id);
            return Ok(None);
        };
        debug!("Transforming '{}' with {} span(s).", id, spans.len());
        apply_spans(code, &spans, id).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterPattern, Rule};

    #[test]
    fn test_defaults() {
        let plugin = FeatureFlagPlugin::new(PluginOptions::default()).unwrap();
        assert_eq!(plugin.name(), "vite-plugin-feature-flag");
        assert_eq!(plugin.enforce(), Enforce::Pre);
        assert_eq!(plugin.rules().len(), 2);
    }

    #[test]
    fn test_enforce_post_is_honoured() {
        let plugin = FeatureFlagPlugin::new(PluginOptions {
            enforce: Some(Enforce::Post),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plugin.enforce(), Enforce::Post);
    }

    #[test]
    fn test_invalid_rules_fail_construction() {
        let result = FeatureFlagPlugin::new(PluginOptions {
            rules: Some(vec![Rule::new("x", "x", ["js"])]),
            ..Default::default()
        });
        assert!(matches!(result, Err(FlagStripError::InvalidRule { index: 0, .. })));
    }

    #[test]
    fn test_excluded_id_is_never_scanned() {
        let plugin = FeatureFlagPlugin::new(PluginOptions {
            exclude: Some(FilterPattern::regex("excluded")),
            ..Default::default()
        })
        .unwrap();
        assert!(plugin.find_spans("// @delete-start\n// @delete-end", "excluded.js").is_none());
    }

    #[test]
    fn test_block_markers_strip_only_in_component_files() {
        let plugin = FeatureFlagPlugin::new(PluginOptions::default()).unwrap();
        let code = "<A />{/* @delete-start */}<B />{/* @delete-end */}<C />";

        let tsx = plugin.transform(code, "App.tsx").unwrap().unwrap();
        assert_eq!(tsx.code, "<A /><C />");

        let ts = plugin.transform(code, "App.ts").unwrap().unwrap();
        assert_eq!(ts.code, code);
    }

    #[test]
    fn test_cross_rule_overlap_removes_the_union() {
        let plugin = FeatureFlagPlugin::new(PluginOptions {
            rules: Some(vec![
                Rule::new("<a>", "</a>", ["html"]),
                Rule::new("<b>", "</b>", ["html"]),
            ]),
            ..Default::default()
        })
        .unwrap();
        let result = plugin.transform("x<a>1<b>2</a>3</b>y", "page.html").unwrap().unwrap();
        assert_eq!(result.code, "xy");
    }
}
