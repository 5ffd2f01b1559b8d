// flagstrip-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use flagstrip_core::config::{Enforce, FilterPattern, PluginOptions, RuleSet};
use flagstrip_core::FeatureFlagPlugin;

#[test]
fn test_load_default_rules() {
    let set = RuleSet::load_default_rules().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.iter().all(|r| r.enabled));
    assert_eq!(
        set.rules[0].file_types,
        vec!["jsx", "tsx", "js", "ts", "css", "less"]
    );
    assert_eq!(set.rules[1].file_types, vec!["jsx", "tsx"]);
}

#[test]
fn test_load_rules_from_file() -> Result<()> {
    let yaml_content = r##"
rules:
  - rule: true
    start: "<!-- FEATURE:START -->"
    end: "<!-- FEATURE:END -->"
    fileTypes: ["html"]
  - rule: false
    start: "# begin"
    end: "# end"
    fileTypes: ["yaml"]
"##;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let set = RuleSet::load_from_file(file.path())?;
    assert_eq!(set.len(), 2);
    assert!(set.rules[0].applies_to("html"));
    assert!(!set.rules[1].enabled);
    Ok(())
}

#[test]
fn test_load_rules_missing_field_fails() -> Result<()> {
    let yaml_content = r#"
rules:
  - rule: true
    start: "// on"
    fileTypes: ["js"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("end"));
    Ok(())
}

#[test]
fn test_load_rules_rejects_identical_markers() -> Result<()> {
    let yaml_content = r#"
rules:
  - rule: true
    start: "@@"
    end: "@@"
    fileTypes: ["js"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    assert!(RuleSet::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_missing_rules_file_is_reported() {
    let err = RuleSet::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_plugin_options_from_file_drive_the_plugin() -> Result<()> {
    let yaml_content = r#"
enforce: post
exclude:
  regex: "legacy"
rules:
  - rule: true
    start: "/* beta */"
    end: "/* /beta */"
    fileTypes: ["css"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let options = PluginOptions::load_from_file(file.path())?;
    assert_eq!(options.enforce, Some(Enforce::Post));
    assert_eq!(options.exclude, Some(FilterPattern::regex("legacy")));

    let plugin = FeatureFlagPlugin::new(options)?;
    assert_eq!(plugin.enforce(), Enforce::Post);
    let result = plugin.transform(".a{}/* beta */.b{}/* /beta */", "site.css")?.unwrap();
    assert_eq!(result.code, ".a{}");
    assert!(plugin.transform(".a{}", "legacy.css")?.is_none());
    Ok(())
}

#[test]
fn test_plugin_options_reject_unknown_keys() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"enforse: pre\n")?;
    assert!(PluginOptions::load_from_file(file.path()).is_err());
    Ok(())
}
