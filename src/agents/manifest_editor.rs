use crate::error::{ReleaseError, Result};
use crate::version::{self, UpdateType, VersionSet};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrites version metadata inside the plugin manifest (`init.php`).
///
/// The manifest is a PHP source file whose version fields live in a header
/// docblock and in `define(...)` constants, so the edits are anchored regex
/// substitutions over the raw text rather than a parsed document.
pub struct ManifestEditor {
    manifest_path: PathBuf,
}

/// One docblock rewrite: the pattern matches the whole field including its
/// current version, the replacement carries the new one.
struct HeaderRule {
    pattern: &'static str,
    replacement: String,
}

impl ManifestEditor {
    pub fn new<P: AsRef<Path>>(manifest_path: P) -> Self {
        Self {
            manifest_path: manifest_path.as_ref().to_path_buf(),
        }
    }

    pub fn update(&self, versions: &VersionSet, update_type: UpdateType) -> Result<()> {
        let content = fs::read_to_string(&self.manifest_path).map_err(|e| {
            ReleaseError::ManifestUpdate(format!(
                "Failed to read '{}': {e}",
                self.manifest_path.display()
            ))
        })?;

        let updated = apply_rules(&content, versions, update_type)?;

        fs::write(&self.manifest_path, updated).map_err(|e| {
            ReleaseError::ManifestUpdate(format!(
                "Failed to write '{}': {e}",
                self.manifest_path.display()
            ))
        })
    }
}

/// Rules are applied in a fixed order; the patterns are disjoint, so later
/// substitutions never re-match earlier replacement output.
fn header_rules(versions: &VersionSet, update_type: UpdateType) -> Result<Vec<HeaderRule>> {
    let mut rules = vec![HeaderRule {
        pattern: r"\* Version:\s*\d+\.\d+\.\d+",
        replacement: format!("* Version: {}", versions.plugin),
    }];

    if update_type.includes_woo() {
        let woo = versions.woo()?;
        rules.push(HeaderRule {
            pattern: r"\* WC requires at least:\s*\d+\.\d+",
            replacement: format!(
                "* WC requires at least: {}",
                version::adjust_compatibility_version(woo)?
            ),
        });
        rules.push(HeaderRule {
            pattern: r"\* WC tested up to:\s*\d+\.\d+",
            replacement: format!("* WC tested up to: {woo}"),
        });
    }

    rules.push(HeaderRule {
        pattern: r"\* @version\s*\d+\.\d+\.\d+",
        replacement: format!("* @version {}", versions.plugin),
    });

    Ok(rules)
}

fn apply_rules(content: &str, versions: &VersionSet, update_type: UpdateType) -> Result<String> {
    let mut content = content.to_string();

    for rule in header_rules(versions, update_type)? {
        let regex = compile(rule.pattern)?;
        content = regex
            .replace_all(&content, rule.replacement.as_str())
            .into_owned();
    }

    replace_version_constants(&content, &versions.plugin)
}

/// Every `define('..._VERSION', 'X.Y.Z'` constant tracks the plugin
/// version, except database schema markers ending in `_DB_VERSION`.
fn replace_version_constants(content: &str, plugin_version: &str) -> Result<String> {
    let regex = compile(r"(define\(\s*'([A-Z][A-Z0-9_]*_VERSION)'\s*,\s*')\d+\.\d+\.\d+")?;

    Ok(regex
        .replace_all(content, |caps: &Captures| {
            if caps[2].ends_with("_DB_VERSION") {
                caps[0].to_string()
            } else {
                format!("{}{}", &caps[1], plugin_version)
            }
        })
        .into_owned())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseError::ManifestUpdate(format!("Invalid manifest pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::PlatformSelection;
    use tempfile::tempdir;

    const MANIFEST: &str = "\
<?php
/**
 * Plugin Name: Example Plugin
 * Version: 1.0.0
 * WC requires at least: 8.7
 * WC tested up to: 8.9
 * @version 1.0.0
 */

if ( ! defined( 'EXAMPLE_VERSION' ) ) {
\tdefine( 'EXAMPLE_VERSION', '1.0.0' );
}
define( 'EXAMPLE_DB_VERSION', '1.0.0' );
";

    fn versions(woo: Option<&str>, wordpress: Option<&str>) -> VersionSet {
        let selection = PlatformSelection {
            update_type: UpdateType::Both,
            woo: woo.map(str::to_string),
            wordpress: wordpress.map(str::to_string),
        };
        VersionSet::new("1.2.0", &selection)
    }

    #[test]
    fn rewrites_header_and_constants_for_both_axes() {
        let updated = apply_rules(MANIFEST, &versions(Some("9.1"), Some("6.5")), UpdateType::Both)
            .unwrap();

        assert!(updated.contains("* Version: 1.2.0"));
        assert!(updated.contains("* @version 1.2.0"));
        assert!(updated.contains("* WC requires at least: 8.9"));
        assert!(updated.contains("* WC tested up to: 9.1"));
        assert!(updated.contains("define( 'EXAMPLE_VERSION', '1.2.0' )"));
    }

    #[test]
    fn leaves_db_version_constant_untouched() {
        let updated = apply_rules(MANIFEST, &versions(Some("9.1"), Some("6.5")), UpdateType::Both)
            .unwrap();
        assert!(updated.contains("define( 'EXAMPLE_DB_VERSION', '1.0.0' )"));
    }

    #[test]
    fn wordpress_only_update_skips_wc_compatibility_lines() {
        let updated = apply_rules(
            MANIFEST,
            &versions(None, Some("6.5")),
            UpdateType::WordPressOnly,
        )
        .unwrap();

        assert!(updated.contains("* WC requires at least: 8.7"));
        assert!(updated.contains("* WC tested up to: 8.9"));
        assert!(updated.contains("* Version: 1.2.0"));
    }

    #[test]
    fn unpadded_define_style_is_matched_too() {
        let content = "define('TIGHT_VERSION', '3.4.5');\n";
        let updated = replace_version_constants(content, "3.5.0").unwrap();
        assert_eq!(updated, "define('TIGHT_VERSION', '3.5.0');\n");
    }

    #[test]
    fn updates_file_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("init.php");
        std::fs::write(&path, MANIFEST).unwrap();

        ManifestEditor::new(&path)
            .update(&versions(Some("9.1"), Some("6.5")), UpdateType::Both)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("* Version: 1.2.0"));
        assert!(written.contains("define( 'EXAMPLE_DB_VERSION', '1.0.0' )"));
    }

    #[test]
    fn missing_file_reports_manifest_error() {
        let dir = tempdir().unwrap();
        let editor = ManifestEditor::new(dir.path().join("init.php"));
        let err = editor
            .update(&versions(Some("9.1"), None), UpdateType::WooOnly)
            .unwrap_err();
        assert!(matches!(err, ReleaseError::ManifestUpdate(_)));
    }
}
