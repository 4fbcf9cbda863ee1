use crate::error::{ReleaseError, Result};
use crate::version::{self, UpdateType, VersionSet};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const CHANGELOG_MARKER: &str = "== Changelog ==";

/// Value a header rule writes once its prefix matches a line.
#[derive(Debug, Clone, Copy)]
enum ValueSelector {
    /// The plugin release version (X.Y.Z).
    PluginVersion,
    /// The WordPress version entered for the run.
    PlatformVersion,
    /// The compatibility floor derived from the WordPress version.
    PlatformFloor,
}

impl ValueSelector {
    fn resolve(self, versions: &VersionSet) -> Result<String> {
        match self {
            ValueSelector::PluginVersion => Ok(versions.plugin.clone()),
            ValueSelector::PlatformVersion => Ok(versions.wordpress()?.to_string()),
            ValueSelector::PlatformFloor => {
                version::adjust_compatibility_version(versions.wordpress()?)
            }
        }
    }
}

/// One header rewrite rule: a line prefix, the version pattern replaced
/// inside that line, and the value that replaces it.
struct HeaderRule {
    prefix: &'static str,
    pattern: &'static str,
    selector: ValueSelector,
}

const HEADER_RULES: &[HeaderRule] = &[
    HeaderRule {
        prefix: "Stable tag:",
        pattern: r"\d+\.\d+\.\d+",
        selector: ValueSelector::PluginVersion,
    },
    HeaderRule {
        prefix: "Tested up to:",
        pattern: r"\d+\.\d+",
        selector: ValueSelector::PlatformVersion,
    },
    HeaderRule {
        prefix: "Requires at least:",
        pattern: r"\d+\.\d+",
        selector: ValueSelector::PlatformFloor,
    },
];

/// A WooCommerce-only release moves the stable tag but leaves the WordPress
/// compatibility headers alone.
fn active_rules(update_type: UpdateType) -> impl Iterator<Item = &'static HeaderRule> {
    HEADER_RULES.iter().filter(move |rule| {
        update_type != UpdateType::WooOnly || rule.prefix == "Stable tag:"
    })
}

/// Rewrites the release-notes document (`readme.txt`): bumps the header
/// fields and inserts a fresh changelog block under the changelog marker.
pub struct ChangelogEditor {
    changelog_path: PathBuf,
}

impl ChangelogEditor {
    pub fn new<P: AsRef<Path>>(changelog_path: P) -> Self {
        Self {
            changelog_path: changelog_path.as_ref().to_path_buf(),
        }
    }

    pub fn update(&self, versions: &VersionSet, update_type: UpdateType) -> Result<()> {
        let content = fs::read_to_string(&self.changelog_path).map_err(|e| {
            ReleaseError::ChangelogUpdate(format!(
                "Failed to read '{}': {e}",
                self.changelog_path.display()
            ))
        })?;

        let updated = rewrite(&content, versions, update_type, &version::release_date())?;

        fs::write(&self.changelog_path, updated).map_err(|e| {
            ReleaseError::ChangelogUpdate(format!(
                "Failed to write '{}': {e}",
                self.changelog_path.display()
            ))
        })
    }
}

fn rewrite(
    content: &str,
    versions: &VersionSet,
    update_type: UpdateType,
    date: &str,
) -> Result<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    for line in &mut lines {
        // First rule whose prefix matches wins; only the first version
        // substring in the line is replaced.
        for rule in active_rules(update_type) {
            if !line.starts_with(rule.prefix) {
                continue;
            }

            let range = compile(rule.pattern)?
                .find(line)
                .ok_or_else(|| {
                    ReleaseError::ChangelogUpdate(format!(
                        "Line '{}' carries no version to replace",
                        rule.prefix
                    ))
                })?
                .range();
            let value = rule.selector.resolve(versions)?;
            line.replace_range(range, &value);
            break;
        }
    }

    let marker_index = lines
        .iter()
        .position(|line| line == CHANGELOG_MARKER)
        .ok_or_else(|| {
            ReleaseError::ChangelogUpdate(format!("Marker line '{CHANGELOG_MARKER}' not found"))
        })?;

    let entry = release_entry(versions, update_type, date)?;
    for (offset, entry_line) in entry.into_iter().enumerate() {
        lines.insert(marker_index + 1 + offset, entry_line);
    }

    Ok(lines.join("\n"))
}

/// The freshly inserted changelog block: header, one support bullet per
/// active platform axis, and the framework trailer.
fn release_entry(
    versions: &VersionSet,
    update_type: UpdateType,
    date: &str,
) -> Result<Vec<String>> {
    let mut entry = vec![
        String::new(),
        version::release_banner(&versions.plugin, date),
    ];

    if update_type.includes_woo() {
        entry.push(format!("* New: Support for WooCommerce {}", versions.woo()?));
    }
    if update_type.includes_wordpress() {
        entry.push(format!(
            "* New: Support for WordPress {}",
            versions.wordpress()?
        ));
    }
    entry.push("* Update: plugin framework update".to_string());

    Ok(entry)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseError::ChangelogUpdate(format!("Invalid changelog pattern: {e}")))
}
