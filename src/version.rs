use crate::error::{ReleaseError, Result};
use jiff::Zoned;
use regex::Regex;

/// Which platform axes a release run updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// Only the WooCommerce compatibility metadata moves.
    WooOnly,
    /// Only the WordPress compatibility metadata moves.
    WordPressOnly,
    /// Both platforms move in the same release.
    Both,
}

impl UpdateType {
    pub fn includes_woo(self) -> bool {
        matches!(self, UpdateType::WooOnly | UpdateType::Both)
    }

    pub fn includes_wordpress(self) -> bool {
        matches!(self, UpdateType::WordPressOnly | UpdateType::Both)
    }
}

/// Once-per-run answer to the platform prompt: which axes to update and the
/// platform versions entered for them.
#[derive(Debug, Clone)]
pub struct PlatformSelection {
    pub update_type: UpdateType,
    pub woo: Option<String>,
    pub wordpress: Option<String>,
}

/// Versions applied to a single project. The plugin version is always
/// present once a project is confirmed; the platform versions depend on the
/// update type chosen for the run.
#[derive(Debug, Clone)]
pub struct VersionSet {
    pub plugin: String,
    pub woo: Option<String>,
    pub wordpress: Option<String>,
}

impl VersionSet {
    pub fn new(plugin: impl Into<String>, selection: &PlatformSelection) -> Self {
        Self {
            plugin: plugin.into(),
            woo: selection.woo.clone(),
            wordpress: selection.wordpress.clone(),
        }
    }

    pub fn woo(&self) -> Result<&str> {
        self.woo.as_deref().ok_or_else(|| {
            ReleaseError::VersionFormat("no WooCommerce version selected for this run".into())
        })
    }

    pub fn wordpress(&self) -> Result<&str> {
        self.wordpress.as_deref().ok_or_else(|| {
            ReleaseError::VersionFormat("no WordPress version selected for this run".into())
        })
    }
}

/// Plugin releases use a strict three-component numeric version.
pub fn validate_plugin_version(version: &str) -> Result<()> {
    let pattern = compile(r"^\d+\.\d+\.\d+$")?;
    if pattern.is_match(version) {
        Ok(())
    } else {
        Err(ReleaseError::VersionFormat(format!(
            "'{version}' does not match the X.Y.Z release format, e.g. 1.23.4"
        )))
    }
}

/// Compatibility floor: the companion platform version minus two minor
/// releases. The minor axis is treated as base-10, borrowing from the major
/// when it would go below zero.
pub fn adjust_compatibility_version(version: &str) -> Result<String> {
    let mut components = version.split('.');
    let (Some(major), Some(minor), None) = (components.next(), components.next(), components.next())
    else {
        return Err(ReleaseError::VersionFormat(format!(
            "'{version}' is not a two-component platform version, e.g. 6.4"
        )));
    };

    let mut major: i64 = parse_component(major, version)?;
    let mut minor: i64 = parse_component(minor, version)?;

    if minor < 2 {
        major -= 1;
        minor = 10 + minor - 2;
    } else {
        minor -= 2;
    }

    Ok(format!("{major}.{minor}"))
}

fn parse_component(component: &str, version: &str) -> Result<i64> {
    component.trim().parse().map_err(|_| {
        ReleaseError::VersionFormat(format!("'{version}' has a non-numeric component"))
    })
}

/// Today's date in the `24 February 2025` style used across release text.
pub fn release_date() -> String {
    Zoned::now().strftime("%d %B %Y").to_string()
}

/// Header used verbatim as changelog entry title and commit message.
pub fn release_banner(version: &str, date: &str) -> String {
    format!("= {version} - Released on {date} =")
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseError::VersionFormat(format!("Invalid version pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_floor_subtracts_two_minors() {
        assert_eq!(adjust_compatibility_version("6.4").unwrap(), "6.2");
        assert_eq!(adjust_compatibility_version("9.2").unwrap(), "9.0");
    }

    #[test]
    fn compatibility_floor_borrows_from_major() {
        assert_eq!(adjust_compatibility_version("6.1").unwrap(), "5.9");
        assert_eq!(adjust_compatibility_version("6.0").unwrap(), "5.8");
    }

    #[test]
    fn compatibility_floor_rejects_malformed_input() {
        assert!(adjust_compatibility_version("6").is_err());
        assert!(adjust_compatibility_version("6.4.1").is_err());
        assert!(adjust_compatibility_version("6.x").is_err());
    }

    #[test]
    fn plugin_version_requires_three_numeric_components() {
        assert!(validate_plugin_version("1.33.0").is_ok());
        assert!(validate_plugin_version("1.33").is_err());
        assert!(validate_plugin_version("1.33.0.1").is_err());
        assert!(validate_plugin_version("1.33.0-beta").is_err());
        assert!(validate_plugin_version("v1.33.0").is_err());
    }

    #[test]
    fn release_banner_matches_changelog_header_format() {
        assert_eq!(
            release_banner("1.42.0", "24 February 2025"),
            "= 1.42.0 - Released on 24 February 2025 ="
        );
    }

    #[test]
    fn version_set_reports_missing_platform_versions() {
        let selection = PlatformSelection {
            update_type: UpdateType::WooOnly,
            woo: Some("9.1".to_string()),
            wordpress: None,
        };
        let versions = VersionSet::new("1.2.0", &selection);
        assert_eq!(versions.woo().unwrap(), "9.1");
        assert!(versions.wordpress().is_err());
    }
}
