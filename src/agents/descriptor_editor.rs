use crate::error::{ReleaseError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Keeps the front-end build descriptor (`package.json`) in sync with the
/// plugin manifest version.
pub struct DescriptorEditor {
    descriptor_path: PathBuf,
}

impl DescriptorEditor {
    pub fn new<P: AsRef<Path>>(descriptor_path: P) -> Self {
        Self {
            descriptor_path: descriptor_path.as_ref().to_path_buf(),
        }
    }

    /// Overwrites the `version` field when the document carries one. The
    /// file is written back pretty-printed with 2-space indentation, keys
    /// in their original order. Parse and I/O errors leave it untouched.
    pub fn update(&self, plugin_version: &str) -> Result<()> {
        let content = fs::read_to_string(&self.descriptor_path).map_err(|e| {
            ReleaseError::DescriptorUpdate(format!(
                "Failed to read '{}': {e}",
                self.descriptor_path.display()
            ))
        })?;

        let mut document: Value = serde_json::from_str(&content).map_err(|e| {
            ReleaseError::DescriptorUpdate(format!(
                "Failed to parse '{}': {e}",
                self.descriptor_path.display()
            ))
        })?;

        if let Some(object) = document.as_object_mut() {
            if object.contains_key("version") {
                object.insert(
                    "version".to_string(),
                    Value::String(plugin_version.to_string()),
                );
            }
        }

        let mut serialized = serde_json::to_string_pretty(&document)?;
        serialized.push('\n');

        fs::write(&self.descriptor_path, serialized).map_err(|e| {
            ReleaseError::DescriptorUpdate(format!(
                "Failed to write '{}': {e}",
                self.descriptor_path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn overwrites_version_and_preserves_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(
            &path,
            r#"{"name":"example","version":"1.0.0","scripts":{"build-zip":"zip"}}"#,
        )
        .unwrap();

        DescriptorEditor::new(&path).update("1.2.3").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let name_at = written.find("\"name\"").unwrap();
        let version_at = written.find("\"version\"").unwrap();
        let scripts_at = written.find("\"scripts\"").unwrap();
        assert!(name_at < version_at && version_at < scripts_at);
        assert!(written.contains("  \"version\": \"1.2.3\""));

        // Round-trip: the exact version string must come back out
        let document: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(document["version"], "1.2.3");
        assert_eq!(document["name"], "example");
    }

    #[test]
    fn document_without_version_key_is_reformatted_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name":"example"}"#).unwrap();

        DescriptorEditor::new(&path).update("1.2.3").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("version"));
        assert!(written.contains("  \"name\": \"example\""));
    }

    #[test]
    fn malformed_json_leaves_the_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = DescriptorEditor::new(&path).update("1.2.3").unwrap_err();
        assert!(matches!(err, ReleaseError::DescriptorUpdate(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn missing_file_reports_descriptor_error() {
        let dir = tempdir().unwrap();
        let editor = DescriptorEditor::new(dir.path().join("package.json"));
        let err = editor.update("1.2.3").unwrap_err();
        assert!(matches!(err, ReleaseError::DescriptorUpdate(_)));
    }
}
