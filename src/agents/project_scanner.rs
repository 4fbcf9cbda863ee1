use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};

/// ProjectScannerAgent validates one candidate plugin directory.
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the directory and resolves the release-relevant paths.
    pub fn validate(&self) -> Result<ProjectInfo> {
        let canonical = self.project_path.canonicalize().map_err(|e| {
            ReleaseError::ProjectValidation(format!(
                "Invalid path '{}': {e}",
                self.project_path.display()
            ))
        })?;

        if !canonical.is_dir() {
            return Err(ReleaseError::ProjectValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        let plugin_name = canonical
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| canonical.display().to_string());

        let git_dir = canonical.join(".git");

        Ok(ProjectInfo {
            manifest_path: canonical.join("init.php"),
            changelog_path: canonical.join("readme.txt"),
            descriptor_path: canonical.join("package.json"),
            has_git: git_dir.exists() && git_dir.is_dir(),
            plugin_name,
            project_path: canonical,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub plugin_name: String,
    pub manifest_path: PathBuf,
    pub changelog_path: PathBuf,
    pub descriptor_path: PathBuf,
    pub has_git: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_release_paths_and_plugin_name() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("my-plugin");
        fs::create_dir_all(&project).unwrap();

        let info = ProjectScannerAgent::new(&project).validate().unwrap();
        assert_eq!(info.plugin_name, "my-plugin");
        assert!(info.manifest_path.ends_with("init.php"));
        assert!(info.changelog_path.ends_with("readme.txt"));
        assert!(info.descriptor_path.ends_with("package.json"));
        assert!(!info.has_git);
    }

    #[test]
    fn detects_git_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();

        let info = ProjectScannerAgent::new(dir.path()).validate().unwrap();
        assert!(info.has_git);
    }

    #[test]
    fn rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = ProjectScannerAgent::new(&missing).validate().unwrap_err();
        assert!(matches!(err, ReleaseError::ProjectValidation(_)));
    }

    #[test]
    fn rejects_plain_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("init.php");
        fs::write(&file_path, "<?php").unwrap();
        let err = ProjectScannerAgent::new(&file_path).validate().unwrap_err();
        assert!(matches!(err, ReleaseError::ProjectValidation(_)));
    }
}
