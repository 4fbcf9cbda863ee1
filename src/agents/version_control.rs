use crate::error::{ReleaseError, Result};
use crate::version::{release_banner, release_date};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// VersionControlAgent wraps the system git binary. Every command receives
/// the project directory explicitly as its working directory; the process
/// current directory is never mutated.
pub struct VersionControlAgent {
    project_path: PathBuf,
}

impl VersionControlAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    pub fn is_repo(&self) -> bool {
        let git_dir = self.project_path.join(".git");
        git_dir.exists() && git_dir.is_dir()
    }

    /// Check if the working tree carries changes that a release would mix in.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let output = self.run_git(&["status", "--porcelain"])?;
        Self::ensure_success(&output, "git status")?;
        Ok(!output.stdout.is_empty())
    }

    /// Bring the checkout up to date before touching any file.
    pub fn sync(&self) -> Result<()> {
        let output = self.run_git(&["pull", "--all"])?;
        Self::ensure_success(&output, "git pull")?;
        if std::env::var("PRB_VERBOSE").is_ok() {
            println!("{}", String::from_utf8_lossy(&output.stdout));
        }
        Ok(())
    }

    /// Captured diff of the edits, for human review before the commit.
    pub fn diff(&self) -> Result<String> {
        let output = self.run_git(&["diff"])?;
        Self::ensure_success(&output, "git diff")?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub fn stage_all(&self) -> Result<()> {
        let output = self.run_git(&["add", "."])?;
        Self::ensure_success(&output, "git add")
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        let output = self.run_git(&["commit", "-m", message])?;
        Self::ensure_success(&output, "git commit")
    }

    /// Annotated tag named after the release version.
    pub fn tag(&self, version: &str, message: &str) -> Result<()> {
        let output = self.run_git(&["tag", "-a", version, "-m", message])?;
        Self::ensure_success(&output, "git tag")
    }

    pub fn push_tag(&self, version: &str) -> Result<()> {
        let output = self.run_git(&["push", "origin", version])?;
        Self::ensure_success(&output, "git push origin")
    }

    pub fn push(&self) -> Result<()> {
        let output = self.run_git(&["push"])?;
        Self::ensure_success(&output, "git push")
    }

    /// Full publish step: stage everything, commit with the release banner,
    /// create the annotated tag, push the tag, push the branch.
    pub fn commit_tag_push(&self, version: &str) -> Result<String> {
        let message = release_banner(version, &release_date());
        self.stage_all()?;
        self.commit(&message)?;
        self.tag(version, &message)?;
        self.push_tag(version)?;
        self.push()?;
        Ok(message)
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .current_dir(&self.project_path)
            .args(args)
            .output()
            .map_err(|e| {
                ReleaseError::GitOperation(format!(
                    "Failed to execute git command '{}': {e}",
                    args.join(" ")
                ))
            })
    }

    fn ensure_success(output: &Output, command: &str) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }

        Err(ReleaseError::GitOperation(format!(
            "{} failed: {}",
            command,
            String::from_utf8_lossy(&output.stderr)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = tempdir().unwrap();
        let agent = VersionControlAgent::new(dir.path());
        assert!(!agent.is_repo());
    }

    #[test]
    fn git_directory_marks_a_repo() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let agent = VersionControlAgent::new(dir.path());
        assert!(agent.is_repo());
    }
}
