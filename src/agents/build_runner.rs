use crate::error::{ReleaseError, Result};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// PackagingAgent runs the npm packaging step for premium releases.
pub struct PackagingAgent {
    project_path: PathBuf,
}

impl PackagingAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Execute `npm run build-zip` in the project directory.
    pub fn build_zip(&self) -> Result<()> {
        self.execute_npm_command(&["run", "build-zip"])
    }

    /// Execute an npm command with live output streaming.
    fn execute_npm_command(&self, args: &[&str]) -> Result<()> {
        println!("Executing: npm {}", args.join(" "));

        let mut command = Command::new("npm");
        command
            .current_dir(&self.project_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| ReleaseError::Packaging(format!("Failed to spawn process: {e}")))?;

        // Stream stdout
        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            for line in reader.lines().map_while(|line| line.ok()) {
                println!("{line}");
            }
        }

        // Wait for completion
        let status = child
            .wait()
            .map_err(|e| ReleaseError::Packaging(format!("Failed to wait for process: {e}")))?;

        if !status.success() {
            return Err(ReleaseError::Packaging(format!(
                "npm command failed with exit code: {}",
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
