use crate::agents::{
    ChangelogEditor, DescriptorEditor, ManifestEditor, PackagingAgent, ProjectScannerAgent,
    ReleaseInteraction, VersionControlAgent,
};
use crate::cli::PluginKind;
use crate::error::{ReleaseError, Result};
use crate::report::{BatchReport, ProjectOutcome};
use crate::version::{PlatformSelection, VersionSet};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// One line of the project list file. Fields after the first comma are
/// reserved and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub path: PathBuf,
}

/// Execute the release workflow over every project listed in the file.
pub fn execute_update(list_path: &Path, plugin_kind: Option<PluginKind>) -> Result<()> {
    println!("{}", "Starting plugin release process...".cyan().bold());

    let mut interaction = ReleaseInteraction::new();
    let selection = interaction.select_platforms()?;

    let entries = read_project_list(list_path)?;
    if entries.is_empty() {
        println!("{}", "The project list is empty, nothing to do.".yellow());
        return Ok(());
    }

    let mut report = BatchReport::new();

    for entry in entries {
        match process_project(&entry, &selection, plugin_kind, &mut interaction) {
            Ok(outcome) => report.record(outcome),
            Err(ReleaseError::UserCancelled) => {
                println!("{}", "Release run cancelled.".yellow());
                break;
            }
            // One project's failure never aborts the batch
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e);
                report.record(ProjectOutcome::Failed {
                    plugin: entry_name(&entry),
                    reason: e.to_string(),
                });
            }
        }
    }

    if !report.is_empty() {
        report.print();
    }
    Ok(())
}

fn read_project_list(list_path: &Path) -> Result<Vec<ProjectEntry>> {
    let content = fs::read_to_string(list_path).map_err(|e| {
        ReleaseError::ProjectValidation(format!(
            "Failed to read project list '{}': {e}",
            list_path.display()
        ))
    })?;

    Ok(parse_project_list(&content))
}

fn parse_project_list(content: &str) -> Vec<ProjectEntry> {
    content
        .lines()
        .filter_map(|line| {
            let path = line.split(',').next().unwrap_or("").trim();
            if path.is_empty() {
                None
            } else {
                Some(ProjectEntry {
                    path: PathBuf::from(path),
                })
            }
        })
        .collect()
}

fn entry_name(entry: &ProjectEntry) -> String {
    entry
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.path.display().to_string())
}

/// One end-to-end update cycle for a single listed project.
fn process_project(
    entry: &ProjectEntry,
    selection: &PlatformSelection,
    plugin_kind: Option<PluginKind>,
    interaction: &mut ReleaseInteraction,
) -> Result<ProjectOutcome> {
    let name = entry_name(entry);

    println!("\n{}", format!("── {name} ──").cyan().bold());

    if !entry.path.exists() {
        println!(
            "{}",
            format!("✗ Path '{}' does not exist", entry.path.display()).red()
        );
        return Ok(ProjectOutcome::Skipped {
            plugin: name,
            reason: "directory not found".into(),
        });
    }

    let info = ProjectScannerAgent::new(&entry.path).validate()?;

    if !interaction.confirm(&format!("Update the plugin {name}?"))? {
        println!("{}", format!("Skipping {name}").dimmed());
        return Ok(ProjectOutcome::Skipped {
            plugin: name,
            reason: "declined".into(),
        });
    }

    let plugin_version = interaction.ask_plugin_version(&name)?;
    let versions = VersionSet::new(plugin_version, selection);

    println!("\n{}", "1. Synchronizing repository...".yellow());
    let git = VersionControlAgent::new(&info.project_path);
    if !info.has_git || !git.is_repo() {
        println!(
            "{}",
            format!("✗ '{}' is not a git repository", info.project_path.display()).red()
        );
        return Ok(ProjectOutcome::Failed {
            plugin: name,
            reason: "not a git repository".into(),
        });
    }
    if git.has_uncommitted_changes()? {
        println!(
            "{}",
            "⚠ Working tree has uncommitted changes, commit or stash them first".red()
        );
        return Ok(ProjectOutcome::Failed {
            plugin: name,
            reason: "uncommitted changes present".into(),
        });
    }
    git.sync()?;
    println!("{}", "✓ Repository is up to date".green());

    println!("\n{}", "2. Updating version metadata...".yellow());
    let edits: [(&str, Result<()>); 3] = [
        (
            "init.php",
            ManifestEditor::new(&info.manifest_path).update(&versions, selection.update_type),
        ),
        (
            "readme.txt",
            ChangelogEditor::new(&info.changelog_path).update(&versions, selection.update_type),
        ),
        (
            "package.json",
            DescriptorEditor::new(&info.descriptor_path).update(&versions.plugin),
        ),
    ];

    // A failed file is skipped and reported; siblings already written stay
    // as they are. No rollback.
    let mut edit_failures = 0;
    for (file, result) in edits {
        match result {
            Ok(()) => println!("{}", format!("✓ Updated {file}").green()),
            Err(e) => {
                edit_failures += 1;
                eprintln!("{}", format!("✗ {file}: {e}").red());
            }
        }
    }
    if edit_failures == 3 {
        return Ok(ProjectOutcome::Failed {
            plugin: name,
            reason: "no file could be updated".into(),
        });
    }

    println!("\n{}", "3. Review the resulting diff:".yellow());
    println!("{}", git.diff()?);

    let committed = if interaction.confirm("Commit, tag and push these changes now?")? {
        let message = git.commit_tag_push(&versions.plugin)?;
        println!("{}", format!("✓ Committed and tagged: {message}").green());
        true
    } else {
        println!(
            "{}",
            "Changes left uncommitted in the working tree.".yellow()
        );
        false
    };

    run_post_step(&info.project_path, plugin_kind)?;

    Ok(ProjectOutcome::Updated {
        plugin: name,
        version: versions.plugin,
        committed,
    })
}

fn run_post_step(project_path: &Path, plugin_kind: Option<PluginKind>) -> Result<()> {
    match plugin_kind {
        Some(PluginKind::Premium) => {
            println!("\n{}", "4. Running premium packaging step...".yellow());
            PackagingAgent::new(project_path).build_zip()?;
            println!("{}", "✓ Package built".green());
        }
        Some(PluginKind::Free) => {
            // Free-channel deployment (directory moves, asset sync) is still
            // a manual step.
            println!(
                "\n{}",
                "4. No automated post-step for free plugins yet".yellow()
            );
        }
        None => {}
    }
    Ok(())
}
