use colored::Colorize;

/// Terminal state of one listed project after a release run.
#[derive(Debug, Clone)]
pub enum ProjectOutcome {
    Updated {
        plugin: String,
        version: String,
        committed: bool,
    },
    Skipped {
        plugin: String,
        reason: String,
    },
    Failed {
        plugin: String,
        reason: String,
    },
}

/// Collects per-project outcomes so one failing project never hides what
/// happened to the rest of the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ProjectOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: ProjectOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ProjectOutcome::Updated { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ProjectOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ProjectOutcome::Failed { .. }))
            .count()
    }

    pub fn print(&self) {
        if self.outcomes.is_empty() {
            println!("\n{}", "No projects were processed".yellow());
            return;
        }

        println!("\n{}", "Release Summary:".cyan().bold());
        for outcome in &self.outcomes {
            match outcome {
                ProjectOutcome::Updated {
                    plugin,
                    version,
                    committed: true,
                } => {
                    println!(
                        "  • {} {} {}",
                        plugin.white().bold(),
                        version.green().bold(),
                        "committed and tagged".green()
                    );
                }
                ProjectOutcome::Updated {
                    plugin,
                    version,
                    committed: false,
                } => {
                    println!(
                        "  • {} {} {}",
                        plugin.white().bold(),
                        version.green().bold(),
                        "left uncommitted".yellow()
                    );
                }
                ProjectOutcome::Skipped { plugin, reason } => {
                    println!(
                        "  • {} {} {}",
                        plugin.white().bold(),
                        "skipped:".dimmed(),
                        reason.dimmed()
                    );
                }
                ProjectOutcome::Failed { plugin, reason } => {
                    println!(
                        "  • {} {} {}",
                        plugin.white().bold(),
                        "failed:".red().bold(),
                        reason.red()
                    );
                }
            }
        }

        println!(
            "\n  {} updated, {} skipped, {} failed",
            self.updated_count().to_string().green(),
            self.skipped_count().to_string().yellow(),
            self.failed_count().to_string().red()
        );
    }
}
