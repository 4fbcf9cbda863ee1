use crate::error::{ReleaseError, Result};
use crate::version::{self, PlatformSelection, UpdateType};
use colored::Colorize;
use std::io::{self, Write};

/// Manages user prompts during a release run.
///
/// All stdin reads live here, keeping the orchestration loop free of
/// terminal concerns.
#[derive(Default)]
pub struct ReleaseInteraction;

impl ReleaseInteraction {
    pub fn new() -> Self {
        Self
    }

    /// One-time selection of the platform axes and their versions.
    pub fn select_platforms(&mut self) -> Result<PlatformSelection> {
        let update_type = loop {
            print!(
                "{}",
                "Select the update type (1: WooCommerce, 2: WordPress, 3: both): ".bold()
            );
            io::stdout().flush()?;

            match self.read_line()?.as_str() {
                "1" => break UpdateType::WooOnly,
                "2" => break UpdateType::WordPressOnly,
                "3" => break UpdateType::Both,
                _ => println!("{}", "Please answer 1, 2 or 3.".red()),
            }
        };

        let woo = if update_type.includes_woo() {
            Some(self.ask_required("New WooCommerce version: ")?)
        } else {
            None
        };
        let wordpress = if update_type.includes_wordpress() {
            Some(self.ask_required("New WordPress version: ")?)
        } else {
            None
        };

        Ok(PlatformSelection {
            update_type,
            woo,
            wordpress,
        })
    }

    /// Ask until the answer matches the X.Y.Z release format. No attempt
    /// cap; the operator either enters a valid version or quits the run.
    pub fn ask_plugin_version(&mut self, plugin_name: &str) -> Result<String> {
        loop {
            print!(
                "{}",
                format!("Target version for {plugin_name} (e.g. 1.33.0): ").bold()
            );
            io::stdout().flush()?;

            let answer = self.read_line()?;
            match version::validate_plugin_version(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }

    /// y/n/q confirmation; `q` cancels the remaining batch.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            print!("{}", format!("{question} [y/n/q]: ").bold());
            io::stdout().flush()?;

            match self.read_line()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "q" | "quit" => {
                    println!("{}", "Stopping the release run at user request.".yellow());
                    return Err(ReleaseError::UserCancelled);
                }
                _ => println!("{}", "Please answer with y(es), n(o) or q(uit).".red()),
            }
        }
    }

    fn ask_required(&self, question: &str) -> Result<String> {
        loop {
            print!("{}", question.bold());
            io::stdout().flush()?;

            let answer = self.read_line()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            println!("{}", "A version is required.".red());
        }
    }

    fn read_line(&self) -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}
