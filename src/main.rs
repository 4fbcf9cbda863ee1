mod agents;
mod cli;
mod error;
mod report;
mod version;
mod workflow;

use clap::Parser;
use cli::{Cli, TaskKind};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("PRB_VERBOSE", "1");
        }
    }

    let result = match (cli.file.as_deref(), cli.task) {
        (Some(file), Some(TaskKind::Update)) => workflow::execute_update(file, cli.type_plugins),
        _ => {
            eprintln!(
                "{} specify the project list with --file and the task with --task update",
                "Usage error:".red().bold()
            );
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
