use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prb",
    about = "Plugin Release Bumper - batch version updates for WordPress plugin repositories",
    version,
    author
)]
pub struct Cli {
    /// Plugin distribution channel, selects the post-release packaging step
    #[arg(long = "type_plugins", value_enum)]
    pub type_plugins: Option<PluginKind>,

    /// File listing plugin project directories, one path per line
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Task to run over the listed projects
    #[arg(long, value_enum)]
    pub task: Option<TaskKind>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Free,
    Premium,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Update,
}
