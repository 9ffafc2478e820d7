//! CLI command definitions

use clap::Args;

/// Validate a stage definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to stage YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Print the task graph of a stage definition
#[derive(Debug, Args, Clone)]
pub struct ShowCommand {
    /// Path to stage YAML file
    #[arg(short, long)]
    pub file: String,

    /// List tasks in execution order instead of as a tree
    #[arg(long)]
    pub flat: bool,
}
