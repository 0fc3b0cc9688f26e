use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tbdeploy")]
#[command(about = "Announce the Teambox tasks shipped since the last git tag", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (TOML); ignored when missing
    #[arg(long, global = true, env = "TBDEPLOY_CONFIG", default_value = "tbdeploy.toml")]
    pub config: PathBuf,

    /// Git working copy to read commits from
    #[arg(long, global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Start the range at this tag instead of the last one
    #[arg(long, global = true)]
    pub tag: Option<String>,

    /// List each referenced task once
    #[arg(long, global = true)]
    pub dedupe: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Post the deployment announcement (default)
    Announce,

    /// Print the announcement without posting it
    Preview,

    /// List the task references and untasked commits, without calling the API
    Scan,
}
