use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mock_check")]
#[command(about = "Checks that every import of a module under test is mocked in its test file")]
#[command(version)]
pub struct Cli {
    /// Checks that all imports have a corresponding mock.
    #[arg(short, long)]
    pub mocks: bool,

    /// Only check a specific filename.
    #[arg(short, long)]
    pub filename: Option<PathBuf>,

    /// Directory to check. Defaults to the current directory if not set.
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "console")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}
