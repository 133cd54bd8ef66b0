//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Shell command runner and file utilities.
///
/// Runs shell commands with streamed or captured output, looks up
/// executables on PATH and copies files as raw blobs.
#[derive(Parser, Debug)]
#[command(name = "cmdkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging and run summaries)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log line format (overrides logging.format)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a shell command, streaming its stdout as it is produced
    Run(RunArgs),

    /// Run a shell command to completion and print its captured stdout
    Exec(ExecArgs),

    /// Find an executable on PATH
    Which(WhichArgs),

    /// Copy a file byte-for-byte
    Copy(CopyArgs),

    /// Show resolved configuration
    Config(ConfigArgs),
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Shell command; multiple words are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Bytes read from the output pipe per chunk (overrides exec.chunk_size)
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

impl RunArgs {
    /// The command string handed to the shell
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Arguments for the `exec` subcommand
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Shell command; multiple words are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl ExecArgs {
    /// The command string handed to the shell
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Plain,
    /// JSON output
    Json,
}

/// Arguments for the `which` subcommand
#[derive(Parser, Debug)]
pub struct WhichArgs {
    /// Executable name
    #[arg(required = true)]
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the `copy` subcommand
#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// File to read
    pub source: String,

    /// File to create or overwrite
    pub destination: String,
}

/// Configuration output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,

    /// Also list the config files that were found
    #[arg(long)]
    pub sources: bool,
}
