//! CLI module for cmdkit
//!
//! Provides command-line interface with the following subcommands:
//! - `run` - Run a command, streaming its output
//! - `exec` - Run a command and print captured output
//! - `which` - Find an executable on PATH
//! - `copy` - Copy a file as a raw blob
//! - `config` - Show configuration

pub mod commands;

pub use commands::{Cli, Commands};
