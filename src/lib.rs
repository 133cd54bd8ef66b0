//! cmdkit - small process and file utilities
//!
//! - **Async command runner** - run a shell command on a background task,
//!   stream its stdout into a sink, await a completion handle
//! - **Sync execution** - run a shell command and capture its stdout
//! - **Blob files** - load and save whole files as bytes
//! - **PATH lookup** - find an executable on `PATH`
//!
//! ## Example
//!
//! ```no_run
//! use cmdkit::{CommandRunner, SharedBuffer};
//!
//! # async fn demo() -> Result<(), cmdkit::RunError> {
//! let output = SharedBuffer::new();
//! let mut handle = CommandRunner::new().run_async("echo hello", output.clone());
//! let summary = handle.wait().await?;
//! assert!(summary.success);
//! assert_eq!(output.to_string_lossy(), "hello\n");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fs;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{ErrorInfo, RunError, ToolError};
pub use executor::{
    execute_sync, CapturedOutput, CommandRunner, CompletionHandle, RunSummary, SharedBuffer,
    ShellKind, ShellSpawner,
};
pub use fs::{find_executable_in, find_executable_in_path, load_file, write_file};
