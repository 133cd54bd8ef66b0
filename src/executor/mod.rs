//! Command execution module
//!
//! Provides shell command execution with:
//! - Background runs streaming stdout into a caller-owned sink
//! - A completion handle surfacing failures at await time
//! - Synchronous capture for simple call sites
//! - POSIX and Windows shell variants behind one trait

pub mod runner;
pub mod shell;
pub mod sink;
pub mod sync;

pub use runner::{CommandRunner, CompletionHandle, RunSummary, DEFAULT_CHUNK_SIZE};
pub use shell::{native_shell, PosixShell, ShellKind, ShellSpawner, WindowsShell};
pub use sink::SharedBuffer;
pub use sync::{execute_sync, CapturedOutput};
