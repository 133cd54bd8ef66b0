//! Run-to-completion execution with captured output

use serde::Serialize;

use crate::error::{RunError, ToolError};
use crate::executor::runner::{CommandRunner, RunSummary};
use crate::executor::sink::SharedBuffer;

/// Output of a captured run
#[derive(Debug, Clone, Serialize)]
pub struct CapturedOutput {
    #[serde(flatten)]
    pub summary: RunSummary,
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
}

impl CommandRunner {
    /// Run `command` and collect its stdout
    pub async fn capture(&self, command: &str) -> Result<CapturedOutput, RunError> {
        let buffer = SharedBuffer::new();
        let summary = self.run_async(command, buffer.clone()).wait().await?;

        Ok(CapturedOutput {
            summary,
            stdout: buffer.to_string_lossy(),
        })
    }

    /// Blocking form of [`capture`](Self::capture)
    ///
    /// Creates its own runtime, so it must not be called from async code.
    pub fn capture_sync(&self, command: &str) -> Result<CapturedOutput, ToolError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(rt.block_on(self.capture(command))?)
    }
}

/// Execute a command synchronously with the native shell
///
/// Returns the command's standard output once it has exited.
pub fn execute_sync(command: &str) -> Result<String, ToolError> {
    CommandRunner::new()
        .capture_sync(command)
        .map(|captured| captured.stdout)
}
