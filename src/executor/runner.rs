//! Async command execution with streamed output
//!
//! [`CommandRunner::run_async`] schedules one background task per command.
//! The task spawns the shell, forwards the child's stdout to the sink in
//! fixed-size chunks, reaps the child and resolves the returned
//! [`CompletionHandle`]. Nothing is reported on the spawning side; every
//! failure surfaces when the handle is awaited.
//!
//! There is no cancellation. Dropping a handle detaches the run.

use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, ChildStdout};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::ExecConfig;
use crate::error::{RunError, ToolError};
use crate::executor::shell::{native_shell, ShellSpawner};

/// Bytes requested from the output pipe per read
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// Terminal record of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Command as given
    pub command: String,
    /// Exit code if the child exited normally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Whether the child exited with status 0
    pub success: bool,
    /// Total bytes written to the sink
    pub bytes_forwarded: u64,
    /// Number of chunks written to the sink
    pub chunks_forwarded: u64,
    /// Wall time from task start to reaping the child
    pub duration_ms: u64,
}

/// Spawns shell commands on a background task and streams their output
#[derive(Clone)]
pub struct CommandRunner {
    shell: Arc<dyn ShellSpawner>,
    chunk_size: usize,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("shell", &self.shell.program())
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl CommandRunner {
    /// Runner using the native shell and the default chunk size
    pub fn new() -> Self {
        Self {
            shell: native_shell(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Build a runner from the `[exec]` configuration section
    pub fn from_config(config: &ExecConfig) -> Result<Self, ToolError> {
        config.validate()?;
        Ok(Self {
            shell: config.spawner(),
            chunk_size: config.chunk_size,
        })
    }

    /// Use a different shell
    pub fn with_shell(self, shell: impl ShellSpawner + 'static) -> Self {
        self.with_shared_shell(Arc::new(shell))
    }

    /// Use a shell shared with other runners
    pub fn with_shared_shell(mut self, shell: Arc<dyn ShellSpawner>) -> Self {
        self.shell = shell;
        self
    }

    /// Set the read chunk size (clamped to at least one byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn shell(&self) -> &dyn ShellSpawner {
        self.shell.as_ref()
    }

    /// Run `command` on the current tokio runtime, streaming stdout into `sink`
    ///
    /// Returns immediately. Must be called from within a tokio runtime.
    pub fn run_async<W>(&self, command: impl Into<String>, sink: W) -> CompletionHandle
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let command = command.into();
        let task = tokio::spawn(run_to_completion(
            Arc::clone(&self.shell),
            command.clone(),
            sink,
            self.chunk_size,
        ));
        CompletionHandle::new(command, task)
    }

    /// Like [`run_async`](Self::run_async) but schedules onto `runtime`
    ///
    /// Usable from threads outside any runtime; pair it with
    /// [`CompletionHandle::wait_blocking`].
    pub fn run_async_on<W>(
        &self,
        runtime: &Handle,
        command: impl Into<String>,
        sink: W,
    ) -> CompletionHandle
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let command = command.into();
        let task = runtime.spawn(run_to_completion(
            Arc::clone(&self.shell),
            command.clone(),
            sink,
            self.chunk_size,
        ));
        CompletionHandle::new(command, task)
    }
}

enum HandleState {
    Pending(JoinHandle<Result<RunSummary, RunError>>),
    Resolved(Result<RunSummary, RunError>),
}

/// Single-consumer token for an in-flight run
///
/// Resolves exactly once. Waiting again after resolution hands back the
/// cached outcome; the process is never re-run.
pub struct CompletionHandle {
    command: String,
    state: HandleState,
}

impl std::fmt::Debug for CompletionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            HandleState::Pending(_) => "pending",
            HandleState::Resolved(Ok(_)) => "completed",
            HandleState::Resolved(Err(_)) => "failed",
        };
        f.debug_struct("CompletionHandle")
            .field("command", &self.command)
            .field("state", &state)
            .finish()
    }
}

impl CompletionHandle {
    fn new(command: String, task: JoinHandle<Result<RunSummary, RunError>>) -> Self {
        Self {
            command,
            state: HandleState::Pending(task),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the run has finished (waiting would not suspend)
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Pending(task) => task.is_finished(),
            HandleState::Resolved(_) => true,
        }
    }

    /// Wait for the child to exit and all output to reach the sink
    pub async fn wait(&mut self) -> Result<RunSummary, RunError> {
        let outcome = match &mut self.state {
            HandleState::Resolved(outcome) => return outcome.clone(),
            HandleState::Pending(task) => match task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(RunError::Join(e.to_string())),
            },
        };

        if let Err(ref e) = outcome {
            tracing::debug!("Run failed: {}: {}", self.command, e);
        }
        self.state = HandleState::Resolved(outcome.clone());
        outcome
    }

    /// Blocking form of [`wait`](Self::wait)
    ///
    /// Must not be called from inside an async context.
    pub fn wait_blocking(&mut self) -> Result<RunSummary, RunError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RunError::Join(format!("Failed to create runtime: {}", e)))?;

        rt.block_on(self.wait())
    }
}

/// Owns a spawned child until it has been reaped
struct ProcessGuard {
    child: Child,
    reaped: bool,
}

impl ProcessGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    async fn wait(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait().await?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        // Only reached when the task is torn down mid-run; tokio reaps orphans
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => tracing::warn!(
                pid = ?self.child.id(),
                "Run abandoned before child exited; leaving it to the runtime reaper"
            ),
        }
    }
}

async fn run_to_completion<W>(
    shell: Arc<dyn ShellSpawner>,
    command: String,
    mut sink: W,
    chunk_size: usize,
) -> Result<RunSummary, RunError>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let start = Instant::now();

    if command.trim().is_empty() {
        return Err(RunError::EmptyCommand);
    }

    tracing::debug!(shell = shell.program(), chunk_size, "Spawning: {}", command);

    let child = shell.spawn(&command).map_err(|e| RunError::ProcessSpawn {
        command: command.clone(),
        error: e.to_string(),
    })?;
    let mut process = ProcessGuard::new(child);

    // The pipe is dropped (closed) when forwarding returns, before the wait
    let forwarded = match process.take_stdout() {
        Some(stdout) => forward_chunks(stdout, &mut sink, chunk_size).await,
        None => Ok(Forwarded::default()),
    };

    let status = process.wait().await.map_err(|e| RunError::Wait {
        command: command.clone(),
        error: e.to_string(),
    });

    let forwarded = forwarded.map_err(|e| match e {
        ForwardError::Read(e) => RunError::Read {
            command: command.clone(),
            error: e.to_string(),
        },
        ForwardError::Sink(e) => RunError::Sink {
            error: e.to_string(),
        },
    })?;
    let status = status?;

    if let Some(code) = status.code() {
        if forwarded.bytes == 0 && shell.is_unresolved_status(code) {
            return Err(RunError::ProcessSpawn {
                command,
                error: format!(
                    "command not found ({} exited with status {})",
                    shell.program(),
                    code
                ),
            });
        }
    }

    let duration = start.elapsed();
    tracing::debug!(
        exit_code = ?status.code(),
        bytes = forwarded.bytes,
        chunks = forwarded.chunks,
        "Completed in {:?}: {}",
        duration,
        command
    );

    Ok(RunSummary {
        command,
        exit_code: status.code(),
        success: status.success(),
        bytes_forwarded: forwarded.bytes,
        chunks_forwarded: forwarded.chunks,
        duration_ms: as_millis(duration),
    })
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Forwarded {
    bytes: u64,
    chunks: u64,
}

#[derive(Debug)]
enum ForwardError {
    Read(io::Error),
    Sink(io::Error),
}

/// Copy `reader` into `sink` one read at a time until end-of-stream
///
/// Each chunk is written and flushed before the next read.
async fn forward_chunks<R, W>(
    mut reader: R,
    sink: &mut W,
    chunk_size: usize,
) -> Result<Forwarded, ForwardError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut forwarded = Forwarded::default();

    loop {
        let n = match reader.read(&mut buffer).await {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ForwardError::Read(e)),
        };

        sink.write_all(&buffer[..n])
            .await
            .map_err(ForwardError::Sink)?;
        sink.flush().await.map_err(ForwardError::Sink)?;

        forwarded.bytes += n as u64;
        forwarded.chunks += 1;
    }

    Ok(forwarded)
}
