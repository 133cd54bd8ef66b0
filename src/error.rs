//! Error types for cmdkit
//!
//! Provides structured error types with suggestions for common issues.

use serde::Serialize;
use thiserror::Error;

/// Failure of an asynchronous command run
///
/// Captured inside the background task and surfaced only when the
/// completion handle is awaited. `Clone` so a resolved handle can hand
/// the same outcome out again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The child process could not be created
    #[error("Failed to spawn process: {command}")]
    ProcessSpawn { command: String, error: String },

    /// Nothing to run
    #[error("Command is empty")]
    EmptyCommand,

    /// Reading the child's output pipe failed
    #[error("Failed to read output of: {command}")]
    Read { command: String, error: String },

    /// Writing to the output sink failed
    #[error("Failed to write to output sink: {error}")]
    Sink { error: String },

    /// Waiting for the child to exit failed
    #[error("Failed to wait for process: {command}")]
    Wait { command: String, error: String },

    /// The background task panicked or was cancelled by runtime shutdown
    #[error("Background task failed: {0}")]
    Join(String),
}

/// Main error type for cmdkit operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// File to load does not exist
    #[error("File does not exist: {path}")]
    FileNotFound { path: String },

    /// File exists but could not be opened (or created, when saving)
    #[error("Could not open file: {path}")]
    FileOpen { path: String, error: String },

    /// File was opened but writing its contents failed
    #[error("Could not write file: {path}")]
    FileWrite { path: String, error: String },

    /// Command execution failed
    #[error(transparent)]
    Run(#[from] RunError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorInfo {
    fn new(err: &impl std::fmt::Display, error_type: &str) -> Self {
        Self {
            message: err.to_string(),
            error_type: error_type.to_string(),
            detail: None,
            suggestion: None,
        }
    }

    fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

impl From<&RunError> for ErrorInfo {
    fn from(err: &RunError) -> Self {
        match err {
            RunError::ProcessSpawn { command, error } => ErrorInfo::new(err, "process_spawn")
                .with_detail(error)
                .with_suggestion(suggest_fix(command, error)),
            RunError::EmptyCommand => ErrorInfo::new(err, "empty_command")
                .with_suggestion(Some("Pass a non-empty shell command".to_string())),
            RunError::Read { error, .. } => ErrorInfo::new(err, "read_failed").with_detail(error),
            RunError::Sink { error } => ErrorInfo::new(err, "sink_failed")
                .with_detail(error)
                .with_suggestion(suggest_fix("", error)),
            RunError::Wait { error, .. } => ErrorInfo::new(err, "wait_failed").with_detail(error),
            RunError::Join(_) => ErrorInfo::new(err, "task_failed"),
        }
    }
}

impl From<&ToolError> for ErrorInfo {
    fn from(err: &ToolError) -> Self {
        match err {
            ToolError::FileNotFound { .. } => ErrorInfo::new(err, "file_not_found")
                .with_suggestion(Some("Check the path and file existence".to_string())),
            ToolError::FileOpen { path, error } => ErrorInfo::new(err, "file_open")
                .with_detail(error)
                .with_suggestion(suggest_fix(path, error)),
            ToolError::FileWrite { path, error } => ErrorInfo::new(err, "file_write")
                .with_detail(error)
                .with_suggestion(suggest_fix(path, error)),
            ToolError::Run(run) => ErrorInfo::from(run),
            ToolError::Config(_) => ErrorInfo::new(err, "config_error")
                .with_suggestion(Some("Check your cmdkit configuration file".to_string())),
            ToolError::Io(_) => ErrorInfo::new(err, "io_error"),
        }
    }
}

/// Suggest fixes for common error patterns
pub fn suggest_fix(subject: &str, error: &str) -> Option<String> {
    if error.contains("Permission denied") || error.contains("permission denied") {
        return Some(
            "Permission denied. Check file permissions or run with appropriate access.".to_string(),
        );
    }

    if error.contains("command not found") || error.contains("not found") {
        if !subject.is_empty() {
            let program = subject.split_whitespace().next().unwrap_or(subject);
            return Some(format!(
                "'{}' not found. Check PATH or try `cmdkit which {}`.",
                program, program
            ));
        }
        return Some("Required command not found. Check PATH and dependencies.".to_string());
    }

    if error.contains("No such file") {
        return Some("File not found. Check the path and file existence.".to_string());
    }

    if error.contains("Broken pipe") {
        return Some("The output sink was closed before the command finished.".to_string());
    }

    None
}
