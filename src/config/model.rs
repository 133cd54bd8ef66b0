//! Configuration model for cmdkit
//!
//! Defines the structure for XDG-compliant layered configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::executor::runner::DEFAULT_CHUNK_SIZE;
use crate::executor::shell::{ShellKind, ShellSpawner};
use crate::logging::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Command execution settings
    #[serde(default)]
    pub exec: ExecConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ToolError> {
        self.exec.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(ToolError::Config("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Command execution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecConfig {
    /// Shell variant (defaults to the platform's)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_kind: Option<ShellKind>,

    /// Interpreter program override (e.g. "bash")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Flag placed before the command string (e.g. "-c")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_flag: Option<String>,

    /// Bytes read from the output pipe per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            shell_kind: None,
            shell: None,
            shell_flag: None,
            chunk_size: default_chunk_size(),
        }
    }
}

impl ExecConfig {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.chunk_size == 0 {
            return Err(ToolError::Config(
                "exec.chunk_size must be greater than 0".to_string(),
            ));
        }
        if matches!(self.shell.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(ToolError::Config("exec.shell must not be empty".to_string()));
        }
        Ok(())
    }

    /// Effective shell variant
    pub fn kind(&self) -> ShellKind {
        self.shell_kind.unwrap_or_else(ShellKind::native)
    }

    /// Build the configured shell
    pub fn spawner(&self) -> Arc<dyn ShellSpawner> {
        self.kind()
            .spawner(self.shell.as_deref(), self.shell_flag.as_deref())
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "warn", "cmdkit=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for log lines
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
