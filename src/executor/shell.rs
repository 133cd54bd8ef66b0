//! Platform shell capability
//!
//! Commands are opaque strings handed to the platform command interpreter.
//! The interpreter is abstracted behind [`ShellSpawner`] with a POSIX (`sh -c`)
//! and a Windows (`cmd /C`) variant. Both variants compile everywhere; only
//! [`ShellKind::native`] looks at the build target.

use std::io;
use std::process::Stdio;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::process::{Child, Command};

/// Exit statuses `sh` uses when the program cannot be found (127) or executed (126)
const POSIX_UNRESOLVED_STATUSES: &[i32] = &[126, 127];

/// Exit status `cmd.exe` uses for "is not recognized as an internal or external command"
const WINDOWS_UNRESOLVED_STATUSES: &[i32] = &[9009];

/// Capability to start a shell running a command string
#[cfg_attr(test, mockall::automock)]
pub trait ShellSpawner: Send + Sync {
    /// Interpreter program (e.g. `sh`, `cmd`)
    fn program(&self) -> &str;

    /// Build the interpreter invocation for `command` without spawning it
    fn build(&self, command: &str) -> Command;

    /// Whether an interpreter exit status means the command could not be resolved
    fn is_unresolved_status(&self, code: i32) -> bool;

    /// Spawn the interpreter with stdout piped
    ///
    /// stdin and stderr are inherited from the parent. The child is not killed
    /// when its handle is dropped.
    fn spawn(&self, command: &str) -> io::Result<Child> {
        let mut cmd = self.build(command);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());
        cmd.kill_on_drop(false);
        cmd.spawn()
    }
}

/// POSIX shell: `sh -c <command>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosixShell {
    program: String,
    flag: String,
}

impl Default for PosixShell {
    fn default() -> Self {
        Self::new("sh", "-c")
    }
}

impl PosixShell {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

impl ShellSpawner for PosixShell {
    fn program(&self) -> &str {
        &self.program
    }

    fn build(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.flag).arg(command);
        cmd
    }

    fn is_unresolved_status(&self, code: i32) -> bool {
        POSIX_UNRESOLVED_STATUSES.contains(&code)
    }
}

/// Windows command interpreter: `cmd /C <command>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsShell {
    program: String,
    flag: String,
}

impl Default for WindowsShell {
    fn default() -> Self {
        Self::new("cmd", "/C")
    }
}

impl WindowsShell {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

impl ShellSpawner for WindowsShell {
    fn program(&self) -> &str {
        &self.program
    }

    fn build(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.flag);
        // cmd.exe does its own parsing; MSVC-style quoting would mangle the line
        #[cfg(windows)]
        cmd.raw_arg(command);
        #[cfg(not(windows))]
        cmd.arg(command);
        cmd
    }

    fn is_unresolved_status(&self, code: i32) -> bool {
        WINDOWS_UNRESOLVED_STATUSES.contains(&code)
    }
}

/// Which shell variant to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Posix,
    Windows,
}

impl ShellKind {
    /// The variant matching the build target
    pub fn native() -> Self {
        if cfg!(windows) {
            ShellKind::Windows
        } else {
            ShellKind::Posix
        }
    }

    /// Build a spawner of this kind, optionally overriding program and flag
    pub fn spawner(self, program: Option<&str>, flag: Option<&str>) -> Arc<dyn ShellSpawner> {
        match self {
            ShellKind::Posix => {
                let default = PosixShell::default();
                Arc::new(PosixShell::new(
                    program.unwrap_or(&default.program),
                    flag.unwrap_or(&default.flag),
                ))
            }
            ShellKind::Windows => {
                let default = WindowsShell::default();
                Arc::new(WindowsShell::new(
                    program.unwrap_or(&default.program),
                    flag.unwrap_or(&default.flag),
                ))
            }
        }
    }
}

impl std::fmt::Display for ShellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellKind::Posix => write!(f, "posix"),
            ShellKind::Windows => write!(f, "windows"),
        }
    }
}

/// Spawner for the build target's native shell
pub fn native_shell() -> Arc<dyn ShellSpawner> {
    ShellKind::native().spawner(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_posix_shell_builds_sh_c() {
        let shell = PosixShell::default();
        let cmd = shell.build("echo hello | tr a-z A-Z");

        assert_eq!(cmd.as_std().get_program(), "sh");
        assert_eq!(args_of(&cmd), vec!["-c", "echo hello | tr a-z A-Z"]);
    }

    #[test]
    fn test_windows_shell_program_and_flag() {
        let shell = WindowsShell::default();
        let cmd = shell.build("echo hello");

        assert_eq!(cmd.as_std().get_program(), "cmd");
        assert_eq!(args_of(&cmd)[0], "/C");
    }

    #[test]
    fn test_unresolved_statuses() {
        let posix = PosixShell::default();
        assert!(posix.is_unresolved_status(127));
        assert!(posix.is_unresolved_status(126));
        assert!(!posix.is_unresolved_status(1));
        assert!(!posix.is_unresolved_status(9009));

        let windows = WindowsShell::default();
        assert!(windows.is_unresolved_status(9009));
        assert!(!windows.is_unresolved_status(127));
    }

    #[test]
    fn test_shell_kind_overrides() {
        let shell = ShellKind::Posix.spawner(Some("bash"), None);
        assert_eq!(shell.program(), "bash");
        assert_eq!(args_of(&shell.build("true")), vec!["-c", "true"]);

        let shell = ShellKind::Windows.spawner(None, Some("/D /C"));
        assert_eq!(shell.program(), "cmd");
    }

    #[test]
    fn test_native_kind() {
        #[cfg(unix)]
        assert_eq!(ShellKind::native(), ShellKind::Posix);
        #[cfg(windows)]
        assert_eq!(ShellKind::native(), ShellKind::Windows);
    }

    #[test]
    fn test_shell_kind_serde() {
        let kind: ShellKind = serde_json::from_str("\"windows\"").unwrap();
        assert_eq!(kind, ShellKind::Windows);
        assert_eq!(ShellKind::Posix.to_string(), "posix");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_pipes_stdout() {
        let mut child = PosixShell::default().spawn("echo piped").unwrap();

        assert!(child.stdout.is_some());
        assert!(child.stderr.is_none());
        let status = child.wait().await.unwrap();
        assert!(status.success());
    }
}
