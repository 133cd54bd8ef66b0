//! PATH-based executable lookup
//!
//! Each PATH entry is checked for `entry/name` and then for the same path
//! with its extension replaced by `.exe`. Only existence is tested, not the
//! executable bit. A miss is `None`, never an empty path.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Search the process `PATH` for `name`
pub fn find_executable_in_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_executable_in(&path_var, name)
}

/// Search an explicit PATH-style value for `name`
///
/// Entries are separated with the platform delimiter (`:` or `;`).
pub fn find_executable_in(path_var: &OsStr, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| candidate_in(&dir, name))
}

fn candidate_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let exec = dir.join(name);
    if exec.exists() {
        return Some(exec);
    }

    let exe = exec.with_extension("exe");
    if exe.exists() {
        tracing::trace!("Resolved {} via .exe fallback", name);
        return Some(exe);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn path_of(dirs: &[&Path]) -> OsString {
        env::join_paths(dirs).unwrap()
    }

    #[test]
    fn test_finds_in_later_entry() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("tool"), b"").unwrap();

        let found = find_executable_in(&path_of(&[first.path(), second.path()]), "tool");

        assert_eq!(found, Some(second.path().join("tool")));
    }

    #[test]
    fn test_first_entry_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(first.path().join("tool"), b"").unwrap();
        std::fs::write(second.path().join("tool"), b"").unwrap();

        let found = find_executable_in(&path_of(&[first.path(), second.path()]), "tool");

        assert_eq!(found, Some(first.path().join("tool")));
    }

    #[test]
    fn test_exe_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tool.exe"), b"").unwrap();

        let found = find_executable_in(&path_of(&[dir.path()]), "tool");

        assert_eq!(found, Some(dir.path().join("tool.exe")));
    }

    #[test]
    fn test_exe_fallback_replaces_extension() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tool.exe"), b"").unwrap();

        let found = find_executable_in(&path_of(&[dir.path()]), "tool.sh");

        assert_eq!(found, Some(dir.path().join("tool.exe")));
    }

    #[test]
    fn test_not_found_is_none() {
        let dir = TempDir::new().unwrap();

        assert_eq!(find_executable_in(&path_of(&[dir.path()]), "__nope__"), None);
        assert_eq!(find_executable_in(OsStr::new(""), "sh"), None);
        assert_eq!(find_executable_in(&path_of(&[dir.path()]), ""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_sh_on_process_path() {
        let found = find_executable_in_path("sh");
        assert!(found.is_some_and(|p| p.ends_with("sh")));
    }
}
