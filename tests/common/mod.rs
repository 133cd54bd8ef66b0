//! Common test utilities for cmdkit tests

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory holding one file with `content`
pub fn create_blob(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write blob");
    (dir, path)
}

/// Creates a temporary directory with an empty `.cmdkit.toml`-free layout
pub fn create_workdir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Creates a temporary directory containing a config file
pub fn create_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

/// Shell snippet printing `count` numbered lines
pub fn numbered_lines_command(count: usize) -> String {
    format!(
        "i=0; while [ $i -lt {} ]; do echo \"line of output number $i\"; i=$((i+1)); done",
        count
    )
}

/// Expected output of [`numbered_lines_command`]
pub fn numbered_lines_output(count: usize) -> String {
    (0..count)
        .map(|i| format!("line of output number {}\n", i))
        .collect()
}

/// Sample binary blob covering every byte value
pub fn sample_blob() -> Vec<u8> {
    (0..4096u32).map(|i| (i % 256) as u8).collect()
}
