//! Configuration module for cmdkit
//!
//! Provides XDG-compliant layered configuration loading.

pub mod loader;
pub mod model;

pub use loader::{config_paths, expand_path, find_config_files, load_config};
pub use model::*;
