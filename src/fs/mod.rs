//! File helpers
//!
//! - Whole-file blob load/save
//! - PATH-based executable lookup

pub mod blob;
pub mod lookup;

pub use blob::{load_file, write_file};
pub use lookup::{find_executable_in, find_executable_in_path};
