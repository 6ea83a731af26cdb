// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::Taskfile;
use crate::errors::Result;

/// Load a taskfile from the given path.
///
/// This only performs TOML deserialization; reference and cycle checking
/// happens later, in graph compilation, where the errors can name the
/// offending tasks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Taskfile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let taskfile: Taskfile = toml::from_str(&contents)?;

    Ok(taskfile)
}

/// Default taskfile location: `Taskdag.toml` in the current working
/// directory.
pub fn default_taskfile_path() -> PathBuf {
    PathBuf::from("Taskdag.toml")
}
