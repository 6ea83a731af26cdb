// src/config/mod.rs

//! Taskfile loading.
//!
//! The taskfile plays the role of the module loader: each `[task.<name>]`
//! table is one declaration handed to the normalizer. Semantic validation
//! (unknown references, cycles) is not done here; that is the graph
//! compiler's job.

pub mod loader;
pub mod model;

pub use loader::{default_taskfile_path, load_from_path};
pub use model::{OptionEntry, TaskTable, Taskfile};
