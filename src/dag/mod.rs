// src/dag/mod.rs

//! Execution-graph compilation.
//!
//! - [`compile`] validates every `dep`/`seq` edge against the registry,
//!   runs cycle detection and produces the [`CompiledGraph`].
//! - [`default_task`] selects the entry point used when no task is named.

pub mod compile;
pub mod default_task;

pub use compile::{compile, CompiledGraph, CompiledTask};
pub use default_task::{DefaultEntry, DEFAULT_TASK_NAME};
