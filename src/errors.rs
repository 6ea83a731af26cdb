// src/errors.rs

//! Crate-wide error taxonomy and helpers.
//!
//! Everything except [`TaskdagError::TaskFailed`] is a load-phase
//! (configuration) error: it is raised while declarations are normalized,
//! registered and compiled, before any task has been handed to the host
//! scheduler. `TaskFailed` is the execution-phase case, carrying the
//! underlying action error unchanged.

use thiserror::Error;

use crate::task::TaskName;

#[derive(Error, Debug)]
pub enum TaskdagError {
    /// A second task was registered under an already-taken name.
    #[error("duplicate task '{0}': a task with this name is already registered")]
    DuplicateTask(TaskName),

    /// A task name was looked up that is not in the registry.
    #[error("unknown task '{0}'")]
    UnknownTask(TaskName),

    /// A task references another task (via `dep` or `seq`) that does not exist.
    #[error("task '{task}' references unknown task '{missing}'")]
    UnknownDependency { task: TaskName, missing: TaskName },

    /// The must-run-before edges close a cycle. The path lists the tasks
    /// along the cycle, with the entry task repeated at the end.
    #[error("cycle detected in task graph: {}", path.join(" -> "))]
    CyclicDependency { path: Vec<TaskName> },

    /// A declaration provided no action for the named task.
    #[error("task '{0}' has no action")]
    MissingAction(TaskName),

    /// Registration was attempted after the registry was frozen.
    #[error("registry is frozen; cannot register task '{0}'")]
    RegistryFrozen(TaskName),

    /// A task's action failed at execution time. The underlying error is
    /// forwarded, not translated.
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: TaskName,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskdagError>;
