// src/task/descriptor.rs

//! The canonical task descriptor.

use std::fmt;

use crate::task::{TaskAction, TaskName};

/// A single `flag -> explanation` entry in a task's options listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOption {
    pub flag: String,
    pub help: String,
}

impl TaskOption {
    pub fn new(flag: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            help: help.into(),
        }
    }
}

/// Canonical descriptor every declaration shape normalizes into.
///
/// Immutable once registered: the registry hands out shared references only,
/// and the execution bridge clones the `action` handle rather than taking the
/// descriptor apart.
#[derive(Clone)]
pub struct TaskDescriptor {
    /// Unique, non-empty task name.
    pub name: TaskName,
    /// The executable unit. Always present; a declaration without one is
    /// rejected during normalization.
    pub action: TaskAction,
    /// Tasks that must complete before this one, in no promised order.
    /// First-occurrence order is kept for display; duplicates are dropped.
    pub dependencies: Vec<TaskName>,
    /// Tasks that must complete before this one, strictly in this order.
    pub sequence: Vec<TaskName>,
    /// Human-readable description, empty if none was declared.
    pub description: String,
    /// Flag/help pairs in declaration order.
    pub options: Vec<TaskOption>,
    /// Relative default-selection priority; higher wins.
    pub priority: i32,
    /// Whether this task is eligible to run when no task is named.
    pub is_default: bool,
}

impl fmt::Debug for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `action` is an opaque closure; show everything else.
        f.debug_struct("TaskDescriptor")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("sequence", &self.sequence)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("priority", &self.priority)
            .field("is_default", &self.is_default)
            .finish_non_exhaustive()
    }
}

impl TaskDescriptor {
    /// Compare every field except the (opaque) action.
    pub fn same_metadata(&self, other: &TaskDescriptor) -> bool {
        self.name == other.name
            && self.dependencies == other.dependencies
            && self.sequence == other.sequence
            && self.description == other.description
            && self.options == other.options
            && self.priority == other.priority
            && self.is_default == other.is_default
    }
}
