// src/registry.rs

//! Process-wide task registry.
//!
//! Lifecycle: construct, register during the load phase, [`Registry::freeze`],
//! then read-only for the rest of the process. Entries are never removed.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::task::{TaskDescriptor, TaskName};

/// Name → descriptor mapping with an explicit load/run-phase split.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: BTreeMap<TaskName, TaskDescriptor>,
    frozen: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its name.
    ///
    /// Fails with [`TaskdagError::RegistryFrozen`] after [`Registry::freeze`]
    /// and with [`TaskdagError::DuplicateTask`] if the name is taken; the
    /// first registration is retained in that case.
    pub fn register(&mut self, descriptor: TaskDescriptor) -> Result<()> {
        if self.frozen {
            return Err(TaskdagError::RegistryFrozen(descriptor.name));
        }
        if self.tasks.contains_key(&descriptor.name) {
            return Err(TaskdagError::DuplicateTask(descriptor.name));
        }

        debug!(task = %descriptor.name, "registered task");
        self.tasks.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// End the load phase. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
        debug!(tasks = self.tasks.len(), "registry frozen");
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Look up a descriptor by name.
    pub fn lookup(&self, name: &str) -> Result<&TaskDescriptor> {
        self.tasks
            .get(name)
            .ok_or_else(|| TaskdagError::UnknownTask(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// All descriptors in name order (BTreeMap iteration order).
    pub fn iter(&self) -> impl Iterator<Item = &TaskDescriptor> {
        self.tasks.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
