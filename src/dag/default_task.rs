// src/dag/default_task.rs

//! Selection of the entry point used when the operator names no task.

use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::registry::Registry;
use crate::task::{noop_action, TaskDescriptor, TaskName};

/// Name under which a composed default entry is registered with the host
/// scheduler.
pub const DEFAULT_TASK_NAME: &str = "default";

/// The resolved default entry point.
#[derive(Debug, Clone)]
pub struct DefaultEntry {
    /// Name to invoke when no task is named on the command line.
    pub name: TaskName,
    /// Synthetic composite descriptor. Present only when several tasks are
    /// default-eligible; a single eligible task is invoked directly.
    pub composite: Option<TaskDescriptor>,
}

/// Scan the registry for `default = true` descriptors.
///
/// - none: `Ok(None)`; running without a task name is then a CLI-level error.
/// - one: that task alone is the entry point.
/// - several: they compose into a synthetic task whose `seq` is the list
///   ordered by priority descending, ties broken by ascending name. The
///   composed tasks therefore run one after another, highest priority first.
pub fn select(registry: &Registry) -> Result<Option<DefaultEntry>> {
    let mut eligible: Vec<&TaskDescriptor> = registry.iter().filter(|d| d.is_default).collect();

    if eligible.is_empty() {
        return Ok(None);
    }

    eligible.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));

    if eligible.len() == 1 {
        let entry = DefaultEntry {
            name: eligible[0].name.clone(),
            composite: None,
        };
        debug!(task = %entry.name, "single default task selected");
        return Ok(Some(entry));
    }

    // The composite needs its own scheduler registration, so the name must
    // be free.
    if registry.contains(DEFAULT_TASK_NAME) {
        return Err(TaskdagError::DuplicateTask(DEFAULT_TASK_NAME.to_string()));
    }

    let sequence: Vec<TaskName> = eligible.iter().map(|d| d.name.clone()).collect();
    debug!(?sequence, "composed default task from multiple eligible tasks");

    let composite = TaskDescriptor {
        name: DEFAULT_TASK_NAME.to_string(),
        action: noop_action(),
        dependencies: Vec::new(),
        sequence,
        description: String::new(),
        options: Vec::new(),
        priority: 0,
        is_default: false,
    };

    Ok(Some(DefaultEntry {
        name: DEFAULT_TASK_NAME.to_string(),
        composite: Some(composite),
    }))
}
