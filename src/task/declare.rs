// src/task/declare.rs

//! Declaration shapes and normalization.
//!
//! A task module can hand us its task in one of three shapes, in increasing
//! explicitness:
//!
//! 1. a bare action (the task name comes from the module's identity),
//! 2. a name plus a bare action,
//! 3. a name plus a rich [`TaskSpec`] with ordering edges and metadata.
//!
//! [`normalize`] folds all three into one canonical [`TaskDescriptor`], so
//! shape-sniffing never leaks past this module.

use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::task::{TaskAction, TaskDescriptor, TaskName, TaskOption};

/// The supported declaration shapes.
pub enum TaskDeclaration {
    /// A bare action; the caller supplies the name (derived from the
    /// declaring module's identity).
    Action(TaskAction),
    /// An explicitly named bare action.
    Named { name: TaskName, action: TaskAction },
    /// A named rich declaration.
    Spec { name: TaskName, spec: TaskSpec },
}

/// Rich declaration body: the action plus any subset of edges and metadata.
///
/// Every field except `action` is optional and defaults per the rules in
/// [`normalize`]. `action` is `Option` only so that its absence can be
/// reported as a configuration error naming the offending task.
#[derive(Default)]
pub struct TaskSpec {
    pub action: Option<TaskAction>,
    pub dep: Vec<TaskName>,
    pub seq: Vec<TaskName>,
    pub description: Option<String>,
    pub options: Vec<TaskOption>,
    pub priority: i32,
    pub default: bool,
}

impl TaskSpec {
    pub fn new(action: TaskAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn dep(mut self, name: &str) -> Self {
        self.dep.push(name.to_string());
        self
    }

    pub fn seq(mut self, name: &str) -> Self {
        self.seq.push(name.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn option(mut self, flag: &str, help: &str) -> Self {
        self.options.push(TaskOption::new(flag, help));
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn default_task(mut self, val: bool) -> Self {
        self.default = val;
        self
    }
}

/// Normalize any declaration shape into a canonical descriptor.
///
/// `module_name` is the fallback name for the bare-action shape; the other
/// shapes carry their own name and ignore it.
///
/// Defaulting rules:
/// - missing `dep` / `seq` become empty lists (duplicate `dep` entries are
///   dropped, keeping first-occurrence order),
/// - missing `description` becomes the empty string,
/// - missing `options` become an empty list,
/// - missing `priority` is 0, missing `default` is false.
///
/// A rich declaration without an action fails with
/// [`TaskdagError::MissingAction`].
pub fn normalize(decl: TaskDeclaration, module_name: &str) -> Result<TaskDescriptor> {
    let descriptor = match decl {
        TaskDeclaration::Action(action) => bare(module_name.to_string(), action),
        TaskDeclaration::Named { name, action } => bare(name, action),
        TaskDeclaration::Spec { name, spec } => {
            let action = spec
                .action
                .ok_or_else(|| TaskdagError::MissingAction(name.clone()))?;

            TaskDescriptor {
                name,
                action,
                dependencies: dedup_keep_order(spec.dep),
                sequence: spec.seq,
                description: spec.description.unwrap_or_default(),
                options: spec.options,
                priority: spec.priority,
                is_default: spec.default,
            }
        }
    };

    debug!(
        task = %descriptor.name,
        deps = descriptor.dependencies.len(),
        seq = descriptor.sequence.len(),
        "normalized task declaration"
    );

    Ok(descriptor)
}

fn bare(name: TaskName, action: TaskAction) -> TaskDescriptor {
    TaskDescriptor {
        name,
        action,
        dependencies: Vec::new(),
        sequence: Vec::new(),
        description: String::new(),
        options: Vec::new(),
        priority: 0,
        is_default: false,
    }
}

/// Drop duplicate names while keeping first-occurrence order.
fn dedup_keep_order(names: Vec<TaskName>) -> Vec<TaskName> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
