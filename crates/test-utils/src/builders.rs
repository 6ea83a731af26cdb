#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use taskdag::config::{TaskTable, Taskfile};
use taskdag::task::{action, TaskAction};

/// Builder for `Taskfile` to simplify test setup.
pub struct TaskfileBuilder {
    taskfile: Taskfile,
}

impl TaskfileBuilder {
    pub fn new() -> Self {
        Self {
            taskfile: Taskfile {
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, table: TaskTable) -> Self {
        self.taskfile.task.insert(name.to_string(), table);
        self
    }

    pub fn build(self) -> Taskfile {
        self.taskfile
    }
}

impl Default for TaskfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskTable`.
pub struct TaskTableBuilder {
    table: TaskTable,
}

impl TaskTableBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            table: TaskTable {
                cmd: Some(cmd.to_string()),
                ..TaskTable::default()
            },
        }
    }

    pub fn without_cmd() -> Self {
        Self {
            table: TaskTable::default(),
        }
    }

    pub fn dep(mut self, name: &str) -> Self {
        self.table.dep.push(name.to_string());
        self
    }

    pub fn seq(mut self, name: &str) -> Self {
        self.table.seq.push(name.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.table.description = Some(text.to_string());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.table.priority = priority;
        self
    }

    pub fn default_task(mut self, val: bool) -> Self {
        self.table.default = val;
        self
    }

    pub fn build(self) -> TaskTable {
        self.table
    }
}

/// An action that appends `name` to the shared log when it runs.
pub fn recording_action(log: &Arc<Mutex<Vec<String>>>, name: &str) -> TaskAction {
    let log = Arc::clone(log);
    let name = name.to_string();
    action(move || {
        let log = Arc::clone(&log);
        let name = name.clone();
        async move {
            log.lock().unwrap().push(name);
            Ok(())
        }
    })
}

/// An action that always fails with the given message.
pub fn failing_action(message: &str) -> TaskAction {
    let message = message.to_string();
    action(move || {
        let message = message.clone();
        async move { Err(anyhow::anyhow!(message)) }
    })
}
