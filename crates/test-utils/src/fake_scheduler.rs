use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use taskdag::errors::{Result, TaskdagError};
use taskdag::exec::{HostScheduler, SchedFuture};
use taskdag::task::{TaskAction, TaskName};

/// A fake host scheduler that:
/// - records every registration (name + native prerequisite names)
/// - records the order in which tasks were run
/// - executes actions directly, ignoring native prerequisites, so tests can
///   observe exactly what the execution bridge asked for.
#[derive(Default)]
pub struct FakeScheduler {
    tasks: Mutex<HashMap<TaskName, TaskAction>>,
    registrations: Mutex<Vec<(TaskName, Vec<TaskName>)>>,
    ran: Arc<Mutex<Vec<TaskName>>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(name, prerequisites)` pairs in registration order.
    pub fn registrations(&self) -> Vec<(TaskName, Vec<TaskName>)> {
        self.registrations.lock().unwrap().clone()
    }

    /// Task names in the order their actions were invoked.
    pub fn ran(&self) -> Vec<TaskName> {
        self.ran.lock().unwrap().clone()
    }
}

impl HostScheduler for FakeScheduler {
    fn register_task(
        &self,
        name: TaskName,
        dependencies: Vec<TaskName>,
        action: TaskAction,
    ) -> Result<()> {
        let mut tasks = self.tasks.lock().unwrap();
        if tasks.contains_key(&name) {
            return Err(TaskdagError::DuplicateTask(name));
        }
        self.registrations
            .lock()
            .unwrap()
            .push((name.clone(), dependencies));
        tasks.insert(name, action);
        Ok(())
    }

    fn run<'a>(&'a self, name: &'a str) -> SchedFuture<'a> {
        Box::pin(async move {
            let action = {
                let tasks = self.tasks.lock().unwrap();
                tasks
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TaskdagError::UnknownTask(name.to_string()))?
            };

            self.ran.lock().unwrap().push(name.to_string());

            action().await.map_err(|err| TaskdagError::TaskFailed {
                task: name.to_string(),
                source: err,
            })
        })
    }

    fn run_in_order<'a>(&'a self, names: &'a [TaskName]) -> SchedFuture<'a> {
        Box::pin(async move {
            for name in names {
                self.run(name).await?;
            }
            Ok(())
        })
    }
}
