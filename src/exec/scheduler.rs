// src/exec/scheduler.rs

//! Host scheduler interface and the production tokio implementation.
//!
//! The graph compiler hands execution responsibility to a [`HostScheduler`]:
//! one native registration per task, then `run` / `run_in_order` calls at run
//! time. Tests substitute their own implementation (see
//! `taskdag-test-utils`), so the trait avoids async-trait sugar and returns
//! boxed futures instead, the same shape the executor backend trait has.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::{Result, TaskdagError};
use crate::task::{TaskAction, TaskName};

/// Boxed future returned by scheduler operations.
pub type SchedFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// The host scheduler collaborator.
///
/// Contract assumed by the rest of the crate:
/// - a registered task executes at most once per run, no matter how many
///   paths await it (duplicate `dep`/`seq` references are therefore safe),
/// - `run_in_order` drives the named, already-registered tasks strictly in
///   order and reports the first failure.
pub trait HostScheduler: Send + Sync {
    /// Register one unit of work under `name` with native prerequisites
    /// `dependencies`, which may run in parallel at the scheduler's
    /// discretion.
    fn register_task(
        &self,
        name: TaskName,
        dependencies: Vec<TaskName>,
        action: TaskAction,
    ) -> Result<()>;

    /// Run the named task, its prerequisites first.
    fn run<'a>(&'a self, name: &'a str) -> SchedFuture<'a>;

    /// Sequential-runner primitive: run each named task to completion,
    /// strictly in order, stopping at the first failure.
    fn run_in_order<'a>(&'a self, names: &'a [TaskName]) -> SchedFuture<'a>;
}

/// Result of one task, memoized for every later awaiter.
#[derive(Clone)]
enum Outcome {
    Success,
    Failed(Arc<anyhow::Error>),
}

struct Registered {
    name: TaskName,
    dependencies: Vec<TaskName>,
    action: TaskAction,
    /// At-most-once execution: the first awaiter runs the task, everyone
    /// else waits on the cell.
    cell: OnceCell<Outcome>,
}

/// Production host scheduler on top of tokio.
///
/// Registration happens during the load phase; at run time the task map is
/// only read (the lock is never held across an await). Dependency edges run
/// with maximum parallelism via a [`JoinSet`]; sequencing is driven by
/// callers through `run_in_order`.
#[derive(Default)]
pub struct TokioScheduler {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    tasks: RwLock<HashMap<TaskName, Arc<Registered>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn get(&self, name: &str) -> Result<Arc<Registered>> {
        let tasks = self.tasks.read().unwrap_or_else(|e| e.into_inner());
        tasks
            .get(name)
            .cloned()
            .ok_or_else(|| TaskdagError::UnknownTask(name.to_string()))
    }
}

impl HostScheduler for TokioScheduler {
    fn register_task(
        &self,
        name: TaskName,
        dependencies: Vec<TaskName>,
        action: TaskAction,
    ) -> Result<()> {
        let mut tasks = self.inner.tasks.write().unwrap_or_else(|e| e.into_inner());
        if tasks.contains_key(&name) {
            return Err(TaskdagError::DuplicateTask(name));
        }

        debug!(task = %name, deps = dependencies.len(), "registered task with scheduler");
        let registered = Registered {
            name: name.clone(),
            dependencies,
            action,
            cell: OnceCell::new(),
        };
        tasks.insert(name, Arc::new(registered));
        Ok(())
    }

    fn run<'a>(&'a self, name: &'a str) -> SchedFuture<'a> {
        run_task(Arc::clone(&self.inner), name.to_string())
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

/// Run one task to completion, memoizing the outcome.
///
/// Boxed and `'static` so prerequisite recursion can be spawned onto a
/// [`JoinSet`]; the shared state travels through the cloned `Arc` handle.
fn run_task(
    inner: Arc<Inner>,
    name: TaskName,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>> {
    Box::pin(async move {
        let registered = inner.get(&name)?;

        let outcome = registered
            .cell
            .get_or_init(|| execute(Arc::clone(&inner), Arc::clone(&registered)))
            .await
            .clone();

        match outcome {
            Outcome::Success => Ok(()),
            Outcome::Failed(err) => Err(TaskdagError::TaskFailed {
                task: name,
                source: anyhow::anyhow!(err),
            }),
        }
    })
}

/// Prerequisites with maximum parallelism, then the task's own action.
async fn execute(inner: Arc<Inner>, registered: Arc<Registered>) -> Outcome {
    if !registered.dependencies.is_empty() {
        debug!(
            task = %registered.name,
            deps = ?registered.dependencies,
            "awaiting prerequisites"
        );

        let mut set: JoinSet<Result<()>> = JoinSet::new();
        for dep in &registered.dependencies {
            set.spawn(run_task(Arc::clone(&inner), dep.clone()));
        }

        // Await every prerequisite; report the first observed failure after
        // the set has drained so sibling outcomes stay memoized.
        let mut first_failure: Option<anyhow::Error> = None;
        while let Some(joined) = set.join_next().await {
            let failure = match joined {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(anyhow::Error::new(err)),
                Err(join_err) => Some(anyhow::anyhow!("prerequisite panicked: {join_err}")),
            };
            if let Some(err) = failure
                && first_failure.is_none()
            {
                first_failure = Some(err);
            }
        }

        if let Some(err) = first_failure {
            warn!(task = %registered.name, error = %err, "prerequisite failed; skipping action");
            return Outcome::Failed(Arc::new(err));
        }
    }

    match (registered.action)().await {
        Ok(()) => {
            info!(task = %registered.name, "task completed");
            Outcome::Success
        }
        Err(err) => {
            warn!(task = %registered.name, error = %err, "task failed");
            Outcome::Failed(Arc::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::action;
    use std::sync::Mutex;

    fn recording_action(log: &Arc<Mutex<Vec<String>>>, name: &str) -> TaskAction {
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

    fn failing_action(message: &str) -> TaskAction {
        let message = message.to_string();
        action(move || {
            let message = message.clone();
            async move { Err(anyhow::anyhow!(message)) }
        })
    }

    #[tokio::test]
    async fn runs_prerequisites_before_action() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sched = TokioScheduler::new();

        sched
            .register_task("a".into(), vec![], recording_action(&log, "a"))
            .unwrap();
        sched
            .register_task("b".into(), vec!["a".into()], recording_action(&log, "b"))
            .unwrap();

        sched.run("b").await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn diamond_dependency_runs_shared_task_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sched = TokioScheduler::new();

        sched
            .register_task("base".into(), vec![], recording_action(&log, "base"))
            .unwrap();
        sched
            .register_task("left".into(), vec!["base".into()], recording_action(&log, "left"))
            .unwrap();
        sched
            .register_task("right".into(), vec!["base".into()], recording_action(&log, "right"))
            .unwrap();
        sched
            .register_task(
                "top".into(),
                vec!["left".into(), "right".into()],
                recording_action(&log, "top"),
            )
            .unwrap();

        sched.run("top").await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.iter().filter(|n| n.as_str() == "base").count(), 1);
        assert_eq!(log.last().map(String::as_str), Some("top"));
    }

    #[tokio::test]
    async fn failing_prerequisite_skips_dependent_action() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sched = TokioScheduler::new();

        sched
            .register_task("bad".into(), vec![], failing_action("boom"))
            .unwrap();
        sched
            .register_task("top".into(), vec!["bad".into()], recording_action(&log, "top"))
            .unwrap();

        let err = sched.run("top").await.unwrap_err();
        assert!(matches!(err, TaskdagError::TaskFailed { ref task, .. } if task == "top"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_in_order_is_sequential_and_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sched = TokioScheduler::new();

        sched
            .register_task("x".into(), vec![], recording_action(&log, "x"))
            .unwrap();
        sched
            .register_task("bad".into(), vec![], failing_action("boom"))
            .unwrap();
        sched
            .register_task("y".into(), vec![], recording_action(&log, "y"))
            .unwrap();

        let names: Vec<TaskName> = vec!["x".into(), "bad".into(), "y".into()];
        let err = sched.run_in_order(&names).await.unwrap_err();

        assert!(matches!(err, TaskdagError::TaskFailed { ref task, .. } if task == "bad"));
        assert_eq!(*log.lock().unwrap(), vec!["x"]);
    }

    #[tokio::test]
    async fn running_unknown_task_fails() {
        let sched = TokioScheduler::new();
        let err = sched.run("ghost").await.unwrap_err();
        assert!(matches!(err, TaskdagError::UnknownTask(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let sched = TokioScheduler::new();
        sched
            .register_task("a".into(), vec![], crate::task::noop_action())
            .unwrap();
        let err = sched
            .register_task("a".into(), vec![], crate::task::noop_action())
            .unwrap_err();
        assert!(matches!(err, TaskdagError::DuplicateTask(name) if name == "a"));
    }
}
