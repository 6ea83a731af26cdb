// src/exec/bridge.rs

//! Execution bridge: compiled graph → native scheduler registrations.
//!
//! Each compiled task becomes exactly one `register_task` call. Dependency
//! edges are passed through as native prerequisites; a `seq` chain becomes a
//! wrapper action that first drives the named tasks through the scheduler's
//! sequential-runner primitive, then invokes the task's own action. A
//! sequenced prerequisite failure short-circuits the wrapper without running
//! the action.

use std::sync::Arc;

use tracing::debug;

use crate::dag::CompiledGraph;
use crate::errors::Result;
use crate::exec::scheduler::HostScheduler;
use crate::registry::Registry;
use crate::task::{ActionFuture, TaskAction, TaskName};

/// Register every compiled task (and the composite default entry, if any)
/// with the host scheduler.
///
/// Must only be called with a successfully compiled graph: load-phase errors
/// have to abort before the first native registration, since a partially
/// registered graph could execute inconsistent ordering.
pub fn register_graph(
    graph: &CompiledGraph,
    registry: &Registry,
    scheduler: &Arc<dyn HostScheduler>,
) -> Result<()> {
    for task in graph.tasks() {
        let descriptor = registry.lookup(&task.name)?;
        let action = sequenced(scheduler, &task.sequence, descriptor.action.clone());
        scheduler.register_task(task.name.clone(), task.dependencies.clone(), action)?;
    }

    if let Some(entry) = graph.default_entry()
        && let Some(composite) = &entry.composite
    {
        debug!(sequence = ?composite.sequence, "registering composed default entry");
        let action = sequenced(scheduler, &composite.sequence, composite.action.clone());
        scheduler.register_task(composite.name.clone(), Vec::new(), action)?;
    }

    Ok(())
}

/// Wrap `action` so the sequence chain runs strictly in order first.
///
/// Tasks without a sequence keep their action untouched.
fn sequenced(
    scheduler: &Arc<dyn HostScheduler>,
    sequence: &[TaskName],
    action: TaskAction,
) -> TaskAction {
    if sequence.is_empty() {
        return action;
    }

    let scheduler = Arc::clone(scheduler);
    let sequence = sequence.to_vec();

    Arc::new(move || {
        let scheduler = Arc::clone(&scheduler);
        let sequence = sequence.clone();
        let action = Arc::clone(&action);

        Box::pin(async move {
            scheduler.run_in_order(&sequence).await?;
            action().await
        }) as ActionFuture
    })
}
