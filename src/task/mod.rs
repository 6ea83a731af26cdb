// src/task/mod.rs

//! Task declarations, canonical descriptors and normalization.
//!
//! - [`descriptor`] defines the canonical [`TaskDescriptor`] that the rest of
//!   the crate works with.
//! - [`declare`] defines the supported declaration shapes and the
//!   normalization function that turns any of them into a descriptor.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub mod declare;
pub mod descriptor;

pub use declare::{normalize, TaskDeclaration, TaskSpec};
pub use descriptor::{TaskDescriptor, TaskOption};

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// Future returned by a task action. Completion of the future is the task's
/// completion signal; an `Err` is the failure signal.
pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// The executable unit of a task.
///
/// Shared (`Arc`) so that a descriptor can stay in the read-only registry
/// while the execution bridge hands a clone of the action to the host
/// scheduler.
pub type TaskAction = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// Wrap an async closure as a [`TaskAction`].
pub fn action<F, Fut>(f: F) -> TaskAction
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()) as ActionFuture)
}

/// An action that completes immediately. Used for synthetic tasks whose only
/// purpose is their ordering edges (e.g. the composed default task).
pub fn noop_action() -> TaskAction {
    action(|| async { Ok(()) })
}
