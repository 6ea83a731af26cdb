// src/exec/mod.rs

//! Task execution.
//!
//! - [`scheduler`] defines the [`HostScheduler`] collaborator interface and
//!   the production [`TokioScheduler`] behind it.
//! - [`bridge`] translates a compiled graph into native scheduler
//!   registrations, realizing `seq` chains as wrapper actions.
//! - [`command`] builds shell-command task actions.

pub mod bridge;
pub mod command;
pub mod scheduler;

pub use bridge::register_graph;
pub use command::shell_action;
pub use scheduler::{HostScheduler, SchedFuture, TokioScheduler};
