// src/dag/compile.rs

//! Graph compilation over a frozen registry snapshot.
//!
//! Compilation is a pure function of the registry: no scheduler calls, no IO.
//! It either produces a [`CompiledGraph`] or a typed load-phase error, so a
//! partially compiled graph can never reach the host scheduler.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::default_task::{self, DefaultEntry};
use crate::errors::{Result, TaskdagError};
use crate::registry::Registry;
use crate::task::TaskName;

/// Resolved ordering requirements of one task.
///
/// The two edge kinds stay distinguishable: `dependencies` carry no ordering
/// promise among themselves, `sequence` is a strict chain. A name appearing in
/// both lists keeps the strict order; the host scheduler's at-most-once
/// guarantee makes the duplicate reference idempotent.
#[derive(Debug, Clone)]
pub struct CompiledTask {
    pub name: TaskName,
    pub dependencies: Vec<TaskName>,
    pub sequence: Vec<TaskName>,
}

/// The compiled execution graph, derived from the registry, never persisted.
#[derive(Debug)]
pub struct CompiledGraph {
    tasks: BTreeMap<TaskName, CompiledTask>,
    default_entry: Option<DefaultEntry>,
}

impl CompiledGraph {
    /// Compiled tasks in name order.
    pub fn tasks(&self) -> impl Iterator<Item = &CompiledTask> {
        self.tasks.values()
    }

    pub fn get(&self, name: &str) -> Option<&CompiledTask> {
        self.tasks.get(name)
    }

    pub fn default_entry(&self) -> Option<&DefaultEntry> {
        self.default_entry.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// A deterministic topological order over all must-run-before edges,
    /// used for dry-run output.
    ///
    /// Nodes and edges are inserted in name order, so the result is stable
    /// across processes. Compilation already rejected cycles; should the sort
    /// still fail we fall back to plain name order.
    pub fn execution_order(&self) -> Vec<TaskName> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.tasks.keys() {
            graph.add_node(name.as_str());
        }
        for task in self.tasks.values() {
            for before in task.sequence.iter().chain(task.dependencies.iter()) {
                graph.add_edge(before.as_str(), task.name.as_str(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(|s| s.to_string()).collect(),
            Err(_) => self.tasks.keys().cloned().collect(),
        }
    }
}

/// Compile the execution graph from a frozen registry.
///
/// Checks, in order:
/// - every `dep`/`seq` reference resolves ([`TaskdagError::UnknownDependency`]),
/// - no task depends on or sequences itself, directly or transitively
///   ([`TaskdagError::CyclicDependency`] with the full cycle path),
///
/// then resolves the default entry point.
pub fn compile(registry: &Registry) -> Result<CompiledGraph> {
    validate_edges(registry)?;
    detect_cycles(registry)?;

    let mut tasks = BTreeMap::new();
    for desc in registry.iter() {
        tasks.insert(
            desc.name.clone(),
            CompiledTask {
                name: desc.name.clone(),
                dependencies: desc.dependencies.clone(),
                sequence: desc.sequence.clone(),
            },
        );
    }

    let default_entry = default_task::select(registry)?;

    debug!(
        tasks = tasks.len(),
        has_default = default_entry.is_some(),
        "execution graph compiled"
    );

    Ok(CompiledGraph {
        tasks,
        default_entry,
    })
}

fn validate_edges(registry: &Registry) -> Result<()> {
    for desc in registry.iter() {
        for referenced in desc.dependencies.iter().chain(desc.sequence.iter()) {
            if !registry.contains(referenced) {
                return Err(TaskdagError::UnknownDependency {
                    task: desc.name.clone(),
                    missing: referenced.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Three-color depth-first cycle detection.
///
/// `dep` and `seq` edges are treated uniformly as must-run-before edges here;
/// the distinction only matters for execution, not for acyclicity.
fn detect_cycles(registry: &Registry) -> Result<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Grey,
        Black,
    }

    fn visit<'a>(
        name: &'a str,
        registry: &'a Registry,
        colors: &mut HashMap<&'a str, Color>,
        stack: &mut Vec<&'a str>,
    ) -> Result<()> {
        colors.insert(name, Color::Grey);
        stack.push(name);

        let desc = registry.lookup(name)?;
        for next in desc.sequence.iter().chain(desc.dependencies.iter()) {
            match colors.get(next.as_str()).copied().unwrap_or(Color::White) {
                Color::White => visit(next, registry, colors, stack)?,
                Color::Grey => {
                    // Grey means `next` is on the current stack: close the cycle
                    // from its stack position through the current task.
                    let start = stack.iter().position(|n| *n == next).unwrap_or(0);
                    let mut path: Vec<TaskName> =
                        stack[start..].iter().map(|n| n.to_string()).collect();
                    path.push(next.clone());
                    return Err(TaskdagError::CyclicDependency { path });
                }
                Color::Black => {}
            }
        }

        stack.pop();
        colors.insert(name, Color::Black);
        Ok(())
    }

    let mut colors: HashMap<&str, Color> = HashMap::new();
    let mut stack: Vec<&str> = Vec::new();

    for name in registry.names() {
        if colors.get(name).copied().unwrap_or(Color::White) == Color::White {
            visit(name, registry, &mut colors, &mut stack)?;
        }
    }
    Ok(())
}
