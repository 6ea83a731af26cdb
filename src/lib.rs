// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod help;
pub mod logging;
pub mod registry;
pub mod task;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::model::{TaskTable, Taskfile};
use crate::dag::CompiledGraph;
use crate::exec::{HostScheduler, TokioScheduler};
use crate::registry::Registry;
use crate::task::{normalize, TaskDeclaration, TaskName, TaskSpec};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - taskfile loading and declaration normalization
/// - the registry (load phase, then frozen)
/// - graph compilation and default selection
/// - the help listing / dry-run short circuits
/// - the execution bridge and host scheduler
pub async fn run(args: CliArgs) -> Result<()> {
    let taskfile = config::load_from_path(&args.taskfile)?;

    let registry = build_registry(&taskfile)?;

    // The `help` pseudo-task and `--list` are pure registry projections and
    // never need a compiled graph.
    if args.list || args.tasks.first().map(String::as_str) == Some("help") {
        match args.tasks.get(1) {
            Some(task_name) => print!("{}", help::render_detail(&registry, task_name)?),
            None => print!("{}", help::render_listing(&registry)),
        }
        return Ok(());
    }

    let graph = dag::compile(&registry)?;

    if args.dry_run {
        print_dry_run(&graph, &registry);
        return Ok(());
    }

    let entry_tasks = entry_tasks(&args, &registry, &graph)?;

    let scheduler: Arc<dyn HostScheduler> = Arc::new(TokioScheduler::new());
    exec::register_graph(&graph, &registry, &scheduler)?;

    info!(tasks = ?entry_tasks, "running tasks");
    scheduler.run_in_order(&entry_tasks).await?;

    Ok(())
}

/// Normalize every taskfile declaration and register it. The registry is
/// frozen before it is returned.
pub fn build_registry(taskfile: &Taskfile) -> Result<Registry> {
    let mut registry = Registry::new();

    for (name, table) in taskfile.task.iter() {
        let decl = declaration_from_table(name, table);
        let descriptor = normalize(decl, name)?;
        registry.register(descriptor)?;
    }

    registry.freeze();
    Ok(registry)
}

/// Map one `[task.<name>]` table onto the rich declaration shape.
fn declaration_from_table(name: &str, table: &TaskTable) -> TaskDeclaration {
    let spec = TaskSpec {
        action: table
            .cmd
            .as_deref()
            .map(|cmd| exec::shell_action(name, cmd)),
        dep: table.dep.clone(),
        seq: table.seq.clone(),
        description: table.description.clone(),
        options: table
            .options
            .iter()
            .map(|entry| task::TaskOption::new(&entry.flag, &entry.help))
            .collect(),
        priority: table.priority,
        default: table.default,
    };

    TaskDeclaration::Spec {
        name: name.to_string(),
        spec,
    }
}

/// Resolve what to run: the named tasks, in the order given, or the default
/// entry point when none are named.
fn entry_tasks(args: &CliArgs, registry: &Registry, graph: &CompiledGraph) -> Result<Vec<TaskName>> {
    if !args.tasks.is_empty() {
        // Surface unknown names before anything executes.
        for name in &args.tasks {
            registry.lookup(name)?;
        }
        return Ok(args.tasks.clone());
    }

    match graph.default_entry() {
        Some(entry) => Ok(vec![entry.name.clone()]),
        None => Err(anyhow!(
            "no task named and no default task declared; try 'taskdag help'"
        )),
    }
}

/// Simple dry-run output: tasks, their edges and the execution order.
fn print_dry_run(graph: &CompiledGraph, registry: &Registry) {
    println!("taskdag dry-run");
    println!();

    println!("tasks ({}):", graph.len());
    for task in graph.tasks() {
        println!("  - {}", task.name);
        if !task.dependencies.is_empty() {
            println!("      dep: {:?}", task.dependencies);
        }
        if !task.sequence.is_empty() {
            println!("      seq: {:?}", task.sequence);
        }
    }

    println!();
    println!("execution order: {:?}", graph.execution_order());

    match graph.default_entry() {
        Some(entry) => println!("default entry: {}", entry.name),
        None => println!("default entry: (none)"),
    }

    debug!(tasks = registry.len(), "dry-run complete (no execution)");
}
