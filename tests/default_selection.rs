// tests/default_selection.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::{Arc, Mutex};

use taskdag::dag::{compile, DEFAULT_TASK_NAME};
use taskdag::exec::{register_graph, HostScheduler, TokioScheduler};
use taskdag::registry::Registry;
use taskdag::task::{normalize, TaskDeclaration, TaskSpec};
use taskdag_test_utils::builders::recording_action;

type TestResult = Result<(), Box<dyn Error>>;

fn register(registry: &mut Registry, name: &str, priority: i32, default: bool, log: &Arc<Mutex<Vec<String>>>) {
    let decl = TaskDeclaration::Spec {
        name: name.to_string(),
        spec: TaskSpec::new(recording_action(log, name))
            .priority(priority)
            .default_task(default),
    };
    registry
        .register(normalize(decl, name).expect("normalize"))
        .expect("register");
}

#[tokio::test]
async fn composed_default_runs_defaults_in_priority_then_name_order() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "a", 5, true, &log);
    register(&mut registry, "b", 10, true, &log);
    register(&mut registry, "c", 10, true, &log);
    register(&mut registry, "other", 99, false, &log);
    registry.freeze();

    let graph = compile(&registry)?;
    let entry = graph.default_entry().expect("default entry");
    assert_eq!(entry.name, DEFAULT_TASK_NAME);

    let scheduler: Arc<dyn HostScheduler> = Arc::new(TokioScheduler::new());
    register_graph(&graph, &registry, &scheduler)?;

    scheduler.run(&entry.name).await?;

    // Ties between b and c break by ascending name; "other" never runs.
    assert_eq!(*log.lock().unwrap(), vec!["b", "c", "a"]);

    Ok(())
}

#[tokio::test]
async fn single_default_runs_directly_without_composite() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "only", 0, true, &log);
    register(&mut registry, "other", 0, false, &log);
    registry.freeze();

    let graph = compile(&registry)?;
    let entry = graph.default_entry().expect("default entry");
    assert_eq!(entry.name, "only");
    assert!(entry.composite.is_none());

    let scheduler: Arc<dyn HostScheduler> = Arc::new(TokioScheduler::new());
    register_graph(&graph, &registry, &scheduler)?;

    scheduler.run(&entry.name).await?;
    assert_eq!(*log.lock().unwrap(), vec!["only"]);

    Ok(())
}

#[tokio::test]
async fn no_default_yields_no_entry() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "a", 0, false, &log);
    registry.freeze();

    let graph = compile(&registry)?;
    assert!(graph.default_entry().is_none());

    Ok(())
}
