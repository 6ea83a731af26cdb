// tests/bridge_fake_scheduler.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::{Arc, Mutex};

use taskdag::dag::compile;
use taskdag::exec::{register_graph, HostScheduler};
use taskdag::registry::Registry;
use taskdag::task::{normalize, TaskDeclaration, TaskSpec};
use taskdag_test_utils::builders::{failing_action, recording_action};
use taskdag_test_utils::fake_scheduler::FakeScheduler;

type TestResult = Result<(), Box<dyn Error>>;

fn register(registry: &mut Registry, name: &str, spec: TaskSpec) {
    let decl = TaskDeclaration::Spec {
        name: name.to_string(),
        spec,
    };
    registry
        .register(normalize(decl, name).expect("normalize"))
        .expect("register");
}

#[tokio::test]
async fn bridge_registers_one_native_task_per_descriptor() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "a", TaskSpec::new(recording_action(&log, "a")));
    register(
        &mut registry,
        "b",
        TaskSpec::new(recording_action(&log, "b")).dep("a"),
    );
    register(
        &mut registry,
        "c",
        TaskSpec::new(recording_action(&log, "c")).dep("a").dep("b"),
    );
    registry.freeze();

    let graph = compile(&registry)?;
    let scheduler = Arc::new(FakeScheduler::new());
    let as_host: Arc<dyn HostScheduler> = scheduler.clone();
    register_graph(&graph, &registry, &as_host)?;

    let registrations = scheduler.registrations();
    assert_eq!(registrations.len(), 3);
    assert!(registrations.contains(&("a".to_string(), vec![])));
    assert!(registrations.contains(&("b".to_string(), vec!["a".to_string()])));
    assert!(registrations.contains(&("c".to_string(), vec!["a".to_string(), "b".to_string()])));

    Ok(())
}

#[tokio::test]
async fn sequence_wrapper_drives_tasks_through_the_scheduler() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "x", TaskSpec::new(recording_action(&log, "x")));
    register(&mut registry, "y", TaskSpec::new(recording_action(&log, "y")));
    register(
        &mut registry,
        "z",
        TaskSpec::new(recording_action(&log, "z")).seq("x").seq("y"),
    );
    registry.freeze();

    let graph = compile(&registry)?;
    let scheduler = Arc::new(FakeScheduler::new());
    let as_host: Arc<dyn HostScheduler> = scheduler.clone();
    register_graph(&graph, &registry, &as_host)?;

    as_host.run("z").await?;

    // The wrapper re-enters the scheduler for each sequenced task, so the
    // fake records them too, in the declared order.
    assert_eq!(scheduler.ran(), vec!["z", "x", "y"]);
    assert_eq!(*log.lock().unwrap(), vec!["x", "y", "z"]);

    Ok(())
}

#[tokio::test]
async fn failed_sequence_entry_stops_the_wrapper() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    register(&mut registry, "x", TaskSpec::new(failing_action("boom")));
    register(&mut registry, "y", TaskSpec::new(recording_action(&log, "y")));
    register(
        &mut registry,
        "z",
        TaskSpec::new(recording_action(&log, "z")).seq("x").seq("y"),
    );
    registry.freeze();

    let graph = compile(&registry)?;
    let scheduler = Arc::new(FakeScheduler::new());
    let as_host: Arc<dyn HostScheduler> = scheduler.clone();
    register_graph(&graph, &registry, &as_host)?;

    assert!(as_host.run("z").await.is_err());
    assert!(log.lock().unwrap().is_empty());

    Ok(())
}
