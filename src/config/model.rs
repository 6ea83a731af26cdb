// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level taskfile as read from TOML.
///
/// ```toml
/// [task.clean]
/// cmd = "rm -rf target"
///
/// [task.build]
/// cmd = "cargo build"
/// dep = ["fmt", "lint"]
/// seq = ["clean"]
/// description = "Build the project"
/// priority = 10
/// default = true
///
/// [[task.build.option]]
/// flag = "--release"
/// help = "optimized build"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Taskfile {
    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskTable>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskTable {
    /// Shell command to execute.
    ///
    /// Optional in the model so that its absence surfaces as a
    /// missing-action configuration error naming the task, rather than a
    /// parse error.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Tasks that must complete before this one; no order promised.
    #[serde(default)]
    pub dep: Vec<String>,

    /// Tasks that must complete before this one, strictly in this order.
    #[serde(default)]
    pub seq: Vec<String>,

    /// Human-readable description for the help listing.
    #[serde(default)]
    pub description: Option<String>,

    /// Flag/help pairs shown in the per-task detail view. An array of
    /// tables, so declaration order is preserved.
    #[serde(default, rename = "option")]
    pub options: Vec<OptionEntry>,

    /// Default-selection priority; higher wins.
    #[serde(default)]
    pub priority: i32,

    /// Whether this task runs when no task is named.
    #[serde(default)]
    pub default: bool,
}

/// One `[[task.<name>.option]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionEntry {
    pub flag: String,
    pub help: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_task_table() {
        let file: Taskfile = toml::from_str(
            r#"
            [task.clean]
            cmd = "rm -rf target"

            [task.build]
            cmd = "cargo build"
            dep = ["fmt", "lint"]
            seq = ["clean"]
            description = "Build the project"
            priority = 10
            default = true

            [[task.build.option]]
            flag = "--release"
            help = "optimized build"

            [[task.build.option]]
            flag = "--verbose"
            help = "print compiler output"
            "#,
        )
        .unwrap();

        let build = &file.task["build"];
        assert_eq!(build.cmd.as_deref(), Some("cargo build"));
        assert_eq!(build.dep, vec!["fmt", "lint"]);
        assert_eq!(build.seq, vec!["clean"]);
        assert_eq!(build.description.as_deref(), Some("Build the project"));
        assert_eq!(build.priority, 10);
        assert!(build.default);

        let flags: Vec<&str> = build.options.iter().map(|o| o.flag.as_str()).collect();
        assert_eq!(flags, vec!["--release", "--verbose"]);
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let file: Taskfile = toml::from_str(
            r#"
            [task.lint]
            cmd = "cargo clippy"
            "#,
        )
        .unwrap();

        let lint = &file.task["lint"];
        assert!(lint.dep.is_empty());
        assert!(lint.seq.is_empty());
        assert!(lint.description.is_none());
        assert!(lint.options.is_empty());
        assert_eq!(lint.priority, 0);
        assert!(!lint.default);
    }

    #[test]
    fn missing_cmd_parses_but_stays_none() {
        let file: Taskfile = toml::from_str(
            r#"
            [task.broken]
            description = "no action here"
            "#,
        )
        .unwrap();

        assert!(file.task["broken"].cmd.is_none());
    }
}
