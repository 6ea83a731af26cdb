// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Compile declared tasks into an execution graph and run them.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run, strictly in the order given.
    ///
    /// With no task named, the default task runs. The pseudo-task `help`
    /// lists all tasks; `help <task>` shows a task's options.
    #[arg(value_name = "TASKS")]
    pub tasks: Vec<String>,

    /// Path to the taskfile (TOML).
    ///
    /// Default: `Taskdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Taskdag.toml")]
    pub taskfile: String,

    /// List registered tasks and exit (same as the `help` pseudo-task).
    #[arg(long)]
    pub list: bool,

    /// Normalize, register and compile, print the execution plan, but run
    /// nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
