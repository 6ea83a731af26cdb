// src/exec/command.rs

//! Shell-command task actions.

use std::process::Stdio;

use anyhow::{anyhow, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::task::{action, TaskAction};

/// Build a [`TaskAction`] that runs `cmd` through the platform shell.
///
/// stdout is passed through to the terminal; stderr is consumed and logged
/// at debug so buffers never fill. A non-zero exit status is the task's
/// failure signal.
pub fn shell_action(task: &str, cmd: &str) -> TaskAction {
    let task = task.to_string();
    let cmd = cmd.to_string();

    action(move || {
        let task = task.clone();
        let cmd = cmd.clone();
        async move { run_command(&task, &cmd).await }
    })
}

async fn run_command(task: &str, cmd: &str) -> anyhow::Result<()> {
    info!(task = %task, cmd = %cmd, "starting task process");

    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    command
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning process for task '{task}'"))?;

    if let Some(stderr) = child.stderr.take() {
        let task = task.to_string();
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                debug!(task = %task, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{task}'"))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %task,
        exit_code = code,
        success = status.success(),
        "task process exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("command exited with status {code}"))
    }
}
