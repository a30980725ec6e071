//! Process spawning behind a trait so the worker can be driven in tests

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::command::LaunchCommand;
use super::LaunchError;

/// Runs a launch command to completion
#[async_trait::async_trait]
pub trait ProcessSpawner: Send + Sync {
    async fn run(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

/// Spawns the editor with tokio and waits for it to exit
pub struct TokioSpawner;

#[async_trait::async_trait]
impl ProcessSpawner for TokioSpawner {
    async fn run(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        debug!(pid = ?child.id(), command = %command.display(), "Editor spawned");

        let output = child.wait_with_output().await.map_err(LaunchError::Wait)?;
        if output.status.success() {
            return Ok(());
        }

        Err(LaunchError::Exited {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
