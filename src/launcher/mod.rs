//! Launcher - supervised editor launches
//!
//! `POST /api/launch-cursor` only queues a launch and returns its id. A single
//! worker task drains the queue, runs each launch on its own task, and keeps
//! a bounded history of outcomes that the status endpoints read.

pub mod command;
pub mod spawner;

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::LauncherConfig;
pub use command::{LaunchCommand, LaunchRequest};
pub use spawner::{ProcessSpawner, TokioSpawner};

/// Launch errors
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for editor: {0}")]
    Wait(#[source] std::io::Error),

    #[error("editor exited with {}{}", exit_code(.code), stderr_suffix(.stderr))]
    Exited { code: Option<i32>, stderr: String },

    #[error("launch queue is full")]
    QueueFull,

    #[error("launch worker is not running")]
    WorkerStopped,
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

/// One launch and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct LaunchRecord {
    pub id: Uuid,
    pub path: String,
    pub command: String,
    pub status: LaunchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

struct LaunchTask {
    id: Uuid,
    command: LaunchCommand,
}

type History = Arc<RwLock<VecDeque<LaunchRecord>>>;

/// Handle to the launch worker
#[derive(Clone)]
pub struct Launcher {
    config: LauncherConfig,
    tx: mpsc::Sender<LaunchTask>,
    history: History,
}

impl Launcher {
    /// Start the worker on the current tokio runtime.
    pub fn start(config: LauncherConfig, spawner: Arc<dyn ProcessSpawner>) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let history: History = Arc::new(RwLock::new(VecDeque::with_capacity(config.history_size)));

        tokio::spawn(run_worker(rx, spawner, history.clone()));
        info!(editor = %config.editor, "Launch worker started");

        Self { config, tx, history }
    }

    /// Queue a launch of the editor at `path`.
    pub async fn submit(&self, path: &str) -> Result<Uuid, LaunchError> {
        // Claim a queue slot first so a rejected launch never touches history
        let permit = self.tx.try_reserve().map_err(|e| {
            let err = match e {
                mpsc::error::TrySendError::Full(()) => LaunchError::QueueFull,
                mpsc::error::TrySendError::Closed(()) => LaunchError::WorkerStopped,
            };
            warn!(path, error = %err, "Launch rejected");
            err
        })?;

        let command = LaunchCommand::for_path(&self.config, path);
        let id = Uuid::new_v4();

        let record = LaunchRecord {
            id,
            path: path.to_string(),
            command: command.display(),
            status: LaunchStatus::Queued,
            error: None,
            requested_at: Utc::now(),
            finished_at: None,
        };

        // Record before sending so the worker always finds it
        {
            let mut history = self.history.write().await;
            history.push_back(record);
            while history.len() > self.config.history_size.max(1) {
                history.pop_front();
            }
        }

        permit.send(LaunchTask { id, command });
        info!(launch_id = %id, path, "Launch queued");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Option<LaunchRecord> {
        let history = self.history.read().await;
        history.iter().find(|r| r.id == id).cloned()
    }

    /// Most recent launches first
    pub async fn recent(&self, count: usize) -> Vec<LaunchRecord> {
        let history = self.history.read().await;
        history.iter().rev().take(count).cloned().collect()
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<LaunchTask>,
    spawner: Arc<dyn ProcessSpawner>,
    history: History,
) {
    while let Some(task) = rx.recv().await {
        // Editors may stay attached for a long time; never block the queue on one
        tokio::spawn(run_launch(task, spawner.clone(), history.clone()));
    }
    info!("Launch worker stopped");
}

async fn run_launch(task: LaunchTask, spawner: Arc<dyn ProcessSpawner>, history: History) {
    update(&history, task.id, |r| r.status = LaunchStatus::Running).await;

    let result = spawner.run(&task.command).await;

    match &result {
        Ok(()) => info!(launch_id = %task.id, command = %task.command.display(), "Launch succeeded"),
        Err(e) => error!(
            launch_id = %task.id,
            command = %task.command.display(),
            error = %e,
            "Launch failed"
        ),
    }

    update(&history, task.id, |r| {
        r.finished_at = Some(Utc::now());
        match result {
            Ok(()) => r.status = LaunchStatus::Succeeded,
            Err(e) => {
                r.status = LaunchStatus::Failed;
                r.error = Some(e.to_string());
            }
        }
    })
    .await;
}

async fn update(history: &History, id: Uuid, f: impl FnOnce(&mut LaunchRecord)) {
    let mut history = history.write().await;
    if let Some(record) = history.iter_mut().find(|r| r.id == id) {
        f(record);
    }
}
