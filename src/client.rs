//! Terminal quick log
//!
//! `builder-hub quick-log` keeps project, stage and scores fixed and posts one
//! summary per input line to a running hub.

use std::io::Write;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::forms::{LogPayload, QuickLogForm, SubmitOutcome};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP client setup failed: {0}")]
    Setup(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts log entries to a hub
pub struct LogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl LogClient {
    pub fn new(server: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/log", server.trim_end_matches('/')),
        })
    }

    pub async fn submit(&self, payload: &LogPayload) -> SubmitOutcome {
        let response = match self.http.post(&self.endpoint).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Log request failed");
                return SubmitOutcome::RequestFailed;
            }
        };

        if response.status().is_success() {
            return SubmitOutcome::Saved;
        }

        let error = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        SubmitOutcome::Rejected(error)
    }
}

/// Read summaries from `input` until EOF or `/quit`, submitting each one.
pub async fn run_interactive<R, W>(
    client: &LogClient,
    form: &mut QuickLogForm,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "Logging to {} [{}], energy {}, leverage {}. One summary per line, /quit to stop.",
        form.project, form.stage, form.energy_level, form.leverage_score
    )?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        form.summary = line.to_string();
        let Some(payload) = form.begin_submit() else {
            continue;
        };
        let outcome = client.submit(&payload).await;
        form.finish_submit(outcome);

        if let Some(message) = form.message() {
            let prefix = if message.is_error() { "error" } else { "ok" };
            writeln!(out, "{}: {}", prefix, message.text())?;
        }
    }

    Ok(())
}
