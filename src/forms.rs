//! Quick log form state
//!
//! Holds the fields and submission state behind both the terminal quick log
//! and the `/quick-log` page script. Only the summary is cleared after a
//! successful save, so the same project and stage can be logged repeatedly.

use serde::Serialize;

use crate::models::Stage;

pub const DEFAULT_SCORE: i64 = 3;

/// Body sent to `POST /api/log`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogPayload {
    pub project: String,
    pub stage: Stage,
    pub summary: String,
    pub energy_level: i64,
    pub leverage_score: i64,
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Non-2xx answer, with the server's `error` text if it sent one
    Rejected(Option<String>),
    /// No answer at all
    RequestFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Success(text) | FormMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormMessage::Error(_))
    }
}

#[derive(Debug, Clone)]
pub struct QuickLogForm {
    pub project: String,
    pub stage: Stage,
    pub summary: String,
    pub energy_level: i64,
    pub leverage_score: i64,
    submitting: bool,
    message: Option<FormMessage>,
}

impl Default for QuickLogForm {
    fn default() -> Self {
        Self {
            project: String::new(),
            stage: Stage::Dev,
            summary: String::new(),
            energy_level: DEFAULT_SCORE,
            leverage_score: DEFAULT_SCORE,
            submitting: false,
            message: None,
        }
    }
}

impl QuickLogForm {
    /// A form with fixed project, stage and scores and an empty summary.
    pub fn new(project: impl Into<String>, stage: Stage, energy_level: i64, leverage_score: i64) -> Self {
        Self {
            project: project.into(),
            stage,
            energy_level,
            leverage_score,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Start a submission. Returns `None` while another one is in flight.
    pub fn begin_submit(&mut self) -> Option<LogPayload> {
        if self.submitting {
            return None;
        }
        self.message = None;
        self.submitting = true;

        Some(LogPayload {
            project: self.project.clone(),
            stage: self.stage,
            summary: self.summary.clone(),
            energy_level: self.energy_level,
            leverage_score: self.leverage_score,
        })
    }

    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        self.submitting = false;
        self.message = Some(match outcome {
            SubmitOutcome::Saved => {
                self.summary.clear();
                FormMessage::Success("Log saved.".to_string())
            }
            SubmitOutcome::Rejected(error) => FormMessage::Error(
                error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Failed to save log".to_string()),
            ),
            SubmitOutcome::RequestFailed => FormMessage::Error("Request failed.".to_string()),
        });
    }
}
