//! Build log intake validation
//!
//! Turns a raw `POST /api/log` body into a [`NewBuildLog`] or the first
//! [`ValidationError`] it hits. Checks run in a fixed order: body, project,
//! stage, summary. Scores never fail validation; anything that is not an
//! integer in 1..=5 is stored as NULL.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::{NewBuildLog, Stage};

pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 5;

/// Wire shape of a log submission. Fields stay untyped so a wrong type is
/// reported as the matching validation message rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct LogRequest {
    #[serde(default)]
    pub project: Option<Value>,
    #[serde(default)]
    pub stage: Option<Value>,
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub energy_level: Option<Value>,
    #[serde(default)]
    pub leverage_score: Option<Value>,
}

impl LogRequest {
    /// Parse a request body. Unparseable JSON and `null` are invalid bodies;
    /// any other non-object value carries no fields at all.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| ValidationError::InvalidBody)
            }
            Ok(Value::Null) | Err(_) => Err(ValidationError::InvalidBody),
            Ok(_) => Ok(Self::default()),
        }
    }
}

impl TryFrom<LogRequest> for NewBuildLog {
    type Error = ValidationError;

    fn try_from(req: LogRequest) -> Result<Self, Self::Error> {
        let project = trimmed_string(req.project.as_ref()).ok_or(ValidationError::ProjectRequired)?;

        let stage = req
            .stage
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Stage::parse)
            .ok_or(ValidationError::InvalidStage)?;

        let summary = trimmed_string(req.summary.as_ref()).ok_or(ValidationError::SummaryRequired)?;

        Ok(NewBuildLog {
            project,
            stage,
            summary,
            energy_level: score(req.energy_level.as_ref()),
            leverage_score: score(req.leverage_score.as_ref()),
        })
    }
}

/// Parse and validate in one step.
pub fn validate_body(body: &[u8]) -> Result<NewBuildLog, ValidationError> {
    NewBuildLog::try_from(LogRequest::from_body(body)?)
}

fn trimmed_string(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Coerce a score to an integer in range, or `None`.
pub fn score(value: Option<&Value>) -> Option<u8> {
    let n = value?.as_f64()?;
    if n.fract() != 0.0 || n < f64::from(SCORE_MIN) || n > f64::from(SCORE_MAX) {
        return None;
    }
    Some(n as u8)
}
