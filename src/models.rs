//! Domain types shared by the API, the views and storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

//=============================================================================
// BUILD LOGS
//=============================================================================

/// Stage of work a journal entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Planning,
    #[default]
    Dev,
    Experiment,
    Deploy,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Planning, Stage::Dev, Stage::Experiment, Stage::Deploy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Planning => "planning",
            Stage::Dev => "dev",
            Stage::Experiment => "experiment",
            Stage::Deploy => "deploy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Planning => "Planning",
            Stage::Dev => "Dev",
            Stage::Experiment => "Experiment",
            Stage::Deploy => "Deploy",
        }
    }

    /// Exact, case-sensitive match against the stage names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == s)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated journal entry, ready to insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBuildLog {
    pub project: String,
    pub stage: Stage,
    pub summary: String,
    pub energy_level: Option<u8>,
    pub leverage_score: Option<u8>,
}

/// A persisted journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildLogEntry {
    pub id: i64,
    pub project: String,
    pub stage: Stage,
    pub summary: String,
    pub energy_level: Option<u8>,
    pub leverage_score: Option<u8>,
    pub created_at: DateTime<Utc>,
}

//=============================================================================
// PROJECTS
//=============================================================================

/// A tracked project, owned by whatever tool writes the `projects` table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub laptop_path: Option<String>,
    pub desktop_path: Option<String>,
    pub doc_url: Option<String>,
}

impl Project {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// The doc URL, only if it can be embedded or copied
    pub fn embeddable_doc_url(&self) -> Option<&str> {
        self.doc_url.as_deref().filter(|url| url.starts_with("http"))
    }
}

/// Width of a progress bar in percent, clamped to [0, 100].
pub fn progress_width(progress: Option<f64>) -> f64 {
    match progress {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
        Some(p) if p == f64::INFINITY => 100.0,
        _ => 0.0,
    }
}

//=============================================================================
// DEVICE
//=============================================================================

/// Which of a project's two paths this machine prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    Laptop,
    #[default]
    Desktop,
}

impl From<String> for DeviceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for DeviceType {
    fn from(value: &str) -> Self {
        if value == "laptop" {
            DeviceType::Laptop
        } else {
            DeviceType::Desktop
        }
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for DeviceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Laptop => "laptop",
            DeviceType::Desktop => "desktop",
        }
    }
}

/// Pick the path to open for `project` on this device.
///
/// Laptops prefer `laptop_path` and fall back to `desktop_path`; every other
/// device does the reverse. Blank paths count as missing.
pub fn resolve_launch_path(project: &Project, device: DeviceType) -> Option<&str> {
    let laptop = non_blank(project.laptop_path.as_deref());
    let desktop = non_blank(project.desktop_path.as_deref());
    match device {
        DeviceType::Laptop => laptop.or(desktop),
        DeviceType::Desktop => desktop.or(laptop),
    }
}

fn non_blank(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.trim().is_empty())
}
