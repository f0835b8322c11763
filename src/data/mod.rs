//! Migration program dataset — project metadata, modules, and legacy systems.
//!
//! The dataset is loaded once per process and then shared read-only by every
//! view. Two sources are supported:
//! - **Built-in sample** — the fixture in [`sample`], used when no path is set
//! - **JSON fixture file** — camelCase keys, selected via `--data`,
//!   `general.data_path`, or `WARDROOM_DATA`

pub mod sample;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Coarse health classification shared by modules and legacy systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    OnTrack,
    Warning,
    Critical,
    /// Any fixture value outside the three known statuses.
    #[serde(other)]
    Unknown,
}

impl Status {
    /// The wire form: `"on-track"`, `"warning"`, `"critical"`, `"unknown"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    /// Display label with the hyphen replaced by a space (`"on track"`).
    pub fn label(&self) -> String {
        self.as_str().replacen('-', " ", 1)
    }

    /// Parse a known status. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "on-track" | "on_track" | "ontrack" => Some(Self::OnTrack),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Program-level metadata shown in the header and the summary cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub total_budget: f64,
    /// Not enforced to be `<= total_budget`.
    pub budget_consumed: f64,
    pub overall_completion: u32,
    pub go_live_date: NaiveDate,
    pub last_updated: DateTime<Utc>,
}

/// A functional area of the system being migrated (e.g. Finance).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub name: String,
    pub budget: f64,
    pub status: Status,
    pub completion: u32,
    pub system_count: u32,
    pub owner: String,
    pub critical_risks: u32,
}

/// An individual system slated for decommission. Belongs to one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySystem {
    pub id: u32,
    pub name: String,
    pub owner: String,
    /// Foreign key into [`Module::id`].
    pub module: String,
    pub region: String,
    pub decommission_date: NaiveDate,
    pub progress: u32,
    pub status: Status,
    pub issues_open: u32,
}

/// Everything the dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub project: ProjectMetadata,
    pub modules: Vec<Module>,
    pub systems: Vec<LegacySystem>,
}

impl Dataset {
    /// Referential-integrity problems worth surfacing to the operator.
    ///
    /// None of these stop rendering: dangling module references display the
    /// raw id, duplicates render as separate rows/cells.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut module_ids: HashSet<&str> = HashSet::new();
        for module in &self.modules {
            if !module_ids.insert(module.id.as_str()) {
                warnings.push(format!("duplicate module id '{}'", module.id));
            }
        }

        let mut system_ids: HashSet<u32> = HashSet::new();
        for system in &self.systems {
            if !system_ids.insert(system.id) {
                warnings.push(format!("duplicate system id {}", system.id));
            }
            if !module_ids.contains(system.module.as_str()) {
                warnings.push(format!(
                    "system {} ('{}') references unknown module '{}'",
                    system.id, system.name, system.module
                ));
            }
        }

        if self.project.total_budget <= 0.0 {
            warnings.push(
                "total budget is zero or negative; budget percentage shows 0.0".to_string(),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the dataset from a JSON fixture, or the built-in sample when `path`
/// is `None`.
pub fn load(path: Option<&Path>) -> Result<Dataset> {
    match path {
        None => Ok(sample::dataset()),
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset file {}", path.display()))?;
            parse_json(&content)
                .with_context(|| format!("invalid dataset file {}", path.display()))
        }
    }
}

/// Parse a dataset from JSON text.
pub fn parse_json(content: &str) -> Result<Dataset> {
    serde_json::from_str(content).context("failed to parse dataset JSON")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
