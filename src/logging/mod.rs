//! Activity log — one JSONL line per rendered view.
//!
//! Records which surface rendered which view with which parameters and how
//! many rows/cells it produced. Best-effort: failures are silently ignored so
//! logging can never break a command or a web request.
//!
//! Log file: `~/.wardroom/activity.jsonl` (see `[logging]` in the config).

use std::fs::{OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::WardroomConfig;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Parse a level name; unknown names mean `Info`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub level: Level,
    /// `"cli"` or `"web"`.
    pub surface: String,
    /// `"summary"`, `"modules"`, `"systems"`, `"shell"`, `"dataset"`, ...
    pub view: String,
    /// Free-form parameters (filters, sort, layout size).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
    /// Rows or cells produced.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub count: Option<usize>,
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Activity logger bound to the resolved `[logging]` settings.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    enabled: bool,
    threshold: Level,
    path: PathBuf,
}

impl ActivityLog {
    pub fn from_config(config: &WardroomConfig) -> Self {
        Self {
            enabled: config.logging.enabled,
            threshold: Level::parse(&config.logging.level),
            path: config.log_path(),
        }
    }

    /// A logger that records nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            threshold: Level::Error,
            path: PathBuf::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.enabled && level <= self.threshold
    }

    /// Record a rendered view at `Info`.
    pub fn view(&self, surface: &str, view: &str, detail: Option<String>, count: usize) {
        self.record(Level::Info, surface, view, detail, Some(count));
    }

    /// Record a warning; also echoed to stderr.
    pub fn warn(&self, surface: &str, view: &str, message: &str) {
        eprintln!("[wardroom] {message}");
        self.record(Level::Warn, surface, view, Some(message.to_string()), None);
    }

    pub fn record(
        &self,
        level: Level,
        surface: &str,
        view: &str,
        detail: Option<String>,
        count: Option<usize>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let entry = ActivityEntry {
            timestamp: Utc::now().to_rfc3339(),
            level,
            surface: surface.to_string(),
            view: view.to_string(),
            detail,
            count,
        };
        let _ = append_entry(&self.path, &entry);
    }
}

fn append_entry(path: &Path, entry: &ActivityEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Read all entries from a log file, skipping malformed lines.
pub fn read_entries(path: &Path) -> Vec<ActivityEntry> {
    let Ok(file) = std::fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wardroom-test-{}", std::process::id()))
            .join(name)
    }

    fn logger(path: PathBuf, level: Level) -> ActivityLog {
        ActivityLog {
            enabled: true,
            threshold: level,
            path,
        }
    }

    #[test]
    fn level_parsing() {
        assert_eq!(Level::parse("ERROR"), Level::Error);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse("debug"), Level::Debug);
        assert_eq!(Level::parse("chatty"), Level::Info);
    }

    #[test]
    fn writes_and_reads_entries() {
        let path = temp_log("roundtrip.jsonl");
        let _ = std::fs::remove_file(&path);

        let log = logger(path.clone(), Level::Info);
        log.view("cli", "systems", Some("status=critical".to_string()), 3);
        log.record(Level::Debug, "cli", "systems", None, None);

        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].view, "systems");
        assert_eq!(entries[0].count, Some(3));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn disabled_logger_writes_nothing() {
        let log = ActivityLog::disabled();
        assert!(!log.is_enabled(Level::Error));
        log.view("cli", "summary", None, 4);
        assert!(log.path().as_os_str().is_empty());
    }

    #[test]
    fn missing_file_reads_empty() {
        assert!(read_entries(Path::new("/nonexistent/wardroom/activity.jsonl")).is_empty());
    }
}
