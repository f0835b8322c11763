//! Color and threshold lookup tables shared by every view.
//!
//! Each view maps a domain value (status, progress, issue count, KPI value)
//! to a [`Tone`], and each tone resolves to a style descriptor usable by both
//! the terminal renderer (ANSI color) and the web frontend (CSS hex).

use colored::{Color, ColoredString, Colorize};
use serde::Serialize;

use crate::data::Status;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Budget consumption above this percentage switches to the warning palette.
pub const BUDGET_WARNING_PCT: f64 = 85.0;
/// Fewer remaining days than this switches go-live to the warning palette.
pub const GO_LIVE_WARNING_DAYS: i64 = 60;
/// Progress at or above this is healthy.
pub const PROGRESS_HEALTHY: u32 = 80;
/// Progress at or above this (and below healthy) is a warning.
pub const PROGRESS_WARNING: u32 = 60;
/// More open issues than this is critical.
pub const ISSUES_CRITICAL: u32 = 10;
/// More open issues than this (and not critical) is a warning.
pub const ISSUES_WARNING: u32 = 5;

// ---------------------------------------------------------------------------
// Tones
// ---------------------------------------------------------------------------

/// Accent palette used throughout the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Emerald,
    Amber,
    Red,
    Blue,
    Slate,
}

impl Tone {
    /// CSS hex color (the 500 shade).
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Emerald => "#10b981",
            Self::Amber => "#f59e0b",
            Self::Red => "#ef4444",
            Self::Blue => "#3b82f6",
            Self::Slate => "#64748b",
        }
    }

    /// Closest ANSI terminal color.
    pub fn ansi(&self) -> Color {
        match self {
            Self::Emerald => Color::Green,
            Self::Amber => Color::Yellow,
            Self::Red => Color::Red,
            Self::Blue => Color::Blue,
            Self::Slate => Color::BrightBlack,
        }
    }

    /// Paint text in this tone for terminal output.
    pub fn paint(&self, text: &str) -> ColoredString {
        text.color(self.ansi())
    }
}

/// Status → tone. Unknown statuses render neutral.
pub fn status_tone(status: Status) -> Tone {
    match status {
        Status::Critical => Tone::Red,
        Status::Warning => Tone::Amber,
        Status::OnTrack => Tone::Emerald,
        Status::Unknown => Tone::Slate,
    }
}

/// Progress bar fill for a legacy system: `>= 80` emerald, `>= 60` amber,
/// else red.
pub fn progress_tone(progress: u32) -> Tone {
    if progress >= PROGRESS_HEALTHY {
        Tone::Emerald
    } else if progress >= PROGRESS_WARNING {
        Tone::Amber
    } else {
        Tone::Red
    }
}

/// Open-issue count color: `> 10` red, `> 5` amber, else emerald.
pub fn issues_tone(issues_open: u32) -> Tone {
    if issues_open > ISSUES_CRITICAL {
        Tone::Red
    } else if issues_open > ISSUES_WARNING {
        Tone::Amber
    } else {
        Tone::Emerald
    }
}

/// KPI progress bar fill: amber above 85%, else emerald.
pub fn kpi_bar_tone(percentage: f64) -> Tone {
    if percentage > BUDGET_WARNING_PCT {
        Tone::Amber
    } else {
        Tone::Emerald
    }
}

// ---------------------------------------------------------------------------
// Status badge
// ---------------------------------------------------------------------------

/// Descriptor for a rounded status pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Uppercased, hyphen-free text (e.g. `"ON TRACK"`).
    pub text: String,
    pub tone: Tone,
    pub text_color: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

/// Build the badge for a status.
pub fn status_badge(status: Status) -> Badge {
    let (text_color, background, border) = match status {
        Status::Critical => ("#f87171", "rgba(239,68,68,0.10)", "rgba(239,68,68,0.30)"),
        Status::Warning => ("#fbbf24", "rgba(245,158,11,0.10)", "rgba(245,158,11,0.30)"),
        Status::OnTrack => ("#34d399", "rgba(16,185,129,0.10)", "rgba(16,185,129,0.30)"),
        Status::Unknown => ("#94a3b8", "rgba(100,116,139,0.10)", "rgba(100,116,139,0.30)"),
    };

    Badge {
        text: status.label().to_uppercase(),
        tone: status_tone(status),
        text_color,
        background,
        border,
    }
}
