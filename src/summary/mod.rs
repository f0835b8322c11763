//! Executive summary — the four KPI cards at the top of the dashboard.

use serde::Serialize;

use crate::data::ProjectMetadata;
use crate::metrics::DerivedMetrics;
use crate::style::{self, Tone};
use crate::utils::format::{millions, short_date};

/// A single KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
    /// Accent for the value icon and percentage label.
    pub tone: Tone,
    /// Present only for cards that show a progress bar.
    pub bar: Option<ProgressBar>,
}

/// A KPI progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBar {
    /// The value as reported (may exceed 100).
    pub percentage: f64,
    /// Rendered width in percent, clamped to 100.
    pub width: f64,
    pub tone: Tone,
}

impl ProgressBar {
    fn new(percentage: f64) -> Self {
        Self {
            percentage,
            width: percentage.clamp(0.0, 100.0),
            tone: style::kpi_bar_tone(percentage),
        }
    }
}

/// Build the four cards: budget, completion, go-live, critical risks.
pub fn build_cards(project: &ProjectMetadata, metrics: &DerivedMetrics) -> Vec<KpiCard> {
    let budget_pct = metrics.budget_percentage_value();

    vec![
        KpiCard {
            title: "Budget Consumed",
            value: millions(project.budget_consumed),
            subtitle: format!("of {}", millions(project.total_budget)),
            tone: if budget_pct > style::BUDGET_WARNING_PCT {
                Tone::Amber
            } else {
                Tone::Emerald
            },
            bar: Some(ProgressBar::new(budget_pct)),
        },
        KpiCard {
            title: "Overall Completion",
            value: format!("{}%", project.overall_completion),
            subtitle: "Systems migrated".to_string(),
            tone: Tone::Emerald,
            bar: Some(ProgressBar::new(f64::from(project.overall_completion))),
        },
        KpiCard {
            title: "Days to Go-Live",
            value: metrics.days_to_go_live.to_string(),
            subtitle: short_date(project.go_live_date),
            tone: if metrics.days_to_go_live < style::GO_LIVE_WARNING_DAYS {
                Tone::Amber
            } else {
                Tone::Blue
            },
            bar: None,
        },
        KpiCard {
            title: "Critical Risks",
            value: metrics.critical_count.to_string(),
            subtitle: format!("{} warnings", metrics.warning_count),
            tone: if metrics.critical_count > 0 {
                Tone::Red
            } else {
                Tone::Emerald
            },
            bar: None,
        },
    ]
}
