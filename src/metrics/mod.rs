//! Derived program metrics — budget consumption, days to go-live, risk counts.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::data::{Module, ProjectMetadata, Status};

/// Metrics computed from the project metadata and module list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Consumed / total × 100, one decimal place (e.g. `"85.0"`).
    pub budget_percentage: String,
    /// Whole days until go-live, truncated. Negative once go-live has passed.
    pub days_to_go_live: i64,
    pub critical_count: usize,
    pub warning_count: usize,
}

impl DerivedMetrics {
    /// The budget percentage as a number.
    pub fn budget_percentage_value(&self) -> f64 {
        self.budget_percentage.parse().unwrap_or(0.0)
    }
}

/// Compute metrics against an explicit clock.
pub fn derive(project: &ProjectMetadata, modules: &[Module], now: DateTime<Utc>) -> DerivedMetrics {
    DerivedMetrics {
        budget_percentage: budget_percentage(project.total_budget, project.budget_consumed),
        days_to_go_live: days_until(project, now),
        critical_count: count_status(modules, Status::Critical),
        warning_count: count_status(modules, Status::Warning),
    }
}

/// Compute metrics as of the current instant.
pub fn derive_now(project: &ProjectMetadata, modules: &[Module]) -> DerivedMetrics {
    derive(project, modules, Utc::now())
}

/// Budget consumption formatted to one decimal.
///
/// A zero, negative, or non-finite total yields `"0.0"`. Consumption above
/// the total is reported as-is (e.g. `"110.0"`).
pub fn budget_percentage(total_budget: f64, budget_consumed: f64) -> String {
    if !total_budget.is_finite() || total_budget <= 0.0 || !budget_consumed.is_finite() {
        return "0.0".to_string();
    }
    format!("{:.1}", budget_consumed / total_budget * 100.0)
}

/// Days from `now` to midnight UTC of the go-live date, truncated toward zero.
fn days_until(project: &ProjectMetadata, now: DateTime<Utc>) -> i64 {
    let go_live = project.go_live_date.and_time(NaiveTime::MIN).and_utc();
    (go_live - now).num_days()
}

fn count_status(modules: &[Module], status: Status) -> usize {
    modules.iter().filter(|m| m.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn project(total: f64, consumed: f64) -> ProjectMetadata {
        ProjectMetadata {
            total_budget: total,
            budget_consumed: consumed,
            overall_completion: 50,
            go_live_date: NaiveDate::from_ymd_opt(2027, 1, 31).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
        }
    }

    fn module_with(status: Status) -> Module {
        Module {
            id: status.as_str().to_string(),
            name: "Test".to_string(),
            budget: 100.0,
            status,
            completion: 10,
            system_count: 1,
            owner: "Owner".to_string(),
            critical_risks: 0,
        }
    }

    #[test]
    fn budget_percentage_one_decimal() {
        assert_eq!(budget_percentage(2_000_000.0, 1_700_000.0), "85.0");
        assert_eq!(budget_percentage(12_500_000.0, 9_850_000.0), "78.8");
        assert_eq!(budget_percentage(3.0, 1.0), "33.3");
    }

    #[test]
    fn zero_budget_is_zero_percent() {
        assert_eq!(budget_percentage(0.0, 500.0), "0.0");
        assert_eq!(budget_percentage(f64::NAN, 500.0), "0.0");
    }

    #[test]
    fn overspend_is_not_clamped() {
        assert_eq!(budget_percentage(1_000.0, 1_100.0), "110.0");
    }

    #[test]
    fn days_truncate_partial_days() {
        let p = project(1.0, 0.0);
        // 1.5 days before go-live midnight
        let now = Utc.with_ymd_and_hms(2027, 1, 29, 12, 0, 0).unwrap();
        assert_eq!(derive(&p, &[], now).days_to_go_live, 1);
    }

    #[test]
    fn days_negative_after_go_live() {
        let p = project(1.0, 0.0);
        let now = Utc.with_ymd_and_hms(2027, 2, 3, 0, 0, 0).unwrap();
        assert_eq!(derive(&p, &[], now).days_to_go_live, -3);
    }

    #[test]
    fn counts_statuses() {
        let modules = vec![
            module_with(Status::Critical),
            module_with(Status::Warning),
            module_with(Status::Warning),
            module_with(Status::Unknown),
        ];
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let m = derive(&project(1.0, 0.0), &modules, now);
        assert_eq!(m.critical_count, 1);
        assert_eq!(m.warning_count, 2);
    }

    #[test]
    fn percentage_value_parses_back() {
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let m = derive(&project(2_000_000.0, 1_700_000.0), &[], now);
        assert_eq!(m.budget_percentage_value(), 85.0);
    }
}
