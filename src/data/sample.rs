//! Built-in sample fixture for an S/4HANA migration program.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::{Dataset, LegacySystem, Module, ProjectMetadata, Status};

/// The complete built-in dataset.
pub fn dataset() -> Dataset {
    Dataset {
        project: project(),
        modules: modules(),
        systems: systems(),
    }
}

fn project() -> ProjectMetadata {
    ProjectMetadata {
        total_budget: 12_500_000.0,
        budget_consumed: 9_850_000.0,
        overall_completion: 64,
        go_live_date: date(2027, 2, 1),
        last_updated: timestamp(2026, 10, 15, 14, 30),
    }
}

fn modules() -> Vec<Module> {
    vec![
        module("fi", "Finance (FI)", 2_800_000.0, Status::Warning, 62, 4, "Sarah Chen", 2),
        module("co", "Controlling (CO)", 1_200_000.0, Status::OnTrack, 78, 2, "Michael Torres", 0),
        module("mm", "Materials Management (MM)", 2_100_000.0, Status::Critical, 41, 3, "David Kim", 4),
        module("sd", "Sales & Distribution (SD)", 1_900_000.0, Status::OnTrack, 71, 3, "Emily Watson", 0),
        module("pp", "Production Planning (PP)", 1_600_000.0, Status::Warning, 55, 2, "James Miller", 1),
        module("hcm", "Human Capital (HCM)", 900_000.0, Status::OnTrack, 84, 2, "Lisa Park", 0),
        module("wm", "Warehouse Management (WM)", 750_000.0, Status::Critical, 38, 1, "Robert Singh", 3),
        module("qm", "Quality Management (QM)", 450_000.0, Status::OnTrack, 90, 1, "Anna Kowalski", 0),
    ]
}

fn systems() -> Vec<LegacySystem> {
    vec![
        system(1, "Oracle GL 11i", "Finance Shared Services", "fi", "North America", date(2027, 1, 15), 72, Status::Warning, 7),
        system(2, "Hyperion Consolidation", "Group Reporting", "fi", "EMEA", date(2027, 2, 28), 48, Status::Critical, 14),
        system(3, "AP Invoice Scanner", "Finance Shared Services", "fi", "APAC", date(2026, 12, 10), 91, Status::OnTrack, 2),
        system(4, "Treasury Workstation", "Corporate Treasury", "fi", "EMEA", date(2027, 3, 31), 65, Status::Warning, 6),
        system(5, "Cost Center Planner", "Controlling Office", "co", "North America", date(2026, 11, 30), 88, Status::OnTrack, 1),
        system(6, "Profitability Cube", "Controlling Office", "co", "EMEA", date(2027, 1, 31), 76, Status::OnTrack, 4),
        system(7, "Legacy MRP II", "Supply Chain Ops", "mm", "North America", date(2027, 4, 30), 35, Status::Critical, 18),
        system(8, "Vendor Master Hub", "Procurement", "mm", "LATAM", date(2027, 2, 15), 52, Status::Critical, 11),
        system(9, "Purchase Req Portal", "Procurement", "mm", "APAC", date(2026, 12, 20), 81, Status::OnTrack, 3),
        system(10, "Siebel CRM Orders", "Sales Operations", "sd", "North America", date(2027, 1, 10), 69, Status::Warning, 8),
        system(11, "Pricing Engine", "Revenue Management", "sd", "EMEA", date(2026, 11, 15), 94, Status::OnTrack, 0),
        system(12, "Billing Gateway", "Sales Operations", "sd", "LATAM", date(2027, 2, 5), 74, Status::OnTrack, 5),
        system(13, "Shop Floor Control", "Manufacturing IT", "pp", "APAC", date(2027, 3, 15), 58, Status::Warning, 9),
        system(14, "Capacity Scheduler", "Manufacturing IT", "pp", "EMEA", date(2027, 2, 20), 61, Status::Warning, 6),
        system(15, "PeopleSoft HR", "HR Technology", "hcm", "North America", date(2026, 12, 31), 86, Status::OnTrack, 2),
        system(16, "Payroll Bridge", "HR Technology", "hcm", "EMEA", date(2027, 1, 20), 79, Status::OnTrack, 4),
        system(17, "Manhattan WMS", "Distribution Centers", "wm", "North America", date(2027, 4, 15), 38, Status::Critical, 13),
        system(18, "LIMS Quality Lab", "Quality Assurance", "qm", "EMEA", date(2026, 11, 5), 92, Status::OnTrack, 1),
    ]
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn module(
    id: &str,
    name: &str,
    budget: f64,
    status: Status,
    completion: u32,
    system_count: u32,
    owner: &str,
    critical_risks: u32,
) -> Module {
    Module {
        id: id.to_string(),
        name: name.to_string(),
        budget,
        status,
        completion,
        system_count,
        owner: owner.to_string(),
        critical_risks,
    }
}

#[allow(clippy::too_many_arguments)]
fn system(
    id: u32,
    name: &str,
    owner: &str,
    module: &str,
    region: &str,
    decommission_date: NaiveDate,
    progress: u32,
    status: Status,
    issues_open: u32,
) -> LegacySystem {
    LegacySystem {
        id,
        name: name.to_string(),
        owner: owner.to_string(),
        module: module.to_string(),
        region: region.to_string(),
        decommission_date,
        progress,
        status,
        issues_open,
    }
}

// Fixture dates are literals known to be valid.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_system_counts_match_systems() {
        let data = dataset();
        for module in &data.modules {
            let actual = data.systems.iter().filter(|s| s.module == module.id).count();
            assert_eq!(actual as u32, module.system_count, "module {}", module.id);
        }
    }

    #[test]
    fn system_ids_are_sequential() {
        let ids: Vec<u32> = systems().iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=18).collect::<Vec<_>>());
    }
}
