/// End-to-end dashboard tests: dataset JSON in, rendered views out.
use chrono::{TimeZone, Utc};

use wardroom::data::{self, Status};
use wardroom::heatmap::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wardroom::inventory::{self, InventoryState};
use wardroom::shell;
use wardroom::style::Tone;

const SINGLE_SYSTEM: &str = r#"{
  "project": {
    "totalBudget": 1000000,
    "budgetConsumed": 400000,
    "overallCompletion": 40,
    "goLiveDate": "2027-02-01",
    "lastUpdated": "2026-10-15T14:30:00Z"
  },
  "modules": [
    {
      "id": "fi",
      "name": "Finance (FI)",
      "budget": 1000000,
      "status": "critical",
      "completion": 40,
      "systemCount": 1,
      "owner": "Sarah Chen",
      "criticalRisks": 2
    }
  ],
  "systems": [
    {
      "id": 1,
      "name": "Legacy GL",
      "owner": "Finance Team",
      "module": "fi",
      "region": "EMEA",
      "decommissionDate": "2027-01-15",
      "progress": 40,
      "status": "critical",
      "issuesOpen": 12
    }
  ]
}"#;

#[test]
fn single_critical_system_renders_one_red_row() {
    let data = data::parse_json(SINGLE_SYSTEM).unwrap();
    let view = inventory::build_view(&data.modules, &data.systems, &InventoryState::default());

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.empty_message, None);

    let row = &view.rows[0];
    assert_eq!(row.name, "Legacy GL");
    assert_eq!(row.owner, "Finance Team");
    assert_eq!(row.module, "FI");
    assert_eq!(row.issues.count, 12);
    assert_eq!(row.issues.tone, Tone::Red);
    assert_eq!(row.status.text, "CRITICAL");
    assert_eq!(row.status.tone, Tone::Red);
    assert_eq!(row.progress.value, 40);
    assert_eq!(row.progress.tone, Tone::Red);
}

#[test]
fn composed_dashboard_from_json() {
    let data = data::parse_json(SINGLE_SYSTEM).unwrap();
    let now = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
    let dash = shell::compose(
        &data,
        now,
        (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        &InventoryState::default(),
    );

    assert_eq!(dash.metrics.budget_percentage, "40.0");
    assert_eq!(dash.metrics.days_to_go_live, 31);
    assert_eq!(dash.metrics.critical_count, 1);
    assert_eq!(dash.heatmap.cells.len(), 1);
    assert_eq!(dash.heatmap.cells[0].rect.area(), DEFAULT_WIDTH * DEFAULT_HEIGHT);
    assert_eq!(dash.inventory.count_label(), "Showing 1 of 1 systems");
}

#[test]
fn unresolved_module_falls_back_to_uppercased_id() {
    let json = SINGLE_SYSTEM.replace("\"module\": \"fi\"", "\"module\": \"xx\"");
    let data = data::parse_json(&json).unwrap();
    let view = inventory::build_view(&data.modules, &data.systems, &InventoryState::default());
    assert_eq!(view.rows[0].module, "XX");
    assert!(!data.integrity_warnings().is_empty());
}

#[test]
fn unknown_status_is_tolerated() {
    let json = SINGLE_SYSTEM.replace("\"status\": \"critical\",\n      \"issuesOpen\"", "\"status\": \"paused\",\n      \"issuesOpen\"");
    let data = data::parse_json(&json).unwrap();
    assert_eq!(data.systems[0].status, Status::Unknown);
    let view = inventory::build_view(&data.modules, &data.systems, &InventoryState::default());
    assert_eq!(view.rows[0].status.tone, Tone::Slate);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(data::parse_json("{ not json").is_err());
}
