//! Legacy systems inventory — search, filter, and sort over the system list.
//!
//! All view state lives in an immutable [`InventoryState`]; [`filter_and_sort`]
//! and [`build_view`] are pure functions of the dataset and that state, so
//! every interaction simply recomputes the view.

use std::cmp::Ordering;

use serde::Serialize;

use crate::data::{LegacySystem, Module, Status};
use crate::style::{self, Badge, Tone};
use crate::utils::format::short_date;

/// Message rendered in place of rows when nothing matches.
pub const EMPTY_MESSAGE: &str = "No systems found matching your filters.";

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Status dropdown selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Parse `"all"` or a known status; anything else falls back to `All`.
    pub fn from_str_opt(s: Option<&str>) -> Self {
        s.and_then(Status::parse).map_or(Self::All, Self::Only)
    }

    pub fn matches(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

/// Module dropdown selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModuleFilter {
    #[default]
    All,
    Only(String),
}

impl ModuleFilter {
    /// Parse `"all"` (or nothing) as `All`, anything else as a module id.
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            None | Some("") | Some("all") => Self::All,
            Some(id) => Self::Only(id.to_string()),
        }
    }

    pub fn matches(&self, module_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == module_id,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(id) => id,
        }
    }
}

/// Sortable table columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    DecommissionDate,
    #[default]
    Progress,
    IssuesOpen,
}

impl SortKey {
    /// Accepts camelCase, kebab-case, and snake_case column names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Some(Self::Name),
            "decommissiondate" => Some(Self::DecommissionDate),
            "progress" => Some(Self::Progress),
            "issuesopen" | "issues" => Some(Self::IssuesOpen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DecommissionDate => "decommissionDate",
            Self::Progress => "progress",
            Self::IssuesOpen => "issuesOpen",
        }
    }

    fn compare(&self, a: &LegacySystem, b: &LegacySystem) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::DecommissionDate => a.decommission_date.cmp(&b.decommission_date),
            Self::Progress => a.progress.cmp(&b.progress),
            Self::IssuesOpen => a.issues_open.cmp(&b.issues_open),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some(d) if d.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Apply a click on a column's sort control: the active column flips
    /// direction, any other column becomes active ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Everything the inventory view needs besides the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryState {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub module_filter: ModuleFilter,
    pub sort: SortConfig,
}

impl InventoryState {
    /// Whether `system` passes the search, status, and module filters.
    pub fn matches(&self, system: &LegacySystem) -> bool {
        matches_search(system, &self.search_term)
            && self.status_filter.matches(system.status)
            && self.module_filter.matches(&system.module)
    }
}

fn matches_search(system: &LegacySystem, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    system.name.to_lowercase().contains(&needle) || system.owner.to_lowercase().contains(&needle)
}

// ---------------------------------------------------------------------------
// Filter + sort
// ---------------------------------------------------------------------------

/// Systems passing the filters, ordered by the active sort.
///
/// The sort is stable and has no secondary key: systems with equal keys keep
/// their source order in both directions.
pub fn filter_and_sort<'a>(systems: &'a [LegacySystem], state: &InventoryState) -> Vec<&'a LegacySystem> {
    let mut filtered: Vec<&LegacySystem> = systems.iter().filter(|s| state.matches(s)).collect();

    let SortConfig { key, direction } = state.sort;
    filtered.sort_by(|a, b| match direction {
        SortDirection::Asc => key.compare(a, b),
        SortDirection::Desc => key.compare(b, a),
    });

    filtered
}

/// Module ids for the filter dropdown: de-duplicated, first-seen order.
pub fn module_ids(modules: &[Module]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for module in modules {
        if !ids.contains(&module.id.as_str()) {
            ids.push(&module.id);
        }
    }
    ids
}

/// Display label for a module id: the parenthetical code of the module name
/// (`"Finance (FI)"` → `"FI"`), else the whole name, else the id uppercased
/// when no module matches.
pub fn module_display_name(modules: &[Module], module_id: &str) -> String {
    match modules.iter().find(|m| m.id == module_id) {
        Some(module) => module
            .name
            .split('(')
            .nth(1)
            .map(|rest| rest.replacen(')', "", 1))
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| module.name.clone()),
        None => module_id.to_uppercase(),
    }
}

// ---------------------------------------------------------------------------
// Rendered view
// ---------------------------------------------------------------------------

/// A module dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOption {
    pub id: String,
    pub label: String,
}

/// Progress cell: bar plus numeric label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressCell {
    pub value: u32,
    /// Bar width in percent, clamped to 100.
    pub width: u32,
    pub tone: Tone,
}

/// Issues cell: count colored by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesCell {
    pub count: u32,
    pub tone: Tone,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub id: u32,
    pub name: String,
    pub region: String,
    pub owner: String,
    pub module: String,
    pub decommission_date: String,
    pub progress: ProgressCell,
    pub status: Badge,
    pub issues: IssuesCell,
}

impl InventoryRow {
    pub fn from_system(system: &LegacySystem, modules: &[Module]) -> Self {
        Self {
            id: system.id,
            name: system.name.clone(),
            region: system.region.clone(),
            owner: system.owner.clone(),
            module: module_display_name(modules, &system.module),
            decommission_date: short_date(system.decommission_date),
            progress: ProgressCell {
                value: system.progress,
                width: system.progress.min(100),
                tone: style::progress_tone(system.progress),
            },
            status: style::status_badge(system.status),
            issues: IssuesCell {
                count: system.issues_open,
                tone: style::issues_tone(system.issues_open),
            },
        }
    }
}

/// The full inventory view for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryView {
    pub module_options: Vec<ModuleOption>,
    pub rows: Vec<InventoryRow>,
    pub shown: usize,
    pub total: usize,
    /// Set when no rows match.
    pub empty_message: Option<&'static str>,
}

impl InventoryView {
    /// `"Showing N of M systems"`.
    pub fn count_label(&self) -> String {
        format!("Showing {} of {} systems", self.shown, self.total)
    }
}

/// Compute the rendered inventory for `state`.
pub fn build_view(modules: &[Module], systems: &[LegacySystem], state: &InventoryState) -> InventoryView {
    let rows: Vec<InventoryRow> = filter_and_sort(systems, state)
        .into_iter()
        .map(|s| InventoryRow::from_system(s, modules))
        .collect();

    let module_options = module_ids(modules)
        .into_iter()
        .map(|id| ModuleOption {
            id: id.to_string(),
            label: module_display_name(modules, id),
        })
        .collect();

    InventoryView {
        module_options,
        shown: rows.len(),
        total: systems.len(),
        empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
        rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
