//! Dashboard shell — header, navigation chrome, and composition of the views.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::data::Dataset;
use crate::heatmap::{self, Heatmap};
use crate::inventory::{self, InventoryState, InventoryView};
use crate::metrics::{self, DerivedMetrics};
use crate::summary::{self, KpiCard};
use crate::utils::format::month_day_time;

pub const TITLE: &str = "S/4HANA Migration Command Center";
pub const SUBTITLE: &str = "Real-time monitoring and executive oversight";
pub const PRODUCT: &str = "S/4HANA";
pub const FOOTER: &str = "Migration War Room v1.0";

/// A sidebar navigation entry. Only the dashboard entry is ever active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Sidebar navigation entries in display order.
pub fn nav_items() -> Vec<NavItem> {
    [
        ("Dashboard", "dashboard"),
        ("Systems", "database"),
        ("Risks", "alert"),
        ("Analytics", "chart"),
        ("Settings", "settings"),
    ]
    .into_iter()
    .map(|(label, icon)| NavItem {
        label,
        icon,
        active: label == "Dashboard",
    })
    .collect()
}

/// Collapsible sidebar. Starts collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub collapsed: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self { collapsed: true }
    }
}

impl Sidebar {
    pub fn toggled(self) -> Self {
        Self {
            collapsed: !self.collapsed,
        }
    }

    /// Nav labels render only when expanded; collapsed items show a tooltip
    /// title instead.
    pub fn shows_labels(&self) -> bool {
        !self.collapsed
    }
}

/// Header and navigation content.
#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub product: &'static str,
    pub footer: &'static str,
    pub last_updated: String,
    pub user: &'static str,
    pub role: &'static str,
    pub sidebar: Sidebar,
    pub nav: Vec<NavItem>,
}

/// Build the shell with the last-updated stamp shown in local time.
pub fn build(last_updated: &DateTime<Utc>) -> ShellView {
    ShellView {
        title: TITLE,
        subtitle: SUBTITLE,
        product: PRODUCT,
        footer: FOOTER,
        last_updated: month_day_time(&last_updated.with_timezone(&Local)),
        user: "Executive View",
        role: "Admin",
        sidebar: Sidebar::default(),
        nav: nav_items(),
    }
}

/// The whole dashboard: shell plus the three independently computed views.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub shell: ShellView,
    pub metrics: DerivedMetrics,
    pub cards: Vec<KpiCard>,
    pub heatmap: Heatmap,
    pub inventory: InventoryView,
}

/// Compose every view from the dataset.
pub fn compose(
    data: &Dataset,
    now: DateTime<Utc>,
    layout: (f64, f64),
    state: &InventoryState,
) -> Dashboard {
    let metrics = metrics::derive(&data.project, &data.modules, now);
    let cards = summary::build_cards(&data.project, &metrics);

    Dashboard {
        shell: build(&data.project.last_updated),
        cards,
        metrics,
        heatmap: heatmap::build(&data.modules, layout.0, layout.1),
        inventory: inventory::build_view(&data.modules, &data.systems, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dashboard_is_active() {
        let nav = nav_items();
        assert_eq!(nav.len(), 5);
        assert_eq!(nav.iter().filter(|n| n.active).count(), 1);
        assert!(nav[0].active);
        assert_eq!(nav[0].label, "Dashboard");
    }

    #[test]
    fn sidebar_starts_collapsed_and_toggles() {
        let sidebar = Sidebar::default();
        assert!(sidebar.collapsed);
        assert!(!sidebar.shows_labels());
        assert!(sidebar.toggled().shows_labels());
        assert_eq!(sidebar.toggled().toggled(), sidebar);
    }

    #[test]
    fn compose_builds_all_views() {
        let data = crate::data::sample::dataset();
        let dash = compose(
            &data,
            Utc::now(),
            (heatmap::DEFAULT_WIDTH, heatmap::DEFAULT_HEIGHT),
            &InventoryState::default(),
        );
        assert_eq!(dash.shell.title, TITLE);
        assert_eq!(dash.cards.len(), 4);
        assert_eq!(dash.heatmap.cells.len(), data.modules.len());
        assert_eq!(dash.inventory.shown, data.systems.len());
    }
}
