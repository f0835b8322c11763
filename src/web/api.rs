//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content. The response bodies are
//! built by plain `build_*` functions so they can be tested without a server.

use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::cli::Session;
use crate::config::WardroomConfig;
use crate::data::Dataset;
use crate::heatmap::{self, Heatmap};
use crate::inventory::{
    self, InventoryRow, InventoryState, ModuleFilter, ModuleOption, SortConfig, SortDirection,
    SortKey, StatusFilter,
};
use crate::metrics::{self, DerivedMetrics};
use crate::shell::{self, ShellView};
use crate::summary::{self, KpiCard};

use super::content_type_json;

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// Summary API response — derived metrics plus the four KPI cards.
#[derive(Serialize)]
struct SummaryResponse {
    metrics: DerivedMetrics,
    cards: Vec<KpiCard>,
}

/// The inventory state echoed back so the client can render its controls.
#[derive(Serialize)]
struct StateResponse {
    search: String,
    status: &'static str,
    module: String,
    sort: SortConfig,
}

/// Systems API response.
#[derive(Serialize)]
struct SystemsResponse {
    state: StateResponse,
    module_options: Vec<ModuleOption>,
    rows: Vec<InventoryRow>,
    shown: usize,
    total: usize,
    count_label: String,
    empty_message: Option<&'static str>,
}

/// Config API response — the full config as a JSON value + the raw TOML.
#[derive(Serialize)]
struct ConfigResponse {
    config: WardroomConfig,
    toml_text: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Extract and decode the query parameter `name` from a URL.
fn query_param(url: &str, name: &str) -> Option<String> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == name { Some(decode_component(v)) } else { None }
    })
}

/// Parse a numeric layout dimension; out-of-range or invalid values are
/// dropped so the configured default applies.
fn layout_param(url: &str, name: &str) -> Option<f64> {
    query_param(url, name)?
        .parse::<f64>()
        .ok()
        .filter(|v| heatmap::layout_dimension(*v, f64::NAN) == *v)
}

/// Decode `+` and `%XX` escapes in a query component. Malformed escapes are
/// kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Read the inventory state from the query string.
///
/// `search`, `status`, `module`, `sort`, and `dir` describe the current
/// state; `toggle` then applies one click on a column's sort control.
pub(crate) fn parse_inventory_state(url: &str) -> InventoryState {
    let mut state = InventoryState {
        search_term: query_param(url, "search").unwrap_or_default(),
        status_filter: StatusFilter::from_str_opt(query_param(url, "status").as_deref()),
        module_filter: ModuleFilter::from_str_opt(query_param(url, "module").as_deref()),
        sort: SortConfig {
            key: query_param(url, "sort")
                .and_then(|s| SortKey::parse(&s))
                .unwrap_or_default(),
            direction: SortDirection::from_str_opt(query_param(url, "dir").as_deref()),
        },
    };

    if let Some(key) = query_param(url, "toggle").and_then(|s| SortKey::parse(&s)) {
        state.sort = state.sort.toggle(key);
    }

    state
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

fn build_shell(data: &Dataset) -> ShellView {
    shell::build(&data.project.last_updated)
}

fn build_summary(data: &Dataset, now: DateTime<Utc>) -> SummaryResponse {
    let metrics = metrics::derive(&data.project, &data.modules, now);
    SummaryResponse {
        cards: summary::build_cards(&data.project, &metrics),
        metrics,
    }
}

fn build_modules(data: &Dataset, config: &WardroomConfig, url: &str) -> Heatmap {
    let width = layout_param(url, "width").unwrap_or(config.heatmap.width);
    let height = layout_param(url, "height").unwrap_or(config.heatmap.height);
    let width = heatmap::layout_dimension(width, heatmap::DEFAULT_WIDTH);
    let height = heatmap::layout_dimension(height, heatmap::DEFAULT_HEIGHT);
    heatmap::build(&data.modules, width, height)
}

fn build_systems(data: &Dataset, state: InventoryState) -> SystemsResponse {
    let view = inventory::build_view(&data.modules, &data.systems, &state);
    SystemsResponse {
        count_label: view.count_label(),
        state: StateResponse {
            status: state.status_filter.as_str(),
            module: state.module_filter.as_str().to_string(),
            sort: state.sort,
            search: state.search_term,
        },
        module_options: view.module_options,
        rows: view.rows,
        shown: view.shown,
        total: view.total,
        empty_message: view.empty_message,
    }
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/shell` — header, user badge, and navigation.
pub fn get_shell(session: &Session) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = build_shell(&session.data);
    session.log.view("web", "shell", None, resp.nav.len());
    json_response(&resp)
}

/// `GET /api/summary` — derived metrics and KPI cards.
pub fn get_summary(session: &Session) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = build_summary(&session.data, Utc::now());
    session.log.view("web", "summary", None, resp.cards.len());
    json_response(&resp)
}

/// `GET /api/modules?width=W&height=H` — laid-out module health matrix.
pub fn get_modules(session: &Session, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = build_modules(&session.data, &session.config, url);
    session.log.view(
        "web",
        "modules",
        Some(format!("{}x{}", resp.width, resp.height)),
        resp.cells.len(),
    );
    json_response(&resp)
}

/// `GET /api/systems?search=&status=&module=&sort=&dir=&toggle=` — filtered
/// and sorted inventory.
pub fn get_systems(session: &Session, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let state = parse_inventory_state(url);
    let detail = crate::cli::describe_state(&state);
    let resp = build_systems(&session.data, state);
    session.log.view("web", "systems", Some(detail), resp.shown);
    json_response(&resp)
}

/// `GET /api/config` — current effective configuration.
pub fn get_config(session: &Session) -> Result<Response<Cursor<Vec<u8>>>> {
    let toml_text =
        toml::to_string_pretty(&session.config).context("failed to serialize config")?;

    let resp = ConfigResponse {
        config: session.config.clone(),
        toml_text,
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Status, sample};

    #[test]
    fn query_param_extracts_and_decodes() {
        assert_eq!(query_param("/api/systems?search=gl", "search").as_deref(), Some("gl"));
        assert_eq!(
            query_param("/api/systems?status=all&search=finance+team", "search").as_deref(),
            Some("finance team")
        );
        assert_eq!(
            query_param("/api/systems?search=Legacy%20GL", "search").as_deref(),
            Some("Legacy GL")
        );
        assert_eq!(query_param("/api/systems", "search"), None);
        assert_eq!(query_param("/api/systems?foo=bar", "search"), None);
    }

    #[test]
    fn decode_keeps_malformed_escapes() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("a%2Fb"), "a/b");
    }

    #[test]
    fn layout_param_rejects_invalid_values() {
        assert_eq!(layout_param("/api/modules?width=800", "width"), Some(800.0));
        assert_eq!(layout_param("/api/modules?width=abc", "width"), None);
        assert_eq!(layout_param("/api/modules?width=0", "width"), None);
        assert_eq!(layout_param("/api/modules?width=NaN", "width"), None);
    }

    #[test]
    fn inventory_state_defaults_without_query() {
        assert_eq!(parse_inventory_state("/api/systems"), InventoryState::default());
    }

    #[test]
    fn inventory_state_reads_filters() {
        let state = parse_inventory_state(
            "/api/systems?search=gl&status=critical&module=fi&sort=name&dir=desc",
        );
        assert_eq!(state.search_term, "gl");
        assert_eq!(state.status_filter, StatusFilter::Only(Status::Critical));
        assert_eq!(state.module_filter, ModuleFilter::Only("fi".to_string()));
        assert_eq!(state.sort.key, SortKey::Name);
        assert_eq!(state.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn toggle_same_key_flips_direction() {
        let state = parse_inventory_state("/api/systems?sort=name&dir=asc&toggle=name");
        assert_eq!(state.sort.key, SortKey::Name);
        assert_eq!(state.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn toggle_new_key_starts_ascending() {
        let state = parse_inventory_state("/api/systems?sort=name&dir=desc&toggle=issuesOpen");
        assert_eq!(state.sort.key, SortKey::IssuesOpen);
        assert_eq!(state.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn systems_response_counts_and_empty_message() {
        let data = sample::dataset();
        let resp = build_systems(&data, parse_inventory_state("/api/systems?search=zzzz"));
        assert_eq!(resp.shown, 0);
        assert_eq!(resp.total, data.systems.len());
        assert_eq!(resp.empty_message, Some(inventory::EMPTY_MESSAGE));

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"all\""));
        assert!(json.contains("\"key\":\"progress\""));
    }

    #[test]
    fn modules_response_uses_config_defaults() {
        let data = sample::dataset();
        let config = WardroomConfig::default();
        let map = build_modules(&data, &config, "/api/modules");
        assert_eq!(map.width, config.heatmap.width);
        assert_eq!(map.height, config.heatmap.height);

        let map = build_modules(&data, &config, "/api/modules?width=600&height=300");
        assert_eq!(map.width, 600.0);
        assert_eq!(map.cells.len(), data.modules.len());
    }

    #[test]
    fn summary_response_serializes_camel_case_metrics() {
        let data = sample::dataset();
        let resp = build_summary(&data, Utc::now());
        assert_eq!(resp.cards.len(), 4);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"budgetPercentage\":\"78.8\""));
        assert!(json.contains("\"criticalCount\":2"));
    }

    #[test]
    fn shell_response_has_title() {
        let data = sample::dataset();
        let json = serde_json::to_string(&build_shell(&data)).unwrap();
        assert!(json.contains(shell::TITLE));
    }
}
