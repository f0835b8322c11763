//! CLI command implementations for the terminal dashboard.
//!
//! Provides subcommand handlers for:
//! - `wardroom dashboard` — header, navigation, and all three views
//! - `wardroom summary` — the four KPI cards
//! - `wardroom modules` — module health matrix (treemap) and per-module detail
//! - `wardroom systems` — filterable, sortable legacy systems inventory
//! - `wardroom config show|init|set|reset` — configuration management

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::config::{self, OutputFormat, WardroomConfig};
use crate::data::{self, Dataset};
use crate::heatmap::{self, Heatmap, HeatmapCell};
use crate::inventory::{self, InventoryState, InventoryView};
use crate::logging::{self, ActivityLog};
use crate::metrics::{self, DerivedMetrics};
use crate::shell::{self, ShellView};
use crate::style::Tone;
use crate::summary::{self, KpiCard};
use crate::utils::format::{text_bar, truncate};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Resolved configuration, loaded dataset, and activity log for one process.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: WardroomConfig,
    pub data: Dataset,
    pub log: ActivityLog,
}

impl Session {
    /// Load config and dataset. An explicit `data` path wins over the
    /// configured one.
    pub fn open(data: Option<PathBuf>) -> Result<Self> {
        let config = config::load();
        let log = ActivityLog::from_config(&config);
        let path = data.or_else(|| config.data_path());
        let dataset = data::load(path.as_deref())?;

        for warning in dataset.integrity_warnings() {
            log.warn("cli", "dataset", &warning);
        }

        Ok(Self {
            config,
            data: dataset,
            log,
        })
    }

    /// The explicit format, else the configured default.
    pub fn format(&self, explicit: Option<&str>) -> OutputFormat {
        match explicit {
            Some(f) => OutputFormat::from_str_opt(Some(f)),
            None => self.config.general.format,
        }
    }

    /// Explicit layout size, else the configured one. Unusable values fall
    /// back to the defaults.
    pub fn layout(&self, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
        (
            heatmap::layout_dimension(
                width.unwrap_or(self.config.heatmap.width),
                heatmap::DEFAULT_WIDTH,
            ),
            heatmap::layout_dimension(
                height.unwrap_or(self.config.heatmap.height),
                heatmap::DEFAULT_HEIGHT,
            ),
        )
    }
}

// ---------------------------------------------------------------------------
// wardroom dashboard
// ---------------------------------------------------------------------------

/// Print the shell header followed by every view.
pub fn run_dashboard(session: &Session) -> Result<()> {
    let dash = shell::compose(
        &session.data,
        Utc::now(),
        session.layout(None, None),
        &InventoryState::default(),
    );

    print_shell(&dash.shell);
    println!();
    print_summary_table(&dash.cards);
    println!();
    print_heatmap_table(
        &dash.heatmap,
        session.config.heatmap.terminal_columns,
        session.config.heatmap.terminal_rows,
    );
    println!();
    print_systems_table(&dash.inventory);

    session.log.view("cli", "dashboard", None, dash.inventory.shown);
    Ok(())
}

fn print_shell(view: &ShellView) {
    println!("{}", view.title.bold().cyan());
    println!("{}", view.subtitle.dimmed());
    println!(
        "  {} {}    {} {} ({})",
        "Last Updated:".bold(),
        view.last_updated,
        "User:".bold(),
        view.user,
        view.role
    );

    let nav: Vec<String> = view
        .nav
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label).blue().bold().to_string()
            } else {
                item.label.dimmed().to_string()
            }
        })
        .collect();
    println!("  {}", nav.join("  "));
    println!("{}", "=".repeat(72));
}

// ---------------------------------------------------------------------------
// wardroom summary
// ---------------------------------------------------------------------------

/// Show the executive summary cards.
pub fn run_summary(session: &Session, format: OutputFormat) -> Result<()> {
    let metrics = metrics::derive_now(&session.data.project, &session.data.modules);
    let cards = summary::build_cards(&session.data.project, &metrics);

    match format {
        OutputFormat::Json => print_summary_json(&metrics, &cards)?,
        OutputFormat::Csv => print_summary_csv(&cards),
        OutputFormat::Table => print_summary_table(&cards),
    }

    session
        .log
        .view("cli", "summary", Some(format.to_string()), cards.len());
    Ok(())
}

fn print_summary_table(cards: &[KpiCard]) {
    println!("{}", "Executive Summary".bold().cyan());
    println!("{}", "=".repeat(60));

    for card in cards {
        println!(
            "  {} {}  {}",
            format!("{:<20}", card.title).bold(),
            card.tone.paint(&format!("{:>10}", card.value)).bold(),
            card.subtitle.dimmed()
        );
        if let Some(bar) = &card.bar {
            println!(
                "  {:<20} {} {}",
                "",
                bar.tone.paint(&text_bar(bar.percentage, 24)),
                card.tone.paint(&format!("{}%", bar.percentage))
            );
        }
    }
}

fn print_summary_json(metrics: &DerivedMetrics, cards: &[KpiCard]) -> Result<()> {
    let value = serde_json::json!({
        "metrics": metrics,
        "cards": cards,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_summary_csv(cards: &[KpiCard]) {
    println!("title,value,subtitle,percentage,tone");
    for card in cards {
        println!(
            "{},{},{},{},{}",
            csv_field(card.title),
            csv_field(&card.value),
            csv_field(&card.subtitle),
            card.bar
                .as_ref()
                .map(|b| b.percentage.to_string())
                .unwrap_or_default(),
            tone_name(card.tone),
        );
    }
}

// ---------------------------------------------------------------------------
// wardroom modules
// ---------------------------------------------------------------------------

/// Show the module health matrix, or one module's detail panel.
pub fn run_modules(
    session: &Session,
    format: OutputFormat,
    width: Option<f64>,
    height: Option<f64>,
    detail: Option<&str>,
) -> Result<()> {
    let (w, h) = session.layout(width, height);
    let map = heatmap::build(&session.data.modules, w, h);

    if let Some(id) = detail {
        let Some(cell) = map.cells.iter().find(|c| c.id == id) else {
            anyhow::bail!("unknown module '{id}'");
        };
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cell.detail)?),
            _ => print_module_detail(cell),
        }
        session.log.view("cli", "module-detail", Some(id.to_string()), 1);
        return Ok(());
    }

    if map.cells.is_empty() {
        println!("{}", "No modules in the dataset.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&map)?),
        OutputFormat::Csv => print_heatmap_csv(&map),
        OutputFormat::Table => print_heatmap_table(
            &map,
            session.config.heatmap.terminal_columns,
            session.config.heatmap.terminal_rows,
        ),
    }

    session
        .log
        .view("cli", "modules", Some(format!("{w}x{h}")), map.cells.len());
    Ok(())
}

fn print_heatmap_table(map: &Heatmap, cols: usize, rows: usize) {
    println!("{}", "Module Health Matrix".bold().cyan());
    println!(
        "{}",
        "Size represents budget allocation, color indicates status".dimmed()
    );
    println!();

    for line in render_treemap(map, cols, rows) {
        println!("  {line}");
    }

    let legend: Vec<String> = map
        .legend
        .iter()
        .map(|entry| format!("{} {}", entry.tone.paint("■"), entry.label))
        .collect();
    println!("  {}", legend.join("   "));
    println!();

    println!(
        "  {:<6} {:<28} {:<10} {:>8} {:>7} {:>6} {:>8} {:>6}",
        "Code", "Module", "Status", "Budget", "Share", "Done", "Systems", "Risks"
    );
    println!("  {}", "-".repeat(86));
    for cell in &map.cells {
        let status = format!("{:<10}", cell.detail.status_label.to_uppercase());
        println!(
            "  {:<6} {:<28} {} {:>8} {:>6.1}% {:>5}% {:>8} {:>6}",
            heatmap::short_code(&cell.detail.name),
            truncate(&cell.detail.name, 28),
            cell.detail.status_tone.paint(&status),
            cell.detail.budget,
            cell.share,
            cell.detail.completion,
            cell.detail.system_count,
            cell.detail.critical_risks.unwrap_or(0),
        );
    }
}

/// Rasterize the treemap onto a character grid with status background
/// colors and short codes on cells large enough to carry a label.
fn render_treemap(map: &Heatmap, cols: usize, rows: usize) -> Vec<String> {
    let grid = map.rasterize(cols, rows);
    let mut glyphs: Vec<Vec<char>> = grid
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(c, idx)| {
                    let boundary = c > 0 && row[c - 1] != *idx;
                    if boundary { '│' } else { ' ' }
                })
                .collect()
        })
        .collect();

    if cols > 0 && rows > 0 {
        let sx = map.width / cols as f64;
        let sy = map.height / rows as f64;
        for (idx, cell) in map.cells.iter().enumerate() {
            let Some(overlay) = &cell.overlay else {
                continue;
            };
            let r = ((cell.rect.y / sy).ceil() as usize).min(rows - 1);
            let c0 = (cell.rect.x / sx).ceil() as usize + 1;
            for (offset, ch) in overlay.code.chars().enumerate() {
                let c = c0 + offset;
                if c < cols && grid[r][c] == Some(idx) {
                    glyphs[r][c] = ch;
                }
            }
        }
    }

    grid.iter()
        .zip(glyphs)
        .map(|(row, chars)| {
            row.iter()
                .zip(chars)
                .map(|(idx, ch)| match idx {
                    Some(i) => {
                        let tone = crate::style::status_tone(map.cells[*i].status);
                        ch.to_string().black().bold().on_color(tone.ansi()).to_string()
                    }
                    None => ch.to_string(),
                })
                .collect::<String>()
        })
        .collect()
}

fn print_module_detail(cell: &HeatmapCell) {
    let d = &cell.detail;
    println!("{}", d.name.bold());
    print_detail_line("Owner:", d.owner.normal());
    print_detail_line("Systems:", d.system_count.to_string().normal());
    print_detail_line("Completion:", format!("{}%", d.completion).green());
    print_detail_line("Budget:", d.budget.normal());
    if let Some(risks) = d.critical_risks {
        print_detail_line("Critical Risks:", risks.to_string().red());
    }
    print_detail_line(
        "Status:",
        d.status_tone.paint(&d.status_label.to_uppercase()).bold(),
    );
}

fn print_detail_line(label: &str, value: colored::ColoredString) {
    println!("  {} {}", format!("{label:<16}").dimmed(), value);
}

fn print_heatmap_csv(map: &Heatmap) {
    println!("id,name,status,budget,share_pct,completion,systems,critical_risks,x,y,width,height,labeled");
    for cell in &map.cells {
        println!(
            "{},{},{},{},{:.1},{},{},{},{},{},{},{},{}",
            cell.id,
            csv_field(&cell.detail.name),
            cell.status,
            cell.detail.budget,
            cell.share,
            cell.detail.completion,
            cell.detail.system_count,
            cell.detail.critical_risks.unwrap_or(0),
            cell.rect.x,
            cell.rect.y,
            cell.rect.width,
            cell.rect.height,
            cell.show_label(),
        );
    }
}

// ---------------------------------------------------------------------------
// wardroom systems
// ---------------------------------------------------------------------------

/// Show the legacy systems inventory for the given filters and sort.
pub fn run_systems(session: &Session, format: OutputFormat, state: &InventoryState) -> Result<()> {
    let view = inventory::build_view(&session.data.modules, &session.data.systems, state);

    match format {
        OutputFormat::Json => print_systems_json(&view, state)?,
        OutputFormat::Csv => print_systems_csv(&view),
        OutputFormat::Table => print_systems_table(&view),
    }

    session
        .log
        .view("cli", "systems", Some(describe_state(state)), view.shown);
    Ok(())
}

/// Compact description of the inventory state for the activity log.
pub fn describe_state(state: &InventoryState) -> String {
    format!(
        "search={:?} status={} module={} sort={} {}",
        state.search_term,
        state.status_filter.as_str(),
        state.module_filter.as_str(),
        state.sort.key.as_str(),
        state.sort.direction.as_str(),
    )
}

fn print_systems_table(view: &InventoryView) {
    println!("{}", "Legacy Systems Inventory".bold().cyan());
    println!("{}", view.count_label().dimmed());
    println!("{}", "=".repeat(112));

    if let Some(message) = view.empty_message {
        println!("  {}", message.yellow());
        return;
    }

    println!(
        "  {:<24} {:<14} {:<24} {:<6} {:<13} {:<17} {:<10} {:>6}",
        "System Name", "Region", "Owner", "Module", "Decommission", "Progress", "Status", "Issues"
    );
    println!("  {}", "-".repeat(110));

    for row in &view.rows {
        let bar = row
            .progress
            .tone
            .paint(&text_bar(f64::from(row.progress.width), 10));
        let badge = row.status.tone.paint(&format!("{:<10}", row.status.text));
        let issues = row.issues.tone.paint(&format!("{:>6}", row.issues.count));
        println!(
            "  {:<24} {:<14} {:<24} {:<6} {:<13} {} {:>4}%  {} {}",
            truncate(&row.name, 24),
            truncate(&row.region, 14),
            truncate(&row.owner, 24),
            truncate(&row.module, 6),
            row.decommission_date,
            bar,
            row.progress.value,
            badge,
            issues,
        );
    }
}

fn print_systems_json(view: &InventoryView, state: &InventoryState) -> Result<()> {
    let value = serde_json::json!({
        "state": {
            "search": state.search_term,
            "status": state.status_filter.as_str(),
            "module": state.module_filter.as_str(),
            "sort": state.sort,
        },
        "shown": view.shown,
        "total": view.total,
        "empty_message": view.empty_message,
        "rows": view.rows,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_systems_csv(view: &InventoryView) {
    println!("id,name,region,owner,module,decommission_date,progress,status,issues_open");
    for row in &view.rows {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            row.id,
            csv_field(&row.name),
            csv_field(&row.region),
            csv_field(&row.owner),
            csv_field(&row.module),
            csv_field(&row.decommission_date),
            row.progress.value,
            row.status.text,
            row.issues.count,
        );
    }
}

// ---------------------------------------------------------------------------
// wardroom config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective wardroom Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.wardroom/config.toml");
    print_source(project_exists, ".wardroom.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "WARDROOM_* environment variables".dimmed()
    );

    let log = ActivityLog::from_config(&config::load());
    println!();
    println!(
        "{} {} ({} entries)",
        "Activity log:".dimmed(),
        log.path().display(),
        logging::read_entries(log.path()).len()
    );

    Ok(())
}

fn print_source(exists: bool, label: &str) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.wardroom/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn tone_name(tone: Tone) -> &'static str {
    match tone {
        Tone::Emerald => "emerald",
        Tone::Amber => "amber",
        Tone::Red => "red",
        Tone::Blue => "blue",
        Tone::Slate => "slate",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{SortConfig, SortDirection, SortKey, StatusFilter};

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("Mar 5, 2027"), "\"Mar 5, 2027\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn describe_state_lists_filters() {
        let state = InventoryState {
            search_term: "gl".to_string(),
            status_filter: StatusFilter::Only(crate::data::Status::Critical),
            sort: SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Desc,
            },
            ..Default::default()
        };
        assert_eq!(
            describe_state(&state),
            "search=\"gl\" status=critical module=all sort=name desc"
        );
    }

    #[test]
    fn layout_falls_back_on_non_finite_sizes() {
        let mut session = Session {
            config: WardroomConfig::default(),
            data: crate::data::sample::dataset(),
            log: ActivityLog::disabled(),
        };
        session.config.heatmap.width = f64::INFINITY;
        assert_eq!(
            session.layout(Some(f64::NAN), None),
            (heatmap::DEFAULT_WIDTH, heatmap::DEFAULT_HEIGHT)
        );
        assert_eq!(session.layout(None, Some(300.0)), (heatmap::DEFAULT_WIDTH, 300.0));
        assert_eq!(session.layout(Some(640.0), None), (640.0, heatmap::DEFAULT_HEIGHT));
    }

    #[test]
    fn treemap_render_has_requested_rows() {
        colored::control::set_override(false);
        let data = crate::data::sample::dataset();
        let map = heatmap::build(&data.modules, 1200.0, 400.0);
        let lines = render_treemap(&map, 60, 10);
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 60));
        assert!(lines.iter().any(|l| l.contains("FI")));
    }
}
