//! Module health matrix — a treemap where area is budget and color is status.
//!
//! Layout uses the squarified treemap algorithm: modules are placed in
//! descending budget order, grouped into rows while the worst aspect ratio in
//! the row keeps improving, and coordinates are rounded to whole layout
//! units. The final row is flushed so the cells exactly tile the bounds.

use serde::Serialize;

use crate::data::{Module, Status};
use crate::style::{self, Tone};
use crate::utils::format::millions;

/// Default layout area, in layout units.
pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;

/// Accepted range for a layout dimension.
pub const MIN_LAYOUT: f64 = 1.0;
pub const MAX_LAYOUT: f64 = 10_000.0;

/// Cells narrower or shorter than this get no text overlay.
pub const MIN_LABEL_SIZE: f64 = 80.0;

/// Target aspect ratio for squarified rows (golden ratio).
const ASPECT_RATIO: f64 = 1.618_033_988_749_895;

/// `value` when it is a usable layout dimension, else `fallback`.
///
/// Non-finite or out-of-range sizes would give the layout nothing to
/// apportion.
pub fn layout_dimension(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && (MIN_LAYOUT..=MAX_LAYOUT).contains(&value) {
        value
    } else {
        fallback
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Lay out `values` inside `bounds`, returning one rectangle per value in
/// input order. Non-positive values get an empty rectangle at the origin of
/// `bounds`.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut rects = vec![Rect::new(bounds.x, bounds.y, 0.0, 0.0); values.len()];

    let total: f64 = values.iter().copied().filter(|v| is_positive(*v)).sum();
    let area = bounds.area();
    if !(total.is_finite() && total > 0.0 && area.is_finite() && area > 0.0) {
        return rects;
    }

    let scale = bounds.area() / total;
    let mut pending: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| is_positive(**v))
        .map(|(i, v)| (i, v * scale))
        .collect();
    pending.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut remaining = bounds;
    let mut side = remaining.width.min(remaining.height);
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut row_area = 0.0;
    let mut best = f64::INFINITY;

    let mut i = 0;
    while i < pending.len() {
        let item = pending[i];
        row.push(item);
        row_area += item.1;

        let score = worst_ratio(&row, row_area, side);
        if score <= best {
            best = score;
            i += 1;
        } else {
            row.pop();
            row_area -= item.1;
            remaining = place_row(&row, row_area, side, remaining, false, &mut rects);
            side = remaining.width.min(remaining.height);
            row.clear();
            row_area = 0.0;
            best = f64::INFINITY;
        }
    }

    if !row.is_empty() {
        place_row(&row, row_area, side, remaining, true, &mut rects);
    }

    rects
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Worst aspect ratio of any cell in `row` when laid along `side`.
fn worst_ratio(row: &[(usize, f64)], row_area: f64, side: f64) -> f64 {
    let side_sq = side * side;
    let area_sq = row_area * row_area;
    if area_sq == 0.0 {
        return f64::INFINITY;
    }

    let (min, max) = row
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), (_, a)| (lo.min(*a), hi.max(*a)));

    f64::max(
        side_sq * max * ASPECT_RATIO / area_sq,
        area_sq / (side_sq * min * ASPECT_RATIO),
    )
}

/// Place a finished row along the short side of `rect` and return the space
/// left over.
fn place_row(
    row: &[(usize, f64)],
    row_area: f64,
    side: f64,
    rect: Rect,
    flush: bool,
    rects: &mut [Rect],
) -> Rect {
    if side == rect.width {
        let mut row_height = if side > 0.0 { (row_area / side).round() } else { 0.0 };
        if flush || row_height > rect.height {
            row_height = rect.height;
        }

        let right = rect.x + rect.width;
        let mut cur_x = rect.x;
        for &(index, area) in row {
            let ideal = if row_height > 0.0 { (area / row_height).round() } else { 0.0 };
            let width = ideal.min(right - cur_x);
            rects[index] = Rect::new(cur_x, rect.y, width, row_height);
            cur_x += width;
        }
        if let Some(&(last, _)) = row.last() {
            rects[last].width += right - cur_x;
        }

        Rect::new(rect.x, rect.y + row_height, rect.width, rect.height - row_height)
    } else {
        let mut row_width = if side > 0.0 { (row_area / side).round() } else { 0.0 };
        if flush || row_width > rect.width {
            row_width = rect.width;
        }

        let bottom = rect.y + rect.height;
        let mut cur_y = rect.y;
        for &(index, area) in row {
            let ideal = if row_width > 0.0 { (area / row_width).round() } else { 0.0 };
            let height = ideal.min(bottom - cur_y);
            rects[index] = Rect::new(rect.x, cur_y, row_width, height);
            cur_y += height;
        }
        if let Some(&(last, _)) = row.last() {
            rects[last].height += bottom - cur_y;
        }

        Rect::new(rect.x + row_width, rect.y, rect.width - row_width, rect.height)
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// Hover/focus detail for one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDetail {
    pub name: String,
    pub owner: String,
    pub system_count: u32,
    pub completion: u32,
    /// Budget in millions, e.g. `"$2.8M"`.
    pub budget: String,
    /// Only present when the module has critical risks.
    pub critical_risks: Option<u32>,
    pub status_label: String,
    pub status_tone: Tone,
}

/// Text drawn on top of a sufficiently large cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellOverlay {
    pub code: String,
    /// `"1 system"` / `"4 systems"`.
    pub systems: String,
    pub completion: u32,
    /// Completion bar width, clamped to 100.
    pub bar_width: u32,
}

/// A laid-out treemap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub id: String,
    pub rect: Rect,
    pub status: Status,
    /// Fill and stroke color.
    pub color: &'static str,
    /// Budget share of the whole matrix, percent.
    pub share: f64,
    pub overlay: Option<CellOverlay>,
    pub detail: ModuleDetail,
}

impl HeatmapCell {
    pub fn show_label(&self) -> bool {
        self.overlay.is_some()
    }
}

/// One legend entry under the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub tone: Tone,
}

/// The complete module health matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub width: f64,
    pub height: f64,
    pub cells: Vec<HeatmapCell>,
    pub legend: Vec<LegendEntry>,
}

impl Heatmap {
    /// Index of the cell covering the layout point `(x, y)`, if any.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().position(|c| c.rect.contains(x, y))
    }

    /// Sample the layout onto a `cols` × `rows` character grid. Each entry is
    /// the index of the cell under that grid position.
    pub fn rasterize(&self, cols: usize, rows: usize) -> Vec<Vec<Option<usize>>> {
        if cols == 0 || rows == 0 {
            return Vec::new();
        }
        let sx = self.width / cols as f64;
        let sy = self.height / rows as f64;
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| self.cell_at((c as f64 + 0.5) * sx, (r as f64 + 0.5) * sy))
                    .collect()
            })
            .collect()
    }
}

/// Build the matrix for `modules` inside a `width` × `height` layout area.
pub fn build(modules: &[Module], width: f64, height: f64) -> Heatmap {
    let budgets: Vec<f64> = modules.iter().map(|m| m.budget).collect();
    let total: f64 = budgets.iter().copied().filter(|b| is_positive(*b)).sum();
    let rects = squarify(&budgets, Rect::new(0.0, 0.0, width, height));

    let cells = modules
        .iter()
        .zip(rects)
        .map(|(module, rect)| build_cell(module, rect, total))
        .collect();

    Heatmap {
        width,
        height,
        cells,
        legend: vec![
            LegendEntry {
                label: "On Track",
                tone: Tone::Emerald,
            },
            LegendEntry {
                label: "Warning",
                tone: Tone::Amber,
            },
            LegendEntry {
                label: "Critical",
                tone: Tone::Red,
            },
        ],
    }
}

fn build_cell(module: &Module, rect: Rect, total_budget: f64) -> HeatmapCell {
    let tone = style::status_tone(module.status);
    let share = if total_budget > 0.0 && is_positive(module.budget) {
        module.budget / total_budget * 100.0
    } else {
        0.0
    };

    let overlay = if !(rect.width >= MIN_LABEL_SIZE && rect.height >= MIN_LABEL_SIZE) {
        None
    } else {
        Some(CellOverlay {
            code: short_code(&module.name),
            systems: systems_label(module.system_count),
            completion: module.completion,
            bar_width: module.completion.min(100),
        })
    };

    HeatmapCell {
        id: module.id.clone(),
        rect,
        status: module.status,
        color: tone.hex(),
        share,
        overlay,
        detail: ModuleDetail {
            name: module.name.clone(),
            owner: module.owner.clone(),
            system_count: module.system_count,
            completion: module.completion,
            budget: millions(module.budget),
            critical_risks: (module.critical_risks > 0).then_some(module.critical_risks),
            status_label: module.status.label(),
            status_tone: tone,
        },
    }
}

/// Cell code: the text inside the parentheses (`"Finance (FI)"` → `"FI"`),
/// else the first word of the name.
pub fn short_code(name: &str) -> String {
    name.split('(')
        .nth(1)
        .map(|rest| rest.replacen(')', "", 1))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| name.split(' ').next().unwrap_or(name).to_string())
}

fn systems_label(count: u32) -> String {
    if count == 1 {
        "1 system".to_string()
    } else {
        format!("{count} systems")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
