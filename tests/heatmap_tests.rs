/// Module health matrix layout tests.
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use wardroom::data::{Module, Status, sample};
use wardroom::heatmap::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_LABEL_SIZE, Rect};
use wardroom::style::Tone;

fn module(id: &str, budget: f64, status: Status) -> Module {
    Module {
        id: id.to_string(),
        name: format!("Module ({})", id.to_uppercase()),
        budget,
        status,
        completion: 50,
        system_count: 2,
        owner: "Owner".to_string(),
        critical_risks: 0,
    }
}

#[test]
fn cells_tile_the_whole_area() {
    let data = sample::dataset();
    let map = heatmap::build(&data.modules, DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let total: f64 = map.cells.iter().map(|c| c.rect.area()).sum();
    assert_eq!(total, DEFAULT_WIDTH * DEFAULT_HEIGHT);
}

#[test]
fn area_is_proportional_to_budget() {
    let data = sample::dataset();
    let map = heatmap::build(&data.modules, DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let area = DEFAULT_WIDTH * DEFAULT_HEIGHT;

    for cell in &map.cells {
        let actual = cell.rect.area() / area * 100.0;
        assert!(
            (actual - cell.share).abs() < 1.5,
            "{}: area {actual:.2}% vs budget {:.2}%",
            cell.id,
            cell.share
        );
    }

    let fi = map.cells.iter().find(|c| c.id == "fi").unwrap();
    let qm = map.cells.iter().find(|c| c.id == "qm").unwrap();
    assert!(fi.rect.area() > qm.rect.area());
}

#[test]
fn cells_keep_input_order_and_status_colors() {
    let modules = vec![
        module("a", 3.0, Status::Critical),
        module("b", 2.0, Status::Warning),
        module("c", 1.0, Status::OnTrack),
        module("d", 1.0, Status::Unknown),
    ];
    let map = heatmap::build(&modules, 800.0, 400.0);
    let ids: Vec<&str> = map.cells.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(map.cells[0].color, Tone::Red.hex());
    assert_eq!(map.cells[1].color, Tone::Amber.hex());
    assert_eq!(map.cells[2].color, Tone::Emerald.hex());
    assert_eq!(map.cells[3].color, Tone::Slate.hex());
}

#[test]
fn small_cells_suppress_labels() {
    let modules = vec![
        module("big", 100.0, Status::OnTrack),
        module("tiny", 1.0, Status::Critical),
    ];
    let map = heatmap::build(&modules, DEFAULT_WIDTH, DEFAULT_HEIGHT);

    let big = &map.cells[0];
    assert!(big.show_label());
    assert_eq!(big.overlay.as_ref().unwrap().code, "BIG");

    let tiny = &map.cells[1];
    assert!(tiny.rect.width < MIN_LABEL_SIZE || tiny.rect.height < MIN_LABEL_SIZE);
    assert!(!tiny.show_label());
    assert!(tiny.rect.area() > 0.0);
}

#[test]
fn detail_lists_risks_only_when_present() {
    let data = sample::dataset();
    let map = heatmap::build(&data.modules, DEFAULT_WIDTH, DEFAULT_HEIGHT);

    let mm = map.cells.iter().find(|c| c.id == "mm").unwrap();
    assert_eq!(mm.detail.critical_risks, Some(4));
    assert_eq!(mm.detail.budget, "$2.1M");
    assert_eq!(mm.detail.status_label, "critical");

    let co = map.cells.iter().find(|c| c.id == "co").unwrap();
    assert_eq!(co.detail.critical_risks, None);
    assert_eq!(co.detail.status_label, "on track");
}

#[test]
fn empty_module_list_has_no_cells() {
    let map = heatmap::build(&[], DEFAULT_WIDTH, DEFAULT_HEIGHT);
    assert!(map.cells.is_empty());
    assert_eq!(map.legend.len(), 3);
}

#[test]
fn cell_of_exactly_min_label_size_keeps_overlay() {
    let modules = vec![module("fi", 100.0, Status::OnTrack)];

    let map = heatmap::build(&modules, MIN_LABEL_SIZE, MIN_LABEL_SIZE);
    assert_eq!(map.cells[0].rect.width, MIN_LABEL_SIZE);
    assert_eq!(map.cells[0].rect.height, MIN_LABEL_SIZE);
    assert!(map.cells[0].show_label());

    let narrow = heatmap::build(&modules, MIN_LABEL_SIZE - 1.0, MIN_LABEL_SIZE);
    assert!(!narrow.cells[0].show_label());
}

/// Run `f` on a worker thread and fail if it does not finish promptly.
fn finishes<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(3))
        .expect("layout did not terminate")
}

#[test]
fn non_finite_bounds_yield_empty_rects() {
    for (w, h) in [
        (f64::NAN, DEFAULT_HEIGHT),
        (DEFAULT_WIDTH, f64::NAN),
        (f64::INFINITY, DEFAULT_HEIGHT),
        (DEFAULT_WIDTH, f64::NEG_INFINITY),
    ] {
        let rects = finishes(move || heatmap::squarify(&[3.0, 2.0, 1.0], Rect::new(0.0, 0.0, w, h)));
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.width == 0.0 && r.height == 0.0));
    }
}

#[test]
fn build_with_non_finite_size_terminates_without_labels() {
    let map = finishes(|| heatmap::build(&sample::dataset().modules, f64::NAN, f64::INFINITY));
    assert!(!map.cells.is_empty());
    assert!(map.cells.iter().all(|c| !c.show_label() && c.rect.area() == 0.0));
}

#[test]
fn layout_dimension_rejects_unusable_sizes() {
    assert_eq!(heatmap::layout_dimension(600.0, DEFAULT_WIDTH), 600.0);
    assert_eq!(heatmap::layout_dimension(f64::NAN, DEFAULT_WIDTH), DEFAULT_WIDTH);
    assert_eq!(heatmap::layout_dimension(f64::INFINITY, DEFAULT_WIDTH), DEFAULT_WIDTH);
    assert_eq!(heatmap::layout_dimension(0.0, DEFAULT_HEIGHT), DEFAULT_HEIGHT);
    assert_eq!(heatmap::layout_dimension(-5.0, DEFAULT_HEIGHT), DEFAULT_HEIGHT);
    assert_eq!(heatmap::layout_dimension(heatmap::MAX_LAYOUT + 1.0, DEFAULT_HEIGHT), DEFAULT_HEIGHT);
}
