/// Systems inventory tests.
///
/// Exercises the pure filter + sort pipeline and the rendered view against
/// the built-in sample program.
use wardroom::data::{Status, sample};
use wardroom::inventory::{
    self, EMPTY_MESSAGE, InventoryState, ModuleFilter, SortConfig, SortDirection, SortKey,
    StatusFilter,
};

fn state_for(search: &str, status: Status, module: &str) -> InventoryState {
    InventoryState {
        search_term: search.to_string(),
        status_filter: StatusFilter::Only(status),
        module_filter: ModuleFilter::Only(module.to_string()),
        sort: SortConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn every_system_matches_its_own_filters() {
    let data = sample::dataset();
    for system in &data.systems {
        let chars: Vec<char> = system.name.chars().collect();
        let substrings = [
            system.name.clone(),
            system.name.to_uppercase(),
            chars[..3].iter().collect::<String>().to_lowercase(),
            chars[chars.len() / 2..].iter().collect::<String>(),
        ];
        for term in substrings {
            let state = state_for(&term, system.status, &system.module);
            let ids: Vec<u32> = inventory::filter_and_sort(&data.systems, &state)
                .iter()
                .map(|s| s.id)
                .collect();
            assert!(ids.contains(&system.id), "{} missing for {term:?}", system.name);
        }
    }
}

#[test]
fn search_matches_owner_too() {
    let data = sample::dataset();
    let state = InventoryState {
        search_term: "procurement".to_string(),
        ..InventoryState::default()
    };
    let names: Vec<&str> = inventory::filter_and_sort(&data.systems, &state)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Vendor Master Hub"));
    assert!(names.contains(&"Purchase Req Portal"));
}

#[test]
fn unmatched_search_yields_empty_view() {
    let data = sample::dataset();
    let state = InventoryState {
        search_term: "no such system anywhere".to_string(),
        ..InventoryState::default()
    };
    let view = inventory::build_view(&data.modules, &data.systems, &state);
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
    assert_eq!(view.count_label(), format!("Showing 0 of {} systems", data.systems.len()));
}

#[test]
fn status_and_module_filters_combine() {
    let data = sample::dataset();
    let state = InventoryState {
        status_filter: StatusFilter::Only(Status::Critical),
        module_filter: ModuleFilter::Only("mm".to_string()),
        ..InventoryState::default()
    };
    let ids: Vec<u32> = inventory::filter_and_sort(&data.systems, &state)
        .iter()
        .map(|s| s.id)
        .collect();
    // Sorted by progress ascending: Legacy MRP II (35), Vendor Master Hub (52).
    assert_eq!(ids, vec![7, 8]);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn progress_sort_directions_are_reverses() {
    let data = sample::dataset();
    let asc_state = InventoryState::default();
    let desc_state = InventoryState {
        sort: SortConfig {
            key: SortKey::Progress,
            direction: SortDirection::Desc,
        },
        ..InventoryState::default()
    };

    let asc: Vec<u32> = inventory::filter_and_sort(&data.systems, &asc_state)
        .iter()
        .map(|s| s.id)
        .collect();
    let mut desc: Vec<u32> = inventory::filter_and_sort(&data.systems, &desc_state)
        .iter()
        .map(|s| s.id)
        .collect();
    desc.reverse();
    assert_eq!(asc, desc);
    assert_eq!(asc.first(), Some(&7));
}

#[test]
fn dates_sort_chronologically() {
    let data = sample::dataset();
    let state = InventoryState {
        sort: SortConfig {
            key: SortKey::DecommissionDate,
            direction: SortDirection::Asc,
        },
        ..InventoryState::default()
    };
    let dates: Vec<_> = inventory::filter_and_sort(&data.systems, &state)
        .iter()
        .map(|s| s.decommission_date)
        .collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn toggle_rules() {
    let start = SortConfig::default();
    assert_eq!(start.toggle(start.key).toggle(start.key), start);

    for key in [SortKey::Name, SortKey::DecommissionDate, SortKey::IssuesOpen] {
        let flipped = SortConfig {
            key: SortKey::Progress,
            direction: SortDirection::Desc,
        };
        assert_eq!(flipped.toggle(key).direction, SortDirection::Asc);
        assert_eq!(flipped.toggle(key).key, key);
    }
}

// ---------------------------------------------------------------------------
// Module labels
// ---------------------------------------------------------------------------

#[test]
fn module_labels_resolve() {
    let data = sample::dataset();
    assert_eq!(inventory::module_display_name(&data.modules, "fi"), "FI");
    assert_eq!(inventory::module_display_name(&data.modules, "xyz"), "XYZ");

    let view = inventory::build_view(&data.modules, &data.systems, &InventoryState::default());
    let ids: Vec<&str> = view.module_options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["fi", "co", "mm", "sd", "pp", "hcm", "wm", "qm"]);
}
