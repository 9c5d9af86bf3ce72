//! Selection, click routing and event tests for the coordinator.
//!
//! Default layout: 24px cells starting at (4, 4). At width 200 there are 8
//! columns, so the add button sits at x 4..24 and folder N at x 4 + 24N.

use std::cell::RefCell;
use std::rc::Rc;

use folio_test_utils::{MockPanel, MockStorage, PanelCall, StorageCall};
use folio_ui::{
    DeferredAction, FolderCoordinator, FolderEvent, FolderEventKind, FolderId, FolderStorage,
    ItemRef, PointerButton, Rect, Vec2,
};

const WIDTH: i32 = 200;

fn setup(names: &[&str]) -> (FolderCoordinator, MockStorage, MockPanel) {
    folio_core::logging::init_with_filter("folio_ui=debug");
    let storage = MockStorage::with_folders(names.iter().copied());
    let panel = MockPanel::new();
    let mut coordinator = FolderCoordinator::builder(storage.clone(), panel.clone()).build();
    coordinator.reload(WIDTH);
    (coordinator, storage, panel)
}

/// Center of the grid cell at `index`.
fn cell_center(index: i32) -> Vec2 {
    Vec2::new((4 + index * 24 + 10) as f32, 14.0)
}

fn record(coordinator: &mut FolderCoordinator, kind: FolderEventKind) -> Rc<RefCell<Vec<FolderEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    coordinator.subscribe(kind, move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });
    log
}

fn active_count(coordinator: &FolderCoordinator) -> usize {
    coordinator.buttons().iter().filter(|b| b.is_active()).count()
}

#[test]
fn test_reload_builds_add_button_first() {
    let (coordinator, _, _) = setup(&["Ores", "Food", "Wood"]);
    let buttons = coordinator.buttons();

    assert_eq!(buttons.len(), 4);
    assert!(buttons[0].is_add());
    assert_eq!(buttons[1].folder_id(), Some(FolderId(1)));
    assert_eq!(buttons[3].folder_id(), Some(FolderId(3)));
    assert_eq!(buttons[2].rect(), Rect::new(52, 4, 20, 20));
    assert!(coordinator.active_folder().is_none());
}

#[test]
fn test_single_active_folder() {
    let (mut coordinator, storage, _) = setup(&["Ores", "Food", "Wood"]);

    coordinator.activate(1);
    coordinator.activate(2);
    coordinator.activate(3);

    assert_eq!(active_count(&coordinator), 1);
    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(3)));
    assert_eq!(storage.last_active_id(), Some(FolderId(3)));
}

#[test]
fn test_activate_ignores_role_buttons() {
    let (mut coordinator, storage, panel) = setup(&["Ores"]);

    coordinator.activate(0);
    coordinator.activate(42);

    assert!(coordinator.active_folder().is_none());
    assert_eq!(storage.last_active_id(), None);
    assert_eq!(panel.refresh_count(), 0);
}

#[test]
fn test_toggle_twice_deactivates() {
    let (mut coordinator, storage, panel) = setup(&["Ores", "Food"]);

    coordinator.toggle(2);
    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(2)));

    coordinator.toggle(2);
    assert!(coordinator.active_folder().is_none());
    assert_eq!(active_count(&coordinator), 0);
    assert_eq!(storage.last_active_id(), None);
    assert_eq!(
        panel.last_refresh(),
        Some(PanelCall::Refresh {
            folder: None,
            force_reload: true
        })
    );
}

#[test]
fn test_activation_caches_items_and_deactivation_clears_them() {
    let (mut coordinator, storage, _) = setup(&["Ores", "Food"]);
    let mut writer = storage.clone();
    writer.add_item(FolderId(1), &ItemRef::new("iron")).unwrap();
    writer.add_item(FolderId(1), &ItemRef::new("gold")).unwrap();

    coordinator.activate(1);
    assert_eq!(
        coordinator.cached_items(),
        vec![ItemRef::new("iron"), ItemRef::new("gold")]
    );

    coordinator.deactivate();
    assert!(coordinator.cached_items().is_empty());
    assert_eq!(coordinator.state().session().borrow().last_active, None);
}

#[test]
fn test_delete_button_follows_selection() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);
    assert!(!coordinator.buttons().iter().any(|b| b.is_delete()));

    coordinator.activate(1);
    let last = coordinator.buttons().last().unwrap();
    assert!(last.is_delete());
    // Right edge of the grid, on the name label row.
    assert_eq!(last.rect(), Rect::new(182, 32, 12, 12));

    coordinator.activate(2);
    assert_eq!(coordinator.buttons().iter().filter(|b| b.is_delete()).count(), 1);

    coordinator.deactivate();
    assert!(!coordinator.buttons().iter().any(|b| b.is_delete()));
}

#[test]
fn test_primary_click_toggles_folder() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);
    let clicks = record(&mut coordinator, FolderEventKind::Clicked);
    let activations = record(&mut coordinator, FolderEventKind::Activated);

    assert!(coordinator.on_click(cell_center(2), PointerButton::Primary).unwrap());
    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(2)));
    assert_eq!(clicks.borrow().len(), 1);
    assert_eq!(activations.borrow().len(), 1);

    assert!(coordinator.on_click(cell_center(2), PointerButton::Primary).unwrap());
    assert!(coordinator.active_folder().is_none());
}

#[test]
fn test_add_and_secondary_clicks_only_notify() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    let clicks = record(&mut coordinator, FolderEventKind::Clicked);

    assert!(coordinator.on_click(cell_center(0), PointerButton::Primary).unwrap());
    assert!(coordinator.on_click(cell_center(1), PointerButton::Secondary).unwrap());
    assert!(coordinator.active_folder().is_none());

    let clicks = clicks.borrow();
    assert_eq!(clicks.len(), 2);
    match &clicks[0] {
        FolderEvent::Clicked { button, pointer } => {
            assert!(button.is_add());
            assert_eq!(*pointer, PointerButton::Primary);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(clicks[1].folder_id(), Some(FolderId(1)));
}

#[test]
fn test_unhandled_clicks() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    let clicks = record(&mut coordinator, FolderEventKind::Clicked);

    assert!(!coordinator.on_click(Vec2::new(150.0, 14.0), PointerButton::Primary).unwrap());
    assert!(!coordinator.on_click(cell_center(1), PointerButton::Middle).unwrap());
    assert!(clicks.borrow().is_empty());
}

#[test]
fn test_delete_button_click_removes_active_folder() {
    let (mut coordinator, storage, panel) = setup(&["Ores", "Food"]);
    let deleted = record(&mut coordinator, FolderEventKind::Deleted);
    coordinator.activate(1);

    assert!(coordinator.on_click(Vec2::new(185.0, 35.0), PointerButton::Primary).unwrap());

    assert_eq!(storage.folders().len(), 1);
    assert!(coordinator.active_folder().is_none());
    assert_eq!(coordinator.buttons().len(), 2);
    assert_eq!(storage.last_active_id(), None);
    assert_eq!(panel.showing(), None);

    let deleted = deleted.borrow();
    assert_eq!(deleted.len(), 1);
    assert!(matches!(
        &deleted[0],
        FolderEvent::Deleted { id: FolderId(1), name } if name == "Ores"
    ));
}

#[test]
fn test_delete_without_selection_is_a_no_op() {
    let (mut coordinator, storage, _) = setup(&["Ores"]);
    storage.clear_calls();

    coordinator.delete_active().unwrap();

    assert_eq!(storage.count_calls(|c| matches!(c, StorageCall::Remove { .. })), 0);
    assert_eq!(coordinator.buttons().len(), 2);
}

#[test]
fn test_delete_failure_is_returned() {
    let (mut coordinator, storage, _) = setup(&["Ores"]);
    coordinator.activate(1);
    storage.remove_external(FolderId(1));

    let err = coordinator.delete_active().unwrap_err();
    assert!(err.is_storage());
}

#[test]
fn test_create_folder() {
    let (mut coordinator, storage, _) = setup(&["Ores"]);
    let created = record(&mut coordinator, FolderEventKind::Created);

    let folder = coordinator.create_folder("  Wood ").unwrap();

    assert_eq!(folder.name(), "Wood");
    assert_eq!(storage.folders().len(), 2);
    assert_eq!(coordinator.buttons().len(), 3);
    assert_eq!(coordinator.buttons()[2].folder_id(), Some(folder.id()));
    assert_eq!(created.borrow().len(), 1);
}

#[test]
fn test_create_folder_errors() {
    let (mut coordinator, storage, _) = setup(&["Ores"]);
    let created = record(&mut coordinator, FolderEventKind::Created);

    assert!(coordinator.create_folder("   ").unwrap_err().is_invalid_name());
    assert!(coordinator.create_folder("Ores").unwrap_err().is_storage());

    assert_eq!(storage.folders().len(), 1);
    assert_eq!(coordinator.buttons().len(), 2);
    assert!(created.borrow().is_empty());
}

#[test]
fn test_create_keeps_selection() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);
    coordinator.activate(2);

    coordinator.create_folder("Wood").unwrap();

    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(2)));
    assert_eq!(active_count(&coordinator), 1);
}

#[test]
fn test_rename_folder() {
    let (mut coordinator, _, panel) = setup(&["Ores", "Food"]);
    let renamed = record(&mut coordinator, FolderEventKind::Renamed);
    coordinator.activate(1);

    let folder = coordinator.rename_folder(FolderId(1), "Metals").unwrap();

    assert_eq!(folder.name(), "Metals");
    assert_eq!(coordinator.active_folder().map(|f| f.name()), Some("Metals"));
    assert!(matches!(
        &renamed.borrow()[0],
        FolderEvent::Renamed { previous_name, .. } if previous_name == "Ores"
    ));
    assert_eq!(panel.showing(), Some(FolderId(1)));
    assert!(coordinator.rename_folder(FolderId(1), "").unwrap_err().is_invalid_name());
}

#[test]
fn test_faulty_listeners_do_not_break_activation() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    coordinator.subscribe(FolderEventKind::Activated, |_| Err("no disk".into()));
    coordinator.subscribe(FolderEventKind::Activated, |_| panic!("listener bug"));
    let healthy = record(&mut coordinator, FolderEventKind::Activated);

    coordinator.activate(1);

    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(1)));
    assert_eq!(healthy.borrow().len(), 1);
    let faults = coordinator.state().events().faults();
    assert_eq!(faults.len(), 2);
    assert!(faults.iter().all(|f| f.is_listener_fault()));
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    let hits = Rc::new(RefCell::new(0));
    let counter = hits.clone();
    let id = coordinator.subscribe(FolderEventKind::Activated, move |_| {
        *counter.borrow_mut() += 1;
        Ok(())
    });

    coordinator.activate(1);
    assert!(coordinator.unsubscribe(id));
    coordinator.deactivate();
    coordinator.activate(1);

    assert_eq!(*hits.borrow(), 1);
    assert!(!coordinator.unsubscribe(id));
}

#[test]
fn test_listener_actions_run_on_tick() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    let queue = coordinator.deferred();
    coordinator.subscribe(FolderEventKind::Created, move |event| {
        if let FolderEvent::Created { folder } = event {
            queue.push(DeferredAction::Activate(folder.id()));
        }
        Ok(())
    });

    let folder = coordinator.create_folder("Wood").unwrap();
    assert!(coordinator.active_folder().is_none());
    assert_eq!(coordinator.deferred().len(), 1);

    coordinator.on_tick();

    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(folder.id()));
    assert!(coordinator.deferred().is_empty());
}

#[test]
fn test_hover_animates_on_tick() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);

    coordinator.on_mouse_moved(cell_center(1));
    coordinator.on_tick();
    coordinator.on_tick();

    let buttons = coordinator.buttons();
    assert!(buttons[1].is_hovered());
    assert!((buttons[1].hover_progress() - 0.2).abs() < 1e-6);
    assert_eq!(buttons[2].hover_progress(), 0.0);

    coordinator.close();
    assert!(!coordinator.buttons()[1].is_hovered());
}

#[test]
fn test_exclusion_zones_track_selection() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);
    let grid = Rect::new(4, 4, 192, 24);

    let zones = coordinator.exclusion_zones();
    assert_eq!(zones.len(), 1);
    assert!(zones.contains(&grid));

    coordinator.activate(1);
    let zones = coordinator.exclusion_zones();
    assert_eq!(zones.len(), 3);
    assert!(zones.contains(&grid));
    assert!(zones.contains(&Rect::new(4, 32, 192, 12)));
    assert!(zones.contains(&Rect::new(0, 100, 200, 100)));

    coordinator.deactivate();
    assert_eq!(coordinator.exclusion_zones().len(), 1);

    coordinator.close();
    assert!(coordinator.exclusion_zones().is_empty());
}

#[test]
fn test_exclusion_snapshot_is_detached() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    let mut zones = coordinator.exclusion_zones();
    zones.clear();
    assert_eq!(coordinator.exclusion_zones().len(), 1);
}

#[test]
fn test_layout_anchors_follow_rows() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food"]);

    let anchors = coordinator.layout_anchors().unwrap();
    assert_eq!(anchors.rows, 1);
    assert_eq!(anchors.name_label_y, 32);
    assert_eq!(anchors.panel_y, 50);

    // Two columns: add + two folders need two rows.
    coordinator.reload(50);
    let anchors = coordinator.layout_anchors().unwrap();
    assert_eq!(anchors.rows, 2);
    assert_eq!(anchors.name_label_y, 56);
    assert_eq!(anchors.panel_y, 74);
}

#[test]
fn test_toggle_off_then_reload_stays_empty() {
    let (mut coordinator, storage, _) = setup(&["Ores", "Food"]);
    let mut writer = storage.clone();
    writer.add_item(FolderId(1), &ItemRef::new("iron")).unwrap();

    coordinator.toggle(1);
    coordinator.toggle(1);
    coordinator.reload(WIDTH);

    assert!(coordinator.active_folder().is_none());
    assert_eq!(active_count(&coordinator), 0);
    assert!(coordinator.cached_items().is_empty());
}

#[test]
fn test_reload_in_place_keeps_or_drops_selection() {
    let names = ["a", "b", "c", "d", "e", "f", "g"];
    let (mut coordinator, storage, _) = setup(&names);
    coordinator.activate_folder(FolderId(7));

    coordinator.reload(WIDTH);
    assert_eq!(coordinator.active_folder().map(|f| f.id()), Some(FolderId(7)));
    assert_eq!(active_count(&coordinator), 1);

    storage.remove_external(FolderId(7));
    coordinator.reload(WIDTH);
    assert!(coordinator.active_folder().is_none());
    assert_eq!(coordinator.state().session().borrow().last_active, None);
    assert_eq!(storage.last_active_id(), None);
}

#[test]
fn test_single_active_across_interleaved_calls() {
    let (mut coordinator, _, _) = setup(&["Ores", "Food", "Wood"]);
    // 0 is the add button, 4 is the delete button while a folder is open,
    // 5 is out of range.
    let indices = [1, 2, 2, 0, 3, 4, 1, 1, 5, 3, 4, 2, 0, 2, 3, 1];

    for (step, &index) in indices.iter().cycle().take(64).enumerate() {
        if step % 3 == 0 {
            coordinator.activate(index);
        } else {
            coordinator.toggle(index);
        }

        assert!(active_count(&coordinator) <= 1, "step {}", step);
        let active = coordinator.active_folder().map(|f| f.id());
        assert_eq!(
            active,
            coordinator.state().session().borrow().last_active,
            "step {}",
            step
        );
        let flagged = coordinator
            .buttons()
            .iter()
            .find(|b| b.is_active())
            .and_then(|b| b.folder_id());
        assert_eq!(flagged, active, "step {}", step);
    }
}

#[test]
fn test_listener_faults_drain_through_facade() {
    let (mut coordinator, _, _) = setup(&["Ores"]);
    coordinator.subscribe(FolderEventKind::Activated, |_| Err("no disk".into()));

    for _ in 0..1000 {
        coordinator.activate(1);
    }
    assert_eq!(
        coordinator.state().events().faults().len(),
        folio_ui::MAX_RECORDED_FAULTS
    );

    let drained = coordinator.take_listener_faults();
    assert_eq!(drained.len(), folio_ui::MAX_RECORDED_FAULTS);
    assert!(coordinator.state().events().faults().is_empty());
}
