//! Integration tests for the keyboard catalog.

use keyboard_catalog::{
    CatalogApp, CatalogSeed, CatalogStore, Keyboard, Manufacturer, Revision, SelectionController,
    SelectionRequest,
};
use std::time::Duration;

const WAIT: Duration = Duration::from_millis(200);

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Apple with keyboard A, IBM with keyboard B; nothing favorited.
fn apple_ibm_store() -> (CatalogStore, Keyboard, Keyboard) {
    let apple = Manufacturer::new("Apple").unwrap();
    let ibm = Manufacturer::new("IBM").unwrap();
    let a = Keyboard::new(apple.id(), "A", "", "https://example.com/a.png").unwrap();
    let b = Keyboard::new(ibm.id(), "B", "", "https://example.com/b.png").unwrap();

    let store = CatalogStore::from_seed(CatalogSeed {
        manufacturers: vec![apple, ibm],
        keyboards: vec![a.clone(), b.clone()],
    })
    .unwrap();

    (store, a, b)
}

// --- Realistic Workflow Tests ---

#[test]
fn test_favorite_scenario() {
    init_tracing();
    let (store, a, b) = apple_ibm_store();

    let apple = store.subscribe(a.manufacturer_id());
    assert_eq!(apple.recv_timeout(WAIT).unwrap().keyboards, vec![a.clone()]);

    store.update(a.clone().with_favorite(true)).unwrap();

    let emitted = apple.recv_timeout(WAIT).unwrap();
    assert_eq!(emitted.keyboards.len(), 1);
    assert_eq!(emitted.keyboards[0].id(), a.id());
    assert!(emitted.keyboards[0].is_favorite());

    let ibm = store.subscribe(b.manufacturer_id());
    assert_eq!(ibm.recv_timeout(WAIT).unwrap().keyboards, vec![b]);
}

#[test]
fn test_first_emission_matches_store_filter() {
    let store = CatalogStore::with_defaults();

    for manufacturer in store.manufacturers() {
        let handle = store.subscribe(manufacturer.id());
        let snapshot = handle.recv_timeout(WAIT).unwrap();

        let expected: Vec<_> = store
            .all_keyboards()
            .into_iter()
            .filter(|k| k.manufacturer_id() == manufacturer.id())
            .collect();
        assert_eq!(snapshot.keyboards, expected);
        assert_eq!(snapshot.revision, Revision(0));
    }
}

#[test]
fn test_update_leaves_other_manufacturers_untouched() {
    let store = CatalogStore::with_defaults();
    let apple = store.manufacturers()[0].id();
    let ibm = store.manufacturers()[1].id();

    let ibm_handle = store.subscribe(ibm);
    let before = ibm_handle.recv_timeout(WAIT).unwrap();

    let lisa = store.keyboards(apple)[1].clone();
    store.update(lisa.with_favorite(true)).unwrap();

    let after = ibm_handle.recv_timeout(WAIT).unwrap();
    assert_eq!(after.revision, Revision(1));
    assert_eq!(after.keyboards, before.keyboards);
}

#[test]
fn test_toggle_twice_restores_original() {
    let store = CatalogStore::with_defaults();
    let ibm = store.manufacturers()[1].id();
    let collection = store.keyboards(ibm);
    let original = collection[0].clone();

    let mut controller = SelectionController::new();
    controller.request(original.id(), &collection);

    assert!(controller.toggle_favorite(&store).unwrap().is_favorite());
    assert!(!controller.toggle_favorite(&store).unwrap().is_favorite());

    assert_eq!(store.keyboard(original.id()), Some(original.clone()));
    assert_eq!(controller.selection().keyboard(), Some(&original));
}

#[test]
fn test_selection_follows_subscription() {
    let store = CatalogStore::with_defaults();
    let apple = store.manufacturers()[0].id();
    let handle = store.subscribe(apple);

    let snapshot = handle.recv_timeout(WAIT).unwrap();
    let mut controller = SelectionController::new();
    let request = SelectionRequest::from_keys(snapshot.keyboards.iter().map(|k| k.id()));
    controller.request(request, &snapshot.keyboards);
    assert_eq!(controller.selected_key(), Some(snapshot.keyboards[0].id()));

    store.toggle_favorite(snapshot.keyboards[0].id()).unwrap();

    let next = handle.recv_timeout(WAIT).unwrap();
    let selection = controller.observe(&next.keyboards);
    assert!(selection.keyboard().unwrap().is_favorite());
}

#[test]
fn test_browser_session() {
    init_tracing();
    let store = CatalogStore::with_defaults();
    let mut app = CatalogApp::new(&store);
    app.start_all(&store);

    let ibm = store.manufacturers()[1].id();
    app.select_manufacturer(Some(ibm)).unwrap();

    let list = app.current_list_mut().unwrap();
    let model_m = list.keyboards()[0].id();
    list.set_selection(model_m);
    list.toggle_favorite(&store);

    app.sync_all();
    let list = app.current_list().unwrap();
    assert_eq!(list.details().map(|k| k.name()), Some("Model M"));
    assert_eq!(list.favorites().count(), 1);
    assert_eq!(list.non_favorites().count(), 1);
    assert_eq!(store.stats().favorite_count, 1);

    app.navigate_to_app_info();
    assert!(app.destination().is_some());
    app.dismiss_destination();

    app.stop_all();
    assert_eq!(store.subscription_count(), 0);
}

#[test]
fn test_list_toggle_after_toggle_elsewhere() {
    let store = CatalogStore::with_defaults();
    let mut app = CatalogApp::new(&store);
    app.start_all(&store);

    let apple = store.manufacturers()[0].id();
    let list = app.list_mut(apple).unwrap();
    let lisa = list.keyboards()[1].id();
    list.set_selection(lisa);

    // Another context favorites the record before the list syncs.
    store.toggle_favorite(lisa).unwrap();
    list.toggle_favorite(&store);

    let stored = store.keyboard(lisa).unwrap();
    assert!(!stored.is_favorite());
    assert_eq!(store.revision(), Revision(2));
    assert_eq!(list.details(), Some(&stored));

    app.sync_all();
    assert_eq!(app.list(apple).unwrap().details(), Some(&stored));
}
