use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use futures::executor::block_on;
use icon_picker_contract::{
    AttributeStore, CatalogFuture, CatalogProvider, Icon, InlineCatalogProvider,
    MemoryAttributeStore, PickedIcon, PickerConfig, PickerError, RawCatalog, Selection,
    UnavailableCatalogProvider,
};
use icon_picker_runtime::{
    IconPicker, PickerHost, PickerPhase, RecordingSurface, DETAILS_ATTR, LOAD_ERROR_MESSAGE,
    SELECTED_ICON_ATTR,
};
use pretty_assertions::assert_eq;

fn icons(category: &str, files: &[&str]) -> Vec<Icon> {
    files
        .iter()
        .map(|file| Icon::new(format!("{file}.svg"), format!("{category}/{file}.svg")))
        .collect()
}

fn sample_catalog() -> RawCatalog {
    RawCatalog {
        base_url: Some("https://cdn.example/icons".to_string()),
        categories: vec![
            (
                "general".to_string(),
                icons("general", &["home-1", "home-2", "work"]),
            ),
            ("nav".to_string(), icons("nav", &["home-arrow"])),
            ("brands".to_string(), icons("brands", &["github", "home-brand"])),
        ],
    }
}

struct Harness {
    picker: IconPicker,
    store: MemoryAttributeStore,
    surface: RecordingSurface,
    picks: Rc<RefCell<Vec<PickedIcon>>>,
}

fn harness_with(
    config: PickerConfig,
    provider: Rc<dyn CatalogProvider>,
    store: MemoryAttributeStore,
) -> Harness {
    let surface = RecordingSurface::default();
    let picks = Rc::new(RefCell::new(Vec::new()));
    let sink = picks.clone();
    let picker = IconPicker::create(
        config,
        PickerHost {
            store: Rc::new(store.clone()),
            surface: Rc::new(surface.clone()),
            provider,
            on_pick: Some(Rc::new(move |picked: &PickedIcon| {
                sink.borrow_mut().push(picked.clone())
            })),
        },
    )
    .expect("create picker");
    Harness {
        picker,
        store,
        surface,
        picks,
    }
}

fn loaded(config: PickerConfig) -> Harness {
    let harness = harness_with(
        config,
        Rc::new(InlineCatalogProvider::new(sample_catalog())),
        MemoryAttributeStore::default(),
    );
    block_on(harness.picker.load());
    harness.store.flush();
    harness
}

fn stored_record(store: &MemoryAttributeStore) -> Selection {
    serde_json::from_str(&store.get(DETAILS_ATTR).expect("details attribute")).expect("record")
}

#[test]
fn load_persists_default_selection_without_invoking_callback() {
    let h = loaded(PickerConfig::default());

    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("general.home-1.svg")
    );
    assert_eq!(stored_record(&h.store).path, "general/home-1.svg");
    assert_eq!(
        h.surface.button(),
        Some((
            "https://cdn.example/icons/general/home-1.svg".to_string(),
            "home-1".to_string()
        ))
    );
    assert_eq!(h.surface.categories(), vec!["general", "nav", "brands"]);
    assert_eq!(h.surface.selected_category().as_deref(), Some("general"));
    assert_eq!(h.surface.grid_titles(), vec!["home-1.svg", "home-2.svg", "work.svg"]);
    assert!(h.picks.borrow().is_empty());
}

#[test]
fn configured_default_category_is_preloaded() {
    let h = loaded(PickerConfig {
        default_category: Some("nav".to_string()),
        ..PickerConfig::default()
    });
    assert_eq!(h.surface.selected_category().as_deref(), Some("nav"));
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("nav.home-arrow.svg")
    );
}

#[test]
fn ignored_categories_never_surface() {
    let h = loaded(PickerConfig {
        ignore_list: vec!["general".to_string(), "brands".to_string()],
        default_category: Some("general".to_string()),
        ..PickerConfig::default()
    });

    assert_eq!(h.surface.categories(), vec!["nav"]);
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("nav.home-arrow.svg")
    );
    h.surface.type_search("home");
    assert_eq!(h.surface.grid_titles(), vec!["home-arrow.svg"]);
}

#[test]
fn search_spans_categories_and_pick_resolves_category() {
    let h = loaded(PickerConfig::default());
    h.surface.click_button();
    assert!(picker_panel_open(&h));

    h.surface.type_search("HOME");
    assert_eq!(
        h.surface.grid_titles(),
        vec!["home-1.svg", "home-2.svg", "home-arrow.svg", "home-brand.svg"]
    );

    h.surface.click_item(2);
    assert!(!picker_panel_open(&h));
    assert_eq!(
        h.picks.borrow().as_slice(),
        &[PickedIcon {
            file: "home-arrow.svg".to_string(),
            path: "nav/home-arrow.svg".to_string(),
            full_url: "https://cdn.example/icons/nav/home-arrow.svg".to_string(),
            reference: "nav.home-arrow.svg".to_string(),
        }]
    );
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("nav.home-arrow.svg")
    );
    assert_eq!(stored_record(&h.store).reference, "nav.home-arrow.svg");

    assert_eq!(h.store.flush(), 1);
    assert_eq!(
        h.surface.button().map(|(_, label)| label),
        Some("home-arrow".to_string())
    );
}

#[test]
fn category_pick_uses_category_label() {
    let h = loaded(PickerConfig::default());
    h.surface.choose_category("brands");
    h.surface.click_item(1);
    assert_eq!(
        h.picks.borrow().last().map(|p| p.reference.clone()),
        Some("brands.home-brand.svg".to_string())
    );
}

#[test]
fn switching_category_after_search_clears_term_and_restarts_grid() {
    let h = loaded(PickerConfig::default());
    h.surface.type_search("home");
    assert_eq!(h.surface.search_text(), "home");

    h.surface.choose_category("nav");
    assert_eq!(h.surface.search_text(), "");
    assert_eq!(h.surface.grid_titles(), vec!["home-arrow.svg"]);
    assert_eq!(h.picker.current_category().as_deref(), Some("nav"));
    assert_eq!(h.picker.rendered_count(), 1);
}

#[test]
fn clearing_search_falls_back_to_current_category() {
    let h = loaded(PickerConfig::default());
    h.surface.type_search("arrow");
    assert_eq!(h.surface.grid_titles(), vec!["home-arrow.svg"]);

    h.surface.type_search("   ");
    assert_eq!(h.surface.grid_titles(), vec!["home-1.svg", "home-2.svg", "work.svg"]);
}

#[test]
fn large_category_renders_in_scroll_triggered_batches() {
    let files: Vec<String> = (0..120).map(|i| format!("glyph-{i}")).collect();
    let file_refs: Vec<&str> = files.iter().map(String::as_str).collect();
    let raw = RawCatalog {
        base_url: None,
        categories: vec![("glyphs".to_string(), icons("glyphs", &file_refs))],
    };
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(InlineCatalogProvider::new(raw)),
        MemoryAttributeStore::default(),
    );
    block_on(h.picker.load());

    assert_eq!(h.surface.batches(), vec![50]);
    h.surface.scroll_to_bottom();
    h.surface.scroll_to_bottom();
    h.surface.scroll_to_bottom();
    assert_eq!(h.surface.batches(), vec![50, 50, 20]);
    assert_eq!(h.picker.rendered_count(), h.picker.view_len());

    h.surface.click_item(119);
    assert_eq!(
        h.picks.borrow().last().map(|p| p.full_url.clone()),
        Some("/glyphs/glyph-119.svg".to_string())
    );
}

#[test]
fn button_is_inert_until_loaded_and_after_failure() {
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(UnavailableCatalogProvider::new("404")),
        MemoryAttributeStore::default(),
    );
    h.surface.click_button();
    assert!(!picker_panel_open(&h));

    block_on(h.picker.load());
    assert_eq!(
        h.picker.phase(),
        PickerPhase::LoadFailed("catalog load failed: 404".to_string())
    );
    assert_eq!(h.surface.load_error().as_deref(), Some(LOAD_ERROR_MESSAGE));
    h.surface.click_button();
    assert!(!picker_panel_open(&h));
    assert_eq!(h.store.get(SELECTED_ICON_ATTR), None);
}

#[test]
fn outside_click_closes_panel_inside_click_keeps_it() {
    let h = loaded(PickerConfig::default());
    h.surface.click_button();
    h.surface.click_document(true);
    assert!(picker_panel_open(&h));
    h.surface.click_document(false);
    assert!(!picker_panel_open(&h));

    h.surface.click_button();
    h.surface.click_button();
    assert!(!picker_panel_open(&h));
}

#[test]
fn existing_selection_is_displayed_not_overwritten() {
    let store = MemoryAttributeStore::with_values([(SELECTED_ICON_ATTR, "nav.home-arrow.svg")]);
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(InlineCatalogProvider::new(sample_catalog())),
        store,
    );
    block_on(h.picker.load());

    assert_eq!(h.store.get(DETAILS_ATTR), None);
    assert!(!h.store.has_pending());
    assert_eq!(
        h.surface.button().map(|(_, label)| label),
        Some("home-arrow".to_string())
    );
}

#[test]
fn unresolvable_or_malformed_attributes_leave_display_unchanged() {
    let h = loaded(PickerConfig::default());
    let before = h.surface.button();

    h.store.set(SELECTED_ICON_ATTR, "").expect("set");
    h.store.set(DETAILS_ATTR, "{broken").expect("set");
    h.store.flush();
    assert_eq!(h.surface.button(), before);

    h.store.set(SELECTED_ICON_ATTR, "nav.missing.svg").expect("set");
    h.store.flush();
    assert_eq!(h.surface.button(), before);
}

#[test]
fn reapplying_same_attributes_is_idempotent() {
    let h = loaded(PickerConfig::default());
    h.store.set(SELECTED_ICON_ATTR, "general.work.svg").expect("set");
    h.store.flush();
    let first = h.surface.button();

    h.store.set(SELECTED_ICON_ATTR, "general.work.svg").expect("set");
    h.store.flush();
    assert_eq!(h.surface.button(), first);
    assert_eq!(first.map(|(_, label)| label), Some("work".to_string()));
}

#[test]
fn destroy_detaches_everything_and_is_idempotent() {
    let h = loaded(PickerConfig::default());
    let before = h.surface.button();
    assert_eq!(h.store.watcher_count(), 1);

    h.picker.destroy();
    h.picker.destroy();

    assert_eq!(h.picker.phase(), PickerPhase::TornDown);
    assert!(h.surface.is_torn_down());
    assert!(!h.surface.has_document_listener());
    assert!(!h.surface.has_removal_watcher());
    assert_eq!(h.store.watcher_count(), 0);

    h.store.set(SELECTED_ICON_ATTR, "nav.home-arrow.svg").expect("set");
    assert_eq!(h.store.flush(), 0);
    assert_eq!(h.surface.button(), before);

    h.surface.click_document(false);
    h.surface.click_item(0);
    assert!(h.picks.borrow().is_empty());
}

#[test]
fn host_removal_tears_down() {
    let h = loaded(PickerConfig::default());
    h.surface.remove_host();
    assert_eq!(h.picker.phase(), PickerPhase::TornDown);
    assert!(h.surface.is_torn_down());
    assert!(!h.surface.has_document_listener());
}

#[test]
fn load_completing_after_destroy_is_ignored() {
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(InlineCatalogProvider::new(sample_catalog())),
        MemoryAttributeStore::default(),
    );
    let pending = h.picker.load();
    h.picker.destroy();
    block_on(pending);

    assert_eq!(h.picker.phase(), PickerPhase::TornDown);
    assert!(h.surface.categories().is_empty());
    assert_eq!(h.store.get(SELECTED_ICON_ATTR), None);
}

#[test]
fn empty_catalog_after_exclusion_degrades_to_empty_selection() {
    let h = loaded(PickerConfig {
        ignore_list: vec![
            "general".to_string(),
            "nav".to_string(),
            "brands".to_string(),
        ],
        ..PickerConfig::default()
    });

    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
    assert_eq!(stored_record(&h.store), Selection::empty());
    assert!(h.surface.categories().is_empty());
    assert_eq!(h.surface.button(), None);

    h.surface.type_search("home");
    h.surface.type_search("");
    h.surface.scroll_to_bottom();
    h.surface.click_item(0);
    assert!(h.surface.grid().is_empty());
    assert!(h.picks.borrow().is_empty());
}

#[test]
fn pick_callback_may_destroy_the_picker() {
    let slot: Rc<RefCell<Option<IconPicker>>> = Rc::new(RefCell::new(None));
    let callback_slot = slot.clone();
    let surface = RecordingSurface::default();
    let picker = IconPicker::create(
        PickerConfig::default(),
        PickerHost {
            store: Rc::new(MemoryAttributeStore::default()),
            surface: Rc::new(surface.clone()),
            provider: Rc::new(InlineCatalogProvider::new(sample_catalog())),
            on_pick: Some(Rc::new(move |_: &PickedIcon| {
                if let Some(picker) = callback_slot.borrow().as_ref() {
                    picker.destroy();
                }
            })),
        },
    )
    .expect("create picker");
    *slot.borrow_mut() = Some(picker.clone());
    block_on(picker.load());

    surface.click_item(0);
    assert_eq!(picker.phase(), PickerPhase::TornDown);
    slot.borrow_mut().take();
}

struct CountingProvider {
    calls: Rc<Cell<usize>>,
}

impl CatalogProvider for CountingProvider {
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>> {
        self.calls.set(self.calls.get() + 1);
        Box::pin(async { Ok(sample_catalog()) })
    }
}

#[test]
fn catalog_is_requested_at_most_once() {
    let calls = Rc::new(Cell::new(0));
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(CountingProvider {
            calls: calls.clone(),
        }),
        MemoryAttributeStore::default(),
    );
    block_on(h.picker.load());
    block_on(h.picker.load());
    assert_eq!(calls.get(), 1);
    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
}

#[test]
fn zero_size_popup_is_accepted() {
    let h = loaded(PickerConfig {
        popup_width: 0,
        popup_height: 0,
        ..PickerConfig::default()
    });
    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("general.home-1.svg")
    );
}

#[test]
fn malformed_inline_catalog_fails_the_load_not_the_widget() {
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(InlineCatalogProvider::from_document(serde_json::json!({
            "categories": {"a": [{"file": "x.svg"}]}
        }))),
        MemoryAttributeStore::default(),
    );

    block_on(h.picker.load());
    h.store.flush();
    assert!(matches!(
        h.picker.phase(),
        PickerPhase::LoadFailed(ref reason) if reason.starts_with("catalog format invalid")
    ));
    assert_eq!(h.surface.load_error().as_deref(), Some(LOAD_ERROR_MESSAGE));
    assert_eq!(h.store.get(SELECTED_ICON_ATTR), None);
    assert_eq!(h.store.get(DETAILS_ATTR), None);
    h.surface.click_button();
    assert!(!picker_panel_open(&h));
}

#[test]
fn inline_catalog_is_applied_before_start_loading_returns() {
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(InlineCatalogProvider::new(sample_catalog())),
        MemoryAttributeStore::default(),
    );
    assert_eq!(h.store.get(SELECTED_ICON_ATTR), None);

    h.picker
        .start_loading(|_| panic!("a ready catalog must not be spawned"));
    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("general.home-1.svg")
    );
    assert_eq!(stored_record(&h.store).path, "general/home-1.svg");
}

struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

struct SlowProvider;

impl CatalogProvider for SlowProvider {
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>> {
        Box::pin(async {
            YieldOnce(false).await;
            Ok(sample_catalog())
        })
    }
}

#[test]
fn pending_catalog_is_handed_to_the_spawner() {
    let h = harness_with(
        PickerConfig::default(),
        Rc::new(SlowProvider),
        MemoryAttributeStore::default(),
    );
    let spawned = RefCell::new(None);
    h.picker.start_loading(|load| *spawned.borrow_mut() = Some(load));
    assert_eq!(h.picker.phase(), PickerPhase::Unloaded);
    assert_eq!(h.store.get(SELECTED_ICON_ATTR), None);

    block_on(spawned.into_inner().expect("load spawned"));
    assert_eq!(h.picker.phase(), PickerPhase::Loaded);
    assert_eq!(
        h.store.get(SELECTED_ICON_ATTR).as_deref(),
        Some("general.home-1.svg")
    );
}

fn picker_panel_open(h: &Harness) -> bool {
    use icon_picker_runtime::PickerSurface;
    h.surface.is_panel_open()
}
