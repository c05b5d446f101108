//! Widget controller: catalog loading, UI event handling, and lifecycle.
//!
//! One [`IconPicker`] owns one host element's worth of state. Every inbound notification
//! (surface events, attribute changes, host removal, catalog completion) is handled while the
//! instance state is borrowed; callbacks into the embedding application and teardown run after
//! that borrow is released, so a pick callback may destroy the picker.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::{Rc, Weak},
    task::Context,
};

use futures::{future::LocalBoxFuture, task::noop_waker_ref};
use icon_picker_contract::{
    AttributeStore, Catalog, CatalogProvider, FilteredView, PickedIcon, PickerConfig, PickerError,
    RawCatalog, Subscription,
};
use leptos::logging;

use crate::{
    bridge,
    model::{PickerEvent, PickerPhase},
    renderer::IncrementalRenderer,
    surface::{EventSink, PickerSurface},
};

/// Message shown in the panel when the catalog cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load icons";

/// Callback receiving every user-driven pick.
pub type PickCallback = Rc<dyn Fn(&PickedIcon)>;

/// Host services injected into a widget instance.
#[derive(Clone)]
pub struct PickerHost {
    /// The host element's attribute store.
    pub store: Rc<dyn AttributeStore>,
    /// Rendering and event surface.
    pub surface: Rc<dyn PickerSurface>,
    /// Catalog source.
    pub provider: Rc<dyn CatalogProvider>,
    /// Optional pick callback.
    pub on_pick: Option<PickCallback>,
}

struct PickerInner {
    config: PickerConfig,
    phase: PickerPhase,
    catalog: Option<Catalog>,
    renderer: IncrementalRenderer,
    current_category: Option<String>,
    store: Rc<dyn AttributeStore>,
    surface: Rc<dyn PickerSurface>,
    on_pick: Option<PickCallback>,
    subscriptions: Vec<Subscription>,
}

enum Followup {
    None,
    Picked(PickCallback, PickedIcon),
    Teardown,
}

/// Handle to a live (or torn-down) widget instance. Clones share the instance.
#[derive(Clone)]
pub struct IconPicker {
    inner: Rc<RefCell<PickerInner>>,
    provider: Rc<dyn CatalogProvider>,
    load_started: Rc<Cell<bool>>,
}

impl IconPicker {
    /// Builds the instance and attaches its listeners. The catalog is not requested until
    /// [`IconPicker::load`] is polled.
    ///
    /// # Errors
    ///
    /// Returns an error when a listener cannot be attached; anything attached before the failure
    /// is detached again.
    pub fn create(config: PickerConfig, host: PickerHost) -> Result<Self, PickerError> {
        let inner = Rc::new(RefCell::new(PickerInner {
            config,
            phase: PickerPhase::Unloaded,
            catalog: None,
            renderer: IncrementalRenderer::default(),
            current_category: None,
            store: host.store.clone(),
            surface: host.surface.clone(),
            on_pick: host.on_pick,
            subscriptions: Vec::new(),
        }));

        let sink = event_sink(Rc::downgrade(&inner));
        let listener_sink = sink.clone();
        let subscriptions = vec![
            host.surface.bind(sink.clone())?,
            host.surface.subscribe_document_click(sink.clone())?,
            host.store.subscribe(
                &bridge::WATCHED_ATTRS,
                Rc::new(move || listener_sink(PickerEvent::AttributesChanged)),
            )?,
            host.surface.watch_host_removal(sink)?,
        ];
        {
            let mut state = inner.borrow_mut();
            state.subscriptions = subscriptions;
            state.refresh_display();
        }

        Ok(Self {
            inner,
            provider: host.provider,
            load_started: Rc::new(Cell::new(false)),
        })
    }

    /// Starts [`IconPicker::load`] by polling it once in place, then hands it to `spawn` only if
    /// it is still pending. A catalog that is ready immediately (an inline document) is applied
    /// before this returns.
    pub fn start_loading(&self, spawn: impl FnOnce(LocalBoxFuture<'static, ()>)) {
        let mut load = self.load();
        let mut cx = Context::from_waker(noop_waker_ref());
        if load.as_mut().poll(&mut cx).is_pending() {
            spawn(load);
        }
    }

    /// Loads the catalog once. Later calls resolve immediately without reloading.
    ///
    /// The future only holds a weak reference to the instance, so a picker destroyed while the
    /// load is in flight simply ignores the result.
    pub fn load(&self) -> LocalBoxFuture<'static, ()> {
        if self.load_started.replace(true) {
            return Box::pin(async {});
        }
        let weak = Rc::downgrade(&self.inner);
        let provider = self.provider.clone();
        Box::pin(async move {
            let result = provider.load_catalog().await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Ok(mut state) = inner.try_borrow_mut() else {
                logging::warn!("icon picker: catalog arrived while instance busy; dropped");
                return;
            };
            state.apply_catalog(result);
        })
    }

    /// Delivers an event as if it came from the surface.
    pub fn dispatch(&self, event: PickerEvent) {
        dispatch(&self.inner, event);
    }

    /// Detaches every listener and owned node. Safe to call repeatedly.
    pub fn destroy(&self) {
        teardown(&self.inner);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PickerPhase {
        self.inner.borrow().phase.clone()
    }

    /// Category the grid shows when no search is active.
    pub fn current_category(&self) -> Option<String> {
        self.inner.borrow().current_category.clone()
    }

    /// Items rendered for the current grid sequence.
    pub fn rendered_count(&self) -> usize {
        self.inner.borrow().renderer.rendered_count()
    }

    /// Size of the current grid sequence.
    pub fn view_len(&self) -> usize {
        self.inner.borrow().renderer.view().len()
    }
}

fn event_sink(weak: Weak<RefCell<PickerInner>>) -> EventSink {
    Rc::new(move |event: PickerEvent| {
        if let Some(inner) = weak.upgrade() {
            dispatch(&inner, event);
        }
    })
}

fn dispatch(inner: &Rc<RefCell<PickerInner>>, event: PickerEvent) {
    let followup = match inner.try_borrow_mut() {
        Ok(mut state) => state.handle_event(event),
        Err(_) => {
            logging::warn!("icon picker: re-entrant event dropped: {event:?}");
            return;
        }
    };
    match followup {
        Followup::None => {}
        Followup::Picked(callback, picked) => callback(&picked),
        Followup::Teardown => teardown(inner),
    }
}

fn teardown(inner: &Rc<RefCell<PickerInner>>) {
    let Ok(mut state) = inner.try_borrow_mut() else {
        logging::warn!("icon picker: destroy requested while instance busy");
        return;
    };
    if state.phase.is_torn_down() {
        return;
    }
    state.phase = PickerPhase::TornDown;
    state.catalog = None;
    state.renderer.reset();
    state.current_category = None;
    state.on_pick = None;
    let subscriptions = std::mem::take(&mut state.subscriptions);
    let surface = state.surface.clone();
    drop(state);

    drop(subscriptions);
    surface.teardown();
}

impl PickerInner {
    fn handle_event(&mut self, event: PickerEvent) -> Followup {
        if self.phase.is_torn_down() {
            return Followup::None;
        }
        match event {
            PickerEvent::ButtonClicked => {
                if self.phase.is_loaded() {
                    let open = self.surface.is_panel_open();
                    self.surface.set_panel_open(!open);
                }
            }
            PickerEvent::DocumentClicked { inside } => {
                if !inside {
                    self.surface.set_panel_open(false);
                }
            }
            PickerEvent::CategoryChanged(name) => {
                if self.phase.is_loaded() {
                    self.surface.clear_search();
                    self.show_category(name);
                }
            }
            PickerEvent::SearchInput(term) => {
                if self.phase.is_loaded() {
                    self.search(&term);
                }
            }
            PickerEvent::GridScrolled(metrics) => {
                if let Some(catalog) = &self.catalog {
                    self.renderer
                        .on_scroll(metrics, catalog, self.surface.as_ref());
                }
            }
            PickerEvent::ItemClicked(index) => {
                if self.phase.is_loaded() {
                    return self.pick(index);
                }
            }
            PickerEvent::AttributesChanged => self.refresh_display(),
            PickerEvent::HostRemoved => return Followup::Teardown,
        }
        Followup::None
    }

    fn apply_catalog(&mut self, result: Result<RawCatalog, PickerError>) {
        if !matches!(self.phase, PickerPhase::Unloaded) {
            return;
        }
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                logging::error!("icon picker: failed to load icons: {err}");
                self.surface.show_load_error(LOAD_ERROR_MESSAGE);
                self.phase = PickerPhase::LoadFailed(err.to_string());
                return;
            }
        };

        let catalog = Catalog::load(raw, &self.config.ignore_list);
        let names: Vec<String> = catalog.category_names().map(str::to_string).collect();
        self.surface.build_category_selector(&names);
        let preload = catalog
            .resolve_default_category(self.config.preferred_category())
            .map(str::to_string);
        self.catalog = Some(catalog);
        if let Some(category) = preload {
            self.surface.select_category(&category);
            self.show_category(category);
        }
        self.phase = PickerPhase::Loaded;

        if let Some(catalog) = &self.catalog {
            if let Err(err) = bridge::ensure_default_selection(
                self.store.as_ref(),
                catalog,
                self.config.preferred_category(),
            ) {
                logging::warn!("icon picker: persisting default selection failed: {err}");
            }
        }
        self.refresh_display();
    }

    fn show_category(&mut self, name: String) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let view = FilteredView::by_category(catalog, &name);
        self.renderer.render(view, catalog, self.surface.as_ref());
        self.current_category = Some(name);
    }

    fn search(&mut self, term: &str) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        if term.trim().is_empty() {
            match self.current_category.clone() {
                Some(category) => self.show_category(category),
                None => {
                    self.renderer.reset();
                    self.surface.clear_grid();
                }
            }
            return;
        }
        let view = FilteredView::by_search(catalog, term);
        self.renderer.render(view, catalog, self.surface.as_ref());
    }

    fn pick(&mut self, index: usize) -> Followup {
        let Some(catalog) = &self.catalog else {
            return Followup::None;
        };
        let Some(selection) = self.renderer.selection_for(index, catalog) else {
            return Followup::None;
        };
        if let Err(err) = bridge::persist_selection(self.store.as_ref(), &selection) {
            logging::warn!("icon picker: writing selection failed: {err}");
        }
        self.surface.set_panel_open(false);
        logging::log!("icon picker: selected icon {}", selection.reference);

        let picked = PickedIcon {
            full_url: format!("{}{}", catalog.base_url(), selection.path),
            file: selection.icon,
            path: selection.path,
            reference: selection.reference,
        };
        match self.on_pick.clone() {
            Some(callback) => Followup::Picked(callback, picked),
            None => Followup::None,
        }
    }

    fn refresh_display(&self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let Some(name) = bridge::resolve_icon_name(self.store.as_ref()) else {
            return;
        };
        if let Some(icon) = catalog.lookup_by_name(&name) {
            self.surface
                .set_button_display(&catalog.full_url(icon), &icon.label());
        }
    }
}
