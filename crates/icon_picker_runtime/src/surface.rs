//! View contract the controller drives, plus a recording implementation for headless hosts.

use std::{cell::RefCell, rc::Rc};

use icon_picker_contract::{PickerError, ScrollMetrics, Subscription};

use crate::model::{GridItem, PickerEvent};

/// Callback used by a surface to deliver [`PickerEvent`] values to its controller.
pub type EventSink = Rc<dyn Fn(PickerEvent)>;

/// Rendering and event surface for one widget instance.
///
/// Implementations own every node they create and must release them in
/// [`PickerSurface::teardown`].
pub trait PickerSurface {
    /// Shows `src` and `label` on the picker button.
    fn set_button_display(&self, src: &str, label: &str);

    /// Opens or closes the popup panel.
    fn set_panel_open(&self, open: bool);

    /// Current popup visibility.
    fn is_panel_open(&self) -> bool;

    /// Replaces the panel content with an inline error message.
    fn show_load_error(&self, message: &str);

    /// Rebuilds the panel: search input, category selector with `categories`, empty grid.
    fn build_category_selector(&self, categories: &[String]);

    /// Reflects `name` as the selector's current value.
    fn select_category(&self, name: &str);

    /// Empties the search input.
    fn clear_search(&self);

    /// Removes every rendered grid item.
    fn clear_grid(&self);

    /// Appends one rendered batch to the grid.
    fn append_grid_items(&self, items: &[GridItem]);

    /// Starts delivering widget-local UI events (button, selector, search, grid) to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when listeners cannot be attached.
    fn bind(&self, sink: EventSink) -> Result<Subscription, PickerError>;

    /// Delivers document-level clicks as [`PickerEvent::DocumentClicked`].
    ///
    /// # Errors
    ///
    /// Returns an error when the document is unavailable.
    fn subscribe_document_click(&self, sink: EventSink) -> Result<Subscription, PickerError>;

    /// Delivers [`PickerEvent::HostRemoved`] once the host leaves the document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be observed.
    fn watch_host_removal(&self, sink: EventSink) -> Result<Subscription, PickerError>;

    /// Detaches every node owned by this surface.
    fn teardown(&self);
}

#[derive(Default)]
struct RecordingState {
    button: Option<(String, String)>,
    panel_open: bool,
    load_error: Option<String>,
    categories: Vec<String>,
    selected_category: Option<String>,
    search_text: String,
    grid: Vec<GridItem>,
    batches: Vec<usize>,
    grid_clears: usize,
    torn_down: bool,
    ui_sink: Option<EventSink>,
    document_sink: Option<EventSink>,
    removal_sink: Option<EventSink>,
}

/// In-memory [`PickerSurface`] that records what the controller renders.
///
/// Its `click_*`/`type_*`/`scroll_*` helpers play the role of the DOM by emitting events into
/// whatever sinks are currently bound; detached sinks swallow events.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    inner: Rc<RefCell<RecordingState>>,
}

impl RecordingSurface {
    /// Current button `(src, label)`, if ever set.
    pub fn button(&self) -> Option<(String, String)> {
        self.inner.borrow().button.clone()
    }

    /// Inline load error, if shown.
    pub fn load_error(&self) -> Option<String> {
        self.inner.borrow().load_error.clone()
    }

    /// Category options currently offered.
    pub fn categories(&self) -> Vec<String> {
        self.inner.borrow().categories.clone()
    }

    /// Selector value.
    pub fn selected_category(&self) -> Option<String> {
        self.inner.borrow().selected_category.clone()
    }

    /// Search input text.
    pub fn search_text(&self) -> String {
        self.inner.borrow().search_text.clone()
    }

    /// Titles of every grid item currently rendered.
    pub fn grid_titles(&self) -> Vec<String> {
        self.inner
            .borrow()
            .grid
            .iter()
            .map(|item| item.title.clone())
            .collect()
    }

    /// Grid items currently rendered.
    pub fn grid(&self) -> Vec<GridItem> {
        self.inner.borrow().grid.clone()
    }

    /// Sizes of the batches appended since the grid was last cleared.
    pub fn batches(&self) -> Vec<usize> {
        self.inner.borrow().batches.clone()
    }

    /// Number of times the grid was cleared.
    pub fn grid_clears(&self) -> usize {
        self.inner.borrow().grid_clears
    }

    /// True after [`PickerSurface::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.inner.borrow().torn_down
    }

    /// True while the document click listener is attached.
    pub fn has_document_listener(&self) -> bool {
        self.inner.borrow().document_sink.is_some()
    }

    /// True while the host removal watcher is attached.
    pub fn has_removal_watcher(&self) -> bool {
        self.inner.borrow().removal_sink.is_some()
    }

    /// Clicks the picker button. The click does not reach the document listener.
    pub fn click_button(&self) {
        self.emit_ui(PickerEvent::ButtonClicked);
    }

    /// Clicks somewhere in the document.
    pub fn click_document(&self, inside: bool) {
        let sink = self.inner.borrow().document_sink.clone();
        if let Some(sink) = sink {
            sink(PickerEvent::DocumentClicked { inside });
        }
    }

    /// Picks a category in the selector.
    pub fn choose_category(&self, name: &str) {
        self.inner.borrow_mut().selected_category = Some(name.to_string());
        self.emit_ui(PickerEvent::CategoryChanged(name.to_string()));
    }

    /// Types `term` into the search input.
    pub fn type_search(&self, term: &str) {
        self.inner.borrow_mut().search_text = term.to_string();
        self.emit_ui(PickerEvent::SearchInput(term.to_string()));
    }

    /// Scrolls the grid to the given geometry.
    pub fn scroll_grid(&self, metrics: ScrollMetrics) {
        self.emit_ui(PickerEvent::GridScrolled(metrics));
    }

    /// Scrolls the grid all the way down.
    pub fn scroll_to_bottom(&self) {
        self.scroll_grid(ScrollMetrics {
            scroll_top: 770.0,
            client_height: 230.0,
            scroll_height: 1000.0,
        });
    }

    /// Clicks the grid item at `index`.
    pub fn click_item(&self, index: usize) {
        self.emit_ui(PickerEvent::ItemClicked(index));
    }

    /// Detaches the host element from the document.
    pub fn remove_host(&self) {
        let sink = self.inner.borrow().removal_sink.clone();
        if let Some(sink) = sink {
            sink(PickerEvent::HostRemoved);
        }
    }

    fn emit_ui(&self, event: PickerEvent) {
        let sink = self.inner.borrow().ui_sink.clone();
        if let Some(sink) = sink {
            sink(event);
        }
    }
}

impl PickerSurface for RecordingSurface {
    fn set_button_display(&self, src: &str, label: &str) {
        self.inner.borrow_mut().button = Some((src.to_string(), label.to_string()));
    }

    fn set_panel_open(&self, open: bool) {
        self.inner.borrow_mut().panel_open = open;
    }

    fn is_panel_open(&self) -> bool {
        self.inner.borrow().panel_open
    }

    fn show_load_error(&self, message: &str) {
        let mut state = self.inner.borrow_mut();
        state.load_error = Some(message.to_string());
        state.categories.clear();
        state.grid.clear();
    }

    fn build_category_selector(&self, categories: &[String]) {
        let mut state = self.inner.borrow_mut();
        state.categories = categories.to_vec();
        state.selected_category = None;
        state.search_text.clear();
        state.grid.clear();
        state.batches.clear();
    }

    fn select_category(&self, name: &str) {
        self.inner.borrow_mut().selected_category = Some(name.to_string());
    }

    fn clear_search(&self) {
        self.inner.borrow_mut().search_text.clear();
    }

    fn clear_grid(&self) {
        let mut state = self.inner.borrow_mut();
        state.grid.clear();
        state.batches.clear();
        state.grid_clears += 1;
    }

    fn append_grid_items(&self, items: &[GridItem]) {
        let mut state = self.inner.borrow_mut();
        state.batches.push(items.len());
        state.grid.extend_from_slice(items);
    }

    fn bind(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        self.inner.borrow_mut().ui_sink = Some(sink);
        let inner = self.inner.clone();
        Ok(Subscription::new(move || inner.borrow_mut().ui_sink = None))
    }

    fn subscribe_document_click(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        self.inner.borrow_mut().document_sink = Some(sink);
        let inner = self.inner.clone();
        Ok(Subscription::new(move || {
            inner.borrow_mut().document_sink = None
        }))
    }

    fn watch_host_removal(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        self.inner.borrow_mut().removal_sink = Some(sink);
        let inner = self.inner.clone();
        Ok(Subscription::new(move || {
            inner.borrow_mut().removal_sink = None
        }))
    }

    fn teardown(&self) {
        let mut state = self.inner.borrow_mut();
        state.torn_down = true;
        state.panel_open = false;
        state.grid.clear();
        state.categories.clear();
    }
}
