//! DOM rendering surface: button, popup panel, category selector, search input, and icon grid.
//!
//! Nodes are created once at mount and re-parented as the panel content changes, so listeners
//! bound to the search input, selector, and grid survive panel rebuilds.

use icon_picker_contract::{PickerConfig, PickerError, ScrollMetrics, Subscription};
use icon_picker_runtime::{EventSink, GridItem, PickerEvent, PickerSurface};
use leptos::logging;
use wasm_bindgen::JsCast;

use crate::{
    interop::{create, host_error, listen, observe_mutations},
    style,
};

const SEARCH_PLACEHOLDER: &str = "Search icons...";
const CATEGORY_PLACEHOLDER: &str = "-- Choose Category --";
const INDEX_ATTR: &str = "data-index";
const ERROR_CLASS: &str = "icon-picker-error";

/// [`PickerSurface`] rendering into a host element.
pub struct DomPickerSurface {
    document: web_sys::Document,
    host: web_sys::HtmlElement,
    wrapper: web_sys::HtmlElement,
    button: web_sys::HtmlElement,
    button_icon: web_sys::HtmlImageElement,
    button_label: web_sys::HtmlElement,
    panel: web_sys::HtmlElement,
    search: web_sys::HtmlInputElement,
    select: web_sys::HtmlSelectElement,
    grid: web_sys::HtmlElement,
}

impl DomPickerSurface {
    /// Builds the button and (closed, empty) panel and appends them to `host`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::HostUnavailable`] when nodes cannot be created or attached.
    pub fn mount(host: &web_sys::HtmlElement, config: &PickerConfig) -> Result<Self, PickerError> {
        let document = host
            .owner_document()
            .ok_or_else(|| PickerError::HostUnavailable("host has no document".to_string()))?;

        let wrapper: web_sys::HtmlElement = create(&document, "div")?;
        apply_styles(
            &wrapper,
            &[
                ("position", "relative".to_string()),
                ("display", "inline-block".to_string()),
            ],
        )?;

        let button: web_sys::HtmlElement = create(&document, "div")?;
        button.set_class_name(style::BUTTON_CLASS);
        apply_styles(&button, &style::button_style_properties(config))?;
        let button_icon: web_sys::HtmlImageElement = create(&document, "img")?;
        let button_label: web_sys::HtmlElement = create(&document, "span")?;
        append(&button, &button_icon)?;
        append(&button, &button_label)?;

        let panel: web_sys::HtmlElement = create(&document, "div")?;
        panel.set_class_name(style::PANEL_CLASS);
        apply_styles(&panel, &style::panel_style_properties(config))?;

        let search: web_sys::HtmlInputElement = create(&document, "input")?;
        search.set_type("text");
        search.set_placeholder(SEARCH_PLACEHOLDER);
        let select: web_sys::HtmlSelectElement = create(&document, "select")?;
        let grid: web_sys::HtmlElement = create(&document, "div")?;
        grid.set_class_name(style::GRID_CLASS);

        append(&wrapper, &button)?;
        append(&wrapper, &panel)?;
        append(host, &wrapper)?;

        Ok(Self {
            document,
            host: host.clone(),
            wrapper,
            button,
            button_icon,
            button_label,
            panel,
            search,
            select,
            grid,
        })
    }

    fn try_show_load_error(&self, message: &str) -> Result<(), PickerError> {
        self.panel.set_inner_html("");
        let paragraph: web_sys::HtmlElement = create(&self.document, "p")?;
        paragraph.set_class_name(ERROR_CLASS);
        paragraph.set_text_content(Some(message));
        append(&self.panel, &paragraph)
    }

    fn try_build_category_selector(&self, categories: &[String]) -> Result<(), PickerError> {
        self.panel.set_inner_html("");
        self.search.set_value("");
        self.select.set_inner_html("");
        self.grid.set_inner_html("");

        let placeholder: web_sys::HtmlOptionElement = create(&self.document, "option")?;
        placeholder.set_text_content(Some(CATEGORY_PLACEHOLDER));
        placeholder.set_disabled(true);
        placeholder.set_selected(true);
        append(&self.select, &placeholder)?;
        for name in categories {
            let option: web_sys::HtmlOptionElement = create(&self.document, "option")?;
            option.set_value(name);
            option.set_text_content(Some(name));
            append(&self.select, &option)?;
        }

        append(&self.panel, &self.search)?;
        append(&self.panel, &self.select)?;
        append(&self.panel, &self.grid)
    }

    fn try_append_grid_items(&self, items: &[GridItem]) -> Result<(), PickerError> {
        for item in items {
            let img: web_sys::HtmlImageElement = create(&self.document, "img")?;
            img.set_src(&item.src);
            img.set_title(&item.title);
            img.set_attribute(INDEX_ATTR, &item.index.to_string())
                .map_err(|err| host_error("failed to tag grid item", err))?;
            append(&self.grid, &img)?;
        }
        Ok(())
    }
}

impl PickerSurface for DomPickerSurface {
    fn set_button_display(&self, src: &str, label: &str) {
        self.button_icon.set_src(src);
        self.button_label.set_text_content(Some(label));
    }

    fn set_panel_open(&self, open: bool) {
        let display = if open { "block" } else { "none" };
        report(
            "toggling panel",
            self.panel
                .style()
                .set_property("display", display)
                .map_err(|err| host_error("display", err)),
        );
    }

    fn is_panel_open(&self) -> bool {
        self.panel
            .style()
            .get_property_value("display")
            .map(|display| display == "block")
            .unwrap_or(false)
    }

    fn show_load_error(&self, message: &str) {
        report("showing load error", self.try_show_load_error(message));
    }

    fn build_category_selector(&self, categories: &[String]) {
        report(
            "building category selector",
            self.try_build_category_selector(categories),
        );
    }

    fn select_category(&self, name: &str) {
        self.select.set_value(name);
    }

    fn clear_search(&self) {
        self.search.set_value("");
    }

    fn clear_grid(&self) {
        self.grid.set_inner_html("");
        self.grid.set_scroll_top(0);
    }

    fn append_grid_items(&self, items: &[GridItem]) {
        report("rendering icons", self.try_append_grid_items(items));
    }

    fn bind(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        let mut subscriptions = Vec::with_capacity(5);

        let button_sink = sink.clone();
        subscriptions.push(listen(&self.button, "click", false, move |event| {
            event.stop_propagation();
            button_sink(PickerEvent::ButtonClicked);
        })?);

        let select = self.select.clone();
        let select_sink = sink.clone();
        subscriptions.push(listen(&self.select, "change", false, move |_| {
            select_sink(PickerEvent::CategoryChanged(select.value()));
        })?);

        let search = self.search.clone();
        let search_sink = sink.clone();
        subscriptions.push(listen(&self.search, "input", false, move |_| {
            search_sink(PickerEvent::SearchInput(search.value()));
        })?);

        let grid = self.grid.clone();
        let scroll_sink = sink.clone();
        subscriptions.push(listen(&self.grid, "scroll", false, move |_| {
            scroll_sink(PickerEvent::GridScrolled(scroll_metrics(&grid)));
        })?);

        subscriptions.push(listen(&self.grid, "click", false, move |event| {
            if let Some(index) = clicked_index(&event) {
                sink(PickerEvent::ItemClicked(index));
            }
        })?);

        Ok(Subscription::new(move || drop(subscriptions)))
    }

    fn subscribe_document_click(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        let wrapper = self.wrapper.clone();
        listen(&self.document, "click", false, move |event| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
                .map(|node| wrapper.contains(Some(&node)))
                .unwrap_or(false);
            sink(PickerEvent::DocumentClicked { inside });
        })
    }

    fn watch_host_removal(&self, sink: EventSink) -> Result<Subscription, PickerError> {
        let init = web_sys::MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        let host = self.host.clone();
        let root: web_sys::Node = match self.document.body() {
            Some(body) => body.into(),
            None => self.document.clone().into(),
        };
        observe_mutations(&root, &init, move || {
            if !host.is_connected() {
                sink(PickerEvent::HostRemoved);
            }
        })
    }

    fn teardown(&self) {
        self.wrapper.remove();
    }
}

fn scroll_metrics(grid: &web_sys::HtmlElement) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: f64::from(grid.scroll_top()),
        client_height: f64::from(grid.client_height()),
        scroll_height: f64::from(grid.scroll_height()),
    }
}

fn clicked_index(event: &web_sys::Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let item = target.closest(&format!("img[{INDEX_ATTR}]")).ok()??;
    item.get_attribute(INDEX_ATTR)?.parse().ok()
}

fn apply_styles(
    element: &web_sys::HtmlElement,
    properties: &[(&str, String)],
) -> Result<(), PickerError> {
    let style = element.style();
    for (name, value) in properties {
        style
            .set_property(name, value)
            .map_err(|err| host_error(&format!("failed to set {name}"), err))?;
    }
    Ok(())
}

fn append(parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), PickerError> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| host_error("failed to attach node", err))
}

fn report(context: &str, result: Result<(), PickerError>) {
    if let Err(err) = result {
        logging::warn!("icon picker: {context} failed: {err}");
    }
}
