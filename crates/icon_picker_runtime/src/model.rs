use icon_picker_contract::ScrollMetrics;

/// Lifecycle phase of a widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerPhase {
    /// Constructed; catalog load pending or in flight.
    Unloaded,
    /// Catalog available, selector built, button enabled.
    Loaded,
    /// Catalog load failed; the panel shows an inline error and the button is inert.
    LoadFailed(String),
    /// Terminal; listeners detached and owned nodes removed.
    TornDown,
}

impl PickerPhase {
    /// True once the catalog is available for interaction.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// True after teardown.
    pub fn is_torn_down(&self) -> bool {
        matches!(self, Self::TornDown)
    }
}

/// One thumbnail in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    /// Index into the current filtered view; echoed back by [`PickerEvent::ItemClicked`].
    pub index: usize,
    /// Resolved image source.
    pub src: String,
    /// Hover title (the icon file name).
    pub title: String,
}

/// Inbound notifications delivered to a widget instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// The picker button was clicked.
    ButtonClicked,
    /// A click landed anywhere in the document; `inside` when within the button or panel.
    DocumentClicked {
        /// Whether the click target is inside the widget.
        inside: bool,
    },
    /// The category selector changed.
    CategoryChanged(String),
    /// The search input changed.
    SearchInput(String),
    /// The grid container scrolled.
    GridScrolled(ScrollMetrics),
    /// A grid thumbnail was clicked.
    ItemClicked(usize),
    /// One of the watched host attributes changed.
    AttributesChanged,
    /// The host element is no longer attached to the document.
    HostRemoved,
}
