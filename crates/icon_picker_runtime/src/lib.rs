//! Behavioral engine of the icon picker widget.
//!
//! The runtime is written against the `icon_picker_contract` service traits and a
//! [`PickerSurface`] view contract, so the same state machine drives the browser DOM adapter in
//! `icon_picker_web` and the in-memory [`RecordingSurface`] used by headless hosts and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod controller;
pub mod model;
pub mod renderer;
pub mod surface;

pub use bridge::{
    ensure_default_selection, persist_selection, resolve_icon_name, DETAILS_ATTR,
    SELECTED_ICON_ATTR, WATCHED_ATTRS,
};
pub use controller::{IconPicker, PickCallback, PickerHost, LOAD_ERROR_MESSAGE};
pub use model::{GridItem, PickerEvent, PickerPhase};
pub use renderer::IncrementalRenderer;
pub use surface::{EventSink, PickerSurface, RecordingSurface};
