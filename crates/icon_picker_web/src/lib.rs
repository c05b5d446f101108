//! Browser (`wasm32`) host for the icon picker widget.
//!
//! This crate wires [`icon_picker_runtime::IconPicker`] to the DOM: the host element's
//! attributes become the widget's [`icon_picker_contract::AttributeStore`], the button and popup
//! panel are rendered by `DomPickerSurface`, and catalogs are fetched over HTTP unless supplied
//! inline. JavaScript constructs instances through `IconPickerWidget`.
//!
//! Pure helpers (catalog URL resolution, style properties) build on every target so they can be
//! tested natively; DOM-bound modules compile for `wasm32` only.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog_url;
pub mod fetch;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod attributes;
#[cfg(target_arch = "wasm32")]
pub mod dom_surface;
#[cfg(target_arch = "wasm32")]
mod interop;
#[cfg(target_arch = "wasm32")]
pub mod widget;

pub use catalog_url::{resolve_catalog_url, script_directory, WIDGET_SCRIPT_MARKER};
pub use fetch::FetchCatalogProvider;
pub use style::{button_style_properties, panel_style_properties, STYLESHEET};

#[cfg(target_arch = "wasm32")]
pub use attributes::DomAttributeStore;
#[cfg(target_arch = "wasm32")]
pub use dom_surface::DomPickerSurface;
#[cfg(target_arch = "wasm32")]
pub use widget::IconPickerWidget;
