//! Typed, host-agnostic contracts for the icon picker widget.
//!
//! This crate holds the catalog model, filter engine, batch pager, persisted-selection records,
//! and the service traits (attribute store, catalog provider) the runtime is written against.
//! Browser implementations live in `icon_picker_web`; the widget state machine lives in
//! `icon_picker_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod pager;
pub mod provider;
pub mod selection;
pub mod store;
pub mod subscription;

pub use catalog::{catalog_from_json, catalog_from_value, Catalog, Category, Icon, RawCatalog};
pub use config::{
    PickerConfig, PopupDirection, DEFAULT_BUTTON_WIDTH, DEFAULT_CATALOG_FILE,
    DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH,
};
pub use error::PickerError;
pub use filter::FilteredView;
pub use pager::{BatchPager, ScrollMetrics, BATCH_SIZE, SCROLL_THRESHOLD_PX};
pub use provider::{
    CatalogFuture, CatalogProvider, InlineCatalogProvider, UnavailableCatalogProvider,
};
pub use selection::{format_ref, split_ref, PickedIcon, Selection, REF_SEPARATOR};
pub use store::{AttributeListener, AttributeStore, MemoryAttributeStore};
pub use subscription::Subscription;
