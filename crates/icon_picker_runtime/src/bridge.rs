//! Two-way sync between the persisted selection attributes and the widget.
//!
//! The host element carries the selection twice: a short reference and a JSON record. Writes
//! always go out as a pair; reads prefer the short reference when it is category-qualified.

use icon_picker_contract::{split_ref, AttributeStore, Catalog, PickerError, Selection};
use leptos::logging;
use serde_json::Value;

/// Attribute holding the short reference (`<category>.<file>` or `<file>`).
pub const SELECTED_ICON_ATTR: &str = "data-selected-icon";
/// Attribute holding the JSON-serialized [`Selection`].
pub const DETAILS_ATTR: &str = "data-details";
/// Attributes the bridge reacts to.
pub const WATCHED_ATTRS: [&str; 2] = [SELECTED_ICON_ATTR, DETAILS_ATTR];

fn read_non_empty(store: &dyn AttributeStore, name: &str) -> Option<String> {
    store.get(name).filter(|value| !value.is_empty())
}

/// True when either attribute carries a non-empty value.
pub fn has_persisted_selection(store: &dyn AttributeStore) -> bool {
    read_non_empty(store, SELECTED_ICON_ATTR).is_some()
        || read_non_empty(store, DETAILS_ATTR).is_some()
}

/// Resolves the icon file name the button should display.
///
/// Returns `None` when the display should be left as it is (unparseable record, nothing stored).
pub fn resolve_icon_name(store: &dyn AttributeStore) -> Option<String> {
    let short_ref = read_non_empty(store, SELECTED_ICON_ATTR);
    if let Some((_, file)) = short_ref.as_deref().and_then(split_ref) {
        return Some(file.to_string());
    }

    if let Some(details) = read_non_empty(store, DETAILS_ATTR) {
        match serde_json::from_str::<Value>(&details) {
            Ok(record) => {
                if let Some(icon) = record
                    .get("icon")
                    .and_then(Value::as_str)
                    .filter(|icon| !icon.is_empty())
                {
                    return Some(icon.to_string());
                }
            }
            Err(err) => {
                logging::warn!("icon picker: ignoring malformed {DETAILS_ATTR}: {err}");
                return None;
            }
        }
    }

    short_ref
}

/// Writes both attributes for `selection`.
///
/// The record is serialized before either write so a serialization failure leaves both
/// attributes untouched.
///
/// # Errors
///
/// Returns [`PickerError::AttributeWrite`] when serialization or a store write fails.
pub fn persist_selection(
    store: &dyn AttributeStore,
    selection: &Selection,
) -> Result<(), PickerError> {
    let record = selection.to_record_json()?;
    store.set(SELECTED_ICON_ATTR, &selection.reference)?;
    store.set(DETAILS_ATTR, &record)
}

/// Persists the catalog default when the host carries no selection yet.
///
/// Returns the selection that was written, if any.
///
/// # Errors
///
/// Propagates [`persist_selection`] failures.
pub fn ensure_default_selection(
    store: &dyn AttributeStore,
    catalog: &Catalog,
    preferred_category: Option<&str>,
) -> Result<Option<Selection>, PickerError> {
    if has_persisted_selection(store) {
        return Ok(None);
    }
    let selection = catalog.default_icon(preferred_category);
    persist_selection(store, &selection)?;
    Ok(Some(selection))
}
