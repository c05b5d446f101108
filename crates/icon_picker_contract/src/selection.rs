//! Persisted selection record and the outbound pick payload.

use serde::{Deserialize, Serialize};

use crate::{catalog::Icon, error::PickerError};

/// Separator between category and file name in a short reference.
pub const REF_SEPARATOR: char = '.';

/// The chosen icon as persisted on the host element.
///
/// The all-empty value is the "no icons available" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Icon file name.
    pub icon: String,
    /// Icon asset path relative to the catalog base URL.
    pub path: String,
    /// `<category>.<file>` when the category is known, else the bare file name.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl Selection {
    /// The empty sentinel selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true for the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.icon.is_empty() && self.path.is_empty() && self.reference.is_empty()
    }

    /// Builds a selection for `icon`, qualified by `category` when known.
    pub fn for_icon(icon: &Icon, category: Option<&str>) -> Self {
        Self {
            icon: icon.file.clone(),
            path: icon.path.clone(),
            reference: format_ref(category, &icon.file),
        }
    }

    /// Serializes the full record as stored in the details attribute.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::AttributeWrite`] when serialization fails.
    pub fn to_record_json(&self) -> Result<String, PickerError> {
        serde_json::to_string(self).map_err(|err| PickerError::AttributeWrite(err.to_string()))
    }
}

/// Formats a short reference.
pub fn format_ref(category: Option<&str>, file: &str) -> String {
    match category {
        Some(category) => format!("{category}{REF_SEPARATOR}{file}"),
        None => file.to_string(),
    }
}

/// Splits a short reference at its first separator into `(category, file)`.
///
/// Returns `None` when the reference carries no separator.
pub fn split_ref(reference: &str) -> Option<(&str, &str)> {
    reference.split_once(REF_SEPARATOR)
}

/// Payload handed to the embedding application on every user-driven pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedIcon {
    /// Icon file name.
    pub file: String,
    /// Icon asset path relative to the catalog base URL.
    pub path: String,
    /// Base URL joined with `path`.
    pub full_url: String,
    /// Short reference written to the host element.
    #[serde(rename = "ref")]
    pub reference: String,
}
