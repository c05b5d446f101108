//! Icon catalog document and the filtered, lookup-ready catalog model.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{error::PickerError, selection::Selection};

/// A single icon asset inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// File name; unique within its category.
    pub file: String,
    /// Asset path relative to the catalog base URL.
    pub path: String,
}

impl Icon {
    /// Creates an icon record.
    pub fn new(file: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path: path.into(),
        }
    }

    /// Display label for the button: the file name with its first `.svg` removed.
    pub fn label(&self) -> String {
        self.file.replacen(".svg", "", 1)
    }
}

/// Catalog document as produced by a provider, before exclusion and normalization.
///
/// Category order is the document's key order and is preserved through (de)serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalog {
    /// Base URL prepended to every icon path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Ordered `category name -> icons` mapping.
    #[serde(default, with = "ordered_categories")]
    pub categories: Vec<(String, Vec<Icon>)>,
}

/// Parses a catalog document from JSON text.
///
/// # Errors
///
/// Returns [`PickerError::CatalogFormat`] when the text is not a catalog document.
pub fn catalog_from_json(raw_json: &str) -> Result<RawCatalog, PickerError> {
    serde_json::from_str(raw_json).map_err(|err| PickerError::CatalogFormat(err.to_string()))
}

/// Parses a catalog document already decoded into a JSON value.
///
/// # Errors
///
/// Returns [`PickerError::CatalogFormat`] when the value is not a catalog document.
pub fn catalog_from_value(document: serde_json::Value) -> Result<RawCatalog, PickerError> {
    serde_json::from_value(document).map_err(|err| PickerError::CatalogFormat(err.to_string()))
}

mod ordered_categories {
    use super::*;

    pub fn serialize<S: Serializer>(
        categories: &[(String, Vec<Icon>)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(categories.len()))?;
        for (name, icons) in categories {
            map.serialize_entry(name, icons)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, Vec<Icon>)>, D::Error> {
        deserializer.deserialize_option(OptionalCategoriesVisitor)
    }

    struct OptionalCategoriesVisitor;

    impl<'de> Visitor<'de> for OptionalCategoriesVisitor {
        type Value = Vec<(String, Vec<Icon>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of category names to icon lists")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D: Deserializer<'de>>(
            self,
            deserializer: D,
        ) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_map(CategoriesVisitor)
        }
    }

    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<(String, Vec<Icon>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of category names to icon lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut categories: Vec<(String, Vec<Icon>)> =
                Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, icons)) = access.next_entry::<String, Vec<Icon>>()? {
                // A repeated key keeps its first position and its last value.
                match categories.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(slot) => slot.1 = icons,
                    None => categories.push((name, icons)),
                }
            }
            Ok(categories)
        }
    }
}

/// A named, ordered group of icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name; unique within the catalog.
    pub name: String,
    /// Icons in provider order.
    pub icons: Vec<Icon>,
}

/// Loaded catalog with ignored categories removed and a normalized base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    base_url: String,
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds the catalog from a provider document, dropping every category named in
    /// `ignore_list` before anything else can observe it.
    pub fn load(raw: RawCatalog, ignore_list: &[String]) -> Self {
        let categories = raw
            .categories
            .into_iter()
            .filter(|(name, _)| !ignore_list.iter().any(|ignored| ignored == name))
            .map(|(name, icons)| Category { name, icons })
            .collect();
        Self {
            base_url: normalize_base_url(raw.base_url.as_deref()),
            categories,
        }
    }

    /// Base URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Categories in iteration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in iteration order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    /// Returns a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Returns true when no categories remain.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All icons flattened in category-then-list order.
    pub fn icons(&self) -> impl Iterator<Item = &Icon> {
        self.categories
            .iter()
            .flat_map(|category| category.icons.iter())
    }

    /// First icon (in iteration order) whose file name equals `file`.
    ///
    /// Names that collide across categories resolve to the earliest category.
    pub fn lookup_by_name(&self, file: &str) -> Option<&Icon> {
        self.icons().find(|icon| icon.file == file)
    }

    /// First category (in iteration order) containing an icon named `file`.
    pub fn category_of(&self, file: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.icons.iter().any(|icon| icon.file == file))
            .map(|category| category.name.as_str())
    }

    /// Resolves the preferred category when present, else the first category.
    pub fn resolve_default_category(&self, preferred: Option<&str>) -> Option<&str> {
        preferred
            .and_then(|name| self.category(name))
            .or_else(|| self.categories.first())
            .map(|category| category.name.as_str())
    }

    /// First icon of the default category, or [`Selection::empty`] when nothing is available.
    pub fn default_icon(&self, preferred: Option<&str>) -> Selection {
        let Some(category) = self.resolve_default_category(preferred) else {
            return Selection::empty();
        };
        match self.category(category).and_then(|c| c.icons.first()) {
            Some(icon) => Selection::for_icon(icon, Some(category)),
            None => Selection::empty(),
        }
    }

    /// Absolute asset URL for an icon.
    pub fn full_url(&self, icon: &Icon) -> String {
        format!("{}{}", self.base_url, icon.path)
    }
}

fn normalize_base_url(raw: Option<&str>) -> String {
    match raw {
        Some(url) if url.ends_with('/') => url.to_string(),
        Some(url) => format!("{url}/"),
        None => "/".to_string(),
    }
}
