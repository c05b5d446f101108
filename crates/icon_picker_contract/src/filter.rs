//! Category and search filtering over a loaded [`Catalog`].

use crate::catalog::{Catalog, Icon};

/// The icon sequence currently eligible for rendering.
///
/// Views are recomputed from scratch on every category or search change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    /// Icons in display order.
    pub icons: Vec<Icon>,
    /// Fixed category label when the view is a single category; `None` for search results.
    pub category: Option<String>,
}

impl FilteredView {
    /// All icons of `name`, verbatim. Unknown categories produce an empty view.
    pub fn by_category(catalog: &Catalog, name: &str) -> Self {
        Self {
            icons: catalog
                .category(name)
                .map(|category| category.icons.clone())
                .unwrap_or_default(),
            category: Some(name.to_string()),
        }
    }

    /// Icons whose file name contains `term`, ignoring case, in category-then-list order.
    ///
    /// Callers decide what an empty term means before calling this.
    pub fn by_search(catalog: &Catalog, term: &str) -> Self {
        let needle = term.to_lowercase();
        Self {
            icons: catalog
                .icons()
                .filter(|icon| icon.file.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            category: None,
        }
    }

    /// Number of icons in the view.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Returns true when the view holds no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
