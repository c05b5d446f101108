//! Catalog provider contracts.

use std::{future::Future, pin::Pin};

use crate::{
    catalog::{catalog_from_value, RawCatalog},
    error::PickerError,
};

/// Object-safe boxed future used by [`CatalogProvider`].
pub type CatalogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Source of the icon catalog document.
pub trait CatalogProvider {
    /// Produces the catalog document once.
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>>;
}

#[derive(Debug, Clone)]
enum InlineSource {
    Parsed(RawCatalog),
    Document(serde_json::Value),
}

impl Default for InlineSource {
    fn default() -> Self {
        Self::Parsed(RawCatalog::default())
    }
}

#[derive(Debug, Clone, Default)]
/// Provider for catalogs supplied inline at construction time.
pub struct InlineCatalogProvider {
    source: InlineSource,
}

impl InlineCatalogProvider {
    /// Wraps an already parsed catalog.
    pub fn new(catalog: RawCatalog) -> Self {
        Self {
            source: InlineSource::Parsed(catalog),
        }
    }

    /// Wraps an unparsed catalog document; it is parsed when the catalog is loaded.
    pub fn from_document(document: serde_json::Value) -> Self {
        Self {
            source: InlineSource::Document(document),
        }
    }
}

impl CatalogProvider for InlineCatalogProvider {
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>> {
        Box::pin(async move {
            match &self.source {
                InlineSource::Parsed(catalog) => Ok(catalog.clone()),
                InlineSource::Document(document) => catalog_from_value(document.clone()),
            }
        })
    }
}

#[derive(Debug, Clone)]
/// Provider that always fails; stands in for unreachable catalog sources.
pub struct UnavailableCatalogProvider {
    reason: String,
}

impl UnavailableCatalogProvider {
    /// Provider failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CatalogProvider for UnavailableCatalogProvider {
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>> {
        Box::pin(async move { Err(PickerError::CatalogLoad(self.reason.clone())) })
    }
}
