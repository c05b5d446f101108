//! Error taxonomy shared by picker hosts and the widget runtime.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced across the picker contract boundary.
///
/// None of these are fatal to the hosting page: the runtime degrades its own display instead.
pub enum PickerError {
    /// The catalog provider could not produce a catalog (network, IO, or host failure).
    #[error("catalog load failed: {0}")]
    CatalogLoad(String),
    /// The provider produced a payload that is not a valid catalog document.
    #[error("catalog format invalid: {0}")]
    CatalogFormat(String),
    /// Construction options were rejected.
    #[error("invalid picker config: {0}")]
    InvalidConfig(String),
    /// The host attribute store refused a write.
    #[error("attribute write failed: {0}")]
    AttributeWrite(String),
    /// The host environment (document, element) is not reachable.
    #[error("host unavailable: {0}")]
    HostUnavailable(String),
}
