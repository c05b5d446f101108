//! Host element attribute store backed by the live DOM.

use icon_picker_contract::{AttributeListener, AttributeStore, PickerError, Subscription};

use crate::interop::{js_error_to_string, observe_mutations};

/// [`AttributeStore`] over a host element's attributes.
///
/// Change notifications come from a `MutationObserver` filtered to the watched names, so they
/// arrive after the writing task finishes and never re-enter the writer.
#[derive(Debug, Clone)]
pub struct DomAttributeStore {
    element: web_sys::Element,
}

impl DomAttributeStore {
    /// Store over `element`.
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }
}

impl AttributeStore for DomAttributeStore {
    fn get(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set(&self, name: &str, value: &str) -> Result<(), PickerError> {
        self.element
            .set_attribute(name, value)
            .map_err(|err| {
                PickerError::AttributeWrite(format!("{name}: {}", js_error_to_string(err)))
            })
    }

    fn subscribe(
        &self,
        names: &[&str],
        listener: AttributeListener,
    ) -> Result<Subscription, PickerError> {
        let filter = js_sys::Array::new();
        for name in names {
            filter.push(&(*name).into());
        }
        let init = web_sys::MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&filter);
        observe_mutations(&self.element, &init, move || listener())
    }
}
