//! Listener, observer, and error glue shared by the DOM adapters.
//!
//! Every registration is returned as a [`Subscription`] that owns its JS closure, so dropping the
//! subscription both detaches the handler and frees the closure.

use icon_picker_contract::{PickerError, Subscription};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

pub(crate) fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

pub(crate) fn host_error(context: &str, err: JsValue) -> PickerError {
    PickerError::HostUnavailable(format!("{context}: {}", js_error_to_string(err)))
}

pub(crate) fn document() -> Result<web_sys::Document, PickerError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| PickerError::HostUnavailable("document unavailable".to_string()))
}

pub(crate) fn create<T: JsCast>(
    document: &web_sys::Document,
    tag: &str,
) -> Result<T, PickerError> {
    document
        .create_element(tag)
        .map_err(|err| host_error(&format!("failed to create <{tag}>"), err))?
        .dyn_into::<T>()
        .map_err(|_| PickerError::HostUnavailable(format!("failed to cast <{tag}>")))
}

/// Registers `handler` for `kind` events on `target`.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    kind: &'static str,
    capture: bool,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<Subscription, PickerError> {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback_and_bool(
            kind,
            callback.as_ref().unchecked_ref(),
            capture,
        )
        .map_err(|err| host_error(&format!("failed to listen for {kind}"), err))?;

    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback_and_bool(
            kind,
            callback.as_ref().unchecked_ref(),
            capture,
        );
        drop(callback);
    }))
}

/// Starts a `MutationObserver` on `target`. `on_records` runs once per delivered batch.
pub(crate) fn observe_mutations(
    target: &web_sys::Node,
    init: &web_sys::MutationObserverInit,
    mut on_records: impl FnMut() + 'static,
) -> Result<Subscription, PickerError> {
    let callback = Closure::wrap(Box::new(
        move |records: js_sys::Array, _observer: web_sys::MutationObserver| {
            if records.length() > 0 {
                on_records();
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>);

    let observer = web_sys::MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|err| host_error("failed to create mutation observer", err))?;
    observer
        .observe_with_options(target, init)
        .map_err(|err| host_error("failed to start mutation observer", err))?;

    Ok(Subscription::new(move || {
        observer.disconnect();
        drop(callback);
    }))
}
