//! JavaScript entry point: `new IconPickerWidget({ el, onPick, ...options })`.

use std::rc::Rc;

use icon_picker_contract::{
    CatalogProvider, InlineCatalogProvider, PickedIcon, PickerConfig, PickerError,
};
use icon_picker_runtime::{IconPicker, PickCallback, PickerHost, PickerSurface};
use leptos::{logging, spawn_local};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{prelude::*, JsCast};

use crate::{
    attributes::DomAttributeStore,
    catalog_url::{document_script_sources, resolve_catalog_url},
    dom_surface::DomPickerSurface,
    fetch::FetchCatalogProvider,
    style::inject_stylesheet,
};

const HOST_KEY: &str = "el";
const CALLBACK_KEY: &str = "onPick";

/// Handle returned to JavaScript for one mounted picker.
#[wasm_bindgen]
pub struct IconPickerWidget {
    picker: IconPicker,
}

#[wasm_bindgen]
impl IconPickerWidget {
    /// Mounts a picker into `options.el` and starts loading the catalog.
    ///
    /// Recognized options: `el` (required host element), `onPick`, `popupWidth`, `popupHeight`,
    /// `direction`, `buttonWidth`, `ignoreList`, `jsonUrl`, `jsonObject`, `defaultCategory`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<IconPickerWidget, JsValue> {
        console_error_panic_hook::set_once();
        mount(&options).map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))
    }

    /// Detaches listeners and removes the widget's nodes. Safe to call repeatedly.
    pub fn destroy(&self) {
        self.picker.destroy();
    }
}

fn mount(options: &JsValue) -> Result<IconPickerWidget, PickerError> {
    let host = read_host_element(options)?;
    let on_pick = read_pick_callback(options);
    let config = read_config(options)?;

    let document = host
        .owner_document()
        .ok_or_else(|| PickerError::HostUnavailable("host has no document".to_string()))?;
    inject_stylesheet(&document)?;

    let provider: Rc<dyn CatalogProvider> = match config.json_object.clone() {
        Some(document) => Rc::new(InlineCatalogProvider::from_document(document)),
        None => Rc::new(FetchCatalogProvider::new(resolve_catalog_url(
            config.json_url.as_deref(),
            document_script_sources(&document),
        ))),
    };

    let surface = Rc::new(DomPickerSurface::mount(&host, &config)?);
    let picker = IconPicker::create(
        config,
        PickerHost {
            store: Rc::new(DomAttributeStore::new(host.into())),
            surface: surface.clone(),
            provider,
            on_pick,
        },
    )
    .map_err(|err| {
        surface.teardown();
        err
    })?;

    picker.start_loading(spawn_local);
    Ok(IconPickerWidget { picker })
}

fn read_host_element(options: &JsValue) -> Result<web_sys::HtmlElement, PickerError> {
    js_sys::Reflect::get(options, &JsValue::from_str(HOST_KEY))
        .ok()
        .and_then(|value| value.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| {
            PickerError::InvalidConfig(format!("`{HOST_KEY}` must be an HTML element"))
        })
}

fn read_pick_callback(options: &JsValue) -> Option<PickCallback> {
    let function = js_sys::Reflect::get(options, &JsValue::from_str(CALLBACK_KEY))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    Some(Rc::new(move |picked: &PickedIcon| {
        let payload = match picked.serialize(&Serializer::json_compatible()) {
            Ok(payload) => payload,
            Err(err) => {
                logging::warn!("icon picker: failed to serialize pick payload: {err}");
                return;
            }
        };
        if let Err(err) = function.call1(&JsValue::NULL, &payload) {
            logging::warn!("icon picker: onPick threw: {err:?}");
        }
    }))
}

fn read_config(options: &JsValue) -> Result<PickerConfig, PickerError> {
    if options.is_undefined() || options.is_null() {
        return Ok(PickerConfig::default());
    }
    let source = options
        .dyn_ref::<js_sys::Object>()
        .ok_or_else(|| PickerError::InvalidConfig("options must be an object".to_string()))?;

    // Host handles are not serde data.
    let plain = js_sys::Object::assign(&js_sys::Object::new(), source);
    for key in [HOST_KEY, CALLBACK_KEY] {
        if let Err(err) = js_sys::Reflect::delete_property(&plain, &JsValue::from_str(key)) {
            logging::warn!("icon picker: could not strip `{key}` from options: {err:?}");
        }
    }
    serde_wasm_bindgen::from_value(plain.into())
        .map_err(|err| PickerError::InvalidConfig(err.to_string()))
}
