//! Catalog provider fetching the catalog document over HTTP.

use icon_picker_contract::{CatalogFuture, CatalogProvider, PickerError, RawCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser catalog provider backed by `window.fetch`.
pub struct FetchCatalogProvider {
    url: String,
}

impl FetchCatalogProvider {
    /// Provider fetching `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// URL the catalog is requested from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogProvider for FetchCatalogProvider {
    fn load_catalog<'a>(&'a self) -> CatalogFuture<'a, Result<RawCatalog, PickerError>> {
        Box::pin(async move {
            let text = fetch_text(&self.url)
                .await
                .map_err(|err| PickerError::CatalogLoad(format!("{}: {err}", self.url)))?;
            icon_picker_contract::catalog_from_json(&text)
        })
    }
}

async fn fetch_text(url: &str) -> Result<String, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
        Err("catalog fetch is only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        use crate::interop::js_error_to_string;

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_error_to_string)?
            .dyn_into::<web_sys::Response>()
            .map_err(|_| "fetch did not resolve to a Response".to_string())?;
        if !response.ok() {
            return Err(format!("HTTP {}", response.status()));
        }
        let body = response.text().map_err(js_error_to_string)?;
        JsFuture::from(body)
            .await
            .map_err(js_error_to_string)?
            .as_string()
            .ok_or_else(|| "response body is not text".to_string())
    }
}
