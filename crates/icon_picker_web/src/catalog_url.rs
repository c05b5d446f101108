//! Default catalog location resolution.

use icon_picker_contract::DEFAULT_CATALOG_FILE;

/// Substring identifying the widget's own loader script among the page's `<script>` tags.
pub const WIDGET_SCRIPT_MARKER: &str = "icon_picker_web";

/// Directory prefix used when the widget script cannot be located.
pub const FALLBACK_DIRECTORY: &str = "./";

/// Everything up to and including the last `/` of a script URL.
pub fn script_directory(src: &str) -> &str {
    match src.rfind('/') {
        Some(slash) => &src[..=slash],
        None => "",
    }
}

/// Catalog URL to fetch: the configured URL when non-empty, else [`DEFAULT_CATALOG_FILE`] next
/// to the first script whose source contains [`WIDGET_SCRIPT_MARKER`].
pub fn resolve_catalog_url<I, S>(configured: Option<&str>, script_sources: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(url) = configured.filter(|url| !url.is_empty()) {
        return url.to_string();
    }
    let directory = script_sources
        .into_iter()
        .find(|src| src.as_ref().contains(WIDGET_SCRIPT_MARKER))
        .map(|src| script_directory(src.as_ref()).to_string())
        .unwrap_or_else(|| FALLBACK_DIRECTORY.to_string());
    format!("{directory}{DEFAULT_CATALOG_FILE}")
}

/// `src` of every `<script>` element in `document`, in document order.
#[cfg(target_arch = "wasm32")]
pub fn document_script_sources(document: &web_sys::Document) -> Vec<String> {
    use wasm_bindgen::JsCast;

    let scripts = document.get_elements_by_tag_name("script");
    (0..scripts.length())
        .filter_map(|index| scripts.item(index))
        .filter_map(|element| element.dyn_into::<web_sys::HtmlScriptElement>().ok())
        .map(|script| script.src())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn configured_url_wins() {
        assert_eq!(
            resolve_catalog_url(Some("/data/icons.json"), ["https://x/icon_picker_web.js"]),
            "/data/icons.json"
        );
    }

    #[test]
    fn empty_configured_url_counts_as_unset() {
        assert_eq!(
            resolve_catalog_url(Some(""), ["https://cdn.example/pkg/icon_picker_web.js"]),
            "https://cdn.example/pkg/icon-categories.json"
        );
    }

    #[test]
    fn first_matching_script_directory_is_used() {
        let sources = [
            "https://cdn.example/vendor/app.js",
            "https://cdn.example/widgets/icon_picker_web.js",
            "https://other.example/icon_picker_web.js",
        ];
        assert_eq!(
            resolve_catalog_url(None, sources),
            "https://cdn.example/widgets/icon-categories.json"
        );
    }

    #[test]
    fn falls_back_to_relative_directory() {
        assert_eq!(
            resolve_catalog_url(None, Vec::<String>::new()),
            "./icon-categories.json"
        );
        assert_eq!(
            resolve_catalog_url(None, ["/main.js".to_string()]),
            "./icon-categories.json"
        );
    }

    #[test]
    fn script_directory_keeps_trailing_slash() {
        assert_eq!(script_directory("https://a/b/c.js"), "https://a/b/");
        assert_eq!(script_directory("icon_picker_web.js"), "");
    }
}
