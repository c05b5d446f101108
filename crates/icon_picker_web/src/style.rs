//! Built-in stylesheet and per-instance inline style properties.

use icon_picker_contract::PickerConfig;

/// `id` of the injected `<style>` element; its presence marks the stylesheet as installed.
pub const STYLE_ELEMENT_ID: &str = "icon-picker-styles";

/// Class of the button element.
pub const BUTTON_CLASS: &str = "icon-picker-button";
/// Class of the popup panel element.
pub const PANEL_CLASS: &str = "icon-picker-panel";
/// Class of the grid container element.
pub const GRID_CLASS: &str = "icon-picker-grid";

/// Built-in widget stylesheet.
pub const STYLESHEET: &str = r#"
.icon-picker-grid {
  display: flex;
  flex-wrap: wrap;
  gap: 16px;
  max-height: 230px;
  overflow-y: auto;
  padding: 10px;
}
.icon-picker-grid img {
  width: 40px;
  height: 40px;
  padding: 8px;
  border-radius: 4px;
  cursor: pointer;
  transition: box-shadow 0.2s, border 0.2s, background 0.2s;
}
.icon-picker-grid img:hover {
  background: rgba(0, 0, 0, 0.04);
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
}
.icon-picker-button {
  display: flex;
  align-items: center;
  padding: 5px 10px;
  border: 1px solid #ccc;
  border-radius: 4px;
  cursor: pointer;
  background: #fafbfc;
  width: var(--icon-picker-btn-width, max-content);
  position: relative;
}
.icon-picker-button:hover {
  background: #f3f4f6;
}
.icon-picker-button img {
  width: 24px;
  height: 24px;
  margin-right: 8px;
}
.icon-picker-button span {
  flex-grow: 1;
  text-align: left;
}
.icon-picker-panel {
  display: none;
  position: absolute;
  width: var(--icon-picker-width, 300px);
  max-height: var(--icon-picker-height, 300px);
  overflow-y: auto;
  background: white;
  padding: 8px;
  border-radius: 4px;
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.1);
  z-index: 1000;
}
.icon-picker-panel input,
.icon-picker-panel select {
  width: 100%;
  margin-bottom: 8px;
  padding: 6px 8px;
  border-radius: 4px;
  border: 1px solid #ccc;
}
.icon-picker-error {
  color: red;
}
"#;

/// Inline properties for the popup panel: size variables plus direction anchoring.
pub fn panel_style_properties(config: &PickerConfig) -> Vec<(&'static str, String)> {
    let mut properties = vec![
        ("--icon-picker-width", format!("{}px", config.popup_width)),
        ("--icon-picker-height", format!("{}px", config.popup_height)),
    ];
    properties.extend(
        config
            .direction
            .anchor_styles()
            .iter()
            .map(|(name, value)| (*name, value.to_string())),
    );
    properties
}

/// Inline properties for the button.
pub fn button_style_properties(config: &PickerConfig) -> Vec<(&'static str, String)> {
    vec![(
        "--icon-picker-btn-width",
        config.button_width_css().to_string(),
    )]
}

/// Installs [`STYLESHEET`] into `document` unless an earlier instance already did.
#[cfg(target_arch = "wasm32")]
pub fn inject_stylesheet(
    document: &web_sys::Document,
) -> Result<(), icon_picker_contract::PickerError> {
    use icon_picker_contract::PickerError;

    use crate::interop::{create, host_error};

    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style: web_sys::Element = create(document, "style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(STYLESHEET));
    let head = document
        .head()
        .ok_or_else(|| PickerError::HostUnavailable("document has no <head>".to_string()))?;
    head.append_child(&style)
        .map_err(|err| host_error("failed to install stylesheet", err))?;
    Ok(())
}
