//! Construction options recognized by the widget.

use serde::{Deserialize, Serialize};

/// Default popup width in pixels.
pub const DEFAULT_POPUP_WIDTH: u32 = 300;
/// Default popup height in pixels.
pub const DEFAULT_POPUP_HEIGHT: u32 = 500;
/// Button width used when none is configured.
pub const DEFAULT_BUTTON_WIDTH: &str = "max-content";
/// Catalog file name resolved next to the widget script when no source is configured.
pub const DEFAULT_CATALOG_FILE: &str = "icon-categories.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Side of the button the popup panel opens towards.
pub enum PopupDirection {
    /// Above the button.
    Up,
    /// Left of the button.
    Left,
    /// Right of the button.
    Right,
    /// Below the button. Unrecognized values also land here.
    #[default]
    #[serde(other)]
    Down,
}

impl PopupDirection {
    /// Inline CSS placing the panel relative to the button wrapper.
    pub const fn anchor_styles(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Right => &[("left", "100%"), ("top", "0"), ("margin-left", "8px")],
            Self::Left => &[("right", "100%"), ("top", "0"), ("margin-right", "8px")],
            Self::Up => &[("bottom", "100%"), ("left", "0"), ("margin-bottom", "8px")],
            Self::Down => &[("top", "100%"), ("left", "0"), ("margin-top", "8px")],
        }
    }
}

/// Serializable widget options. Host handles (element, callback) travel separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Popup width in pixels.
    pub popup_width: u32,
    /// Popup maximum height in pixels.
    pub popup_height: u32,
    /// Popup anchor side.
    pub direction: PopupDirection,
    /// CSS width for the button.
    pub button_width: Option<String>,
    /// Categories excluded from every view and from the default selection.
    pub ignore_list: Vec<String>,
    /// Catalog location; resolved next to the widget script when absent.
    pub json_url: Option<String>,
    /// Inline catalog document, kept unparsed so a malformed one fails the load rather than
    /// the options; wins over `json_url`.
    pub json_object: Option<serde_json::Value>,
    /// Preferred initial category.
    pub default_category: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            popup_width: DEFAULT_POPUP_WIDTH,
            popup_height: DEFAULT_POPUP_HEIGHT,
            direction: PopupDirection::Down,
            button_width: None,
            ignore_list: Vec::new(),
            json_url: None,
            json_object: None,
            default_category: None,
        }
    }
}

impl PickerConfig {
    /// Button width CSS value.
    pub fn button_width_css(&self) -> &str {
        self.button_width
            .as_deref()
            .filter(|width| !width.trim().is_empty())
            .unwrap_or(DEFAULT_BUTTON_WIDTH)
    }

    /// Preferred category, ignoring blank values.
    pub fn preferred_category(&self) -> Option<&str> {
        self.default_category
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_options_use_defaults() {
        let config: PickerConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, PickerConfig::default());
        assert_eq!(config.button_width_css(), "max-content");
    }

    #[test]
    fn camel_case_options_are_recognized() {
        let config: PickerConfig = serde_json::from_str(
            r#"{
                "popupWidth": 420,
                "direction": "left",
                "buttonWidth": "12rem",
                "ignoreList": ["brands"],
                "jsonUrl": null,
                "jsonObject": {"categories": {"a": []}},
                "defaultCategory": "a"
            }"#,
        )
        .expect("parse");
        assert_eq!(config.popup_width, 420);
        assert_eq!(config.popup_height, DEFAULT_POPUP_HEIGHT);
        assert_eq!(config.direction, PopupDirection::Left);
        assert_eq!(config.button_width_css(), "12rem");
        assert_eq!(config.ignore_list, vec!["brands".to_string()]);
        assert!(config.json_object.is_some());
        assert_eq!(config.preferred_category(), Some("a"));
    }

    #[test]
    fn unknown_direction_falls_back_to_down() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"direction":"diagonal"}"#).expect("parse");
        assert_eq!(config.direction, PopupDirection::Down);
        assert_eq!(
            PopupDirection::Down.anchor_styles(),
            &[("top", "100%"), ("left", "0"), ("margin-top", "8px")]
        );
    }

    #[test]
    fn zero_dimensions_are_kept_as_given() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"popupWidth":0,"popupHeight":0}"#).expect("parse");
        assert_eq!((config.popup_width, config.popup_height), (0, 0));
    }

    #[test]
    fn malformed_inline_catalog_does_not_reject_options() {
        let config: PickerConfig = serde_json::from_str(
            r#"{"popupWidth":300,"jsonObject":{"categories":{"a":[{"file":"x.svg"}]}}}"#,
        )
        .expect("parse");
        assert_eq!(config.popup_width, 300);
        assert_eq!(
            config.json_object,
            Some(serde_json::json!({"categories": {"a": [{"file": "x.svg"}]}}))
        );
    }
}
