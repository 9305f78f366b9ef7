//! Host widget configuration.

use crate::value::SerializableColor;
use serde::{Deserialize, Serialize};

/// Settings the host widget supplies to the paint layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Keep the data aspect ratio when the widget is resized.
    pub constrain_ratio: bool,
    /// Add an FPS text overlay to the scene.
    pub display_fps: bool,
    /// Add a (hidden) navigation rectangle visual to the scene.
    pub navigation_rectangle: bool,
    pub background_color: SerializableColor,
    pub navigation_rectangle_color: SerializableColor,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            constrain_ratio: false,
            display_fps: false,
            navigation_rectangle: false,
            background_color: SerializableColor::transparent(),
            navigation_rectangle_color: SerializableColor::new(255, 255, 255, 64),
        }
    }
}

impl WidgetConfig {
    /// Load a configuration from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = WidgetConfig::from_json(r#"{ "display_fps": true }"#).unwrap();
        assert!(config.display_fps);
        assert!(!config.constrain_ratio);
        assert_eq!(config.background_color, SerializableColor::transparent());
    }
}
