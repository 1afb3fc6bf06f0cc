//! Viewport options with TOML preset support.
//!
//! Free-camera defaults, navigation constants, display toggles and key
//! bindings are consolidated here. Options serialize to/from TOML so a host
//! can persist them per user or per project.

mod camera;
mod display;
mod keybindings;
mod navigation;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use navigation::NavigationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ViewportOptions {
    /// Free-camera projection and initial pose.
    pub camera: CameraOptions,
    /// Orbit, pan, zoom and picking constants.
    pub navigation: NavigationOptions,
    /// Grid and light toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl ViewportOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewportOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewportError> {
        let content =
            std::fs::read_to_string(path).map_err(ViewportError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewportError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewportError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewportError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = ViewportOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let mut parsed: ViewportOptions = toml::from_str(&toml_str).unwrap();
        parsed.keybindings.rebuild_reverse_map();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[navigation]
pan_divisor = 250.0
";
        let opts: ViewportOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.navigation.pan_divisor, 250.0);
        // Everything else should be default
        assert_eq!(opts.navigation.scroll_zoom_feel, 0.02);
        assert_eq!(opts.camera.fov, 60.0);
        assert!(opts.display.grid);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = ViewportOptions::default();
        assert_eq!(
            opts.keybindings.lookup("KeyF"),
            Some(KeyAction::FocusSelection)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyE"),
            Some(KeyAction::LocalRotate)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn load_rebuilds_key_lookup() {
        let dir = std::env::temp_dir().join("sceneview-options-test");
        let path = dir.join("viewport.toml");
        let mut opts = ViewportOptions::default();
        let _ = opts
            .keybindings
            .bindings
            .insert(KeyAction::FocusSelection, "KeyG".into());
        opts.save(&path).unwrap();

        let loaded = ViewportOptions::load(&path).unwrap();
        assert_eq!(
            loaded.keybindings.lookup("KeyG"),
            Some(KeyAction::FocusSelection)
        );
        assert_eq!(loaded.keybindings.lookup("KeyF"), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema = ViewportOptions::json_schema();
        let props = schema
            .get("properties")
            .and_then(|v| v.as_object())
            .unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));
    }
}
