use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Overlay and light toggles shown in the viewport menus.
pub struct DisplayOptions {
    /// Show the ground grid.
    #[schemars(title = "Grid")]
    pub grid: bool,
    /// Grid extent passed to the grid drawer.
    #[schemars(skip)]
    pub grid_size: f32,
    /// Enable the renderer's ambient light.
    #[schemars(title = "Ambient Light")]
    pub ambient_light: bool,
    /// Enable the renderer's dome light.
    #[schemars(title = "Dome Light")]
    pub dome_light: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            grid: true,
            grid_size: 10.0,
            ambient_light: true,
            dome_light: false,
        }
    }
}
