use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Orbit, pan, zoom and click-detection constants.
///
/// Drag zoom and scroll zoom keep separate feel factors. They currently
/// share a default; whether they should diverge is still open with product.
pub struct NavigationOptions {
    /// Orbit degrees per pointer pixel.
    #[schemars(title = "Orbit Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub orbit_degrees_per_pixel: f64,
    /// Pointer pixels per world unit of pan.
    #[schemars(title = "Pan Divisor", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub pan_divisor: f64,
    /// Distance feel factor for pointer-drag zoom.
    #[schemars(title = "Drag Zoom Feel", range(min = 0.001, max = 1.0))]
    pub drag_zoom_feel: f64,
    /// Distance feel factor for scroll-wheel zoom.
    #[schemars(title = "Scroll Zoom Feel", range(min = 0.001, max = 1.0))]
    pub scroll_zoom_feel: f64,
    /// Lower clamp for the logarithmic zoom scale.
    #[schemars(skip)]
    pub min_zoom_scale: f64,
    /// Closest the eye may zoom to the target.
    #[schemars(skip)]
    pub min_focus_distance: f64,
    /// Release with `|dx| + |dy|` of accumulated drag below this is a click.
    #[schemars(skip)]
    pub click_epsilon: f32,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            orbit_degrees_per_pixel: 0.5,
            pan_divisor: 100.0,
            drag_zoom_feel: 0.02,
            scroll_zoom_feel: 0.02,
            min_zoom_scale: 0.01,
            min_focus_distance: 1e-3,
            click_epsilon: 0.001,
        }
    }
}
