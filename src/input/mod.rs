//! Input handling: event types, the click/drag tracker, and the input
//! processor that converts raw UI events into viewport commands.

/// Platform-agnostic input events.
pub mod event;
/// Click-versus-drag tracking for the primary button.
pub(crate) mod mouse;
/// Converts raw events into viewport commands.
pub mod processor;

pub use event::{InputEvent, Modifiers, MouseButton};
pub use processor::InputProcessor;
use serde::{Deserialize, Serialize};

/// Discrete keyboard actions that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Frame the first selected prim.
    FocusSelection,
    /// Switch the gizmo to local translate.
    LocalTranslate,
    /// Switch the gizmo to local rotate.
    LocalRotate,
    /// Switch the gizmo to local scale.
    LocalScale,
}
