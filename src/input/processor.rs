//! Converts raw UI events into viewport commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! click-versus-drag detection, held buttons, modifier keys) and the
//! key-binding map. It is the only thing that sits between raw UI events and
//! [`Viewport::execute`](crate::viewport::Viewport::execute).

use glam::Vec2;

use super::event::{InputEvent, Modifiers, MouseButton};
use super::mouse::ClickTracker;
use super::KeyAction;
use crate::camera::input::{HeldButtons, NavigationGesture};
use crate::options::{KeybindingOptions, NavigationOptions};
use crate::viewport::gizmo::{GizmoMode, GizmoOperation};
use crate::viewport::ViewportCommand;

impl KeyAction {
    /// Convert to the corresponding [`ViewportCommand`].
    fn to_command(self) -> ViewportCommand {
        let local = |operation| ViewportCommand::SetGizmo {
            operation,
            mode: GizmoMode::Local,
        };
        match self {
            Self::FocusSelection => ViewportCommand::FocusSelection,
            Self::LocalTranslate => local(GizmoOperation::Translate),
            Self::LocalRotate => local(GizmoOperation::Rotate),
            Self::LocalScale => local(GizmoOperation::Scale),
        }
    }
}

/// Converts raw UI events into [`ViewportCommand`]s.
///
/// # Usage
///
/// ```ignore
/// for cmd in processor.handle_event(event) {
///     viewport.execute(cmd, &mut scene);
/// }
///
/// if let Some(cmd) = processor.handle_key_press("KeyF") {
///     viewport.execute(cmd, &mut scene);
/// }
/// ```
pub struct InputProcessor {
    tracker: ClickTracker,
    buttons: HeldButtons,
    modifiers: Modifiers,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor with the given click epsilon and key bindings.
    #[must_use]
    pub fn new(
        navigation: &NavigationOptions,
        key_bindings: KeybindingOptions,
    ) -> Self {
        Self {
            tracker: ClickTracker::new(navigation.click_epsilon),
            buttons: HeldButtons::default(),
            modifiers: Modifiers::default(),
            key_bindings,
        }
    }

    /// Current cursor position in viewport pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.tracker.position
    }

    /// Currently held modifiers.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewportCommand> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return the resulting commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ViewportCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed).into_iter().collect()
            }
            InputEvent::Scroll { delta } => {
                vec![ViewportCommand::ScrollZoom { amount: delta }]
            }
            InputEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                Vec::new()
            }
            InputEvent::Hover { inside } => {
                vec![ViewportCommand::Hover(inside)]
            }
        }
    }

    /// Emit one command per active gesture for the cursor delta.
    fn handle_cursor_moved(&mut self, position: Vec2) -> Vec<ViewportCommand> {
        let delta = self.tracker.move_to(position, self.buttons.primary);
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        NavigationGesture::active(self.buttons, self.modifiers)
            .map(|gesture| match gesture {
                NavigationGesture::Orbit => ViewportCommand::Orbit { delta },
                NavigationGesture::Pan => ViewportCommand::Pan { delta },
                NavigationGesture::Zoom => ViewportCommand::DragZoom { delta },
            })
            .collect()
    }

    /// Track held buttons; a primary click becomes a pick.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewportCommand> {
        match button {
            MouseButton::Left => {
                self.buttons.primary = pressed;
                if pressed {
                    self.tracker.press();
                    return None;
                }
                self.tracker
                    .release()
                    .map(|position| ViewportCommand::Pick { position })
            }
            MouseButton::Right => {
                self.buttons.secondary = pressed;
                None
            }
            MouseButton::Middle => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&NavigationOptions::default(), KeybindingOptions::default())
    }
}
