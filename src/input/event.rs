/// Platform-agnostic input events.
///
/// Positions are viewport-local pixels (origin at the top-left of the
/// viewport's inner rect). These are fed into an
/// [`InputProcessor`](super::InputProcessor) which converts them into
/// [`ViewportCommand`](crate::viewport::ViewportCommand) values.
///
/// # Example
///
/// ```ignore
/// for cmd in processor.handle_event(InputEvent::CursorMoved { x: 100.0, y: 200.0 }) {
///     viewport.execute(cmd, &mut scene);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to a viewport-local position.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in wheel notches.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged(Modifiers),
    /// Pointer entered or left the viewport.
    Hover {
        /// `true` when the pointer is over the viewport.
        inside: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Held modifier keys (either side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Alt / Option held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
}
