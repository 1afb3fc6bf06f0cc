use crate::input::Modifiers;

/// Camera navigation driven by a pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationGesture {
    /// Alt + primary drag.
    Orbit,
    /// Shift + primary drag.
    Pan,
    /// Alt + secondary drag (vertical component only).
    Zoom,
}

/// Held pointer buttons relevant to navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldButtons {
    /// Primary (left) button held.
    pub primary: bool,
    /// Secondary (right) button held.
    pub secondary: bool,
}

impl NavigationGesture {
    /// Gestures active for the given buttons and modifiers, in the order
    /// they apply to a single pointer move.
    ///
    /// Alt + Shift with the primary button both orbits and pans.
    pub fn active(
        buttons: HeldButtons,
        modifiers: Modifiers,
    ) -> impl Iterator<Item = Self> {
        [
            (buttons.primary && modifiers.alt).then_some(Self::Orbit),
            (buttons.primary && modifiers.shift).then_some(Self::Pan),
            (buttons.secondary && modifiers.alt).then_some(Self::Zoom),
        ]
        .into_iter()
        .flatten()
    }
}
