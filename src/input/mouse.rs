use glam::Vec2;

/// Tracks pointer position and the drag distance accumulated while the
/// primary button is held.
pub(crate) struct ClickTracker {
    pub position: Vec2,
    /// `|dx| + |dy|` summed over every move since the last press.
    drag_distance: f32,
    epsilon: f32,
}

impl ClickTracker {
    pub fn new(epsilon: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            drag_distance: 0.0,
            epsilon,
        }
    }

    /// Move the cursor and return the delta from the previous position.
    pub fn move_to(&mut self, position: Vec2, primary_down: bool) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        if primary_down {
            self.drag_distance += delta.x.abs() + delta.y.abs();
        }
        delta
    }

    pub fn press(&mut self) {
        self.drag_distance = 0.0;
    }

    /// Returns the click position if the release ends a click rather than a
    /// drag.
    pub fn release(&mut self) -> Option<Vec2> {
        let is_click = self.drag_distance < self.epsilon;
        self.drag_distance = 0.0;
        is_click.then_some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_without_motion_is_a_click() {
        let mut tracker = ClickTracker::new(0.001);
        let _ = tracker.move_to(Vec2::new(10.0, 20.0), false);
        tracker.press();
        assert_eq!(tracker.release(), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn motion_while_held_is_a_drag() {
        let mut tracker = ClickTracker::new(0.001);
        tracker.press();
        let _ = tracker.move_to(Vec2::new(0.5, 0.0), true);
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn drag_that_returns_to_start_still_counts() {
        let mut tracker = ClickTracker::new(0.001);
        tracker.press();
        let _ = tracker.move_to(Vec2::new(3.0, 0.0), true);
        let _ = tracker.move_to(Vec2::ZERO, true);
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn motion_before_press_is_ignored() {
        let mut tracker = ClickTracker::new(0.001);
        let _ = tracker.move_to(Vec2::new(50.0, 50.0), false);
        tracker.press();
        assert!(tracker.release().is_some());
    }
}
