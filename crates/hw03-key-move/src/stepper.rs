use gfxlab_engine::coords::Vec2;
use gfxlab_engine::input::Key;

pub const STEP: f32 = 0.01;
pub const LIMIT: f32 = 0.9;

/// Offset that moves once per arrow key-down event.
///
/// Auto-repeat events count as key-downs. A step is refused when the
/// coordinate already sits at or past the bound in the direction of travel.
#[derive(Debug, Default)]
pub struct KeyStepper {
    offset: Vec2,
}

impl KeyStepper {
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns true if the key moved the square.
    pub fn key_down(&mut self, key: Key) -> bool {
        let (axis, sign) = match key {
            Key::ArrowUp => (1, 1.0),
            Key::ArrowDown => (1, -1.0),
            Key::ArrowRight => (0, 1.0),
            Key::ArrowLeft => (0, -1.0),
            _ => return false,
        };
        let value = &mut self.offset[axis];
        if *value * sign >= LIMIT {
            return false;
        }
        *value += sign * STEP;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_key_down_steps_once() {
        let mut s = KeyStepper::default();
        assert!(s.key_down(Key::ArrowUp));
        assert!(s.key_down(Key::ArrowUp));
        assert!(s.key_down(Key::ArrowLeft));
        assert!((s.offset() - Vec2::new(-0.01, 0.02)).length() < 1e-6);
    }

    #[test]
    fn non_arrows_do_nothing() {
        let mut s = KeyStepper::default();
        assert!(!s.key_down(Key::Space));
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn stops_at_bound() {
        let mut s = KeyStepper::default();
        let moved = (0..200).filter(|_| s.key_down(Key::ArrowRight)).count();
        assert!(moved >= 90 && moved <= 91);
        assert!(s.offset().x >= LIMIT);
        assert!(s.offset().x < LIMIT + STEP);
        assert!(!s.key_down(Key::ArrowRight));
    }

    #[test]
    fn can_leave_bound_the_other_way() {
        let mut s = KeyStepper::default();
        while s.key_down(Key::ArrowDown) {}
        assert!(s.key_down(Key::ArrowUp));
    }
}
