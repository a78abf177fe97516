use gfxlab_engine::coords::Vec2;
use gfxlab_engine::input::{InputEvent, InputFrame, Key};

pub const STEP: f32 = 0.01;
pub const LIMIT: f32 = 0.9;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_key(key: Key) -> Option<Self> {
        Some(match key {
            Key::ArrowUp => Direction::Up,
            Key::ArrowDown => Direction::Down,
            Key::ArrowLeft => Direction::Left,
            Key::ArrowRight => Direction::Right,
            _ => return None,
        })
    }

    fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Offset that moves every frame while an arrow key is held.
///
/// The last pressed arrow wins; releasing any arrow stops the motion.
#[derive(Debug, Default)]
pub struct HeldMotion {
    active: Option<Direction>,
    offset: Vec2,
}

impl HeldMotion {
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn active(&self) -> Option<Direction> {
        self.active
    }

    pub fn handle_events(&mut self, frame: &InputFrame) {
        for ev in &frame.events {
            let InputEvent::Key { key, pressed, .. } = *ev else { continue };
            let Some(dir) = Direction::from_key(key) else { continue };
            self.active = pressed.then_some(dir);
        }
    }

    /// Advances one frame.
    pub fn step(&mut self) {
        if let Some(dir) = self.active {
            self.offset = (self.offset + dir.unit() * STEP).clamp(Vec2::splat(-LIMIT), Vec2::splat(LIMIT));
        }
    }
}
