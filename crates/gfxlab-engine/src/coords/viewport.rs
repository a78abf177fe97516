use super::{Rect, Vec2};

/// Drawable size in logical pixels.
///
/// Renderers treat this as the coordinate basis for pixel-space geometry
/// (text, clip rects) inside the content rect.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; `1.0` for degenerate sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }
}

/// How the drawable content area relates to the window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AspectPolicy {
    /// Content fills the whole window.
    #[default]
    Free,
    /// Content is the largest centered square; the rest is letterboxed.
    Square,
}

/// Computes the content rect (logical pixels) for a window of `window` size.
pub fn content_rect(window: Viewport, policy: AspectPolicy) -> Rect {
    let w = window.width.max(0.0);
    let h = window.height.max(0.0);
    match policy {
        AspectPolicy::Free => Rect::new(0.0, 0.0, w, h),
        AspectPolicy::Square => {
            let side = w.min(h);
            Rect { origin: Vec2::new(w - side, h - side) * 0.5, size: Vec2::splat(side) }
        }
    }
}
