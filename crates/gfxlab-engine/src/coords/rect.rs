use super::Vec2;

/// Axis-aligned rectangle in logical pixels, top-left origin, +Y down.
///
/// Describes the content area inside a window and scissor clips.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Rectangle spanning two corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        Self { origin: min, size: a.max(b) - min }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self { origin: self.origin + offset, size: self.size }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same area with non-negative width and height.
    #[inline]
    pub fn normalized(self) -> Self {
        Self::from_corners(self.min(), self.max())
    }

    /// Half-open: the min edges are inside, the max edges are not.
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.cmpge(r.min()).all() && p.cmplt(r.max()).all()
    }

    /// Overlap of two rectangles; `None` unless it has positive area.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let (a, b) = (self.normalized(), other.normalized());
        let min = a.min().max(b.min());
        let max = a.max().min(b.max());
        let overlap = Rect { origin: min, size: max - min };
        (!overlap.is_empty()).then_some(overlap)
    }
}
