use gfxlab_engine::coords::{Rect, Vec2};
use gfxlab_engine::paint::Color;

/// The four colored quadrants of a content area of `size` logical px,
/// top-left origin: red, green / blue, yellow.
pub fn quadrants(size: Vec2) -> [(Rect, Color); 4] {
    let half = size * 0.5;
    [
        (Rect::new(0.0, 0.0, half.x, half.y), Color::RED),
        (Rect::new(half.x, 0.0, size.x - half.x, half.y), Color::GREEN),
        (Rect::new(0.0, half.y, half.x, size.y - half.y), Color::BLUE),
        (Rect::new(half.x, half.y, size.x - half.x, size.y - half.y), Color::YELLOW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_tile_the_content() {
        let q = quadrants(Vec2::new(500.0, 500.0));
        let area: f32 = q.iter().map(|(r, _)| r.size.x * r.size.y).sum();
        assert_eq!(area, 500.0 * 500.0);
        assert!(q[0].0.contains(Vec2::new(10.0, 10.0)));
        assert!(q[3].0.contains(Vec2::new(490.0, 490.0)));
    }

    #[test]
    fn top_left_is_red() {
        let q = quadrants(Vec2::new(100.0, 100.0));
        assert_eq!(q[0].1, Color::RED);
        assert_eq!(q[1], (Rect::new(50.0, 0.0, 50.0, 50.0), Color::GREEN));
        assert_eq!(q[2], (Rect::new(0.0, 50.0, 50.0, 50.0), Color::BLUE));
        assert_eq!(q[3].1, Color::YELLOW);
    }

    #[test]
    fn odd_sizes_leave_no_gap() {
        let q = quadrants(Vec2::new(101.0, 99.0));
        assert_eq!(q[0].0.max().x, q[1].0.min().x);
        assert_eq!(q[1].0.max(), Vec2::new(101.0, 49.5));
        assert_eq!(q[3].0.max(), Vec2::new(101.0, 99.0));
    }
}
