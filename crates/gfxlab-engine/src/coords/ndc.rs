use super::{Rect, Vec2};

/// Maps a logical-pixel point to normalized device coordinates of `rect`.
///
/// The rect's left/right edges map to x = -1/+1 and its top/bottom edges to
/// y = +1/-1. Points outside the rect map outside [-1, 1].
#[inline]
pub fn to_ndc(rect: Rect, point: Vec2) -> Vec2 {
    let size = rect.size.max(Vec2::splat(f32::EPSILON));
    let uv = (point - rect.origin) / size;
    Vec2::new(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0)
}

/// Inverse of [`to_ndc`].
#[inline]
pub fn from_ndc(rect: Rect, ndc: Vec2) -> Vec2 {
    let uv = Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5);
    rect.origin + uv * rect.size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn corners_map_to_unit_square() {
        let r = Rect::new(100.0, 0.0, 600.0, 600.0);
        assert!(approx(to_ndc(r, Vec2::new(100.0, 0.0)), Vec2::new(-1.0, 1.0)));
        assert!(approx(to_ndc(r, Vec2::new(700.0, 600.0)), Vec2::new(1.0, -1.0)));
        assert!(approx(to_ndc(r, Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn y_axis_points_up() {
        let r = Rect::new(0.0, 0.0, 200.0, 200.0);
        let upper = to_ndc(r, Vec2::new(100.0, 50.0));
        assert!(upper.y > 0.0);
    }

    #[test]
    fn from_ndc_inverts_to_ndc() {
        let r = Rect::new(40.0, 10.0, 300.0, 300.0);
        let p = Vec2::new(123.0, 77.0);
        assert!(approx(from_ndc(r, to_ndc(r, p)), p));
    }
}
