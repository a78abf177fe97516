use glam::Vec2;

const EPS: f32 = 1e-9;

/// Intersections of segment `p0`-`p1` with the circle (`center`, `radius`).
///
/// Solves `|p0 + t(p1 - p0) - center|² = radius²` for `t` in `[0, 1]` and
/// returns the points in order of increasing `t`: none, one (tangent, or one
/// endpoint inside the circle) or two. A zero-length segment or a
/// non-positive radius never intersects.
pub fn segment_circle(p0: Vec2, p1: Vec2, center: Vec2, radius: f32) -> Vec<Vec2> {
    let d = p1 - p0;
    let f = p0 - center;

    let a = d.dot(d);
    if a <= EPS || radius <= 0.0 || !radius.is_finite() {
        return Vec::new();
    }
    let b = 2.0 * f.dot(d);
    let c = f.dot(f) - radius * radius;

    let disc = b * b - 4.0 * a * c;
    if disc < -EPS {
        return Vec::new();
    }

    let on_segment = |t: f32| (0.0..=1.0).contains(&t);
    let at = |t: f32| p0 + d * t;

    if disc.abs() <= EPS {
        let t = -b / (2.0 * a);
        return if on_segment(t) { vec![at(t)] } else { Vec::new() };
    }

    let sqrt = disc.sqrt();
    [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)]
        .into_iter()
        .filter(|&t| on_segment(t))
        .map(at)
        .collect()
}
