use glam::Vec3;

/// Per-face normals for a non-indexed triangle list.
///
/// Each triangle `(a, b, c)` gets `normalize((b - a) × (c - a))` on all three
/// vertices. Degenerate triangles and a trailing partial triangle get zero
/// normals.
pub fn flat_normals(positions: &[Vec3]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for (tri, out) in positions.chunks_exact(3).zip(normals.chunks_exact_mut(3)) {
        let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
        out.fill(n);
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_triangle_in_xy_plane_faces_plus_z() {
        let n = flat_normals(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(n, vec![Vec3::Z; 3]);
    }

    #[test]
    fn normals_are_unit_length() {
        let n = flat_normals(&[Vec3::ZERO, Vec3::X * 4.0, Vec3::new(0.0, 3.0, 3.0)]);
        assert!((n[0].length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_and_partial_triangles_get_zero() {
        let n = flat_normals(&[Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::Y]);
        assert_eq!(n, vec![Vec3::ZERO; 4]);
    }
}
