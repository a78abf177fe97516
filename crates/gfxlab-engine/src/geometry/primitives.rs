//! Primitive solids used by the exercises.

use std::f32::consts::{FRAC_1_SQRT_2, PI, TAU};

use glam::{Vec2, Vec3};

use super::normals::flat_normals;
use super::MeshData;

const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
const WHITE: [f32; 4] = [1.0; 4];

// Square base corners on y = 0, counter-clockwise seen from above the front.
const BASE: [Vec3; 4] = [
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, -0.5),
];

/// Square pyramid: unit base on y = 0, apex at (0, 1, 0).
///
/// 18 unshared vertices: two base triangles then front, right, back and left
/// faces. The base is blue, the sides red, yellow, magenta and cyan. Side
/// normals are the approximate `(±1, 0.5, 0)` / `(0, 0.5, ±1)` directions.
pub fn pyramid() -> MeshData {
    let [v0, v1, v2, v3] = BASE;
    let apex = Vec3::Y;

    let mut positions = vec![v0, v1, v2, v2, v3, v0];
    let mut normals = vec![Vec3::NEG_Y; 6];
    let mut colors = vec![BLUE; 6];
    let mut uvs = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
    ];

    let sides = [
        (v0, v1, Vec3::new(0.0, 0.5, 1.0), RED),
        (v1, v2, Vec3::new(1.0, 0.5, 0.0), YELLOW),
        (v2, v3, Vec3::new(0.0, 0.5, -1.0), MAGENTA),
        (v3, v0, Vec3::new(-1.0, 0.5, 0.0), CYAN),
    ];
    for (a, b, n, color) in sides {
        positions.extend([a, b, apex]);
        normals.extend([n; 3]);
        colors.extend([color; 3]);
        uvs.extend([Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5), Vec2::new(0.5, 1.0)]);
    }

    MeshData {
        indices: (0..positions.len() as u32).collect(),
        positions,
        normals,
        colors,
        uvs,
    }
}

/// Regular octahedron: square equator of side 1 on y = 0, apexes at ±√2/2.
///
/// 8 faces with unshared vertices (24), flat normals and white colors. Each
/// face maps its base edge to one texture edge and its apex to the opposite
/// edge's midpoint.
pub fn octahedron() -> MeshData {
    let top = Vec3::new(0.0, FRAC_1_SQRT_2, 0.0);
    let bottom = -top;

    let mut positions = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    for (apex, face_uvs) in [
        (top, [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)]),
        (bottom, [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.0)]),
    ] {
        for i in 0..4 {
            positions.extend([BASE[i], BASE[(i + 1) % 4], apex]);
            uvs.extend(face_uvs);
        }
    }

    MeshData {
        normals: flat_normals(&positions),
        colors: vec![WHITE; positions.len()],
        indices: (0..positions.len() as u32).collect(),
        positions,
        uvs,
    }
}

/// Wrap-around texture mapping for [`octahedron`].
///
/// The equator runs along v = 0.5 from u = 0 to u = 1 in quarter steps; the
/// upper apex maps to (0.5, 1) and the lower to (0.5, 0), so one panorama
/// image wraps the whole solid.
pub fn octahedron_panorama_uvs() -> Vec<Vec2> {
    let equator = |i: usize| Vec2::new(i as f32 * 0.25, 0.5);
    let mut uvs = Vec::with_capacity(24);
    for apex in [Vec2::new(0.5, 1.0), Vec2::new(0.5, 0.0)] {
        for i in 0..4 {
            uvs.extend([equator(i), equator(i + 1), apex]);
        }
    }
    uvs
}

/// UV sphere centered at the origin.
///
/// `segments` meridians (at least 3) and `rings` parallels (at least 2); the
/// seam column is duplicated so u runs 0..1. v is 1 at the north pole.
/// Pole rows emit a single triangle per quad. Colors are white.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let row = segments + 1;

    let mut mesh = MeshData::default();
    for iy in 0..=rings {
        let v = iy as f32 / rings as f32;
        let theta = v * PI;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.positions.push(n * radius);
            mesh.normals.push(n);
            mesh.colors.push(WHITE);
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    for iy in 0..rings {
        for ix in 0..segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend([a, b, d]);
            }
            if iy != rings - 1 {
                mesh.indices.extend([b, c, d]);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pyramid ───────────────────────────────────────────────────────────

    #[test]
    fn pyramid_layout() {
        let p = pyramid();
        assert_eq!(p.validate(), Ok(()));
        assert_eq!(p.vertex_count(), 18);
        assert_eq!(p.triangle_count(), 6);
        assert_eq!(p.positions[8], Vec3::Y);
        assert!(p.colors[..6].iter().all(|c| *c == BLUE));
        assert_eq!(p.colors[6], RED);
        assert_eq!(p.colors[17], CYAN);
        assert_eq!(p.uvs[6..9], [Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5), Vec2::new(0.5, 1.0)]);
    }

    #[test]
    fn pyramid_base_lies_on_y_zero() {
        let p = pyramid();
        assert!(p.positions[..6].iter().all(|v| v.y == 0.0 && v.x.abs() == 0.5));
    }

    // ── octahedron ────────────────────────────────────────────────────────

    #[test]
    fn octahedron_layout() {
        let o = octahedron();
        assert_eq!(o.validate(), Ok(()));
        assert_eq!(o.vertex_count(), 24);
        assert!(o.colors.iter().all(|c| *c == WHITE));
        assert!((o.positions[2].y - 2f32.sqrt() / 2.0).abs() < 1e-6);
        assert!((o.positions[14].y + 2f32.sqrt() / 2.0).abs() < 1e-6);
    }

    #[test]
    fn octahedron_normals_are_unit_and_point_outwards() {
        let o = octahedron();
        for tri in 0..8 {
            let centroid = (o.positions[tri * 3] + o.positions[tri * 3 + 1] + o.positions[tri * 3 + 2]) / 3.0;
            let n = o.normals[tri * 3];
            assert!((n.length() - 1.0).abs() < 1e-5);
            // Winding differs between halves; normals are parallel to the
            // centroid direction either way.
            assert!(n.dot(centroid.normalize()).abs() > 0.99);
        }
    }

    #[test]
    fn panorama_uvs_wrap_equator() {
        let uvs = octahedron_panorama_uvs();
        assert_eq!(uvs.len(), 24);
        assert_eq!(uvs[0], Vec2::new(0.0, 0.5));
        assert_eq!(uvs[10], Vec2::new(1.0, 0.5));
        assert_eq!(uvs[2], Vec2::new(0.5, 1.0));
        assert_eq!(uvs[23], Vec2::new(0.5, 0.0));
        assert_eq!(octahedron().with_uvs(uvs).validate(), Ok(()));
    }

    // ── sphere ────────────────────────────────────────────────────────────

    #[test]
    fn sphere_counts_and_radius() {
        let s = uv_sphere(2.0, 8, 4);
        assert_eq!(s.validate(), Ok(()));
        assert_eq!(s.vertex_count(), 9 * 5);
        // 2 triangles per quad minus one per quad on each pole row.
        assert_eq!(s.triangle_count(), 8 * 4 * 2 - 8 * 2);
        assert!(s.positions.iter().all(|p| (p.length() - 2.0).abs() < 1e-5));
    }

    #[test]
    fn sphere_poles_and_uvs() {
        let s = uv_sphere(1.0, 4, 2);
        assert!((s.positions[0] - Vec3::Y).length() < 1e-6);
        assert_eq!(s.uvs[0], Vec2::new(0.0, 1.0));
        let last = s.vertex_count() - 1;
        assert!((s.positions[last] + Vec3::Y).length() < 1e-5);
        assert_eq!(s.uvs[last], Vec2::new(1.0, 0.0));
    }
}
