use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Vertex of a flat-colored shape: position in model space, premultiplied color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl FlatVertex {
    #[inline]
    pub fn new(pos: Vec3, color: Color) -> Self {
        Self { pos: pos.to_array(), color: color.to_array() }
    }

    #[inline]
    pub fn flat(pos: Vec2, color: Color) -> Self {
        Self::new(pos.extend(0.0), color)
    }
}

/// How a shape's vertex list is assembled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Topology {
    /// Every three vertices form a triangle.
    Triangles,
    /// Every two vertices form a segment.
    Lines,
    /// Each vertex is a square `size` logical px wide, centered on it.
    Points { size: f32 },
}

/// Shape draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCmd {
    pub vertices: Vec<FlatVertex>,
    pub topology: Topology,
    /// Model-to-clip transform applied to every vertex.
    pub transform: Mat4,
}

// Unit quad centered at the origin, indexed 0,1,2 / 0,2,3.
const UNIT_QUAD: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
];
const QUAD_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

impl DrawList {
    /// Records a shape; lists too short for one primitive are dropped.
    pub fn push_shape(
        &mut self,
        z: ZIndex,
        topology: Topology,
        vertices: Vec<FlatVertex>,
        transform: Mat4,
    ) {
        let min = match topology {
            Topology::Triangles => 3,
            Topology::Lines => 2,
            Topology::Points { .. } => 1,
        };
        if vertices.len() < min {
            return;
        }
        self.push(z, DrawCmd::Shape(ShapeCmd { vertices, topology, transform }));
    }

    /// Fills the current clip region (or the whole content area) with `color`.
    pub fn push_fill(&mut self, z: ZIndex, color: Color) {
        self.push_quad(z, Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)), color);
    }

    /// Records the unit quad (side 1, centered at the origin) under `transform`.
    pub fn push_quad(&mut self, z: ZIndex, transform: Mat4, color: Color) {
        let vertices = QUAD_INDICES
            .iter()
            .map(|&i| FlatVertex::flat(UNIT_QUAD[i], color))
            .collect();
        self.push_shape(z, Topology::Triangles, vertices, transform);
    }

    /// Triangle fan around `points[0]`, expanded into a triangle list.
    pub fn push_triangle_fan(&mut self, z: ZIndex, points: &[Vec2], color: Color, transform: Mat4) {
        let Some((&first, rest)) = points.split_first() else { return };
        let vertices = rest
            .windows(2)
            .flat_map(|w| [first, w[0], w[1]])
            .map(|p| FlatVertex::flat(p, color))
            .collect();
        self.push_shape(z, Topology::Triangles, vertices, transform);
    }

    /// Single segment in NDC.
    pub fn push_segment(&mut self, z: ZIndex, a: Vec2, b: Vec2, color: Color) {
        let vertices = vec![FlatVertex::flat(a, color), FlatVertex::flat(b, color)];
        self.push_shape(z, Topology::Lines, vertices, Mat4::IDENTITY);
    }

    /// Connected line strip through `points`.
    pub fn push_polyline(&mut self, z: ZIndex, points: &[Vec3], color: Color, transform: Mat4) {
        let vertices = points
            .windows(2)
            .flat_map(|w| [FlatVertex::new(w[0], color), FlatVertex::new(w[1], color)])
            .collect();
        self.push_shape(z, Topology::Lines, vertices, transform);
    }

    /// Closed circle outline approximated by `segments` chords (at least 3).
    pub fn push_circle_outline(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        segments: u32,
        color: Color,
    ) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let points: Vec<Vec3> = circle_points(center, radius, segments.max(3))
            .map(|p| p.extend(0.0))
            .collect();
        self.push_polyline(z, &points, color, Mat4::IDENTITY);
    }

    /// Square point `size` logical px wide at `center` (NDC).
    pub fn push_point(&mut self, z: ZIndex, center: Vec2, size: f32, color: Color) {
        self.push_points(z, &[center], size, color);
    }

    pub fn push_points(&mut self, z: ZIndex, centers: &[Vec2], size: f32, color: Color) {
        let vertices = centers.iter().map(|&c| FlatVertex::flat(c, color)).collect();
        self.push_shape(z, Topology::Points { size }, vertices, Mat4::IDENTITY);
    }

    /// Coordinate axes of `length` from the origin: x red, y green, z blue.
    pub fn push_axes(&mut self, z: ZIndex, transform: Mat4, length: f32) {
        let vertices = [
            (Vec3::X, Color::RED),
            (Vec3::Y, Color::GREEN),
            (Vec3::Z, Color::BLUE),
        ]
        .into_iter()
        .flat_map(|(axis, color)| {
            [FlatVertex::new(Vec3::ZERO, color), FlatVertex::new(axis * length, color)]
        })
        .collect();
        self.push_shape(z, Topology::Lines, vertices, transform);
    }
}

/// `segments + 1` points around the circle; the last repeats the first.
fn circle_points(center: Vec2, radius: f32, segments: u32) -> impl Iterator<Item = Vec2> {
    (0..=segments).map(move |i| {
        let a = std::f32::consts::TAU * (i % segments) as f32 / segments as f32;
        center + Vec2::new(a.cos(), a.sin()) * radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_shape(list: &DrawList) -> &ShapeCmd {
        assert_eq!(list.items().len(), 1);
        match &list.items()[0].cmd {
            DrawCmd::Shape(s) => s,
            other => panic!("expected shape, got {other:?}"),
        }
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn quad_is_two_triangles_of_unit_side() {
        let mut list = DrawList::new();
        list.push_quad(ZIndex(0), Mat4::IDENTITY, Color::RED);
        let s = only_shape(&list);

        assert_eq!(s.topology, Topology::Triangles);
        assert_eq!(s.vertices.len(), 6);
        assert_eq!(s.vertices[0].pos, [-0.5, -0.5, 0.0]);
        assert_eq!(s.vertices[2].pos, [0.5, 0.5, 0.0]);
        assert_eq!(s.vertices[5].pos, [-0.5, 0.5, 0.0]);
        assert!(s.vertices.iter().all(|v| v.color == Color::RED.to_array()));
    }

    #[test]
    fn fill_covers_full_ndc() {
        let mut list = DrawList::new();
        list.push_fill(ZIndex(0), Color::BLUE);
        let s = only_shape(&list);
        let corner = s.transform.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(corner, Vec3::new(1.0, 1.0, 0.0));
    }

    // ── fans and lines ────────────────────────────────────────────────────

    #[test]
    fn fan_expands_to_triangle_list() {
        let square = [
            Vec2::new(-0.1, -0.1),
            Vec2::new(-0.1, 0.1),
            Vec2::new(0.1, 0.1),
            Vec2::new(0.1, -0.1),
        ];
        let mut list = DrawList::new();
        list.push_triangle_fan(ZIndex(0), &square, Color::RED, Mat4::IDENTITY);
        let s = only_shape(&list);

        assert_eq!(s.vertices.len(), 6);
        assert_eq!(s.vertices[3].pos, [-0.1, -0.1, 0.0]);
        assert_eq!(s.vertices[4].pos, [0.1, 0.1, 0.0]);
        assert_eq!(s.vertices[5].pos, [0.1, -0.1, 0.0]);
    }

    #[test]
    fn degenerate_inputs_record_nothing() {
        let mut list = DrawList::new();
        list.push_triangle_fan(ZIndex(0), &[Vec2::ZERO, Vec2::X], Color::RED, Mat4::IDENTITY);
        list.push_polyline(ZIndex(0), &[Vec3::ZERO], Color::RED, Mat4::IDENTITY);
        list.push_circle_outline(ZIndex(0), Vec2::ZERO, 0.0, 32, Color::RED);
        list.push_points(ZIndex(0), &[], 10.0, Color::RED);
        assert!(list.items().is_empty());
    }

    #[test]
    fn polyline_emits_one_segment_per_pair() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let mut list = DrawList::new();
        list.push_polyline(ZIndex(0), &pts, Color::WHITE, Mat4::IDENTITY);
        let s = only_shape(&list);
        assert_eq!(s.topology, Topology::Lines);
        assert_eq!(s.vertices.len(), 6);
        assert_eq!(s.vertices[2].pos, s.vertices[1].pos);
    }

    #[test]
    fn circle_outline_is_closed() {
        let mut list = DrawList::new();
        list.push_circle_outline(ZIndex(0), Vec2::new(0.2, 0.1), 0.5, 16, Color::GRAY);
        let s = only_shape(&list);

        assert_eq!(s.vertices.len(), 32);
        let first = Vec3::from(s.vertices[0].pos);
        let last = Vec3::from(s.vertices[31].pos);
        assert!((first - last).length() < 1e-6);
        assert!((first - Vec3::new(0.7, 0.1, 0.0)).length() < 1e-6);
    }

    // ── points and axes ───────────────────────────────────────────────────

    #[test]
    fn points_carry_pixel_size() {
        let mut list = DrawList::new();
        list.push_point(ZIndex(0), Vec2::new(0.25, -0.5), 10.0, Color::YELLOW);
        let s = only_shape(&list);
        assert_eq!(s.topology, Topology::Points { size: 10.0 });
        assert_eq!(s.vertices[0].pos, [0.25, -0.5, 0.0]);
    }

    #[test]
    fn axes_are_colored_per_axis() {
        let mut list = DrawList::new();
        list.push_axes(ZIndex(0), Mat4::IDENTITY, 0.8);
        let s = only_shape(&list);

        assert_eq!(s.vertices.len(), 6);
        assert_eq!(s.vertices[1].pos, [0.8, 0.0, 0.0]);
        assert_eq!(s.vertices[1].color, Color::RED.to_array());
        assert_eq!(s.vertices[3].pos, [0.0, 0.8, 0.0]);
        assert_eq!(s.vertices[3].color, Color::GREEN.to_array());
        assert_eq!(s.vertices[5].pos, [0.0, 0.0, 0.8]);
        assert_eq!(s.vertices[5].color, Color::BLUE.to_array());
    }
}
