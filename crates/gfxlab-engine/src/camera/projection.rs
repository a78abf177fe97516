use glam::Mat4;

/// Camera projection. Matrices are right-handed with wgpu's 0..1 depth range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    /// `fov_y` in radians.
    Perspective { fov_y: f32, near: f32, far: f32 },
    /// `frustum_size` is the visible height in world units at zoom 1.
    Orthographic { frustum_size: f32, near: f32, far: f32 },
}

impl Projection {
    pub fn perspective_deg(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Projection::Perspective { fov_y: fov_y_deg.to_radians(), near, far }
    }

    pub fn orthographic(frustum_size: f32, near: f32, far: f32) -> Self {
        Projection::Orthographic { frustum_size, near, far }
    }

    pub fn matrix(&self, aspect: f32) -> Mat4 {
        self.matrix_zoomed(aspect, 1.0)
    }

    /// Projection with an orthographic zoom factor (ignored by perspective).
    pub fn matrix_zoomed(&self, aspect: f32, zoom: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        match *self {
            Projection::Perspective { fov_y, near, far } => {
                Mat4::perspective_rh(fov_y, aspect, near, far)
            }
            Projection::Orthographic { frustum_size, near, far } => {
                let half_h = frustum_size * 0.5 / zoom.max(1e-4);
                let half_w = half_h * aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, near, far)
            }
        }
    }

    /// Visible world height at `distance` from the eye.
    pub fn visible_height(&self, distance: f32) -> f32 {
        match *self {
            Projection::Perspective { fov_y, .. } => 2.0 * distance * (fov_y * 0.5).tan(),
            Projection::Orthographic { frustum_size, .. } => frustum_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn perspective_maps_near_and_far_to_depth_range() {
        let p = Projection::perspective_deg(60.0, 0.1, 100.0).matrix(1.0);
        let near = p.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = p.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthographic_frustum_spans_aspect() {
        let m = Projection::orthographic(200.0, 0.1, 500.0).matrix(2.0);
        let corner = m.project_point3(Vec3::new(200.0, 100.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthographic_zoom_shrinks_extent() {
        let m = Projection::orthographic(200.0, 0.1, 500.0).matrix_zoomed(1.0, 2.0);
        let edge = m.project_point3(Vec3::new(0.0, 50.0, -1.0));
        assert!((edge.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn visible_height_at_distance() {
        let p = Projection::perspective_deg(90.0, 0.1, 100.0);
        assert!((p.visible_height(10.0) - 20.0).abs() < 1e-4);
        assert_eq!(Projection::orthographic(200.0, 0.1, 1.0).visible_height(5.0), 200.0);
    }

    #[test]
    fn bad_aspect_falls_back_to_square() {
        let p = Projection::perspective_deg(60.0, 0.1, 100.0);
        assert_eq!(p.matrix(0.0), p.matrix(1.0));
        assert_eq!(p.matrix(f32::NAN), p.matrix(1.0));
    }
}
