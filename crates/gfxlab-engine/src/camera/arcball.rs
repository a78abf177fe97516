use glam::{Mat4, Quat, Vec2, Vec3};

use crate::input::{InputFrame, InputState, MouseButton};

const MIN_DISTANCE: f32 = 0.1;
const MAX_DISTANCE: f32 = 1000.0;

/// Trackball-style object inspection camera.
///
/// The pointer is projected onto a unit sphere in NDC; dragging rotates the
/// view by the arc between the previous and the current projection. The eye
/// sits `distance` units in front of the origin.
#[derive(Debug, Clone)]
pub struct Arcball {
    distance: f32,
    rotation: Quat,
    rotation_sensitivity: f32,
    zoom_sensitivity: f32,
    min_distance: f32,
    max_distance: f32,
    drag_from: Option<Vec3>,
}

impl Arcball {
    pub fn new(distance: f32) -> Self {
        Self {
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            rotation: Quat::IDENTITY,
            rotation_sensitivity: 1.5,
            zoom_sensitivity: 0.001,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            drag_from: None,
        }
    }

    pub fn with_sensitivity(mut self, rotation: f32, zoom: f32) -> Self {
        self.rotation_sensitivity = rotation;
        self.zoom_sensitivity = zoom;
        self
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn reset(&mut self) {
        self.rotation = Quat::IDENTITY;
        self.drag_from = None;
    }

    pub fn begin_drag(&mut self, ndc: Vec2) {
        self.drag_from = Some(project_to_sphere(ndc));
    }

    pub fn drag_to(&mut self, ndc: Vec2) {
        let Some(from) = self.drag_from else { return };
        let to = project_to_sphere(ndc);
        let axis = from.cross(to);
        if axis.length_squared() > 1e-12 {
            let angle = from.dot(to).clamp(-1.0, 1.0).acos() * self.rotation_sensitivity;
            let delta = Quat::from_axis_angle(axis.normalize(), angle);
            self.rotation = (delta * self.rotation).normalize();
        }
        self.drag_from = Some(to);
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    /// Wheel zoom; positive `scroll_px` (scroll down) moves the eye away.
    pub fn zoom(&mut self, scroll_px: f32) {
        let factor = (1.0 + scroll_px * self.zoom_sensitivity).max(0.01);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Feed one frame of input. `pointer_ndc` is the pointer in NDC of the
    /// content rect (see `FrameCtx::pointer_ndc`).
    pub fn handle_input(&mut self, input: &InputState, frame: &InputFrame, pointer_ndc: Option<Vec2>) {
        if let Some(ndc) = pointer_ndc {
            if frame.buttons_pressed.contains(&MouseButton::Left) {
                self.begin_drag(ndc);
            } else if input.button_down(MouseButton::Left) {
                self.drag_to(ndc);
            }
        }
        if frame.buttons_released.contains(&MouseButton::Left) || !input.button_down(MouseButton::Left) {
            self.end_drag();
        }
        if frame.scroll_delta.y != 0.0 {
            self.zoom(frame.scroll_delta.y);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance)) * Mat4::from_quat(self.rotation)
    }

    pub fn eye(&self) -> Vec3 {
        self.rotation.inverse() * Vec3::new(0.0, 0.0, self.distance)
    }
}

fn project_to_sphere(ndc: Vec2) -> Vec3 {
    let d2 = ndc.length_squared();
    if d2 <= 1.0 {
        Vec3::new(ndc.x, ndc.y, (1.0 - d2).sqrt())
    } else {
        ndc.normalize().extend(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── projection ──

    #[test]
    fn center_projects_to_pole() {
        assert_eq!(project_to_sphere(Vec2::ZERO), Vec3::Z);
    }

    #[test]
    fn outside_disc_lands_on_rim() {
        let p = project_to_sphere(Vec2::new(3.0, 4.0));
        assert!((p - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
    }

    // ── drag ──

    #[test]
    fn horizontal_drag_rotates_about_y() {
        let mut ball = Arcball::new(5.0).with_sensitivity(1.0, 0.001);
        ball.begin_drag(Vec2::ZERO);
        ball.drag_to(Vec2::new(0.5, 0.0));
        let (axis, angle) = ball.rotation().to_axis_angle();
        assert!((axis - Vec3::Y).length() < 1e-5);
        assert!((angle - 0.5f32.asin()).abs() < 1e-5);
    }

    #[test]
    fn sensitivity_scales_angle() {
        let mut ball = Arcball::new(5.0).with_sensitivity(2.0, 0.001);
        ball.begin_drag(Vec2::ZERO);
        ball.drag_to(Vec2::new(0.5, 0.0));
        let (_, angle) = ball.rotation().to_axis_angle();
        assert!((angle - 2.0 * 0.5f32.asin()).abs() < 1e-5);
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut ball = Arcball::new(5.0);
        ball.drag_to(Vec2::new(0.5, 0.5));
        assert_eq!(ball.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn end_drag_stops_rotation() {
        let mut ball = Arcball::new(5.0);
        ball.begin_drag(Vec2::ZERO);
        ball.end_drag();
        ball.drag_to(Vec2::new(0.5, 0.0));
        assert_eq!(ball.rotation(), Quat::IDENTITY);
        assert!(!ball.is_dragging());
    }

    // ── zoom ──

    #[test]
    fn zoom_is_multiplicative() {
        let mut ball = Arcball::new(5.0);
        ball.zoom(100.0);
        assert!((ball.distance() - 5.5).abs() < 1e-5);
        ball.zoom(-100.0);
        assert!((ball.distance() - 4.95).abs() < 1e-5);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut ball = Arcball::new(5.0);
        for _ in 0..100 {
            ball.zoom(-5000.0);
        }
        assert_eq!(ball.distance(), MIN_DISTANCE);
    }

    // ── view ──

    #[test]
    fn view_places_eye_at_distance() {
        let ball = Arcball::new(5.0);
        let origin = ball.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);
        assert!((ball.eye() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn input_drives_drag() {
        let mut ball = Arcball::new(5.0).with_sensitivity(1.0, 0.001);
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.buttons_down.insert(MouseButton::Left);
        frame.buttons_pressed.insert(MouseButton::Left);
        ball.handle_input(&state, &frame, Some(Vec2::ZERO));
        assert!(ball.is_dragging());

        frame.clear();
        ball.handle_input(&state, &frame, Some(Vec2::new(0.0, 0.5)));
        let (axis, _) = ball.rotation().to_axis_angle();
        assert!((axis + Vec3::X).length() < 1e-5);

        state.buttons_down.clear();
        frame.buttons_released.insert(MouseButton::Left);
        ball.handle_input(&state, &frame, Some(Vec2::new(0.0, 0.5)));
        assert!(!ball.is_dragging());
    }
}
