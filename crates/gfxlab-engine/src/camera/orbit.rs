use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};

use crate::input::{InputFrame, InputState, MouseButton};

const POLAR_EPS: f32 = 1e-4;

/// Damped orbit camera around a target point.
///
/// Left-drag rotates, right-drag pans, the wheel dollies (or zooms when the
/// controls drive an orthographic camera). Input only accumulates pending
/// motion; `update` applies it once per frame and decays it by
/// `damping_factor`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,

    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_scale: f32,

    zoom: f32,
    orthographic: bool,

    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,

    last_pointer: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };
        Self {
            target,
            radius,
            theta,
            phi: phi.clamp(POLAR_EPS, PI - POLAR_EPS),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            zoom: 1.0,
            orthographic: false,
            damping_factor: 0.25,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
            last_pointer: None,
        }
    }

    /// Wheel changes the orthographic zoom factor instead of the distance.
    pub fn with_orthographic(mut self, orthographic: bool) -> Self {
        self.orthographic = orthographic;
        self
    }

    /// Starts from an orthographic zoom factor other than 1.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Orthographic zoom factor, 1 when untouched.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target + self.radius * Vec3::new(s * self.theta.sin(), self.phi.cos(), s * self.theta.cos())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Rotate by a pointer delta in logical px; a drag across the full
    /// viewport height is one full turn.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * delta.x / h * self.rotate_speed;
        self.pending_phi -= TAU * delta.y / h * self.rotate_speed;
    }

    /// Pan by a pointer delta in logical px. `world_height` is the visible
    /// world height at the target (see `Projection::visible_height`).
    pub fn pan_by_pixels(&mut self, delta: Vec2, viewport_height: f32, world_height: f32) {
        let per_px = world_height / viewport_height.max(1.0) * self.pan_speed;
        let per_px = if self.orthographic { per_px / self.zoom } else { per_px };
        let view = self.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        self.pending_pan += -right * delta.x * per_px + up * delta.y * per_px;
    }

    /// Positive `scroll_px` (scroll down) moves away / zooms out.
    pub fn dolly(&mut self, scroll_px: f32) {
        if scroll_px == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.zoom_speed * scroll_px.abs() * 0.01);
        let out = scroll_px > 0.0;
        if self.orthographic {
            let z = if out { self.zoom * step } else { self.zoom / step };
            self.zoom = z.clamp(self.min_zoom, self.max_zoom);
        } else if out {
            self.pending_scale /= step;
        } else {
            self.pending_scale *= step;
        }
    }

    /// Left-drag rotate, right-drag pan, wheel dolly. Pointer positions are
    /// logical px; call `update` afterwards.
    pub fn handle_input(&mut self, input: &InputState, frame: &InputFrame, viewport_height: f32, world_height: f32) {
        let pointer = input.pointer_pos.map(|(x, y)| Vec2::new(x, y));
        let rotating = input.button_down(MouseButton::Left);
        let panning = input.button_down(MouseButton::Right);

        match (pointer, self.last_pointer) {
            (Some(now), Some(prev)) if rotating || panning => {
                let delta = now - prev;
                if rotating {
                    self.rotate_by_pixels(delta, viewport_height);
                } else {
                    self.pan_by_pixels(delta, viewport_height, world_height);
                }
            }
            _ => {}
        }
        self.last_pointer = if rotating || panning { pointer } else { None };

        self.dolly(frame.scroll_delta.y);
    }

    /// Apply pending motion. Returns true when the camera moved.
    pub fn update(&mut self) -> bool {
        let eye_before = self.eye();
        let damped = self.damping_factor > 0.0;
        let k = if damped { self.damping_factor } else { 1.0 };

        self.theta += self.pending_theta * k;
        self.phi = (self.phi + self.pending_phi * k).clamp(POLAR_EPS, PI - POLAR_EPS);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * k;

        if damped {
            let decay = 1.0 - self.damping_factor;
            self.pending_theta *= decay;
            self.pending_phi *= decay;
            self.pending_pan *= decay;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pending_pan = Vec3::ZERO;
        }
        self.pending_scale = 1.0;

        (self.eye() - eye_before).length_squared() > 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    // ── construction ──

    #[test]
    fn eye_round_trips() {
        let eye = Vec3::new(0.0, 50.0, 150.0);
        let c = OrbitControls::new(eye, Vec3::ZERO);
        assert!(close(c.eye(), eye));
        assert!((c.distance() - eye.length()).abs() < 1e-3);
    }

    #[test]
    fn view_looks_at_target() {
        let c = OrbitControls::new(Vec3::new(3.0, 4.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        let t = c.view_matrix().transform_point3(c.target());
        assert!(t.x.abs() < 1e-4 && t.y.abs() < 1e-4 && t.z < 0.0);
    }

    // ── damping ──

    #[test]
    fn damped_rotation_converges() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        c.rotate_by_pixels(Vec2::new(-100.0, 0.0), 400.0);
        assert!(c.update());
        let first = c.theta;
        assert!((first - TAU * 0.25 * 0.25).abs() < 1e-5);
        for _ in 0..200 {
            c.update();
        }
        assert!((c.theta - TAU * 0.25).abs() < 1e-3);
        assert!(!c.update());
    }

    #[test]
    fn undamped_applies_at_once() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_damping(0.0);
        c.rotate_by_pixels(Vec2::new(-100.0, 0.0), 400.0);
        c.update();
        assert!((c.theta - TAU * 0.25).abs() < 1e-5);
        assert!(!c.update());
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_damping(0.0);
        c.rotate_by_pixels(Vec2::new(0.0, 10_000.0), 100.0);
        c.update();
        assert!(c.phi >= POLAR_EPS);
        assert!(c.eye().y > 9.99);
    }

    // ── dolly / zoom ──

    #[test]
    fn scroll_down_moves_away() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        c.dolly(100.0);
        c.update();
        assert!((c.distance() - 10.0 / 0.95).abs() < 1e-3);
        c.dolly(-100.0);
        c.update();
        assert!((c.distance() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn orthographic_scroll_changes_zoom_only() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_orthographic(true);
        c.dolly(-100.0);
        c.update();
        assert!((c.zoom() - 1.0 / 0.95).abs() < 1e-4);
        assert!((c.distance() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_can_be_restored() {
        let c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_zoom(2.5);
        assert_eq!(c.zoom(), 2.5);
        assert_eq!(OrbitControls::new(Vec3::Z, Vec3::ZERO).with_zoom(-1.0).zoom(), 0.0);
    }

    // ── pan ──

    #[test]
    fn pan_moves_target_sideways() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_damping(0.0);
        c.pan_by_pixels(Vec2::new(-100.0, 0.0), 100.0, 2.0);
        c.update();
        assert!(close(c.target(), Vec3::new(2.0, 0.0, 0.0)));
        assert!(close(c.eye(), Vec3::new(2.0, 0.0, 10.0)));
    }

    #[test]
    fn input_left_drag_rotates() {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_damping(0.0);
        let mut state = InputState::default();
        let frame = InputFrame::default();
        state.buttons_down.insert(MouseButton::Left);
        state.pointer_pos = Some((100.0, 100.0));
        c.handle_input(&state, &frame, 400.0, 1.0);
        state.pointer_pos = Some((0.0, 100.0));
        c.handle_input(&state, &frame, 400.0, 1.0);
        c.update();
        assert!((c.theta - TAU * 0.25).abs() < 1e-5);
    }
}
