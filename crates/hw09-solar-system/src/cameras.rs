use gfxlab_engine::camera::{OrbitControls, Projection};
use gfxlab_engine::glam::{Mat4, Vec3};
use gfxlab_engine::input::{InputFrame, InputState};

pub const INITIAL_EYE: Vec3 = Vec3::new(0.0, 50.0, 150.0);
const INITIAL_DAMPING: f32 = 0.25;
/// Controls rebuilt on a camera switch glide longer than the initial ones.
const SWITCHED_DAMPING: f32 = 0.05;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraKind {
    Perspective,
    Orthographic,
}

impl CameraKind {
    pub fn label(self) -> &'static str {
        match self {
            CameraKind::Perspective => "Perspective",
            CameraKind::Orthographic => "Orthographic",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Perspective and orthographic cameras sharing one set of orbit controls.
///
/// Each camera remembers where it was left and its zoom; switching hands the
/// controls to the other camera, aimed at the origin.
pub struct CameraRig {
    active: CameraKind,
    projections: [Projection; 2],
    eyes: [Vec3; 2],
    zooms: [f32; 2],
    controls: OrbitControls,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            active: CameraKind::Perspective,
            projections: [
                Projection::perspective_deg(75.0, 0.1, 500.0),
                Projection::orthographic(200.0, 0.1, 500.0),
            ],
            eyes: [INITIAL_EYE; 2],
            zooms: [1.0; 2],
            controls: OrbitControls::new(INITIAL_EYE, Vec3::ZERO).with_damping(INITIAL_DAMPING),
        }
    }

    pub fn active(&self) -> CameraKind {
        self.active
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn toggle(&mut self) {
        self.eyes[self.active.index()] = self.controls.eye();
        self.zooms[self.active.index()] = self.controls.zoom();
        self.active = match self.active {
            CameraKind::Perspective => CameraKind::Orthographic,
            CameraKind::Orthographic => CameraKind::Perspective,
        };
        let i = self.active.index();
        self.controls = OrbitControls::new(self.eyes[i], Vec3::ZERO)
            .with_zoom(self.zooms[i])
            .with_damping(SWITCHED_DAMPING)
            .with_orthographic(self.active == CameraKind::Orthographic);
        log::info!("camera: {}", self.active.label());
    }

    fn projection(&self) -> Projection {
        self.projections[self.active.index()]
    }

    /// Feeds pointer input to the controls and applies damping.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, viewport_height: f32) {
        let world_height = self.projection().visible_height(self.controls.distance());
        self.controls.handle_input(input, frame, viewport_height, world_height);
        self.controls.update();
    }

    pub fn eye(&self) -> Vec3 {
        self.controls.eye()
    }

    pub fn view(&self) -> Mat4 {
        self.controls.view_matrix()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection().matrix_zoomed(aspect, self.controls.zoom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_perspective_at_initial_eye() {
        let rig = CameraRig::new();
        assert_eq!(rig.active(), CameraKind::Perspective);
        assert!((rig.eye() - INITIAL_EYE).length() < 1e-3);
        assert_eq!(rig.controls().damping_factor, INITIAL_DAMPING);
    }

    #[test]
    fn toggle_switches_and_resets_controls() {
        let mut rig = CameraRig::new();
        rig.toggle();
        assert_eq!(rig.active(), CameraKind::Orthographic);
        assert_eq!(rig.controls().damping_factor, SWITCHED_DAMPING);
        assert_eq!(rig.controls().zoom(), 1.0);
        rig.toggle();
        assert_eq!(rig.active(), CameraKind::Perspective);
    }

    #[test]
    fn orthographic_zoom_survives_a_round_trip() {
        let mut rig = CameraRig::new();
        rig.toggle();
        rig.controls.dolly(-100.0);
        let zoomed = rig.controls().zoom();
        assert!(zoomed > 1.0);

        rig.toggle();
        assert_eq!(rig.controls().zoom(), 1.0);
        rig.toggle();
        assert_eq!(rig.controls().zoom(), zoomed);
    }

    #[test]
    fn orthographic_projection_spans_frustum() {
        let mut rig = CameraRig::new();
        rig.toggle();
        let m = rig.projection_matrix(2.0);
        let top_right = m.project_point3(Vec3::new(200.0, 100.0, -1.0));
        assert!((top_right.x - 1.0).abs() < 1e-4);
        assert!((top_right.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn view_puts_sun_in_front() {
        let rig = CameraRig::new();
        let sun = rig.view().transform_point3(Vec3::ZERO);
        assert!(sun.z < -150.0);
    }
}
