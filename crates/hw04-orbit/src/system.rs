use std::f32::consts::PI;

use gfxlab_engine::glam::{Mat4, Vec3};

/// Angular speeds in rad/s.
const SUN_ROTATION: f32 = PI / 4.0;
const EARTH_ROTATION: f32 = PI;
const EARTH_REVOLUTION: f32 = PI / 6.0;
const MOON_ROTATION: f32 = PI;
const MOON_REVOLUTION: f32 = 2.0 * PI;

const EARTH_ORBIT: f32 = 0.7;
const MOON_ORBIT: f32 = 0.2;

/// Accumulated angles of the sun/earth/moon system, in radians.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Angles {
    pub sun_rotation: f32,
    pub earth_rotation: f32,
    pub earth_revolution: f32,
    pub moon_rotation: f32,
    pub moon_revolution: f32,
}

impl Angles {
    pub fn advance(&mut self, dt: f32) {
        self.sun_rotation += SUN_ROTATION * dt;
        self.earth_rotation += EARTH_ROTATION * dt;
        self.earth_revolution += EARTH_REVOLUTION * dt;
        self.moon_rotation += MOON_ROTATION * dt;
        self.moon_revolution += MOON_REVOLUTION * dt;
    }

    pub fn sun(&self) -> Mat4 {
        Mat4::from_rotation_z(self.sun_rotation) * scale(0.2)
    }

    /// Earth frame: revolve about the sun, then move out along the orbit.
    fn earth_frame(&self) -> Mat4 {
        Mat4::from_rotation_z(self.earth_revolution)
            * Mat4::from_translation(Vec3::new(EARTH_ORBIT, 0.0, 0.0))
    }

    pub fn earth(&self) -> Mat4 {
        self.earth_frame() * Mat4::from_rotation_z(self.earth_rotation) * scale(0.1)
    }

    pub fn moon(&self) -> Mat4 {
        self.earth_frame()
            * Mat4::from_rotation_z(self.moon_revolution)
            * Mat4::from_translation(Vec3::new(MOON_ORBIT, 0.0, 0.0))
            * Mat4::from_rotation_z(self.moon_rotation)
            * scale(0.05)
    }
}

fn scale(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(s, s, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    // ── placement ──

    #[test]
    fn initial_layout() {
        let a = Angles::default();
        assert!(close(center(a.sun()), Vec3::ZERO));
        assert!(close(center(a.earth()), Vec3::new(0.7, 0.0, 0.0)));
        assert!(close(center(a.moon()), Vec3::new(0.9, 0.0, 0.0)));
    }

    #[test]
    fn sizes_follow_scale() {
        let a = Angles::default();
        let corner = a.earth().transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!(close(corner, Vec3::new(0.75, 0.05, 0.0)));
        let corner = a.sun().transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!(close(corner, Vec3::new(0.1, 0.0, 0.0)));
    }

    // ── animation ──

    #[test]
    fn earth_revolves_around_sun() {
        let mut a = Angles::default();
        a.advance(3.0); // quarter turn at π/6 rad/s
        assert!(close(center(a.earth()), Vec3::new(0.0, 0.7, 0.0)));
    }

    #[test]
    fn moon_orbits_earth() {
        let mut a = Angles::default();
        a.advance(0.25); // moon quarter turn
        let offset = center(a.moon()) - center(a.earth());
        assert!((offset.length() - MOON_ORBIT).abs() < 1e-5);
        let rev = a.earth_revolution + a.moon_revolution;
        assert!(close(offset, Vec3::new(rev.cos(), rev.sin(), 0.0) * MOON_ORBIT));
    }

    #[test]
    fn spin_does_not_move_center() {
        let mut a = Angles::default();
        a.earth_rotation = 1.0;
        assert!(close(center(a.earth()), Vec3::new(0.7, 0.0, 0.0)));
    }
}
