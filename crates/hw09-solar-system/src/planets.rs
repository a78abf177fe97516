use anyhow::{Context, Result};
use serde::Deserialize;

use gfxlab_engine::glam::{Mat4, Vec3};
use gfxlab_engine::paint::Color;

pub const MIN_SPEED: f32 = 0.0;
pub const MAX_SPEED: f32 = 0.1;

/// One row of `assets/planets.json`. Speeds are radians per 60 Hz frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetConfig {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    pub color: String,
    #[serde(default)]
    pub texture: Option<String>,
    pub rotation_speed: f32,
    pub orbit_speed: f32,
}

pub fn parse_planets(json: &str) -> Result<Vec<PlanetConfig>> {
    let planets: Vec<PlanetConfig> = serde_json::from_str(json).context("invalid planet table")?;
    for p in &planets {
        anyhow::ensure!(p.radius > 0.0, "planet {} has non-positive radius {}", p.name, p.radius);
        Color::from_hex_str(&p.color).with_context(|| format!("planet {}", p.name))?;
    }
    Ok(planets)
}

/// A planet in its orbit group: spins about its own Y and revolves about
/// the sun's Y.
#[derive(Debug, Clone)]
pub struct Planet {
    pub config: PlanetConfig,
    pub color: Color,
    pub spin: f32,
    pub orbit: f32,
}

impl Planet {
    pub fn new(config: PlanetConfig) -> Self {
        let color = Color::from_hex_str(&config.color).unwrap_or(Color::WHITE);
        Self { config, color, spin: 0.0, orbit: 0.0 }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Advances by `dt` seconds, scaling the per-frame speeds to 60 Hz.
    pub fn advance(&mut self, dt: f32) {
        let frames = dt * 60.0;
        self.spin += self.config.rotation_speed * frames;
        self.orbit += self.config.orbit_speed * frames;
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.orbit)
            * Mat4::from_translation(Vec3::new(self.config.distance, 0.0, 0.0))
            * Mat4::from_rotation_y(self.spin)
    }

    pub fn adjust_rotation_speed(&mut self, delta: f32) {
        self.config.rotation_speed = step_speed(self.config.rotation_speed, delta);
    }

    pub fn adjust_orbit_speed(&mut self, delta: f32) {
        self.config.orbit_speed = step_speed(self.config.orbit_speed, delta);
    }
}

/// Adds `delta`, snaps to the 0.001 grid and clamps to the slider range.
fn step_speed(speed: f32, delta: f32) -> f32 {
    (((speed + delta) * 1000.0).round() / 1000.0).clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = include_str!("../assets/planets.json");

    // ── table ──

    #[test]
    fn bundled_table_parses() {
        let planets = parse_planets(TABLE).unwrap();
        let names: Vec<_> = planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Mercury", "Venus", "Earth", "Mars"]);
        let earth = &planets[2];
        assert_eq!((earth.radius, earth.distance), (3.5, 50.0));
        assert_eq!(earth.color, "#3498db");
        assert_eq!(earth.texture.as_deref(), Some("Earth.jpg"));
        assert_eq!(earth.rotation_speed, 0.01);
    }

    #[test]
    fn texture_is_optional() {
        let json = r##"[{"name":"X","radius":1,"distance":5,"color":"#ffffff","rotationSpeed":0,"orbitSpeed":0}]"##;
        assert_eq!(parse_planets(json).unwrap()[0].texture, None);
    }

    #[test]
    fn rejects_bad_color() {
        let json = r##"[{"name":"X","radius":1,"distance":5,"color":"blue","rotationSpeed":0,"orbitSpeed":0}]"##;
        assert!(parse_planets(json).is_err());
    }

    #[test]
    fn rejects_missing_field() {
        assert!(parse_planets(r#"[{"name":"X"}]"#).is_err());
    }

    // ── motion ──

    fn earth() -> Planet {
        Planet::new(parse_planets(TABLE).unwrap().remove(2))
    }

    #[test]
    fn starts_on_x_axis() {
        let p = earth();
        let c = p.model().transform_point3(Vec3::ZERO);
        assert!((c - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn one_second_is_sixty_frames() {
        let mut p = earth();
        p.advance(1.0);
        assert!((p.orbit - 0.6).abs() < 1e-5);
        assert!((p.spin - 0.6).abs() < 1e-5);
    }

    #[test]
    fn spin_keeps_orbit_position() {
        let mut p = earth();
        p.spin = 1.3;
        let c = p.model().transform_point3(Vec3::ZERO);
        assert!((c - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn orbit_rotates_about_y() {
        let mut p = earth();
        p.orbit = std::f32::consts::FRAC_PI_2;
        let c = p.model().transform_point3(Vec3::ZERO);
        assert!((c - Vec3::new(0.0, 0.0, -50.0)).length() < 1e-3);
    }

    // ── speed control ──

    #[test]
    fn speeds_step_and_clamp() {
        let mut p = earth();
        p.adjust_rotation_speed(0.001);
        assert!((p.config.rotation_speed - 0.011).abs() < 1e-6);
        for _ in 0..50 {
            p.adjust_orbit_speed(-0.001);
        }
        assert_eq!(p.config.orbit_speed, 0.0);
        for _ in 0..200 {
            p.adjust_orbit_speed(0.001);
        }
        assert_eq!(p.config.orbit_speed, MAX_SPEED);
    }
}
