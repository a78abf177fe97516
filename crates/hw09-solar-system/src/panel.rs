use gfxlab_engine::input::Key;

use crate::planets::Planet;

pub const SPEED_STEP: f32 = 0.001;

/// Keyboard replacement for the planet speed sliders.
///
/// `1`..`4` select a planet, `Up`/`Down` change its rotation speed and
/// `Right`/`Left` its orbit speed.
#[derive(Debug, Default)]
pub struct ControlPanel {
    selected: usize,
}

impl ControlPanel {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: Key, planets: &mut [Planet]) -> bool {
        if let Some(d) = key.digit() {
            let index = usize::from(d);
            if (1..=planets.len()).contains(&index) {
                self.selected = index - 1;
                return true;
            }
            return false;
        }
        let Some(planet) = planets.get_mut(self.selected) else { return false };
        match key {
            Key::ArrowUp => planet.adjust_rotation_speed(SPEED_STEP),
            Key::ArrowDown => planet.adjust_rotation_speed(-SPEED_STEP),
            Key::ArrowRight => planet.adjust_orbit_speed(SPEED_STEP),
            Key::ArrowLeft => planet.adjust_orbit_speed(-SPEED_STEP),
            _ => return false,
        }
        true
    }

    pub fn describe(&self, planets: &[Planet]) -> Vec<String> {
        let Some(planet) = planets.get(self.selected) else { return Vec::new() };
        let names: Vec<String> = planets
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i == self.selected { format!("[{} {}]", i + 1, p.name()) } else { format!("{} {}", i + 1, p.name()) }
            })
            .collect();
        vec![
            names.join("  "),
            format!("Rotation speed: {:.3}  (Up/Down)", planet.config.rotation_speed),
            format!("Orbit speed: {:.3}  (Right/Left)", planet.config.orbit_speed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planets::parse_planets;

    fn planets() -> Vec<Planet> {
        parse_planets(include_str!("../assets/planets.json"))
            .unwrap()
            .into_iter()
            .map(Planet::new)
            .collect()
    }

    #[test]
    fn digits_select_planets() {
        let mut panel = ControlPanel::default();
        let mut ps = planets();
        assert!(panel.handle_key(Key::Digit3, &mut ps));
        assert_eq!(panel.selected(), 2);
        assert!(!panel.handle_key(Key::Digit9, &mut ps));
        assert!(!panel.handle_key(Key::Digit0, &mut ps));
        assert_eq!(panel.selected(), 2);
    }

    #[test]
    fn arrows_change_selected_planet_only() {
        let mut panel = ControlPanel::default();
        let mut ps = planets();
        panel.handle_key(Key::Digit4, &mut ps);
        panel.handle_key(Key::ArrowUp, &mut ps);
        panel.handle_key(Key::ArrowLeft, &mut ps);
        assert!((ps[3].config.rotation_speed - 0.009).abs() < 1e-6);
        assert!((ps[3].config.orbit_speed - 0.007).abs() < 1e-6);
        assert_eq!(ps[0].config.rotation_speed, 0.02);
    }

    #[test]
    fn other_keys_are_not_consumed() {
        let mut panel = ControlPanel::default();
        let mut ps = planets();
        assert!(!panel.handle_key(Key::C, &mut ps));
    }

    #[test]
    fn describe_marks_selection() {
        let panel = ControlPanel::default();
        let lines = panel.describe(&planets());
        assert!(lines[0].starts_with("[1 Mercury]"));
        assert_eq!(lines[1], "Rotation speed: 0.020  (Up/Down)");
    }
}
