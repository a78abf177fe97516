use gfxlab_engine::coords::Vec2;
use gfxlab_engine::geometry::segment_circle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// Shape being dragged out, for the gray preview.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Preview {
    Circle(Circle),
    Segment(Segment),
}

/// Two-drag interaction: the first drag defines a circle, the second a line
/// segment, later input is ignored. Points are NDC of the content square.
#[derive(Debug, Default)]
pub struct Sketch {
    circle: Option<Circle>,
    segment: Option<Segment>,
    drag: Option<(Vec2, Vec2)>,
}

impl Sketch {
    pub fn circle(&self) -> Option<Circle> {
        self.circle
    }

    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    pub fn is_complete(&self) -> bool {
        self.circle.is_some() && self.segment.is_some()
    }

    pub fn press(&mut self, p: Vec2) {
        if !self.is_complete() {
            self.drag = Some((p, p));
        }
    }

    pub fn move_to(&mut self, p: Vec2) {
        if let Some((_, current)) = self.drag.as_mut() {
            *current = p;
        }
    }

    /// Ends the drag at `p`. A drag that never left its start point defines
    /// nothing.
    ///
    /// Returns true only for the release that completed the sketch.
    pub fn release(&mut self, p: Vec2) -> bool {
        let Some((start, _)) = self.drag.take() else { return false };
        if start == p {
            return false;
        }
        if self.circle.is_none() {
            self.circle = Some(Circle { center: start, radius: start.distance(p) });
            false
        } else if self.segment.is_none() {
            self.segment = Some(Segment { a: start, b: p });
            true
        } else {
            false
        }
    }

    /// Ends the drag where the pointer was last seen, for releases that
    /// arrive after the pointer left the window.
    pub fn release_in_place(&mut self) -> bool {
        match self.drag {
            Some((_, last)) => self.release(last),
            None => false,
        }
    }

    pub fn preview(&self) -> Option<Preview> {
        let (start, current) = self.drag?;
        Some(if self.circle.is_none() {
            Preview::Circle(Circle { center: start, radius: start.distance(current) })
        } else {
            Preview::Segment(Segment { a: start, b: current })
        })
    }

    /// Intersection points once both shapes exist, in segment order.
    pub fn intersections(&self) -> Option<Vec<Vec2>> {
        let (c, s) = (self.circle?, self.segment?);
        Some(segment_circle(s.a, s.b, c.center, c.radius))
    }

    /// Overlay text, one entry per line.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(c) = self.circle {
            lines.push(format!("Circle: center ({}) radius = {:.2}", fmt_point(c.center), c.radius));
        }
        if let Some(s) = self.segment {
            lines.push(format!("Line segment: ({}) ~ ({})", fmt_point(s.a), fmt_point(s.b)));
        }
        if let Some(points) = self.intersections() {
            if points.is_empty() {
                lines.push("No intersection".to_string());
            } else {
                let listed: Vec<String> = points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("Point {}: ({})", i + 1, fmt_point(*p)))
                    .collect();
                lines.push(format!("Intersection Points: {} {}", points.len(), listed.join(" ")));
            }
        }
        lines
    }
}

fn fmt_point(p: Vec2) -> String {
    format!("{:.2}, {:.2}", p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(s: &mut Sketch, from: Vec2, to: Vec2) -> bool {
        s.press(from);
        s.move_to((from + to) * 0.5);
        s.release(to)
    }

    // ── state machine ──

    #[test]
    fn first_drag_defines_circle() {
        let mut s = Sketch::default();
        drag(&mut s, Vec2::ZERO, Vec2::new(0.3, 0.4));
        let c = s.circle().unwrap();
        assert_eq!(c.center, Vec2::ZERO);
        assert!((c.radius - 0.5).abs() < 1e-6);
        assert!(s.segment().is_none());
    }

    #[test]
    fn second_drag_defines_segment_then_input_is_ignored() {
        let mut s = Sketch::default();
        drag(&mut s, Vec2::ZERO, Vec2::new(0.5, 0.0));
        drag(&mut s, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(s.is_complete());
        let before = s.segment();
        drag(&mut s, Vec2::new(0.2, 0.2), Vec2::new(0.9, 0.9));
        assert_eq!(s.segment(), before);
        assert!(s.preview().is_none());
    }

    #[test]
    fn click_without_drag_defines_nothing() {
        let mut s = Sketch::default();
        s.press(Vec2::new(0.1, 0.1));
        s.release(Vec2::new(0.1, 0.1));
        assert!(s.circle().is_none());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = Sketch::default();
        s.release(Vec2::new(0.5, 0.5));
        assert!(s.circle().is_none());
    }

    #[test]
    fn only_the_completing_release_reports_completion() {
        let mut s = Sketch::default();
        assert!(!drag(&mut s, Vec2::ZERO, Vec2::new(0.5, 0.0)));
        assert!(drag(&mut s, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)));
        assert!(!drag(&mut s, Vec2::new(0.2, 0.2), Vec2::new(0.9, 0.9)));
        assert!(!s.release(Vec2::new(0.3, 0.3)));
    }

    #[test]
    fn release_in_place_ends_at_last_pointer() {
        let mut s = Sketch::default();
        s.press(Vec2::ZERO);
        s.move_to(Vec2::new(0.0, 0.6));
        assert!(!s.release_in_place());
        let c = s.circle().unwrap();
        assert_eq!(c.center, Vec2::ZERO);
        assert!((c.radius - 0.6).abs() < 1e-6);
        assert!(s.preview().is_none());

        s.press(Vec2::new(-1.0, 0.0));
        s.move_to(Vec2::new(1.0, 0.0));
        assert!(s.release_in_place());
        assert!(!s.release_in_place());
    }

    // ── preview ──

    #[test]
    fn preview_follows_pointer() {
        let mut s = Sketch::default();
        s.press(Vec2::ZERO);
        s.move_to(Vec2::new(0.0, 0.2));
        let Some(Preview::Circle(c)) = s.preview() else { panic!("expected a circle preview") };
        assert_eq!(c.center, Vec2::ZERO);
        assert!((c.radius - 0.2).abs() < 1e-6);
        s.release(Vec2::new(0.0, 0.2));
        s.press(Vec2::ONE * 0.1);
        assert!(matches!(s.preview(), Some(Preview::Segment(_))));
    }

    // ── intersections ──

    #[test]
    fn reports_two_points() {
        let mut s = Sketch::default();
        drag(&mut s, Vec2::ZERO, Vec2::new(0.5, 0.0));
        drag(&mut s, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        let pts = s.intersections().unwrap();
        assert_eq!(pts.len(), 2);
        assert!((pts[0] - Vec2::new(-0.5, 0.0)).length() < 1e-5);

        let text = s.describe();
        assert_eq!(text[0], "Circle: center (0.00, 0.00) radius = 0.50");
        assert_eq!(text[1], "Line segment: (-1.00, 0.00) ~ (1.00, 0.00)");
        assert_eq!(text[2], "Intersection Points: 2 Point 1: (-0.50, 0.00) Point 2: (0.50, 0.00)");
    }

    #[test]
    fn reports_no_intersection() {
        let mut s = Sketch::default();
        drag(&mut s, Vec2::ZERO, Vec2::new(0.1, 0.0));
        drag(&mut s, Vec2::new(0.5, 0.5), Vec2::new(0.9, 0.9));
        assert_eq!(s.intersections(), Some(vec![]));
        assert_eq!(s.describe().last().map(String::as_str), Some("No intersection"));
    }

    #[test]
    fn nothing_to_describe_initially() {
        assert!(Sketch::default().describe().is_empty());
        assert!(Sketch::default().intersections().is_none());
    }
}
