use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Text draw payload.
///
/// Unlike shapes, text is positioned in content-local logical pixels
/// (origin top-left, +Y down) so it stays crisp and unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block.
    pub origin: Vec2,
    /// Wrapping width; `None` keeps everything on one line.
    pub max_width: Option<f32>,
}

impl DrawList {
    /// Records a text draw command. Empty strings are dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(z, DrawCmd::Text(TextCmd { text, font, size, color, origin, max_width }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_dropped() {
        let mut list = DrawList::new();
        list.push_text(ZIndex(0), "", FontId(0), 16.0, Color::WHITE, Vec2::ZERO, None);
        assert!(list.items().is_empty());
    }

    #[test]
    fn text_keeps_pixel_origin() {
        let mut list = DrawList::new();
        let origin = Vec2::new(10.0, 34.0);
        list.push_text(ZIndex(2), "fps: 60", FontId(0), 16.0, Color::WHITE, origin, None);

        let DrawCmd::Text(t) = &list.items()[0].cmd else { panic!("expected text") };
        assert_eq!(t.origin, origin);
        assert_eq!(t.text, "fps: 60");
    }
}
