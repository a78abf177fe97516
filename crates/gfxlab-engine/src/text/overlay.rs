use anyhow::Result;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawList, ZIndex};

use super::{load_system_font, FontId, FontSystem};

pub const OVERLAY_FONT_SIZE: f32 = 16.0;
pub const OVERLAY_LINE_HEIGHT: f32 = 24.0;

const OVERLAY_MARGIN: f32 = 10.0;
const OVERLAY_Z: ZIndex = ZIndex::OVERLAY;

/// Lines of white text in the top-left corner of the content area.
///
/// Without a usable font the overlay silently records nothing; the missing
/// font is reported once at construction.
pub struct TextOverlay {
    fonts: FontSystem,
    font: Option<FontId>,
    color: Color,
}

impl TextOverlay {
    /// Uses the first available system font.
    pub fn new() -> Self {
        let mut fonts = FontSystem::new();
        let font = match load_system_font().map(|bytes| fonts.load_font(&bytes)) {
            Some(Ok(id)) => Some(id),
            Some(Err(e)) => {
                log::warn!("text overlay disabled: {e:#}");
                None
            }
            None => {
                log::warn!("text overlay disabled: no system font found");
                None
            }
        };
        Self { fonts, font, color: Color::WHITE }
    }

    pub fn from_font_bytes(bytes: &[u8]) -> Result<Self> {
        let mut fonts = FontSystem::new();
        let font = fonts.load_font(bytes)?;
        Ok(Self { fonts, font: Some(font), color: Color::WHITE })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    /// Records `text` on overlay line `line` (1-based).
    pub fn push_line(&self, list: &mut DrawList, line: usize, text: impl Into<String>) {
        let Some(font) = self.font else { return };
        list.push_text(
            OVERLAY_Z,
            text,
            font,
            OVERLAY_FONT_SIZE,
            self.color,
            line_origin(line),
            None,
        );
    }

    /// Records `lines` starting at line 1.
    pub fn push_lines<I, S>(&self, list: &mut DrawList, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (i, text) in lines.into_iter().enumerate() {
            self.push_line(list, i + 1, text);
        }
    }
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-left of overlay line `line` (1-based) in content-local logical px.
pub fn line_origin(line: usize) -> Vec2 {
    let row = line.max(1) - 1;
    Vec2::new(OVERLAY_MARGIN, OVERLAY_MARGIN + OVERLAY_LINE_HEIGHT * row as f32)
}
