use anyhow::{anyhow, Result};
use fontdue::{Font, FontSettings};

/// Handle to a font held by a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Parsed fonts, looked up by [`FontId`] when text is rasterized.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses TrueType or OpenType bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|reason| anyhow!("unreadable font: {reason}"))?;
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("unreadable font"));
        assert!(fonts.is_empty());
    }

    #[test]
    fn ids_index_loaded_fonts() {
        let Some(bytes) = crate::text::load_system_font() else { return };
        let mut fonts = FontSystem::new();
        let a = fonts.load_font(&bytes).unwrap();
        let b = fonts.load_font(&bytes).unwrap();
        assert_ne!(a, b);
        assert_eq!(fonts.len(), 2);
        assert!(fonts.get(b).is_some());
        assert!(fonts.get(FontId(7)).is_none());
    }
}
