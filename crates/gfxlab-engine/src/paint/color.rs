use std::fmt;

/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

/// Error returned by [`Color::from_hex_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color literal: {}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::opaque(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::opaque(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::opaque(0.5, 0.5, 0.5);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Opaque color; premultiplication is a no-op at `a = 1`.
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a premultiplied color from straight 8-bit channels.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates an opaque color from a `0xRRGGBB` literal.
    #[inline]
    pub fn from_hex_rgb(rgb: u32) -> Self {
        Self::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex_str(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError(s.to_string()))?;
        Ok(Self::from_hex_rgb(rgb))
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        Self {
            r: self.r.clamp(0.0, a),
            g: self.g.clamp(0.0, a),
            b: self.b.clamp(0.0, a),
            a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn hex_rgb_ambient_gray() {
        let c = Color::from_hex_rgb(0x333333);
        assert!(close(c.r, 0.2) && close(c.g, 0.2) && close(c.b, 0.2));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn hex_str_with_and_without_hash() {
        let a = Color::from_hex_str("#3498db").unwrap();
        let b = Color::from_hex_str("3498DB").unwrap();
        assert_eq!(a, b);
        assert!(close(a.r, 0x34 as f32 / 255.0));
        assert!(close(a.b, 0xdb as f32 / 255.0));
    }

    #[test]
    fn hex_str_rejects_bad_input() {
        assert!(Color::from_hex_str("#12345").is_err());
        assert!(Color::from_hex_str("#gg0000").is_err());
        assert!(Color::from_hex_str("").is_err());
    }

    // ── premultiplication ─────────────────────────────────────────────────

    #[test]
    fn straight_roundtrip_half_alpha() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert!(close(c.r, 0.5) && close(c.g, 0.25));
        let (r, g, b, a) = c.to_straight();
        assert!(close(r, 1.0) && close(g, 0.5) && close(b, 0.0) && close(a, 0.5));
    }

    #[test]
    fn clamped_caps_rgb_at_alpha() {
        let c = Color::from_premul(0.9, 0.1, 2.0, 0.5).clamped();
        assert_eq!(c, Color::from_premul(0.5, 0.1, 0.5, 0.5));
    }

    #[test]
    fn to_wgpu_preserves_channels() {
        let c = Color::opaque(0.2, 0.3, 0.4).to_wgpu();
        assert!((c.r - 0.2).abs() < 1e-6 && (c.b - 0.4).abs() < 1e-6 && c.a == 1.0);
    }
}
