use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::ColorLinPremul;

// sRGB → Linear premultiplied conversions, kept out of scene.rs for separation of concerns.
impl ColorLinPremul {
    pub const TRANSPARENT: ColorLinPremul = ColorLinPremul { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Convenience alias matching Color::rgba(...) widely used in UI code.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        // Unpremultiply
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        // Convert linear to sRGB
        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Scale the color's coverage, e.g. for a 0..100 opacity setting.
    /// Premultiplied, so every channel scales together.
    #[inline]
    pub fn with_opacity(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a * f,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0001
    }

    /// Parse a hex color string.
    ///
    /// Supports "#RRGGBB" and "#RRGGBBAA".
    pub fn from_hex(color_str: &str) -> Option<Self> {
        let hex = color_str.trim().strip_prefix('#')?.trim();
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_srgba_u8([channel(0)?, channel(2)?, channel(4)?, 255])),
            8 => Some(Self::from_srgba_u8([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
            _ => None,
        }
    }

    /// Format as "#RRGGBBAA".
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_srgba_u8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}
