//! Text measurement used to size the month-name row and day touch targets.

use engine_core::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontType {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontType {
    pub fn is_bold(&self) -> bool {
        matches!(self, FontType::Bold | FontType::BoldItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, FontType::Italic | FontType::BoldItalic)
    }
}

/// Text appearance for one kind of label (day number, month name, weekday label...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    pub color: Color,
    pub font_type: FontType,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color, font_type: FontType::Normal }
    }

    pub fn with_font_type(mut self, font_type: FontType) -> Self {
        self.font_type = font_type;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Measures a single line of text.
///
/// Called many times per layout pass; implementations must be free of side effects
/// and return the same size for the same inputs.
pub trait TextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize;
}

/// Glyph-count based estimate, good enough when no shaper is wired in.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicTextMeasure {
    /// Advance per glyph, in ems.
    pub glyph_width_em: f32,
    /// Advance per glyph for bold faces, in ems.
    pub bold_glyph_width_em: f32,
    pub ascent_em: f32,
    pub descent_em: f32,
}

impl Default for HeuristicTextMeasure {
    fn default() -> Self {
        Self {
            glyph_width_em: 0.55,
            bold_glyph_width_em: 0.6,
            ascent_em: 0.8,
            descent_em: 0.2,
        }
    }
}

impl TextMeasure for HeuristicTextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize {
        let size = style.size.max(0.0);
        let per_glyph = if style.font_type.is_bold() {
            self.bold_glyph_width_em
        } else {
            self.glyph_width_em
        };
        TextSize {
            width: text.chars().count() as f32 * per_glyph * size,
            height: (self.ascent_em + self.descent_em) * size,
        }
    }
}
