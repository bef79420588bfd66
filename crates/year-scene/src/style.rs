//! Style records for the year view.
//!
//! The layout core never looks inside these; it only needs the text styles
//! and paddings that [`YearViewStyle::layout_metrics`] extracts.

use std::f32::consts::PI;
use std::path::PathBuf;

use engine_core::{Color, FillRule, Path, PathCmd, Rect};
use tracing::warn;
use year_config::{parse_color, StyleConfig};
use year_grid::{FontType, LayoutMetrics, TextStyle};

/// Horizontal placement of the month name inside its block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleGravity {
    Start,
    Left,
    #[default]
    Center,
    End,
    Right,
}

impl TitleGravity {
    /// Parse a gravity name, falling back to `Center` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "start" => TitleGravity::Start,
            "left" => TitleGravity::Left,
            "center" | "centre" => TitleGravity::Center,
            "end" => TitleGravity::End,
            "right" => TitleGravity::Right,
            other => {
                warn!("unsupported title gravity {other:?}, using center");
                TitleGravity::Center
            }
        }
    }

    /// Left edge of a title `width` wide in `block`.
    pub fn title_x(&self, block: Rect, width: f32, margin: f32) -> f32 {
        match self {
            TitleGravity::Start | TitleGravity::Left => block.left() + margin,
            TitleGravity::Center => block.center()[0] - width * 0.5,
            TitleGravity::End | TitleGravity::Right => block.right() - width - margin,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BackgroundShape {
    /// A `radius` of zero fits the circle to the bounds; larger values cap it.
    Circle { radius: f32 },
    #[default]
    Square,
    RoundedSquare { corner_radius: f32 },
    /// `legs` is clamped to 3..=7 when drawn.
    Star { legs: u32, inner_radius_ratio: f32 },
    /// Arbitrary outline, scaled to fill the bounds less `inner_padding`.
    Custom { path: Path, inner_padding: f32 },
}

impl BackgroundShape {
    pub fn star() -> Self {
        BackgroundShape::Star { legs: 5, inner_radius_ratio: 0.5 }
    }

    /// Parse a shape name used in configuration files.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => BackgroundShape::Circle { radius: 0.0 },
            "square" => BackgroundShape::Square,
            "rounded_square" | "rounded-square" => BackgroundShape::RoundedSquare { corner_radius: 4.0 },
            "star" => BackgroundShape::star(),
            other => {
                warn!("unsupported background shape {other:?}, using circle");
                BackgroundShape::Circle { radius: 0.0 }
            }
        }
    }

    /// Outline of the shape for the path-based variants.
    pub fn outline(&self, bounds: Rect) -> Option<Path> {
        match self {
            BackgroundShape::Star { legs, inner_radius_ratio } => {
                Some(star_path(bounds, *legs, *inner_radius_ratio))
            }
            BackgroundShape::Custom { path, inner_padding } => fit_path(path, bounds, *inner_padding),
            _ => None,
        }
    }
}

fn star_path(bounds: Rect, legs: u32, inner_radius_ratio: f32) -> Path {
    let points = legs.clamp(3, 7);
    let [cx, cy] = bounds.center();
    let outer = bounds.w.min(bounds.h) * 0.5;
    let inner = outer * inner_radius_ratio;
    let step = 2.0 * PI / points as f32;
    let at = |radius: f32, angle: f32| [cx + radius * angle.cos(), cy + radius * angle.sin()];

    let mut cmds = vec![PathCmd::MoveTo(at(outer, -PI / 2.0))];
    for i in 0..points {
        let outer_angle = -PI / 2.0 + i as f32 * step;
        cmds.push(PathCmd::LineTo(at(inner, outer_angle + step * 0.5)));
        cmds.push(PathCmd::LineTo(at(outer, outer_angle + step)));
    }
    cmds.push(PathCmd::Close);
    Path { cmds, fill_rule: FillRule::NonZero }
}

/// Scale `path` to fill `bounds` shrunk by `padding`. Degenerate paths give `None`.
fn fit_path(path: &Path, bounds: Rect, padding: f32) -> Option<Path> {
    let src = path.bounds()?;
    let dst = bounds.expand(-padding);
    if src.w <= 0.0 || src.h <= 0.0 || dst.is_empty() {
        return None;
    }
    let sx = dst.w / src.w;
    let sy = dst.h / src.h;
    Some(path.map_points(|[x, y]| [dst.x + (x - src.x) * sx, dst.y + (y - src.y) * sy]))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageSource {
    #[default]
    None,
    /// Raster image resolved by the display-list backend.
    File(PathBuf),
}

/// How a background image combines with its shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergeType {
    /// Shape drawn on top of the image.
    #[default]
    Overlay,
    /// Image clipped to the shape bounds.
    Clip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
    pub color: Color,
    pub shape: BackgroundShape,
    /// Extra room around the content the background is drawn for.
    pub selection_margin: f32,
    pub image: ImageSource,
    /// Coverage of `color` in percent (0..=100).
    pub opacity: u8,
    pub merge_type: MergeType,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            shape: BackgroundShape::Square,
            selection_margin: 2.0,
            image: ImageSource::None,
            opacity: 100,
            merge_type: MergeType::Overlay,
        }
    }
}

impl BackgroundStyle {
    pub fn solid(color: Color, shape: BackgroundShape) -> Self {
        Self { color, shape, ..Default::default() }
    }

    /// `color` scaled by `opacity`.
    pub fn fill_color(&self) -> Color {
        self.color.with_opacity(self.opacity.min(100) as f32 / 100.0)
    }

    /// False when drawing would leave no trace.
    pub fn is_visible(&self) -> bool {
        !self.fill_color().is_transparent() || self.image != ImageSource::None
    }
}

/// Text plus background for a day drawn in a special state.
#[derive(Clone, Debug, PartialEq)]
pub struct DayStyle {
    pub text: TextStyle,
    pub background: BackgroundStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthStyle {
    pub title_gravity: TitleGravity,
    pub name: TextStyle,
    /// Name style for the month containing today.
    pub current_name: TextStyle,
    /// Drawn behind every month when set.
    pub background: Option<BackgroundStyle>,
    /// Halo behind the highlighted month. Its margin also sizes the block's selection rect.
    pub selection: BackgroundStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct YearViewStyle {
    pub simple_day: TextStyle,
    pub weekend_day: TextStyle,
    /// Weekday labels above the day columns.
    pub day_name: TextStyle,
    pub today: DayStyle,
    pub selected: DayStyle,
    /// Background behind days inside the selected range.
    pub range: Option<BackgroundStyle>,
    pub month: MonthStyle,
    pub touch_padding: f32,
}

impl Default for YearViewStyle {
    fn default() -> Self {
        // Config defaults are valid hex colors, so this cannot fail.
        Self::from_config(&StyleConfig::default()).unwrap_or_else(|_| Self::plain())
    }
}

impl YearViewStyle {
    /// Black on transparent with no decorations.
    pub fn plain() -> Self {
        let ink = Color::rgba(0, 0, 0, 255);
        let text = TextStyle::new(12.0, ink);
        Self {
            simple_day: text,
            weekend_day: text,
            day_name: text,
            today: DayStyle { text, background: BackgroundStyle::default() },
            selected: DayStyle { text, background: BackgroundStyle::default() },
            range: None,
            month: MonthStyle {
                title_gravity: TitleGravity::Center,
                name: TextStyle::new(14.0, ink),
                current_name: TextStyle::new(14.0, ink),
                background: None,
                selection: BackgroundStyle::default(),
            },
            touch_padding: year_grid::day_grid::DEFAULT_TOUCH_PADDING,
        }
    }

    /// Build from the `[style]` configuration section.
    pub fn from_config(cfg: &StyleConfig) -> year_config::Result<Self> {
        let text = |size: f32, field: &str, value: &str| -> year_config::Result<TextStyle> {
            Ok(TextStyle::new(size, parse_color(field, value)?))
        };
        let month_background = match &cfg.month_background_color {
            Some(hex) => Some(BackgroundStyle {
                color: parse_color("month_background_color", hex)?,
                shape: BackgroundShape::RoundedSquare { corner_radius: 6.0 },
                selection_margin: cfg.month_selection_margin,
                ..Default::default()
            }),
            None => None,
        };
        Ok(Self {
            simple_day: text(cfg.day_text_size, "simple_day_color", &cfg.simple_day_color)?,
            weekend_day: text(cfg.day_text_size, "weekend_day_color", &cfg.weekend_day_color)?,
            day_name: text(cfg.day_name_size, "day_name_color", &cfg.day_name_color)?,
            today: DayStyle {
                text: text(cfg.day_text_size, "today_text_color", &cfg.today_text_color)?
                    .with_font_type(FontType::Bold),
                background: BackgroundStyle::solid(
                    parse_color("today_background_color", &cfg.today_background_color)?,
                    BackgroundShape::from_name(&cfg.today_shape),
                ),
            },
            selected: DayStyle {
                text: text(cfg.day_text_size, "selected_text_color", &cfg.selected_text_color)?
                    .with_font_type(FontType::Bold),
                background: BackgroundStyle::solid(
                    parse_color("selected_background_color", &cfg.selected_background_color)?,
                    BackgroundShape::from_name(&cfg.selected_shape),
                ),
            },
            range: Some(BackgroundStyle::solid(
                parse_color("range_background_color", &cfg.range_background_color)?,
                BackgroundShape::Circle { radius: 0.0 },
            )),
            month: MonthStyle {
                title_gravity: TitleGravity::from_name(&cfg.title_gravity),
                name: text(cfg.month_name_size, "month_name_color", &cfg.month_name_color)?
                    .with_font_type(FontType::Bold),
                current_name: text(cfg.month_name_size, "current_month_name_color", &cfg.current_month_name_color)?
                    .with_font_type(FontType::Bold),
                background: month_background,
                selection: BackgroundStyle {
                    color: parse_color("month_selection_color", &cfg.month_selection_color)?,
                    shape: BackgroundShape::RoundedSquare { corner_radius: 8.0 },
                    selection_margin: cfg.month_selection_margin,
                    ..Default::default()
                },
            },
            touch_padding: cfg.touch_padding,
        })
    }

    /// The subset of the style that affects geometry.
    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            day_text: self.simple_day,
            month_name: self.month.name,
            current_month_name: self.month.current_name,
            touch_padding: self.touch_padding,
            selection_margin: self.month.selection.selection_margin,
        }
    }
}
