//! Draws a laid-out year into an `engine-core` display list.
//!
//! Rendering only reads geometry; it never lays anything out. Layers, back
//! to front: month background, month halo, range background, day
//! background, text.

use chrono::NaiveDate;
use engine_core::{Brush, Painter, Rect, RoundedRadii, RoundedRect, TextRun};
use year_grid::calendar::{self, weekday_for_column, DAYS_PER_WEEK};
use year_grid::{
    CalendarText, DayRect, GeometrySnapshot, GridParameters, MonthLayout, SelectedDay, TextMeasure,
    TextStyle,
};

use crate::style::{BackgroundShape, BackgroundStyle, ImageSource, MergeType, YearViewStyle};

const Z_MONTH_BACKGROUND: i32 = 0;
const Z_MONTH_HALO: i32 = 1;
const Z_RANGE: i32 = 2;
const Z_DAY_BACKGROUND: i32 = 3;
const Z_TEXT: i32 = 4;

/// Everything a frame needs besides the painter.
pub struct RenderContext<'a> {
    pub snapshot: &'a GeometrySnapshot,
    pub style: &'a YearViewStyle,
    pub params: &'a GridParameters,
    pub today: NaiveDate,
    /// Day drawn with the selected style: the single selection or a pending range start.
    pub selected: Option<&'a SelectedDay>,
    /// Completed range, inclusive.
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub highlighted_month: Option<usize>,
    pub measure: &'a dyn TextMeasure,
    pub text: &'a dyn CalendarText,
}

pub fn render_year(painter: &mut Painter, ctx: &RenderContext<'_>) {
    let vp = painter.viewport();
    let visible = if vp.width > 0 && vp.height > 0 {
        Rect::new(0.0, 0.0, vp.width as f32, vp.height as f32)
    } else {
        Rect::new(0.0, 0.0, ctx.snapshot.width, ctx.snapshot.height)
    };
    for month in &ctx.snapshot.months {
        if !month.block.rect.intersects(&visible) {
            continue;
        }
        render_month(painter, ctx, month);
    }
}

fn render_month(painter: &mut Painter, ctx: &RenderContext<'_>, month: &MonthLayout) {
    let style = ctx.style;
    let block = month.block;

    if let Some(bg) = &style.month.background {
        draw_background(painter, block.rect.expand(bg.selection_margin), bg, Z_MONTH_BACKGROUND);
    }
    if ctx.highlighted_month == Some(block.month_index) {
        draw_background(painter, month.selection_halo(), &style.month.selection, Z_MONTH_HALO);
    }

    let name_style = if month.is_current_month { &style.month.current_name } else { &style.month.name };
    let name_x = style.month.title_gravity.title_x(block.rect, month.name_size.width, block.selection_margin);
    painter.text(text_run(&month.name, [name_x, block.rect.top()], name_style), Z_TEXT);

    if month.grid.cell_centers.is_empty() {
        return;
    }
    render_weekday_labels(painter, ctx, month);
    for day in &month.grid.day_rects {
        render_day(painter, ctx, day);
    }
}

fn render_weekday_labels(painter: &mut Painter, ctx: &RenderContext<'_>, month: &MonthLayout) {
    let params = ctx.params;
    for col in 0..DAYS_PER_WEEK {
        let weekday = weekday_for_column(col, params.first_day_of_week);
        let label = ctx.text.weekday_label(weekday);
        let style = if params.weekend_days.contains(weekday) && !params.day_name_transcends_weekend {
            &ctx.style.weekend_day
        } else {
            &ctx.style.day_name
        };
        let size = ctx.measure.measure(&label, style);
        let [cx, cy] = month.grid.weekday_centers[col];
        painter.text(text_run(&label, [cx - size.width * 0.5, cy - size.height * 0.5], style), Z_TEXT);
    }
}

fn render_day(painter: &mut Painter, ctx: &RenderContext<'_>, day: &DayRect) {
    let style = ctx.style;
    let padding = style.touch_padding;
    let extent = day.text.width.max(day.text.height);

    let in_range = ctx.range.is_some_and(|(start, end)| calendar::is_in_range(day.date, Some(start), Some(end)));
    if in_range {
        if let Some(range_bg) = &style.range {
            let size = extent + padding * 2.0;
            draw_background(painter, Rect::centered(day.center, size, size), range_bg, Z_RANGE);
        }
    }

    let selected = calendar::is_selected(&day.key, ctx.selected.map(|s| &s.key));
    let (text_style, background) = if selected {
        (&style.selected.text, Some(&style.selected.background))
    } else if calendar::is_today(day.date, ctx.today) {
        (&style.today.text, Some(&style.today.background))
    } else if calendar::is_weekend(day.date, ctx.params.weekend_days) {
        (&style.weekend_day, None)
    } else {
        (&style.simple_day, None)
    };

    if let Some(bg) = background {
        let size = extent + padding;
        draw_background(painter, Rect::centered(day.center, size, size), bg, Z_DAY_BACKGROUND);
    }

    let label = day.date.format("%-d").to_string();
    let size = ctx.measure.measure(&label, text_style);
    let pos = [day.center[0] - size.width * 0.5, day.center[1] - size.height * 0.5];
    painter.text(text_run(&label, pos, text_style), Z_TEXT);
}

fn text_run(text: &str, pos: [f32; 2], style: &TextStyle) -> TextRun {
    TextRun {
        text: text.to_string(),
        pos,
        size: style.size,
        color: style.color,
        bold: style.font_type.is_bold(),
        italic: style.font_type.is_italic(),
    }
}

/// Draw one styled background into `bounds`.
pub fn draw_background(painter: &mut Painter, bounds: Rect, style: &BackgroundStyle, z: i32) {
    if bounds.is_empty() || !style.is_visible() {
        return;
    }
    let clip = style.merge_type == MergeType::Clip;
    if clip {
        painter.push_clip_rect(bounds);
    }
    if let ImageSource::File(path) = &style.image {
        painter.image(path.clone(), [bounds.x, bounds.y], [bounds.w, bounds.h], z);
    }
    let color = style.fill_color();
    if !color.is_transparent() {
        let brush = Brush::Solid(color);
        match &style.shape {
            BackgroundShape::Circle { radius } => {
                let fit = bounds.w.min(bounds.h) * 0.5;
                let r = if *radius > 0.0 { radius.min(fit) } else { fit };
                painter.circle(bounds.center(), r, brush, z);
            }
            BackgroundShape::Square => painter.rect(bounds, brush, z),
            BackgroundShape::RoundedSquare { corner_radius } => {
                let r = corner_radius.min(bounds.w.min(bounds.h) * 0.5);
                painter.rounded_rect(RoundedRect { rect: bounds, radii: RoundedRadii::uniform(r) }, brush, z);
            }
            shape @ (BackgroundShape::Star { .. } | BackgroundShape::Custom { .. }) => {
                if let Some(path) = shape.outline(bounds) {
                    painter.fill_path(path, color, z);
                }
            }
        }
    }
    if clip {
        painter.pop_clip();
    }
}
