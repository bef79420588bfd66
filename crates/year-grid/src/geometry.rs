//! Grid geometry engine: splits the surface into month blocks.

use engine_core::Rect;

use crate::calendar::MONTHS_PER_YEAR;
use crate::error::{Result, YearViewError};
use crate::params::check_length;

/// Pixel area allotted to one month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthBlock {
    pub rect: Rect,
    /// Zero-based month (0 = January).
    pub month_index: usize,
    /// `rect` grown by `selection_margin` on every side. The bottom edge is a
    /// placeholder; see [`MonthBlock::selection_halo`].
    pub selection_rect: Rect,
    pub selection_margin: f32,
}

impl MonthBlock {
    /// Highlight rectangle for this month, with its bottom edge pulled up to
    /// just below the last row of day numbers.
    ///
    /// `last_row_y` comes from the day-grid resolver for the same layout
    /// generation. A value that does not lie below the block top (month with
    /// no laid-out days) keeps the full selection rectangle.
    pub fn selection_halo(&self, last_row_y: f32) -> Rect {
        let sel = self.selection_rect;
        if last_row_y <= self.rect.top() {
            return sel;
        }
        Rect::from_ltrb(sel.left(), sel.top(), sel.right(), last_row_y + self.selection_margin)
    }
}

/// Lay out up to twelve month blocks in a `rows × columns` grid, row-major.
///
/// An empty or degenerate surface yields no blocks: layout is deferred until
/// a usable size arrives. Grids with fewer than twelve slots drop the
/// trailing months.
pub fn compute_month_blocks(
    width: f32,
    height: f32,
    columns: i32,
    rows: i32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    selection_margin: f32,
) -> Result<Vec<MonthBlock>> {
    if columns <= 0 || rows <= 0 {
        return Err(YearViewError::invalid(format!(
            "grid needs positive rows and columns, got {rows}x{columns}"
        )));
    }
    check_length("horizontal spacing", horizontal_spacing)?;
    check_length("vertical spacing", vertical_spacing)?;
    check_length("selection margin", selection_margin)?;

    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Ok(Vec::new());
    }

    let cols = columns as f32;
    let rws = rows as f32;
    let block_w = (width - horizontal_spacing * (cols - 1.0)) / cols;
    let block_h = (height - vertical_spacing * (rws - 1.0)) / rws;
    if block_w <= 0.0 || block_h <= 0.0 {
        return Ok(Vec::new());
    }

    let left_padding = (width - (block_w * cols + horizontal_spacing * (cols - 1.0))) * 0.5;
    let top_padding = (height - (block_h * rws + vertical_spacing * (rws - 1.0))) * 0.5;

    let mut blocks = Vec::with_capacity(MONTHS_PER_YEAR);
    'rows: for row in 0..rows {
        for col in 0..columns {
            let month_index = (row * columns + col) as usize;
            if month_index >= MONTHS_PER_YEAR {
                break 'rows;
            }
            let rect = Rect {
                x: left_padding + col as f32 * (block_w + horizontal_spacing),
                y: top_padding + row as f32 * (block_h + vertical_spacing),
                w: block_w,
                h: block_h,
            };
            blocks.push(MonthBlock {
                rect,
                month_index,
                selection_rect: rect.expand(selection_margin),
                selection_margin,
            });
        }
    }
    Ok(blocks)
}
