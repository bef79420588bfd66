//! Month day-grid resolver: places weekday labels and day numbers inside one
//! month block and emits the touch rectangle of every day.

use chrono::NaiveDate;
use engine_core::Rect;

use crate::calendar::{DateKey, DAYS_PER_WEEK};
use crate::geometry::MonthBlock;
use crate::measure::TextSize;

/// Rows under the weekday-label row. Six always fit a month.
pub const DAY_ROWS: usize = 6;
/// Cell rows the day area is divided into (labels + day rows).
pub const GRID_ROWS: usize = DAY_ROWS + 1;
pub const DEFAULT_TOUCH_PADDING: f32 = 4.0;

/// Touch target of one calendar day.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRect {
    pub rect: Rect,
    pub key: DateKey,
    pub date: NaiveDate,
    /// Center of the grid cell the day number is drawn at.
    pub center: [f32; 2],
    /// Measured size of the day number.
    pub text: TextSize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayGrid {
    /// One entry per day of the month, in day order.
    pub day_rects: Vec<DayRect>,
    /// Centers of the weekday labels, by column.
    pub weekday_centers: [[f32; 2]; DAYS_PER_WEEK],
    /// Centers of the 42 day cells, row-major. Empty when the grid could not be laid out.
    pub cell_centers: Vec<[f32; 2]>,
    /// Bottom of the text in the last emitted day row, or 0 with no days.
    pub last_row_y: f32,
    /// Block area below the month name.
    pub day_area: Rect,
}

impl DayGrid {
    pub fn is_empty(&self) -> bool {
        self.day_rects.is_empty()
    }

    /// The `DayRect` for day-of-month `day` (1-based).
    pub fn day(&self, day: u32) -> Option<&DayRect> {
        self.day_rects.get((day as usize).checked_sub(1)?)
    }
}

/// Inputs that shape the grid of one month beyond its block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayGridSpec {
    /// Column of the 1st of the month (0..7).
    pub first_weekday_offset: u32,
    pub days_in_month: u32,
    /// Height of the month name as measured with its style.
    pub name_row_height: f32,
    pub margin_below_month_name: f32,
    /// Padding added on every side of the measured day number. The padded
    /// rect is clamped to the day's cell.
    pub touch_padding: f32,
}

/// Lay out one month.
///
/// `measure_day` returns the size of the day number text; `key_for_day` maps a
/// day of month to its key and date. Days for which `key_for_day` returns
/// `None` are skipped. The result only depends on the inputs.
pub fn resolve_day_grid(
    block: &MonthBlock,
    spec: &DayGridSpec,
    mut measure_day: impl FnMut(u32) -> TextSize,
    mut key_for_day: impl FnMut(u32) -> Option<(DateKey, NaiveDate)>,
) -> DayGrid {
    let r = block.rect;
    let day_area = Rect::from_ltrb(
        r.left(),
        r.top() + spec.name_row_height + spec.margin_below_month_name,
        r.right(),
        r.bottom(),
    );
    if day_area.is_empty() {
        return DayGrid { day_area, ..Default::default() };
    }

    let x_unit = day_area.w / DAYS_PER_WEEK as f32;
    let y_unit = day_area.h / GRID_ROWS as f32;
    let center = |col: usize, row: usize| {
        [
            day_area.left() + x_unit * col as f32 + x_unit * 0.5,
            day_area.top() + y_unit * row as f32 + y_unit * 0.5,
        ]
    };

    let mut weekday_centers = [[0.0; 2]; DAYS_PER_WEEK];
    for (col, c) in weekday_centers.iter_mut().enumerate() {
        *c = center(col, 0);
    }

    let mut grid = DayGrid {
        day_rects: Vec::with_capacity(spec.days_in_month as usize),
        weekday_centers,
        cell_centers: Vec::with_capacity(DAY_ROWS * DAYS_PER_WEEK),
        last_row_y: 0.0,
        day_area,
    };

    let mut day_of_month = 1 - spec.first_weekday_offset as i64;
    for row in 1..GRID_ROWS {
        for col in 0..DAYS_PER_WEEK {
            let c = center(col, row);
            grid.cell_centers.push(c);
            if day_of_month >= 1 && day_of_month <= spec.days_in_month as i64 {
                let day = day_of_month as u32;
                if let Some((key, date)) = key_for_day(day) {
                    let text = measure_day(day);
                    // Touch targets never spill into a neighbouring cell.
                    let rect = Rect::centered(
                        c,
                        (text.width + spec.touch_padding * 2.0).min(x_unit),
                        (text.height + spec.touch_padding * 2.0).min(y_unit),
                    );
                    grid.last_row_y = grid.last_row_y.max(c[1] + text.height * 0.5);
                    grid.day_rects.push(DayRect { rect, key, date, center: c, text });
                }
            }
            day_of_month += 1;
        }
    }
    grid
}
