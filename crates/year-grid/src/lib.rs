//! year-grid: layout, geometry caching, hit testing and selection state for a
//! twelve-month calendar grid.
//!
//! The crate draws nothing. It turns a surface size and a set of
//! [`GridParameters`] into pixel rectangles for every month and day, maps
//! pointer positions back to days or months, and tracks what the user
//! selected. Renderers consume a [`GeometrySnapshot`].

pub mod cache;
pub mod calendar;
pub mod day_grid;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod params;
pub mod selection;
pub mod timer;

pub use cache::{GeometryCache, GeometrySnapshot, LayoutEnv, LayoutKey, LayoutMetrics, MonthLayout};
pub use calendar::{
    CalendarText, DateFormatter, DateKey, EnglishCalendarText, PatternDateFormatter, WeekendDays,
};
pub use day_grid::{DayGrid, DayRect};
pub use error::{Result, YearViewError};
pub use geometry::{compute_month_blocks, MonthBlock};
pub use hit_test::HitResult;
pub use measure::{FontType, HeuristicTextMeasure, TextMeasure, TextSize, TextStyle};
pub use params::GridParameters;
pub use selection::{SelectedDay, Selection, SelectionMachine, SelectionMode, TapOutcome};
pub use timer::MonthHighlight;
