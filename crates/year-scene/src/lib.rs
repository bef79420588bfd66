//! year-scene: the year calendar widget.
//!
//! Wraps the `year-grid` core with style records, pointer handling,
//! listener callbacks and a renderer that emits an `engine-core` display list.

pub mod event_handler;
pub mod listener;
pub mod render;
pub mod style;
pub mod year_view;

pub use event_handler::{EventHandler, EventResult, PointerEvent, PointerKind};
pub use listener::{DayEvent, MonthEvent, YearViewListener};
pub use render::{draw_background, render_year, RenderContext};
pub use style::{
    BackgroundShape, BackgroundStyle, DayStyle, ImageSource, MergeType, MonthStyle, TitleGravity,
    YearViewStyle,
};
pub use year_view::YearView;
