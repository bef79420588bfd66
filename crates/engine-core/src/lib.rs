//! engine-core: drawing primitives shared by the calendar renderer and its backends.
//!
//! Renderers build a [`DisplayList`] through a [`Painter`]; a backend (GPU,
//! software raster, test harness) replays the list.

mod color;
mod display_list;
mod painter;
mod scene;

pub use display_list::*;
pub use painter::*;
pub use scene::*;
