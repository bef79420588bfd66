use std::path::PathBuf;

use crate::scene::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    DrawRect { rect: Rect, brush: Brush, z: i32 },
    DrawRoundedRect { rrect: RoundedRect, brush: Brush, z: i32 },
    DrawText { run: TextRun, z: i32 },
    DrawEllipse { center: [f32; 2], radii: [f32; 2], brush: Brush, z: i32 },
    /// Filled path (solid color only for now)
    FillPath { path: Path, color: ColorLinPremul, z: i32 },
    /// Raster image scaled to fill `size` at `origin`. The path is resolved by the backend.
    DrawImage { path: PathBuf, origin: [f32; 2], size: [f32; 2], z: i32 },
    PushClip(ClipRect),
    PopClip,
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub commands: Vec<Command>,
}

impl DisplayList {
    /// All text runs in draw order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            Command::DrawText { run, .. } => Some(run),
            _ => None,
        })
    }
}
