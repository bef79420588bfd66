use crate::display_list::{Command, DisplayList, Viewport};
use crate::scene::*;
use std::path::PathBuf;

pub struct Painter {
    list: DisplayList,
    clip_depth: usize,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                commands: Vec::new(),
            },
            clip_depth: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.list.viewport
    }

    pub fn push_clip_rect(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.list.commands.push(Command::PushClip(ClipRect(rect)));
    }
    pub fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.list.commands.push(Command::PopClip);
        }
    }

    pub fn rect(&mut self, rect: Rect, brush: Brush, z: i32) {
        self.list.commands.push(Command::DrawRect { rect, brush, z });
    }

    pub fn rounded_rect(&mut self, rrect: RoundedRect, brush: Brush, z: i32) {
        self.list.commands.push(Command::DrawRoundedRect { rrect, brush, z });
    }

    pub fn text(&mut self, run: TextRun, z: i32) {
        self.list.commands.push(Command::DrawText { run, z });
    }

    pub fn ellipse(&mut self, center: [f32; 2], radii: [f32; 2], brush: Brush, z: i32) {
        self.list.commands.push(Command::DrawEllipse {
            center,
            radii,
            brush,
            z,
        });
    }

    pub fn circle(&mut self, center: [f32; 2], radius: f32, brush: Brush, z: i32) {
        self.ellipse(center, [radius, radius], brush, z);
    }

    /// Queue a raster image (PNG/JPEG/GIF/WebP) to be drawn at origin with the given pixel size.
    /// The path is interpreted relative to the process working directory.
    pub fn image<P: Into<PathBuf>>(&mut self, path: P, origin: [f32; 2], size: [f32; 2], z: i32) {
        self.list.commands.push(Command::DrawImage {
            path: path.into(),
            origin,
            size,
            z,
        });
    }

    /// Fill a path with a solid color. For now we only support solid color fills for paths.
    pub fn fill_path(&mut self, path: Path, color: ColorLinPremul, z: i32) {
        self.list.commands.push(Command::FillPath { path, color, z });
    }

    pub fn finish(mut self) -> DisplayList {
        // Close any clip left open so backends always see balanced pairs.
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        self.list
    }
}
