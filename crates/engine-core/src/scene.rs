#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Alias for the premultiplied linear color type, for a friendlier name in APIs.
pub type Color = ColorLinPremul;

// Constructors for ColorLinPremul are defined in color.rs to keep scene.rs focused

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(ColorLinPremul),
}

/// Axis-aligned rectangle in surface pixels.
///
/// Containment is half-open: the left and top edges belong to the rectangle,
/// the right and bottom edges belong to whatever sits next to it. Adjacent
/// rectangles that share an edge therefore never both contain a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, w: 0.0, h: 0.0 };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from edge coordinates.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { x: left, y: top, w: right - left, h: bottom - top }
    }

    /// Build a rectangle of the given size centered on `center`.
    pub fn centered(center: [f32; 2], w: f32, h: f32) -> Self {
        Self { x: center[0] - w * 0.5, y: center[1] - h * 0.5, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 { self.x }
    #[inline]
    pub fn top(&self) -> f32 { self.y }
    #[inline]
    pub fn right(&self) -> f32 { self.x + self.w }
    #[inline]
    pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn center(&self) -> [f32; 2] {
        [self.x + self.w * 0.5, self.y + self.h * 0.5]
    }

    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Half-open containment test, see the type docs.
    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] >= self.x && p[0] < self.right() && p[1] >= self.y && p[1] < self.bottom()
    }

    /// True when the interiors of the two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow the rectangle by `amount` on every side (negative shrinks).
    pub fn expand(&self, amount: f32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            w: self.w + amount * 2.0,
            h: self.h + amount * 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRadii {
    pub tl: f32,
    pub tr: f32,
    pub br: f32,
    pub bl: f32,
}

impl RoundedRadii {
    pub fn uniform(r: f32) -> Self {
        Self { tl: r, tr: r, br: r, bl: r }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radii: RoundedRadii,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRect(pub Rect);

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Top-left corner of the text box.
    pub pos: [f32; 2],
    pub size: f32,
    pub color: ColorLinPremul,
    pub bold: bool,
    pub italic: bool,
}

// --- Path geometry ---

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    QuadTo([f32; 2], [f32; 2]),
    CubicTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
    pub fill_rule: FillRule,
}

impl Path {
    /// Bounding box of every point referenced by the path, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        let mut minx = f32::INFINITY;
        let mut miny = f32::INFINITY;
        let mut maxx = f32::NEG_INFINITY;
        let mut maxy = f32::NEG_INFINITY;
        let mut any = false;
        let mut visit = |q: [f32; 2]| {
            minx = minx.min(q[0]);
            miny = miny.min(q[1]);
            maxx = maxx.max(q[0]);
            maxy = maxy.max(q[1]);
            any = true;
        };
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => visit(p),
                PathCmd::QuadTo(c, p) => {
                    visit(c);
                    visit(p);
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    visit(c1);
                    visit(c2);
                    visit(p);
                }
                PathCmd::Close => {}
            }
        }
        if any {
            Some(Rect { x: minx, y: miny, w: (maxx - minx).max(0.0), h: (maxy - miny).max(0.0) })
        } else {
            None
        }
    }

    /// Map every point of the path through `f`.
    pub fn map_points(&self, f: impl Fn([f32; 2]) -> [f32; 2]) -> Path {
        let cmds = self
            .cmds
            .iter()
            .map(|cmd| match *cmd {
                PathCmd::MoveTo(p) => PathCmd::MoveTo(f(p)),
                PathCmd::LineTo(p) => PathCmd::LineTo(f(p)),
                PathCmd::QuadTo(c, p) => PathCmd::QuadTo(f(c), f(p)),
                PathCmd::CubicTo(c1, c2, p) => PathCmd::CubicTo(f(c1), f(c2), f(p)),
                PathCmd::Close => PathCmd::Close,
            })
            .collect();
        Path { cmds, fill_rule: self.fill_rule }
    }
}
