//! # Finder Pattern Renderer
//!
//! Draws the three 7x7 corner patterns as an outer frame (stroked ring) and
//! an inner ball (filled, covering the center 3x3). Outlines are authored for
//! the top-left corner in a local 7x7 box; the other corners rotate them
//! about the box center `(3.5, 3.5)`:
//!
//! | Corner | Origin | Rotation |
//! |--------|--------|----------|
//! | top-left | `(0, 0)` | 0° |
//! | top-right | `(size - 7, 0)` | 90° |
//! | bottom-left | `(0, size - 7)` | -90° |
//!
//! Only appearance changes here; the matrix's finder bits are never read or
//! written, and the body renderer never enters these blocks.

use std::fmt::Write;

use super::path::fmt_num;
use crate::design::EyeStyle;
use crate::symbol::zones::FINDER_SIZE;

/// Which corner a finder pattern sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 3] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft];

    /// Top-left module of the pattern in a grid of side `size`.
    pub fn origin(self, size: usize) -> (usize, usize) {
        let far = size.saturating_sub(FINDER_SIZE);
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (far, 0),
            Corner::BottomLeft => (0, far),
        }
    }

    /// Rotation in degrees about the pattern center.
    pub fn rotation(self) -> i32 {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 90,
            Corner::BottomLeft => -90,
        }
    }
}

/// A fixed outline in the local 7x7 box.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outline {
    Rect {
        x: f64,
        y: f64,
        side: f64,
        radius: f64,
    },
    Circle {
        r: f64,
    },
    Path(&'static str),
}

impl Outline {
    fn write_svg(&self, out: &mut String, paint: &str) {
        match *self {
            Outline::Rect { x, y, side, radius } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    fmt_num(x),
                    fmt_num(y),
                    fmt_num(side),
                    fmt_num(side)
                );
                if radius > 0.0 {
                    let r = fmt_num(radius);
                    let _ = write!(out, r#" rx="{r}" ry="{r}""#);
                }
            }
            Outline::Circle { r } => {
                let _ = write!(out, r#"<circle cx="3.5" cy="3.5" r="{}""#, fmt_num(r));
            }
            Outline::Path(d) => {
                let _ = write!(out, r#"<path d="{d}""#);
            }
        }
        let _ = write!(out, " {paint}/>");
    }
}

/// Stroke width of every frame, centered on the ring at 0.5 from the box edge.
const FRAME_STROKE: f64 = 1.0;

fn frame_outline(style: EyeStyle) -> Outline {
    match style {
        EyeStyle::Square => Outline::Rect {
            x: 0.5,
            y: 0.5,
            side: 6.0,
            radius: 0.0,
        },
        EyeStyle::Circle => Outline::Circle { r: 3.0 },
        EyeStyle::Soft => Outline::Rect {
            x: 0.5,
            y: 0.5,
            side: 6.0,
            radius: 2.2,
        },
        EyeStyle::Leaf => {
            Outline::Path("M6.5 6.5V2c0-.8-.7-1.5-1.5-1.5H.5v4.5c0 .8.7 1.5 1.5 1.5h4.5Z")
        }
        EyeStyle::Drop => Outline::Path(
            "M6.5 6.5V2c0-.8-.7-1.5-1.5-1.5h-3C1.3.5.5 1.3.5 2v3c0 .8.7 1.5 1.5 1.5h4.5Z",
        ),
        EyeStyle::Eye => Outline::Path(
            "M6.5 6.5V2c0-.25-.48-.7-.75-.75L.5.5l.75 5.25c.05.31.45.75.75.75h4.5Z",
        ),
        EyeStyle::Hex => Outline::Path("M6.5 6.5v-6h-4c-1.5 0-2 .5-2 2v4h6Z"),
    }
}

fn ball_outline(style: EyeStyle) -> Outline {
    match style {
        EyeStyle::Square => Outline::Rect {
            x: 2.0,
            y: 2.0,
            side: 3.0,
            radius: 0.0,
        },
        EyeStyle::Circle => Outline::Circle { r: 1.5 },
        EyeStyle::Soft => Outline::Rect {
            x: 2.0,
            y: 2.0,
            side: 3.0,
            radius: 1.2,
        },
        EyeStyle::Leaf => {
            Outline::Path("M5 5V2.75C5 2.375 4.625 2 4.25 2H2v2.25c0 .375.375.75.75.75H5Z")
        }
        EyeStyle::Drop => Outline::Path(
            "M5 5V2.75C5 2.375 4.625 2 4.25 2h-1.5c-.375 0-.75.375-.75.75v1.5c0 .375.375.75.75.75H5Z",
        ),
        EyeStyle::Eye => Outline::Path(
            "M5 5V2.75c0-.125-.24-.35-.375-.375L2 2l.375 2.625C2.4 4.78 2.6 5 2.75 5H5Z",
        ),
        EyeStyle::Hex => Outline::Path("M5 5V2H3c-.75 0-1 .25-1 1v2h3Z"),
    }
}

/// Append a frame in local 7x7 coordinates, stroked with `color`.
pub fn write_frame(out: &mut String, style: EyeStyle, color: &str) {
    let paint = format!(
        r#"fill="none" stroke="{color}" stroke-width="{}""#,
        fmt_num(FRAME_STROKE)
    );
    frame_outline(style).write_svg(out, &paint);
}

/// Append a ball in local 7x7 coordinates, filled with `color`.
pub fn write_ball(out: &mut String, style: EyeStyle, color: &str) {
    ball_outline(style).write_svg(out, &format!(r#"fill="{color}""#));
}

/// One positioned finder pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderPattern {
    pub corner: Corner,
    pub x: usize,
    pub y: usize,
    pub frame: EyeStyle,
    pub ball: EyeStyle,
}

impl FinderPattern {
    pub fn new(corner: Corner, size: usize, frame: EyeStyle, ball: EyeStyle) -> Self {
        let (x, y) = corner.origin(size);
        Self {
            corner,
            x,
            y,
            frame,
            ball,
        }
    }

    /// SVG transform placing the local box at the pattern's corner.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) rotate({}, 3.5, 3.5)",
            self.x,
            self.y,
            self.corner.rotation()
        )
    }

    /// Append the pattern as a group. `color` must already be XML-escaped.
    pub fn write_svg(&self, out: &mut String, color: &str) {
        let _ = write!(out, r#"<g transform="{}">"#, self.transform());
        write_frame(out, self.frame, color);
        write_ball(out, self.ball, color);
        out.push_str("</g>");
    }
}

/// The three finder patterns of a grid of side `size`.
pub fn finder_patterns(size: usize, frame: EyeStyle, ball: EyeStyle) -> [FinderPattern; 3] {
    Corner::ALL.map(|corner| FinderPattern::new(corner, size, frame, ball))
}
