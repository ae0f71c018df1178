//! # Body Shape Renderer
//!
//! Turns each drawable dark module into one vector fragment inside its unit
//! cell `[x, x+1] x [y, y+1]`.
//!
//! ## Shape families
//!
//! | Family | Shapes | Context |
//! |--------|--------|---------|
//! | Independent | square, softSquare, circle, dot, diamond, cutCorner | none |
//! | Softly adaptive | pill, blob | radius eases when a neighbor is dark |
//! | Neighbor-fused | fluid, extraFluid, blobH, blobV | per-corner radius, overlap at dark seams |
//! | Sharp | sharp | diamond / arrow / rectangle by neighbor count |
//!
//! A fused corner rounds only when neither adjacent edge neighbor is dark.
//! Where a neighbor is dark the edge is pushed `overlap` past the cell so
//! adjacent fragments overlap instead of leaving a hairline:
//!
//! ```text
//!   isolated          right neighbor dark
//!   ╭──────╮          ╭───────┐┌───────╮
//!   │      │          │       ││       │
//!   ╰──────╯          ╰───────┘└───────╯
//!                          overlap ><
//! ```
//!
//! Rendering is strictly local: a fragment depends only on its own cell and
//! its neighbors' occupancy, so rows are generated in parallel.

use rayon::prelude::*;
use std::fmt::Write;

use super::path::{Bounds, PathData, fmt_num};
use crate::config::RenderConfig;
use crate::design::BodyShape;
use crate::symbol::{Matrix, Neighbors, Zones};

/// One module's vector fragment. Fill is inherited from the enclosing group.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
        crisp: bool,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Path {
        data: PathData,
        crisp: bool,
    },
}

impl Fragment {
    fn rounded_cell(x: f64, y: f64, rx: f64, ry: f64) -> Self {
        Fragment::Rect {
            x,
            y,
            width: 1.0,
            height: 1.0,
            rx,
            ry,
            crisp: false,
        }
    }

    fn centered_circle(x: f64, y: f64, r: f64) -> Self {
        Fragment::Circle {
            cx: x + 0.5,
            cy: y + 0.5,
            r,
        }
    }

    /// Extent of the drawn geometry.
    pub fn bounds(&self) -> Bounds {
        match self {
            Fragment::Rect {
                x, y, width, height, ..
            } => Bounds::from_rect(*x, *y, *width, *height),
            Fragment::Circle { cx, cy, r } => Bounds::new(cx - r, cy - r, cx + r, cy + r),
            Fragment::Path { data, .. } => data
                .bounds()
                .unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0)),
        }
    }

    /// Append this fragment as an SVG element.
    pub fn write_svg(&self, out: &mut String) {
        match self {
            Fragment::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
                crisp,
            } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height)
                );
                if *rx > 0.0 || *ry > 0.0 {
                    let _ = write!(out, r#" rx="{}" ry="{}""#, fmt_num(*rx), fmt_num(*ry));
                }
                if *crisp {
                    out.push_str(r#" shape-rendering="crispEdges""#);
                }
                out.push_str("/>");
            }
            Fragment::Circle { cx, cy, r } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                    fmt_num(*cx),
                    fmt_num(*cy),
                    fmt_num(*r)
                );
            }
            Fragment::Path { data, crisp } => {
                let _ = write!(out, r#"<path d="{}""#, data.as_str());
                if *crisp {
                    out.push_str(r#" shape-rendering="crispEdges""#);
                }
                out.push_str("/>");
            }
        }
    }
}

/// A fragment together with the module it was rendered for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFragment {
    pub x: usize,
    pub y: usize,
    pub fragment: Fragment,
}

/// Render one module at `(x, y)` given its neighbor occupancy.
pub fn render_module(
    shape: BodyShape,
    x: usize,
    y: usize,
    n: &Neighbors,
    config: &RenderConfig,
) -> Fragment {
    let (x, y) = (x as f64, y as f64);
    match shape {
        BodyShape::Square => Fragment::Rect {
            x,
            y,
            width: 1.0,
            height: 1.0,
            rx: 0.0,
            ry: 0.0,
            crisp: true,
        },
        BodyShape::SoftSquare => Fragment::rounded_cell(x, y, 0.18, 0.18),
        BodyShape::Circle => Fragment::centered_circle(x, y, 0.48),
        BodyShape::Dot => Fragment::centered_circle(x, y, 0.35),
        BodyShape::Diamond => diamond(x, y, config.gap),
        BodyShape::CutCorner => cut_corner(x, y),
        BodyShape::Pill => pill(x, y, n),
        BodyShape::Blob => blob(x, y, n, config),
        BodyShape::Fluid => fluid(x, y, n, config),
        BodyShape::ExtraFluid => extra_fluid(x, y, n, config),
        BodyShape::BlobH => blob_horizontal(x, y, n, config),
        BodyShape::BlobV => blob_vertical(x, y, n, config),
        BodyShape::Sharp => sharp(x, y, n, config),
    }
}

/// Render every drawable body module of `matrix`, row-major.
///
/// Modules in finder or logo zones are skipped; they are never visited.
pub fn render_body(
    matrix: &Matrix,
    zones: &Zones,
    shape: BodyShape,
    config: &RenderConfig,
) -> Vec<PlacedFragment> {
    let size = matrix.size();
    let with_neighbors = shape.needs_neighbors();
    let with_diagonals = shape.needs_diagonals();

    let rows: Vec<Vec<PlacedFragment>> = (0..size)
        .into_par_iter()
        .map(|y| {
            (0..size)
                .filter(|&x| zones.is_body_module(matrix, x, y))
                .map(|x| {
                    let n = if with_neighbors {
                        zones.neighbors(matrix, x, y, with_diagonals)
                    } else {
                        Neighbors::default()
                    };
                    PlacedFragment {
                        x,
                        y,
                        fragment: render_module(shape, x, y, &n, config),
                    }
                })
                .collect()
        })
        .collect();

    rows.into_iter().flatten().collect()
}

fn diamond(x: f64, y: f64, g: f64) -> Fragment {
    let mut p = PathData::new();
    p.move_to(x + 0.5, y + g)
        .line_to(x + 1.0 - g, y + 0.5)
        .line_to(x + 0.5, y + 1.0 - g)
        .line_to(x + g, y + 0.5)
        .close();
    Fragment::Path {
        data: p,
        crisp: false,
    }
}

fn cut_corner(x: f64, y: f64) -> Fragment {
    let mut p = PathData::new();
    p.move_to(x + 0.2, y)
        .horizontal_to(x + 1.0)
        .vertical_to(y + 0.8)
        .line_to(x + 0.8, y + 1.0)
        .horizontal_to(x)
        .vertical_to(y + 0.2)
        .close();
    Fragment::Path {
        data: p,
        crisp: false,
    }
}

fn pill(x: f64, y: f64, n: &Neighbors) -> Fragment {
    let rx = if n.left || n.right { 0.5 } else { 0.25 };
    Fragment::rounded_cell(x, y, rx, 0.5)
}

fn blob(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    if n.any_orthogonal() {
        let r = 0.5 - config.gap;
        Fragment::rounded_cell(x, y, r, r)
    } else {
        Fragment::rounded_cell(x, y, 0.5, 0.5)
    }
}

/// Corner radii in drawing order: top-left, top-right, bottom-right, bottom-left.
type Radii = [f64; 4];

/// Closed outline of `[x0, x1] x [y0, y1]`, built corner by corner:
/// straight edge, optional arc, straight edge, and so on.
fn rounded_outline(x0: f64, y0: f64, x1: f64, y1: f64, radii: Radii) -> PathData {
    let [tl, tr, br, bl] = radii;
    let mut p = PathData::new();
    p.move_to(x0 + tl, y0)
        .horizontal_to(x1 - tr)
        .arc_to(tr, x1, y0 + tr)
        .vertical_to(y1 - br)
        .arc_to(br, x1 - br, y1)
        .horizontal_to(x0 + bl)
        .arc_to(bl, x0, y1 - bl)
        .vertical_to(y0 + tl)
        .arc_to(tl, x0 + tl, y0)
        .close();
    p
}

/// Cell edges pushed out by `o` on every side with a dark neighbor.
fn fused_edges(x: f64, y: f64, n: &Neighbors, o: f64) -> (f64, f64, f64, f64) {
    let x0 = x - if n.left { o } else { 0.0 };
    let y0 = y - if n.top { o } else { 0.0 };
    let x1 = x + 1.0 + if n.right { o } else { 0.0 };
    let y1 = y + 1.0 + if n.bottom { o } else { 0.0 };
    (x0, y0, x1, y1)
}

fn fluid(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    let r = config.round_radius();
    let exposed = |a: bool, b: bool| if !a && !b { r } else { 0.0 };
    let radii = [
        exposed(n.top, n.left),
        exposed(n.top, n.right),
        exposed(n.bottom, n.right),
        exposed(n.bottom, n.left),
    ];
    let (x0, y0, x1, y1) = fused_edges(x, y, n, config.overlap);
    Fragment::Path {
        data: rounded_outline(x0, y0, x1, y1, radii),
        crisp: false,
    }
}

/// Fluid with full half-cell rounding, except that a corner facing a dark
/// diagonal neighbor stays square so diagonal runs read as connected.
fn extra_fluid(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    let corner = |a: bool, b: bool, diagonal: bool| {
        if a || b || diagonal { 0.0 } else { 0.5 }
    };
    let radii = [
        corner(n.top, n.left, n.top_left),
        corner(n.top, n.right, n.top_right),
        corner(n.bottom, n.right, n.bottom_right),
        corner(n.bottom, n.left, n.bottom_left),
    ];
    let (x0, y0, x1, y1) = fused_edges(x, y, n, config.overlap);
    Fragment::Path {
        data: rounded_outline(x0, y0, x1, y1, radii),
        crisp: false,
    }
}

fn blob_horizontal(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    let (g, o, r) = (config.gap, config.overlap, config.round_radius());
    let r_left = if n.left { 0.0 } else { r };
    let r_right = if n.right { 0.0 } else { r };
    let x0 = x + if n.left { -o } else { g };
    let x1 = x + 1.0 + if n.right { o } else { -g };
    let (y0, y1) = (y + g, y + 1.0 - g);
    Fragment::Path {
        data: rounded_outline(x0, y0, x1, y1, [r_left, r_right, r_right, r_left]),
        crisp: false,
    }
}

fn blob_vertical(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    let (g, o, r) = (config.gap, config.overlap, config.round_radius());
    let r_top = if n.top { 0.0 } else { r };
    let r_bottom = if n.bottom { 0.0 } else { r };
    let y0 = y + if n.top { -o } else { g };
    let y1 = y + 1.0 + if n.bottom { o } else { -g };
    let (x0, x1) = (x + g, x + 1.0 - g);
    Fragment::Path {
        data: rounded_outline(x0, y0, x1, y1, [r_top, r_top, r_bottom, r_bottom]),
        crisp: false,
    }
}

/// Diamond alone, arrow pointing away from a single neighbor, otherwise a
/// rectangle stretched toward every dark neighbor.
fn sharp(x: f64, y: f64, n: &Neighbors, config: &RenderConfig) -> Fragment {
    let o = config.overlap;
    let (x0, y0, x1, y1) = (x, y, x + 1.0, y + 1.0);
    let (cx, cy) = (x + 0.5, y + 0.5);
    let mut p = PathData::new();

    match n.orthogonal_count() {
        0 => {
            p.move_to(cx, y0)
                .line_to(x1, cy)
                .line_to(cx, y1)
                .line_to(x0, cy)
                .close();
        }
        1 => {
            if n.left {
                p.move_to(x0 - o, y0).line_to(x0 - o, y1).line_to(x1, cy);
            } else if n.right {
                p.move_to(x1 + o, y0).line_to(x1 + o, y1).line_to(x0, cy);
            } else if n.top {
                p.move_to(x0, y0 - o).line_to(x1, y0 - o).line_to(cx, y1);
            } else {
                p.move_to(x0, y1 + o).line_to(x1, y1 + o).line_to(cx, y0);
            }
            p.close();
        }
        _ => {
            let (nx0, ny0, nx1, ny1) = fused_edges(x, y, n, o);
            p.move_to(nx0, ny0)
                .horizontal_to(nx1)
                .vertical_to(ny1)
                .horizontal_to(nx0)
                .close();
            return Fragment::Path {
                data: p,
                crisp: true,
            };
        }
    }

    Fragment::Path {
        data: p,
        crisp: false,
    }
}
