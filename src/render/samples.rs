//! Small standalone SVGs for style pickers.
//!
//! Body shapes are shown over a fixed 5x5 sample that exercises isolated
//! modules, horizontal and vertical runs, and a cross; frames and balls are
//! shown alone in their local 7x7 box. Samples paint with `currentColor`.

use std::fmt::Write;

use super::finder::{write_ball, write_frame};
use super::shapes::render_body;
use crate::config::RenderConfig;
use crate::design::{BodyShape, EyeStyle};
use crate::symbol::{Matrix, Zones};

const SAMPLE: [[bool; 5]; 5] = {
    const O: bool = false;
    const X: bool = true;
    [
        [X, O, X, O, X],
        [X, X, X, O, O],
        [O, O, X, O, X],
        [O, X, X, X, X],
        [X, O, X, O, X],
    ]
};

/// The fixed 5x5 sample grid.
pub fn sample_matrix() -> Matrix {
    Matrix::from_fn(SAMPLE.len(), |x, y| SAMPLE[y][x])
}

fn open_svg(out: &mut String, side: usize) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {side} {side}" shape-rendering="geometricPrecision">"#
    );
}

/// `shape` rendered over the sample grid.
pub fn body_sample(shape: BodyShape, config: &RenderConfig) -> String {
    let matrix = sample_matrix();
    let mut out = String::new();
    open_svg(&mut out, matrix.size());
    out.push_str(r#"<g fill="currentColor">"#);
    for placed in render_body(&matrix, &Zones::unrestricted(), shape, config) {
        placed.fragment.write_svg(&mut out);
    }
    out.push_str("</g></svg>");
    out
}

/// A single finder frame.
pub fn frame_sample(style: EyeStyle) -> String {
    let mut out = String::new();
    open_svg(&mut out, 7);
    write_frame(&mut out, style, "currentColor");
    out.push_str("</svg>");
    out
}

/// A single finder ball.
pub fn ball_sample(style: EyeStyle) -> String {
    let mut out = String::new();
    open_svg(&mut out, 7);
    write_ball(&mut out, style, "currentColor");
    out.push_str("</svg>");
    out
}
