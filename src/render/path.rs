//! SVG path-data builder with bounds tracking.
//!
//! Coordinates are absolute and written with at most four decimals, so
//! output is stable across platforms.

use std::fmt::Write;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box at `(x, y)` with the given size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    fn include(&mut self, x: f64, y: f64) {
        *self = self.union(&Bounds::point(x, y));
    }

    /// Whether `other` lies fully inside, within `eps`.
    pub fn contains(&self, other: &Bounds, eps: f64) -> bool {
        other.min_x >= self.min_x - eps
            && other.min_y >= self.min_y - eps
            && other.max_x <= self.max_x + eps
            && other.max_y <= self.max_y + eps
    }
}

/// Format a coordinate: up to 4 decimals, no trailing zeros, no `-0`.
pub fn fmt_num(v: f64) -> String {
    let mut s = format!("{:.4}", v);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Absolute-coordinate path builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    d: String,
    cursor: (f64, f64),
    bounds: Option<Bounds>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        match self.bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => self.bounds = Some(Bounds::point(x, y)),
        }
    }

    fn sep(&mut self) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.sep();
        let _ = write!(self.d, "M{},{}", fmt_num(x), fmt_num(y));
        self.track(x, y);
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.sep();
        let _ = write!(self.d, "L{},{}", fmt_num(x), fmt_num(y));
        self.track(x, y);
        self
    }

    pub fn horizontal_to(&mut self, x: f64) -> &mut Self {
        self.sep();
        let _ = write!(self.d, "H{}", fmt_num(x));
        let y = self.cursor.1;
        self.track(x, y);
        self
    }

    pub fn vertical_to(&mut self, y: f64) -> &mut Self {
        self.sep();
        let _ = write!(self.d, "V{}", fmt_num(y));
        let x = self.cursor.0;
        self.track(x, y);
        self
    }

    /// Clockwise circular arc of radius `r` to `(x, y)`; a straight line when `r` is 0.
    ///
    /// Only used for convex quarter arcs, whose extremes are their endpoints,
    /// so endpoint tracking gives exact bounds.
    pub fn arc_to(&mut self, r: f64, x: f64, y: f64) -> &mut Self {
        if r <= 0.0 {
            return self.line_to(x, y);
        }
        self.sep();
        let r = fmt_num(r);
        let _ = write!(self.d, "A{r},{r} 0 0 1 {},{}", fmt_num(x), fmt_num(y));
        self.track(x, y);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.sep();
        self.d.push('Z');
        self
    }

    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// Bounds of every point visited, `None` for an empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(3.03), "3.03");
        assert_eq!(fmt_num(-0.03), "-0.03");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(0.1 + 0.2), "0.3");
        assert_eq!(fmt_num(12.0), "12");
    }

    #[test]
    fn test_square_path() {
        let mut p = PathData::new();
        p.move_to(1.0, 2.0).horizontal_to(2.0).vertical_to(3.0).horizontal_to(1.0).close();
        assert_eq!(p.as_str(), "M1,2 H2 V3 H1 Z");
        assert_eq!(p.bounds(), Some(Bounds::new(1.0, 2.0, 2.0, 3.0)));
    }

    #[test]
    fn test_arc_zero_radius_is_line() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).arc_to(0.0, 1.0, 1.0);
        assert_eq!(p.as_str(), "M0,0 L1,1");
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).arc_to(0.4, 0.4, 0.4);
        assert_eq!(p.as_str(), "M0,0 A0.4,0.4 0 0 1 0.4,0.4");
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&Bounds::from_rect(2.0, 2.0, 3.0, 3.0), 0.0));
        assert!(!outer.contains(&Bounds::from_rect(8.0, 8.0, 3.0, 3.0), 0.0));
        assert_eq!(outer.center(), (5.0, 5.0));
    }
}
