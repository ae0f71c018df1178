//! Zone classification over grid coordinates.
//!
//! ```text
//!  ┌───────┬─────────────┬───────┐
//!  │finder │             │finder │   7x7 corner blocks, drawn only by
//!  │  TL   │             │  TR   │   the finder renderer
//!  ├───────┘   ┌─────┐   └───────┤
//!  │           │logo │           │   centered block, left undrawn when
//!  │           │zone │           │   a logo is configured
//!  ├───────┐   └─────┘           │
//!  │finder │                     │
//!  │  BL   │                     │
//!  └───────┴─────────────────────┘
//! ```
//!
//! The same predicates decide both "should this module be drawn" and "is
//! this neighbor dark", so fused shapes round their corners exactly at zone
//! boundaries.

use super::matrix::Matrix;

/// Side of a finder pattern in modules.
pub const FINDER_SIZE: usize = 7;

/// Whether `(x, y)` lies in one of the three finder blocks.
#[inline]
pub fn is_finder_zone(x: usize, y: usize, size: usize) -> bool {
    let near_left = x < FINDER_SIZE;
    let near_top = y < FINDER_SIZE;
    let near_right = x + FINDER_SIZE >= size;
    let near_bottom = y + FINDER_SIZE >= size;
    (near_left && near_top) || (near_right && near_top) || (near_left && near_bottom)
}

/// Logo block side: `floor(size * ratio) + margin`, or 0 without a logo.
///
/// Capped so the block never reaches into a finder pattern or its separator.
pub fn logo_block_size(size: usize, logo_ratio: Option<f64>, margin: usize) -> usize {
    match logo_ratio {
        Some(ratio) if size > 0 => {
            let cap = size.saturating_sub(2 * (FINDER_SIZE + 1));
            ((size as f64 * ratio).floor() as usize + margin).min(cap)
        }
        _ => 0,
    }
}

/// Inclusive span of cells covered by the logo zone on each axis.
///
/// Centered on `size / 2` with half-width `ceil(block / 2)`, so the span
/// always covers the `block`-wide logo image centered on the symbol.
pub fn logo_zone_span(size: usize, block: usize) -> Option<(usize, usize)> {
    if block == 0 || size == 0 {
        return None;
    }
    let center = size / 2;
    let half = block.div_ceil(2);
    let first = center.saturating_sub(half);
    let last = (center + half).min(size - 1);
    Some((first, last))
}

/// Whether `(x, y)` lies in the centered logo zone.
#[inline]
pub fn is_logo_zone(x: usize, y: usize, size: usize, block: usize) -> bool {
    match logo_zone_span(size, block) {
        Some((first, last)) => (first..=last).contains(&x) && (first..=last).contains(&y),
        None => false,
    }
}

/// Occupancy of the cells around a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Neighbors {
    /// Number of dark orthogonal neighbors.
    pub fn orthogonal_count(&self) -> usize {
        [self.top, self.bottom, self.left, self.right]
            .iter()
            .filter(|&&n| n)
            .count()
    }

    pub fn any_orthogonal(&self) -> bool {
        self.orthogonal_count() > 0
    }
}

/// Zone layout for one matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zones {
    size: usize,
    logo_block: usize,
}

impl Zones {
    /// Zones for a grid of side `size` with a logo block of side `logo_block` (0 = none).
    pub fn new(size: usize, logo_block: usize) -> Self {
        Self { size, logo_block }
    }

    /// Zones with no finder or logo exclusions, for free-standing samples.
    pub fn unrestricted() -> Self {
        Self {
            size: 0,
            logo_block: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn logo_block(&self) -> usize {
        self.logo_block
    }

    #[inline]
    pub fn is_finder(&self, x: usize, y: usize) -> bool {
        self.size > 0 && is_finder_zone(x, y, self.size)
    }

    #[inline]
    pub fn is_logo(&self, x: usize, y: usize) -> bool {
        is_logo_zone(x, y, self.size, self.logo_block)
    }

    /// Whether `(x, y)` is excluded from body styling.
    #[inline]
    pub fn is_excluded(&self, x: usize, y: usize) -> bool {
        self.is_finder(x, y) || self.is_logo(x, y)
    }

    /// Dark for body purposes: inside the grid, dark, and not excluded.
    #[inline]
    pub fn is_dark_at(&self, matrix: &Matrix, x: i64, y: i64) -> bool {
        matrix.is_dark(x, y) && !self.is_excluded(x as usize, y as usize)
    }

    /// Whether the body renderer draws the module at `(x, y)`.
    #[inline]
    pub fn is_body_module(&self, matrix: &Matrix, x: usize, y: usize) -> bool {
        self.is_dark_at(matrix, x as i64, y as i64)
    }

    /// Neighbor occupancy around `(x, y)`; diagonals only when asked for.
    pub fn neighbors(&self, matrix: &Matrix, x: usize, y: usize, diagonals: bool) -> Neighbors {
        let (x, y) = (x as i64, y as i64);
        let dark = |dx: i64, dy: i64| self.is_dark_at(matrix, x + dx, y + dy);
        let mut n = Neighbors {
            top: dark(0, -1),
            bottom: dark(0, 1),
            left: dark(-1, 0),
            right: dark(1, 0),
            ..Default::default()
        };
        if diagonals {
            n.top_left = dark(-1, -1);
            n.top_right = dark(1, -1);
            n.bottom_left = dark(-1, 1);
            n.bottom_right = dark(1, 1);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finder_corners() {
        let size = 21;
        assert!(is_finder_zone(0, 0, size));
        assert!(is_finder_zone(6, 6, size));
        assert!(!is_finder_zone(7, 6, size));
        assert!(is_finder_zone(14, 0, size));
        assert!(!is_finder_zone(13, 0, size));
        assert!(is_finder_zone(0, 14, size));
        assert!(is_finder_zone(6, 20, size));
        // No finder at bottom-right.
        assert!(!is_finder_zone(20, 20, size));
        assert!(!is_finder_zone(14, 14, size));
    }

    #[test]
    fn test_finder_zone_cell_count() {
        let size = 25;
        let count = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| is_finder_zone(x, y, size))
            .count();
        assert_eq!(count, 3 * 49);
    }

    #[test]
    fn test_logo_block_size() {
        assert_eq!(logo_block_size(29, Some(0.2), 2), 5 + 2);
        assert_eq!(logo_block_size(29, None, 2), 0);
        assert_eq!(logo_block_size(0, Some(0.2), 2), 0);
    }

    #[test]
    fn test_logo_block_capped_on_version_one() {
        // floor(21 * 0.2) + 2 = 6, but only 5 cells separate the finder blocks.
        assert_eq!(logo_block_size(21, Some(0.2), 2), 5);
        // From version 2 on the uncapped size fits.
        assert_eq!(logo_block_size(25, Some(0.2), 2), 5 + 2);
    }

    #[test]
    fn test_logo_block_stays_clear_of_finders() {
        // floor(21 * 0.3) + 2 = 8, capped to 21 - 16.
        assert_eq!(logo_block_size(21, Some(0.3), 2), 5);
        let (first, _) = logo_zone_span(21, 5).unwrap();
        assert!(first >= FINDER_SIZE);
    }

    #[test]
    fn test_logo_zone_span_is_centered() {
        // size 29: center 14, block 7 -> half 4
        assert_eq!(logo_zone_span(29, 7), Some((10, 18)));
        assert_eq!(logo_zone_span(29, 0), None);
        assert!(is_logo_zone(14, 14, 29, 7));
        assert!(is_logo_zone(10, 18, 29, 7));
        assert!(!is_logo_zone(9, 14, 29, 7));
        assert!(!is_logo_zone(14, 14, 29, 0));
    }

    #[test]
    fn test_logo_zone_clamped_to_grid() {
        assert_eq!(logo_zone_span(5, 20), Some((0, 4)));
    }

    #[test]
    fn test_neighbors_ignore_excluded_cells() {
        let matrix = Matrix::from_fn(21, |_, _| true);
        let zones = Zones::new(21, 0);
        // (7, 3) sits right of the top-left finder: left neighbor is excluded.
        let n = zones.neighbors(&matrix, 7, 3, false);
        assert!(!n.left);
        assert!(n.right && n.top && n.bottom);
        assert_eq!(n.orthogonal_count(), 3);

        // Edge of grid counts as light.
        let n = zones.neighbors(&matrix, 10, 0, true);
        assert!(!n.top && !n.top_left && !n.top_right);
        assert!(n.bottom_left && n.bottom_right);
    }

    #[test]
    fn test_neighbors_ignore_logo_zone() {
        let matrix = Matrix::from_fn(29, |_, _| true);
        let zones = Zones::new(29, 7);
        let n = zones.neighbors(&matrix, 9, 14, false);
        assert!(!n.right);
        assert!(n.left);
        assert!(!zones.is_body_module(&matrix, 10, 14));
        assert!(zones.is_body_module(&matrix, 9, 14));
    }

    #[test]
    fn test_unrestricted_has_no_exclusions() {
        let zones = Zones::unrestricted();
        assert!(!zones.is_excluded(0, 0));
    }
}
