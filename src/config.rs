//! # Render Configuration
//!
//! Tuning constants for the geometric renderer and the editing loop.
//!
//! ## Geometry
//!
//! One SVG user unit is one QR module. Shapes are drawn inside the unit cell
//! `[x, x+1] x [y, y+1]`:
//!
//! ```text
//!  gap      shrinks independent shapes away from the cell edge
//!  overlap  pushes neighbor-fused shapes past the cell edge at dark seams
//!
//!  ┌──────────┐          ┌──────────┬──────────┐
//!  │ ┌──────┐ │          │ ┌────────┼┼───────┐ │
//!  │ │      │ │ gap      │ │  fused ││ fused │ │  overlap
//!  │ └──────┘ │          │ └────────┼┼───────┘ │
//!  └──────────┘          └──────────┴──────────┘
//! ```
//!
//! The constants are visual, not semantic, but the ordering
//! `0 < overlap < gap < 0.5` must hold (see [`RenderConfig::validate`]).
//!
//! ## Usage
//!
//! ```
//! use qrsmith::config::RenderConfig;
//!
//! let config = RenderConfig::DEFAULT;
//! assert!(config.validate().is_ok());
//! assert_eq!(config.quiet_zone, 2);
//! ```

use std::time::Duration;

use crate::error::QrsmithError;

/// Quiescence window for coalescing edits into a single regeneration.
pub const DEBOUNCE_MS: u64 = 300;

/// Base URL that dynamic codes redirect through.
pub const DEFAULT_REDIRECT_BASE: &str = "https://r.atqr.app";

/// Default fraction of the symbol width reserved for a logo.
pub const DEFAULT_LOGO_RATIO: f64 = 0.2;

/// Largest logo ratio accepted; beyond this no EC level can recover the
/// occluded center.
pub const MAX_LOGO_RATIO: f64 = 0.3;

/// The debounce window as a [`Duration`].
pub fn debounce_window() -> Duration {
    Duration::from_millis(DEBOUNCE_MS)
}

/// # Render Configuration
///
/// - **quiet_zone**: light border around the symbol, in modules
/// - **gap**: inset of independent shapes from the cell edge
/// - **overlap**: outset of fused shapes across dark seams
/// - **logo_margin**: extra modules added to the logo block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Padding around the module grid, in modules.
    pub quiet_zone: u32,

    /// Inset for shapes that must read as separate modules.
    pub gap: f64,

    /// Outset at fused seams so anti-aliasing never shows a hairline.
    pub overlap: f64,

    /// Modules added to `floor(size * ratio)` when sizing the logo block.
    pub logo_margin: usize,
}

impl RenderConfig {
    /// Default tuning, matching the web preview.
    pub const DEFAULT: RenderConfig = RenderConfig {
        quiet_zone: 2,
        gap: 0.1,
        overlap: 0.03,
        logo_margin: 2,
    };

    /// Side of a shrunken independent shape (`1 - 2 * gap`).
    #[inline]
    pub fn inner_size(&self) -> f64 {
        1.0 - 2.0 * self.gap
    }

    /// Corner radius that turns an inner square into a circle.
    #[inline]
    pub fn round_radius(&self) -> f64 {
        self.inner_size() / 2.0
    }

    /// Check the `0 < overlap < gap < 0.5` ordering contract.
    pub fn validate(&self) -> Result<(), QrsmithError> {
        if !(self.overlap > 0.0) {
            return Err(QrsmithError::Render(format!(
                "overlap must be positive, got {}",
                self.overlap
            )));
        }
        if !(self.overlap < self.gap) {
            return Err(QrsmithError::Render(format!(
                "overlap ({}) must be smaller than gap ({})",
                self.overlap, self.gap
            )));
        }
        if !(self.gap < 0.5) {
            return Err(QrsmithError::Render(format!(
                "gap must be below half a module, got {}",
                self.gap
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
