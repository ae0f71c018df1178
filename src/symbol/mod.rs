//! # Symbol
//!
//! Everything about the QR symbol itself, before any styling:
//!
//! - [`ec`]: error-correction level selection
//! - [`matrix`]: module grid via a standards-compliant encoder
//! - [`zones`]: finder and logo zone classification, neighbor lookup

pub mod ec;
pub mod matrix;
pub mod zones;

pub use ec::{EcLevel, EcPolicy};
pub use matrix::{Matrix, MatrixError};
pub use zones::{Neighbors, Zones, is_finder_zone, is_logo_zone, logo_block_size};
