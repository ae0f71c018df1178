//! Module grid built by a standards-compliant encoder.
//!
//! Reed-Solomon coding, mode segmentation, version and mask selection are
//! delegated to the `qrcode` crate. This module only fixes the contract:
//! `(payload, level)` maps deterministically to a square boolean grid with
//! `true` meaning dark, side `4 * version + 17`.

use log::debug;
use log::warn;
use thiserror::Error;

use super::ec::EcLevel;

/// Errors from building a module grid.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Nothing to encode")]
    EmptyPayload,

    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// Square module grid. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    size: usize,
    modules: Vec<bool>,
    version: Option<u8>,
    ec_level: Option<EcLevel>,
}

impl Matrix {
    /// The "nothing to render" grid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Encode `payload` at `level`.
    pub fn build(payload: &str, level: EcLevel) -> Result<Self, MatrixError> {
        if payload.is_empty() {
            return Err(MatrixError::EmptyPayload);
        }

        let code = qrcode::QrCode::with_error_correction_level(payload.as_bytes(), level.to_qrcode())
            .map_err(|e| MatrixError::Encode(e.to_string()))?;

        let version = match code.version() {
            qrcode::Version::Normal(v) => u8::try_from(v).ok(),
            qrcode::Version::Micro(_) => None,
        };

        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        debug!(
            "encoded {} bytes at {:?}: version {:?}, {}x{}",
            payload.len(),
            level,
            version,
            size,
            size
        );

        Ok(Self {
            size,
            modules,
            version,
            ec_level: Some(level),
        })
    }

    /// Encode, treating any failure as "no matrix".
    pub fn build_or_empty(payload: &str, level: EcLevel) -> Self {
        match Self::build(payload, level) {
            Ok(matrix) => matrix,
            Err(MatrixError::EmptyPayload) => Self::empty(),
            Err(e) => {
                warn!("{} ({} bytes at {:?})", e, payload.len(), level);
                Self::empty()
            }
        }
    }

    /// Build an arbitrary grid, e.g. a style-preview sample.
    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut modules = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                modules.push(f(x, y));
            }
        }
        Self {
            size,
            modules,
            version: None,
            ec_level: None,
        }
    }

    /// Side length in modules (0 when empty).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// QR version (1..=40) when built by the encoder.
    pub fn version(&self) -> Option<u8> {
        self.version
    }

    pub fn ec_level(&self) -> Option<EcLevel> {
        self.ec_level
    }

    /// Whether `(x, y)` is dark. Out-of-range coordinates are light.
    #[inline]
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, so an empty grid yields nothing.
        self.modules.chunks(self.size.max(1))
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}
