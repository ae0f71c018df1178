//! Error-correction level selection.
//!
//! QR symbols tolerate roughly 7/15/25/30% damaged modules at
//! Low/Medium/Quartile/High. A centered logo always destroys a block near
//! the center, so logo-bearing symbols need stronger protection.
//!
//! ## Policies
//!
//! | Policy | No logo | With logo |
//! |--------|---------|-----------|
//! | `Compact` (default) | `<20` M, else L | `<=25` H, `<=150` Q, else M |
//! | `LogoArea` | `<120` L, `<250` M, else Q | by length and `ratio²`, see [`EcPolicy::LogoArea`] |
//!
//! `Compact` deliberately gives short unlogo'd payloads Medium rather than
//! Low: a short payload has slack capacity in the smallest version, so the
//! stronger level costs no visual density.

use serde::{Deserialize, Serialize};

/// Error-correction strength, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    #[serde(rename = "L", alias = "low")]
    Low,
    #[serde(rename = "M", alias = "medium")]
    Medium,
    #[serde(rename = "Q", alias = "quartile")]
    Quartile,
    #[serde(rename = "H", alias = "high")]
    High,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::Low, EcLevel::Medium, EcLevel::Quartile, EcLevel::High];

    /// Single-letter name used by the QR standard.
    pub fn letter(self) -> char {
        match self {
            EcLevel::Low => 'L',
            EcLevel::Medium => 'M',
            EcLevel::Quartile => 'Q',
            EcLevel::High => 'H',
        }
    }

    /// Approximate fraction of codewords that can be recovered.
    pub fn recovery_ratio(self) -> f64 {
        match self {
            EcLevel::Low => 0.07,
            EcLevel::Medium => 0.15,
            EcLevel::Quartile => 0.25,
            EcLevel::High => 0.30,
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

/// Which heuristic picks the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcPolicy {
    /// Length thresholds only.
    #[default]
    Compact,
    /// Length thresholds combined with the logo's area ratio (`ratio²`):
    ///
    /// - `<120` and area `<=0.06` → L
    /// - `<250` and area `<=0.10` → M
    /// - `<400` and area `<=0.16` → Q
    /// - otherwise → H
    LogoArea,
}

impl EcPolicy {
    /// Choose a level for a payload of `payload_len` characters.
    ///
    /// `logo_ratio` is `Some(width fraction)` when a logo occludes the center.
    pub fn choose(self, payload_len: usize, logo_ratio: Option<f64>) -> EcLevel {
        match self {
            EcPolicy::Compact => choose_compact(payload_len, logo_ratio.is_some()),
            EcPolicy::LogoArea => choose_by_logo_area(payload_len, logo_ratio),
        }
    }
}

/// The default length-threshold policy.
pub fn choose_compact(payload_len: usize, has_logo: bool) -> EcLevel {
    if !has_logo {
        return if payload_len < 20 {
            EcLevel::Medium
        } else {
            EcLevel::Low
        };
    }

    if payload_len <= 25 {
        EcLevel::High
    } else if payload_len <= 150 {
        EcLevel::Quartile
    } else {
        EcLevel::Medium
    }
}

fn choose_by_logo_area(payload_len: usize, logo_ratio: Option<f64>) -> EcLevel {
    let Some(ratio) = logo_ratio else {
        return if payload_len < 120 {
            EcLevel::Low
        } else if payload_len < 250 {
            EcLevel::Medium
        } else {
            EcLevel::Quartile
        };
    };

    let area = ratio * ratio;
    if payload_len < 120 && area <= 0.06 {
        EcLevel::Low
    } else if payload_len < 250 && area <= 0.1 {
        EcLevel::Medium
    } else if payload_len < 400 && area <= 0.16 {
        EcLevel::Quartile
    } else {
        EcLevel::High
    }
}
