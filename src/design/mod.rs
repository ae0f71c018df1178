//! # Design
//!
//! Flat record of rendering parameters. Every field has a default, so a
//! partially specified JSON design (e.g. `{"dotType": "fluid"}`) is valid.
//!
//! Field names follow the web editor's camelCase keys; the older keys
//! `dotType`, `bgColor` and `logoBG` are accepted as aliases.
//!
//! ## Example
//!
//! ```
//! use qrsmith::design::{BodyShape, Design, EyeStyle};
//!
//! let design: Design = serde_json::from_str(
//!     r#"{"dotType": "fluid", "eyeFrame": "leaf", "bgColor": "transparent"}"#,
//! ).unwrap();
//!
//! assert_eq!(design.body_shape, BodyShape::Fluid);
//! assert_eq!(design.eye_frame, EyeStyle::Leaf);
//! assert!(design.background.is_transparent());
//! ```

mod color;
mod styles;

pub use color::{Background, TRANSPARENT, WHITE, parse_hex_rgb};
pub use styles::{BodyShape, EyeStyle};

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LOGO_RATIO, MAX_LOGO_RATIO};

/// How the logo image is clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoStyle {
    #[default]
    Square,
    Circle,
}

/// A logo that has finished loading and can be drawn.
///
/// `href` is a displayable URI (data URI, blob URI or URL) supplied by the
/// image-loading collaborator. The renderer never fetches or validates it.
/// `source` is the [`Design::logo`] reference the image was loaded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoImage {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LogoImage {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            source: None,
        }
    }

    /// An image loaded for the logo reference `source`.
    pub fn loaded_for(href: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            source: Some(source.into()),
        }
    }

    /// Whether this image may be drawn for `design`'s logo.
    ///
    /// Images without a recorded source match any configured logo.
    pub fn belongs_to(&self, design: &Design) -> bool {
        match &self.source {
            Some(source) => design.logo.as_deref() == Some(source.as_str()),
            None => design.has_logo(),
        }
    }
}

/// Rendering parameters for one QR design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    #[serde(alias = "dotType")]
    pub body_shape: BodyShape,
    pub body_color: String,
    pub eye_frame: EyeStyle,
    pub eye_ball: EyeStyle,
    /// Shared by frame and ball.
    pub eye_color: String,
    #[serde(alias = "bgColor")]
    pub background: Background,
    /// Logo reference. Its presence reserves the center zone even before
    /// the image itself has loaded.
    pub logo: Option<String>,
    /// Knock out the background behind the logo.
    #[serde(alias = "logoBG")]
    pub logo_background: bool,
    pub logo_style: LogoStyle,
    /// Fraction of the symbol width reserved for the logo.
    pub logo_size_ratio: f64,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            body_shape: BodyShape::Square,
            body_color: "#000000".to_string(),
            eye_frame: EyeStyle::Square,
            eye_ball: EyeStyle::Square,
            eye_color: "#000000".to_string(),
            background: Background::default(),
            logo: None,
            logo_background: false,
            logo_style: LogoStyle::Square,
            logo_size_ratio: DEFAULT_LOGO_RATIO,
        }
    }
}

impl Design {
    /// Whether a logo is configured (loaded or not).
    pub fn has_logo(&self) -> bool {
        self.logo.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    /// Logo ratio clamped to `[0, MAX_LOGO_RATIO]`; non-finite values use the default.
    pub fn logo_ratio(&self) -> f64 {
        if self.logo_size_ratio.is_finite() {
            self.logo_size_ratio.clamp(0.0, MAX_LOGO_RATIO)
        } else {
            DEFAULT_LOGO_RATIO
        }
    }

    /// The logo ratio when a logo is configured, `None` otherwise.
    pub fn active_logo_ratio(&self) -> Option<f64> {
        self.has_logo().then(|| self.logo_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let design: Design = serde_json::from_str("{}").unwrap();
        assert_eq!(design, Design::default());
    }

    #[test]
    fn test_full_json() {
        let json = r##"{
            "bodyShape": "blobV",
            "bodyColor": "#2563EB",
            "eyeFrame": "drop",
            "eyeBall": "hex",
            "eyeColor": "#DB2777",
            "background": "#fef3c7",
            "logo": "data:image/png;base64,AAAA",
            "logoBackground": true,
            "logoStyle": "circle",
            "logoSizeRatio": 0.25
        }"##;
        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.body_shape, BodyShape::BlobV);
        assert_eq!(design.eye_ball, EyeStyle::Hex);
        assert_eq!(design.logo_style, LogoStyle::Circle);
        assert!(design.logo_background);
        assert!(design.has_logo());
        assert_eq!(design.active_logo_ratio(), Some(0.25));
    }

    #[test]
    fn test_legacy_aliases() {
        let json = r#"{"dotType":"sharp","bgColor":"transparent","logoBG":true}"#;
        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.body_shape, BodyShape::Sharp);
        assert!(design.background.is_transparent());
        assert!(design.logo_background);
    }

    #[test]
    fn test_logo_ratio_is_clamped() {
        let mut design = Design {
            logo_size_ratio: 0.9,
            ..Default::default()
        };
        assert_eq!(design.logo_ratio(), MAX_LOGO_RATIO);
        design.logo_size_ratio = f64::NAN;
        assert_eq!(design.logo_ratio(), DEFAULT_LOGO_RATIO);
        design.logo_size_ratio = -1.0;
        assert_eq!(design.logo_ratio(), 0.0);
    }

    #[test]
    fn test_blank_logo_is_absent() {
        let design = Design {
            logo: Some("  ".into()),
            ..Default::default()
        };
        assert!(!design.has_logo());
        assert_eq!(design.active_logo_ratio(), None);
    }
}
