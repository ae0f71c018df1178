//! # Generation Pipeline
//!
//! ```text
//! Content ──► payload ──► EC level ──► Matrix ──► zones ──► SVG
//!   │            │                        │
//!   └ blank ─────┴──► None                └ encode failure ──► empty
//! ```
//!
//! Every stage is synchronous and pure. Empty content and oversized
//! payloads both end in an empty [`Rendered`] rather than an error.

use log::debug;

use crate::config::{DEFAULT_REDIRECT_BASE, RenderConfig};
use crate::content::{Content, QrData, WifiEscaping};
use crate::design::{Design, LogoImage};
use crate::render::{SvgDocument, compose};
use crate::symbol::{EcLevel, EcPolicy, Matrix};

/// Output of one regeneration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    /// The string handed to the encoder, `None` when there was nothing to encode.
    pub payload: Option<String>,
    pub ec_level: Option<EcLevel>,
    pub matrix: Matrix,
    pub document: Option<SvgDocument>,
}

impl Rendered {
    /// Nothing to show: no payload, or the payload did not fit.
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn svg(&self) -> Option<String> {
        self.document.as_ref().map(SvgDocument::to_svg)
    }
}

/// Generation settings shared by every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub policy: EcPolicy,
    pub escaping: WifiEscaping,
    pub redirect_base: String,
    pub config: RenderConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            policy: EcPolicy::default(),
            escaping: WifiEscaping::default(),
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
            config: RenderConfig::DEFAULT,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: EcPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_escaping(mut self, escaping: WifiEscaping) -> Self {
        self.escaping = escaping;
        self
    }

    pub fn with_redirect_base(mut self, base: impl Into<String>) -> Self {
        self.redirect_base = base.into();
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Level for `payload` under this pipeline's policy.
    ///
    /// Length is counted in characters, as typed.
    pub fn ec_level(&self, payload: &str, design: &Design) -> EcLevel {
        let len = payload.chars().count();
        let level = self.policy.choose(len, design.active_logo_ratio());
        debug!("{:?} picked {:?} for {} chars", self.policy, level, len);
        level
    }

    /// Render `content` styled by `design`.
    pub fn run(&self, content: &Content, design: &Design, logo: Option<&LogoImage>) -> Rendered {
        self.run_payload(content.payload_with(self.escaping), design, logo)
    }

    /// Render a stored record, resolving dynamic redirects.
    pub fn run_record(&self, record: &QrData, logo: Option<&LogoImage>) -> Rendered {
        let payload = record.payload(&self.redirect_base, self.escaping);
        self.run_payload(payload, &record.design, logo)
    }

    /// Render an already-resolved payload.
    pub fn run_payload(
        &self,
        payload: Option<String>,
        design: &Design,
        logo: Option<&LogoImage>,
    ) -> Rendered {
        let Some(payload) = payload else {
            return Rendered::default();
        };

        let level = self.ec_level(&payload, design);
        let matrix = Matrix::build_or_empty(&payload, level);
        let document = compose(&matrix, design, logo, &self.config);

        Rendered {
            payload: Some(payload),
            ec_level: Some(level),
            matrix,
            document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::QrKind;
    use crate::design::BodyShape;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_content_renders_nothing() {
        let pipeline = Pipeline::new();
        for content in [
            Content::url("   "),
            Content::text(""),
            Content::wifi("", "secret", false),
        ] {
            let out = pipeline.run(&content, &Design::default(), None);
            assert!(out.is_empty());
            assert_eq!(out.payload, None);
            assert_eq!(out.svg(), None);
        }
    }

    #[test]
    fn test_url_is_trimmed_and_rendered() {
        let out = Pipeline::new().run(&Content::url("  https://example.com "), &Design::default(), None);
        assert_eq!(out.payload.as_deref(), Some("https://example.com"));
        // 19 characters, just under the short-payload threshold.
        assert_eq!(out.ec_level, Some(EcLevel::Medium));
        assert!(!out.is_empty());
        assert!(out.svg().unwrap().ends_with("</svg>"));
    }

    #[test]
    fn test_logo_raises_level() {
        let design = Design {
            logo: Some("logo.png".into()),
            ..Default::default()
        };
        let out = Pipeline::new().run(&Content::text("hello"), &design, None);
        assert_eq!(out.ec_level, Some(EcLevel::High));
    }

    #[test]
    fn test_oversized_payload_is_empty() {
        let out = Pipeline::new().run(&Content::text("x".repeat(5000)), &Design::default(), None);
        assert!(out.is_empty());
        assert!(out.payload.is_some());
        assert_eq!(out.svg(), None);
    }

    #[test]
    fn test_unknown_shape_matches_square() {
        let content = Content::url("https://example.com/fallback");
        let unknown: Design = serde_json::from_str(r#"{"bodyShape": "sparkles"}"#).unwrap();
        let square = Design {
            body_shape: BodyShape::Square,
            ..Default::default()
        };
        let pipeline = Pipeline::new();
        assert_eq!(
            pipeline.run(&content, &unknown, None).svg(),
            pipeline.run(&content, &square, None).svg()
        );
    }

    #[test]
    fn test_dynamic_record_encodes_redirect() {
        let record = QrData {
            name: "menu".into(),
            content: Content::url("https://example.com/menu"),
            design: Design::default(),
            kind: QrKind::Dynamic,
            slug: Some("abc123".into()),
        };
        let out = Pipeline::new()
            .with_redirect_base("https://go.example/")
            .run_record(&record, None);
        assert_eq!(out.payload.as_deref(), Some("https://go.example/abc123"));
    }

    #[test]
    fn test_strict_wifi_escaping() {
        let content = Content::wifi("My;Net", "pa:ss", false);
        let out = Pipeline::new()
            .with_escaping(WifiEscaping::Strict)
            .run(&content, &Design::default(), None);
        assert_eq!(
            out.payload.as_deref(),
            Some(r"WIFI:T:WPA;S:My\;Net;P:pa\:ss;H:false;;")
        );
    }
}
