//! Named QR record with static/dynamic resolution.

use serde::{Deserialize, Serialize};

use super::{Content, WifiEscaping};
use crate::design::Design;

/// Static codes encode their content; dynamic codes encode a redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrKind {
    #[default]
    Static,
    Dynamic,
}

/// A complete QR description as handed over by the application layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QrData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub design: Design,
    #[serde(default, rename = "type")]
    pub kind: QrKind,
    /// Short redirect slug assigned to dynamic codes.
    #[serde(default)]
    pub slug: Option<String>,
}

impl QrData {
    /// Resolve the payload to encode.
    ///
    /// A dynamic record with a slug encodes `{redirect_base}/{slug}`; a
    /// dynamic record without one falls back to its content, like a static one.
    pub fn payload(&self, redirect_base: &str, escaping: WifiEscaping) -> Option<String> {
        if self.kind == QrKind::Dynamic {
            if let Some(slug) = self.slug.as_deref().filter(|s| !s.trim().is_empty()) {
                return Some(format!("{}/{}", redirect_base.trim_end_matches('/'), slug.trim()));
            }
        }
        self.content.payload_with(escaping)
    }
}
