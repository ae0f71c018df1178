//! # Content
//!
//! The value a QR code carries, and how it turns into the exact string that
//! gets encoded.
//!
//! ```text
//! Content ──payload()──> Option<String> ──> symbol::ec ──> symbol::matrix
//!    │
//!    └── is_filled()  (drives "enter content to preview" state)
//! ```
//!
//! Absence of a payload is a normal outcome, never an error: an empty URL or
//! a Wi-Fi value without an SSID simply yields `None`.
//!
//! ## Example
//!
//! ```
//! use qrsmith::content::Content;
//!
//! let wifi = Content::wifi("Home", "secret123", false);
//! assert_eq!(
//!     wifi.payload().as_deref(),
//!     Some("WIFI:T:WPA;S:Home;P:secret123;H:false;;")
//! );
//!
//! assert_eq!(Content::url("   ").payload(), None);
//! ```

mod drafts;
mod record;
mod wifi;

pub use drafts::{ContentDrafts, ContentEdit, WifiDraft};
pub use record::{QrData, QrKind};
pub use wifi::{WifiEscaping, wifi_payload};

use serde::{Deserialize, Serialize};

/// Content variants a QR code can carry.
///
/// Serialized with a `type` tag, e.g. `{"type": "url", "url": "https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// A link. Trimmed before use.
    Url {
        #[serde(default)]
        url: String,
    },
    /// Free-form text. Trimmed before use.
    Text {
        #[serde(default)]
        text: String,
    },
    /// Wi-Fi join credentials (always announced as WPA).
    Wifi {
        #[serde(default)]
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        hidden: bool,
    },
}

/// Discriminant of [`Content`], used to switch the active editor tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[default]
    Url,
    Text,
    Wifi,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Url, ContentKind::Text, ContentKind::Wifi];

    pub fn name(self) -> &'static str {
        match self {
            ContentKind::Url => "url",
            ContentKind::Text => "text",
            ContentKind::Wifi => "wifi",
        }
    }
}

impl Content {
    pub fn url(url: impl Into<String>) -> Self {
        Content::Url { url: url.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn wifi(ssid: impl Into<String>, password: impl Into<String>, hidden: bool) -> Self {
        Content::Wifi {
            ssid: ssid.into(),
            password: password.into(),
            hidden,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Url { .. } => ContentKind::Url,
            Content::Text { .. } => ContentKind::Text,
            Content::Wifi { .. } => ContentKind::Wifi,
        }
    }

    /// Whether the user has typed anything meaningful.
    ///
    /// A Wi-Fi value counts as filled when either the SSID or the password
    /// is non-blank, even though only an SSID makes it encodable.
    pub fn is_filled(&self) -> bool {
        match self {
            Content::Url { url } => !url.trim().is_empty(),
            Content::Text { text } => !text.trim().is_empty(),
            Content::Wifi { ssid, password, .. } => {
                !ssid.trim().is_empty() || !password.trim().is_empty()
            }
        }
    }

    /// The exact string to encode, with Wi-Fi fields inserted verbatim.
    pub fn payload(&self) -> Option<String> {
        self.payload_with(WifiEscaping::Verbatim)
    }

    /// The exact string to encode, with an explicit Wi-Fi escaping mode.
    pub fn payload_with(&self, escaping: WifiEscaping) -> Option<String> {
        match self {
            Content::Url { url } => non_blank(url),
            Content::Text { text } => non_blank(text),
            Content::Wifi {
                ssid,
                password,
                hidden,
            } => {
                if ssid.trim().is_empty() {
                    return None;
                }
                Some(wifi_payload(ssid, password, *hidden, escaping))
            }
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Url { url: String::new() }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_is_trimmed() {
        let content = Content::url("  https://example.com/a \n");
        assert_eq!(content.payload().as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn test_blank_values_have_no_payload() {
        for content in [
            Content::url(""),
            Content::url(" \t "),
            Content::text("\n\n"),
            Content::wifi("   ", "", false),
        ] {
            assert_eq!(content.payload(), None, "{:?}", content);
            assert!(!content.is_filled(), "{:?}", content);
        }
    }

    #[test]
    fn test_wifi_exact_format() {
        let content = Content::wifi("Home", "secret123", false);
        assert_eq!(
            content.payload().as_deref(),
            Some("WIFI:T:WPA;S:Home;P:secret123;H:false;;")
        );
        let hidden = Content::wifi("Lab", "", true);
        assert_eq!(hidden.payload().as_deref(), Some("WIFI:T:WPA;S:Lab;P:;H:true;;"));
    }

    #[test]
    fn test_wifi_password_only_is_filled_but_not_encodable() {
        let content = Content::wifi("", "hunter2", false);
        assert!(content.is_filled());
        assert_eq!(content.payload(), None);
    }

    #[test]
    fn test_wifi_fields_are_not_trimmed() {
        let content = Content::wifi(" Cafe ", " pw ", false);
        assert_eq!(
            content.payload().as_deref(),
            Some("WIFI:T:WPA;S: Cafe ;P: pw ;H:false;;")
        );
    }

    #[test]
    fn test_serde_tagged_shape() {
        let json = r#"{"type":"wifi","ssid":"Home","password":"x","hidden":true}"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content, Content::wifi("Home", "x", true));

        let json = r#"{"type":"text"}"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content, Content::text(""));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Content::url("a").kind(), ContentKind::Url);
        assert_eq!(Content::text("a").kind(), ContentKind::Text);
        assert_eq!(Content::wifi("a", "b", false).kind(), ContentKind::Wifi);
    }
}
