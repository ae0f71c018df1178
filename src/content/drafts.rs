//! Per-variant editor drafts.
//!
//! Each content variant keeps its own draft so flipping between the URL,
//! Text and Wi-Fi tabs never loses what was typed in the others, and never
//! merges fields across variants. Only the active draft becomes [`Content`].

use serde::{Deserialize, Serialize};

use super::{Content, ContentKind};

/// Draft state of the Wi-Fi tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiDraft {
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub hidden: bool,
}

/// One draft per content variant plus the active variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDrafts {
    #[serde(default)]
    active: ContentKind,
    #[serde(default)]
    url: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    wifi: WifiDraft,
}

/// A single keystroke-level change to the drafts.
///
/// Serialized as `{"field": "ssid", "value": "Home"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ContentEdit {
    /// Switch the active tab.
    Kind(ContentKind),
    Url(String),
    Text(String),
    Ssid(String),
    Password(String),
    Hidden(bool),
}

impl ContentDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drafts seeded from an existing value, which also becomes active.
    pub fn from_content(content: &Content) -> Self {
        let mut drafts = Self::default();
        drafts.replace(content.clone());
        drafts
    }

    pub fn active_kind(&self) -> ContentKind {
        self.active
    }

    pub fn wifi(&self) -> &WifiDraft {
        &self.wifi
    }

    /// The content of the active tab.
    pub fn active(&self) -> Content {
        self.draft(self.active)
    }

    /// The content a given tab would produce, active or not.
    pub fn draft(&self, kind: ContentKind) -> Content {
        match kind {
            ContentKind::Url => Content::Url {
                url: self.url.clone(),
            },
            ContentKind::Text => Content::Text {
                text: self.text.clone(),
            },
            ContentKind::Wifi => Content::Wifi {
                ssid: self.wifi.ssid.clone(),
                password: self.wifi.password.clone(),
                hidden: self.wifi.hidden,
            },
        }
    }

    /// Overwrite one variant's draft and make it active.
    pub fn replace(&mut self, content: Content) {
        self.active = content.kind();
        match content {
            Content::Url { url } => self.url = url,
            Content::Text { text } => self.text = text,
            Content::Wifi {
                ssid,
                password,
                hidden,
            } => {
                self.wifi = WifiDraft {
                    ssid,
                    password,
                    hidden,
                }
            }
        }
    }

    /// Apply an edit. Field edits touch only their own variant's draft.
    ///
    /// Returns whether the active content changed, i.e. whether the
    /// rendered output may be stale.
    pub fn apply(&mut self, edit: ContentEdit) -> bool {
        let before = self.active();
        match edit {
            ContentEdit::Kind(kind) => self.active = kind,
            ContentEdit::Url(url) => self.url = url,
            ContentEdit::Text(text) => self.text = text,
            ContentEdit::Ssid(ssid) => self.wifi.ssid = ssid,
            ContentEdit::Password(password) => self.wifi.password = password,
            ContentEdit::Hidden(hidden) => self.wifi.hidden = hidden,
        }
        self.active() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_switching_keeps_each_draft() {
        let mut drafts = ContentDrafts::new();
        drafts.apply(ContentEdit::Url("https://example.com".into()));
        drafts.apply(ContentEdit::Kind(ContentKind::Wifi));
        drafts.apply(ContentEdit::Ssid("Home".into()));
        drafts.apply(ContentEdit::Kind(ContentKind::Text));
        drafts.apply(ContentEdit::Text("hello".into()));

        assert_eq!(drafts.active(), Content::text("hello"));
        drafts.apply(ContentEdit::Kind(ContentKind::Url));
        assert_eq!(drafts.active(), Content::url("https://example.com"));
        drafts.apply(ContentEdit::Kind(ContentKind::Wifi));
        assert_eq!(drafts.active(), Content::wifi("Home", "", false));
    }

    #[test]
    fn test_inactive_edit_does_not_change_active() {
        let mut drafts = ContentDrafts::new();
        drafts.apply(ContentEdit::Url("a".into()));
        let changed = drafts.apply(ContentEdit::Text("b".into()));
        assert!(!changed);
        assert_eq!(drafts.active(), Content::url("a"));
        assert_eq!(drafts.draft(ContentKind::Text), Content::text("b"));
    }

    #[test]
    fn test_apply_reports_change() {
        let mut drafts = ContentDrafts::new();
        assert!(drafts.apply(ContentEdit::Url("a".into())));
        assert!(!drafts.apply(ContentEdit::Url("a".into())));
        assert!(drafts.apply(ContentEdit::Kind(ContentKind::Text)));
    }

    #[test]
    fn test_from_content_activates_variant() {
        let drafts = ContentDrafts::from_content(&Content::wifi("Net", "pw", true));
        assert_eq!(drafts.active_kind(), ContentKind::Wifi);
        assert!(drafts.wifi().hidden);
        assert_eq!(drafts.draft(ContentKind::Url), Content::url(""));
    }

    #[test]
    fn test_edit_serde_shape() {
        let edit: ContentEdit = serde_json::from_str(r#"{"field":"ssid","value":"Home"}"#).unwrap();
        assert_eq!(edit, ContentEdit::Ssid("Home".into()));
        let edit: ContentEdit = serde_json::from_str(r#"{"field":"kind","value":"wifi"}"#).unwrap();
        assert_eq!(edit, ContentEdit::Kind(ContentKind::Wifi));
    }
}
