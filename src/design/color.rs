//! Background fill and CSS color helpers.

use serde::{Deserialize, Serialize};

/// Sentinel background name meaning "no fill".
pub const TRANSPARENT: &str = "transparent";

/// Fill used when a transparent background meets an opaque consumer.
pub const WHITE: &str = "#ffffff";

/// Symbol background: a CSS color, or transparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Background {
    Transparent,
    Color(String),
}

impl Background {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Background::Transparent)
    }

    /// The color to paint, `None` when transparent.
    pub fn fill(&self) -> Option<&str> {
        match self {
            Background::Transparent => None,
            Background::Color(c) => Some(c.as_str()),
        }
    }

    /// The color to paint on an opaque surface; transparent becomes white.
    pub fn fill_or_white(&self) -> &str {
        self.fill().unwrap_or(WHITE)
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(WHITE.to_string())
    }
}

impl From<String> for Background {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(TRANSPARENT) {
            Background::Transparent
        } else {
            Background::Color(trimmed.to_string())
        }
    }
}

impl From<&str> for Background {
    fn from(value: &str) -> Self {
        Background::from(value.to_string())
    }
}

impl From<Background> for String {
    fn from(bg: Background) -> Self {
        match bg {
            Background::Transparent => TRANSPARENT.to_string(),
            Background::Color(c) => c,
        }
    }
}

/// Parse `#rgb` / `#rrggbb` (with or without `#`) into RGB bytes.
///
/// Named colors and functional notations are not understood here; callers
/// that need a raster color fall back to a default.
pub fn parse_hex_rgb(color: &str) -> Option<[u8; 3]> {
    let digits = color.trim().trim_start_matches('#');
    let full: String = match digits.len() {
        // #f0a -> #ff00aa
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let bytes = hex::decode(full).ok()?;
    bytes.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_sentinel() {
        assert_eq!(Background::from("transparent"), Background::Transparent);
        assert_eq!(Background::from("TRANSPARENT"), Background::Transparent);
        assert_eq!(Background::from(""), Background::Transparent);
        assert_eq!(Background::Transparent.fill(), None);
        assert_eq!(Background::Transparent.fill_or_white(), "#ffffff");
    }

    #[test]
    fn test_color_background() {
        let bg = Background::from(" #fef3c7 ");
        assert_eq!(bg.fill(), Some("#fef3c7"));
        assert_eq!(bg.fill_or_white(), "#fef3c7");
        assert_eq!(String::from(bg), "#fef3c7");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_rgb("#000000"), Some([0, 0, 0]));
        assert_eq!(parse_hex_rgb("#2563EB"), Some([0x25, 0x63, 0xeb]));
        assert_eq!(parse_hex_rgb("fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_rgb("#f0a"), Some([0xff, 0x00, 0xaa]));
        assert_eq!(parse_hex_rgb("red"), None);
        assert_eq!(parse_hex_rgb("#12345"), None);
        assert_eq!(parse_hex_rgb("#12345g"), None);
        assert_eq!(parse_hex_rgb("#éf"), None);
    }
}
