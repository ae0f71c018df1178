//! Named style families for body modules and finder patterns.
//!
//! Names arrive as plain strings from stored designs and UI pickers. Parsing
//! is lenient: case, `-` and `_` are ignored, and anything unrecognized falls
//! back to `square` with a warning instead of failing.

use log::warn;
use serde::{Deserialize, Serialize};

/// Body module shape family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyShape {
    #[default]
    Square,
    SoftSquare,
    Circle,
    Dot,
    Diamond,
    Pill,
    Blob,
    Fluid,
    ExtraFluid,
    CutCorner,
    BlobH,
    BlobV,
    Sharp,
}

impl BodyShape {
    pub const ALL: [BodyShape; 13] = [
        BodyShape::Square,
        BodyShape::SoftSquare,
        BodyShape::Circle,
        BodyShape::Dot,
        BodyShape::Diamond,
        BodyShape::Pill,
        BodyShape::Blob,
        BodyShape::Fluid,
        BodyShape::ExtraFluid,
        BodyShape::CutCorner,
        BodyShape::BlobH,
        BodyShape::BlobV,
        BodyShape::Sharp,
    ];

    /// Canonical (camelCase) name.
    pub fn name(self) -> &'static str {
        match self {
            BodyShape::Square => "square",
            BodyShape::SoftSquare => "softSquare",
            BodyShape::Circle => "circle",
            BodyShape::Dot => "dot",
            BodyShape::Diamond => "diamond",
            BodyShape::Pill => "pill",
            BodyShape::Blob => "blob",
            BodyShape::Fluid => "fluid",
            BodyShape::ExtraFluid => "extraFluid",
            BodyShape::CutCorner => "cutCorner",
            BodyShape::BlobH => "blobH",
            BodyShape::BlobV => "blobV",
            BodyShape::Sharp => "sharp",
        }
    }

    /// Parse a shape name, `None` if unknown.
    pub fn parse(name: &str) -> Option<Self> {
        let key = normalize(name);
        Self::ALL
            .into_iter()
            .find(|shape| normalize(shape.name()) == key)
    }

    /// Parse a shape name, falling back to [`BodyShape::Square`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!("unknown body shape '{}', using square", name);
            BodyShape::Square
        })
    }

    /// Whether rendering depends on the four orthogonal neighbors.
    pub fn needs_neighbors(self) -> bool {
        matches!(
            self,
            BodyShape::Pill
                | BodyShape::Blob
                | BodyShape::Fluid
                | BodyShape::ExtraFluid
                | BodyShape::BlobH
                | BodyShape::BlobV
                | BodyShape::Sharp
        )
    }

    /// Whether rendering also looks at the four diagonal neighbors.
    pub fn needs_diagonals(self) -> bool {
        self == BodyShape::ExtraFluid
    }
}

impl From<String> for BodyShape {
    fn from(name: String) -> Self {
        BodyShape::from_name(&name)
    }
}

impl From<BodyShape> for String {
    fn from(shape: BodyShape) -> Self {
        shape.name().to_string()
    }
}

/// Finder pattern style, shared by the outer frame and the inner ball.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EyeStyle {
    #[default]
    Square,
    Circle,
    /// Soft-rounded square.
    Soft,
    Leaf,
    Drop,
    Eye,
    Hex,
}

impl EyeStyle {
    pub const ALL: [EyeStyle; 7] = [
        EyeStyle::Square,
        EyeStyle::Circle,
        EyeStyle::Soft,
        EyeStyle::Leaf,
        EyeStyle::Drop,
        EyeStyle::Eye,
        EyeStyle::Hex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EyeStyle::Square => "square",
            EyeStyle::Circle => "circle",
            EyeStyle::Soft => "soft",
            EyeStyle::Leaf => "leaf",
            EyeStyle::Drop => "drop",
            EyeStyle::Eye => "eye",
            EyeStyle::Hex => "hex",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let key = normalize(name);
        Self::ALL.into_iter().find(|style| style.name() == key)
    }

    /// Parse a style name, falling back to [`EyeStyle::Square`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!("unknown eye style '{}', using square", name);
            EyeStyle::Square
        })
    }
}

impl From<String> for EyeStyle {
    fn from(name: String) -> Self {
        EyeStyle::from_name(&name)
    }
}

impl From<EyeStyle> for String {
    fn from(style: EyeStyle) -> Self {
        style.name().to_string()
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_names_round_trip() {
        for shape in BodyShape::ALL {
            assert_eq!(BodyShape::parse(shape.name()), Some(shape));
        }
    }

    #[test]
    fn test_body_name_spellings() {
        assert_eq!(BodyShape::parse("soft-square"), Some(BodyShape::SoftSquare));
        assert_eq!(BodyShape::parse("BLOB_H"), Some(BodyShape::BlobH));
        assert_eq!(BodyShape::parse("extrafluid"), Some(BodyShape::ExtraFluid));
        assert_eq!(BodyShape::parse("hexagon"), None);
    }

    #[test]
    fn test_unknown_body_falls_back_to_square() {
        assert_eq!(BodyShape::from_name("starburst-v2"), BodyShape::Square);
        let shape: BodyShape = serde_json::from_str(r#""starburst""#).unwrap();
        assert_eq!(shape, BodyShape::Square);
    }

    #[test]
    fn test_body_serializes_canonical_name() {
        assert_eq!(
            serde_json::to_string(&BodyShape::CutCorner).unwrap(),
            r#""cutCorner""#
        );
    }

    #[test]
    fn test_eye_styles() {
        assert_eq!(EyeStyle::ALL.len(), 7);
        for style in EyeStyle::ALL {
            assert_eq!(EyeStyle::parse(style.name()), Some(style));
        }
        assert_eq!(EyeStyle::from_name("Leaf"), EyeStyle::Leaf);
        assert_eq!(EyeStyle::from_name("star"), EyeStyle::Square);
    }

    #[test]
    fn test_neighbor_requirements() {
        assert!(!BodyShape::Square.needs_neighbors());
        assert!(BodyShape::Fluid.needs_neighbors());
        assert!(BodyShape::Sharp.needs_neighbors());
        assert!(BodyShape::ExtraFluid.needs_diagonals());
        assert!(!BodyShape::Fluid.needs_diagonals());
    }
}
