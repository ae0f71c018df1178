//! # SVG Composer
//!
//! Assembles body fragments, the three finder patterns and an optional logo
//! into one SVG document. One user unit is one module; the viewBox origin is
//! shifted by the quiet zone so module `(0, 0)` sits at `(0, 0)`:
//!
//! ```text
//! viewBox = -q -q (size + 2q) (size + 2q)
//!
//!   background   (omitted when transparent)
//!   body group   (single fill = body color)
//!   finders x3   (frame + ball, eye color)
//!   logo         (knock-out, clip, image), topmost
//! ```
//!
//! The logo slot is two-phase: the zone is reserved as soon as a logo is
//! configured, and the image is drawn only once a [`LogoImage`] is supplied.
//! Calling [`compose`] again with the image is the second phase.

use std::fmt::Write;

use super::finder::{FinderPattern, finder_patterns};
use super::path::{Bounds, fmt_num};
use super::shapes::{PlacedFragment, render_body};
use crate::config::RenderConfig;
use crate::design::{Background, Design, LogoImage, LogoStyle};
use crate::symbol::zones::logo_zone_span;
use crate::symbol::{Matrix, Zones, logo_block_size};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const LOGO_CLIP_ID: &str = "qrsmith-logo-clip";

/// Escape text for use inside an XML attribute value.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Where and how the logo image is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoPlacement {
    pub href: String,
    pub x: f64,
    pub y: f64,
    pub side: f64,
    pub style: LogoStyle,
    /// Fill painted behind the logo, when knock-out is enabled.
    pub knockout: Option<String>,
}

impl LogoPlacement {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.side, self.side)
    }

    fn write_svg(&self, out: &mut String) {
        let (x, y, side) = (fmt_num(self.x), fmt_num(self.y), fmt_num(self.side));
        let (cx, cy) = self.bounds().center();
        let (cx, cy, r) = (fmt_num(cx), fmt_num(cy), fmt_num(self.side / 2.0));

        if let Some(fill) = &self.knockout {
            let fill = xml_escape(fill);
            match self.style {
                LogoStyle::Square => {
                    let _ = write!(
                        out,
                        r#"<rect x="{x}" y="{y}" width="{side}" height="{side}" fill="{fill}"/>"#
                    );
                }
                LogoStyle::Circle => {
                    let _ = write!(out, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#);
                }
            }
        }

        let clip = match self.style {
            LogoStyle::Square => "",
            LogoStyle::Circle => {
                let _ = write!(
                    out,
                    r#"<defs><clipPath id="{LOGO_CLIP_ID}"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath></defs>"#
                );
                r#" clip-path="url(#qrsmith-logo-clip)""#
            }
        };

        let _ = write!(
            out,
            r#"<image href="{}" x="{x}" y="{y}" width="{side}" height="{side}" preserveAspectRatio="xMidYMid meet"{clip}/>"#,
            xml_escape(&self.href)
        );
    }
}

/// A composed, serializable QR document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub size: usize,
    pub quiet_zone: u32,
    pub zones: Zones,
    pub background: Background,
    pub body_color: String,
    pub eye_color: String,
    pub body: Vec<PlacedFragment>,
    pub finders: [FinderPattern; 3],
    pub logo: Option<LogoPlacement>,
}

impl SvgDocument {
    /// Side of the document including the quiet zone on both sides.
    pub fn total_size(&self) -> usize {
        self.size + 2 * self.quiet_zone as usize
    }

    /// `min-x min-y width height` of the viewBox.
    pub fn view_box(&self) -> String {
        let q = self.quiet_zone;
        let total = self.total_size();
        format!("-{q} -{q} {total} {total}")
    }

    /// Bounds of the reserved logo zone, in module coordinates.
    pub fn logo_zone(&self) -> Option<Bounds> {
        let (first, last) = logo_zone_span(self.size, self.zones.logo_block())?;
        let (first, end) = (first as f64, (last + 1) as f64);
        Some(Bounds::new(first, first, end, end))
    }

    /// Serialize to SVG markup.
    pub fn to_svg(&self) -> String {
        let total = self.total_size();
        let q = self.quiet_zone;
        // Roughly 40 bytes per fragment.
        let mut out = String::with_capacity(512 + self.body.len() * 40);

        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" viewBox="{}" width="{total}" height="{total}" shape-rendering="geometricPrecision">"#,
            self.view_box()
        );

        if let Some(fill) = self.background.fill() {
            let _ = write!(
                out,
                r#"<rect x="-{q}" y="-{q}" width="{total}" height="{total}" fill="{}"/>"#,
                xml_escape(fill)
            );
        }

        let _ = write!(out, r#"<g fill="{}">"#, xml_escape(&self.body_color));
        for placed in &self.body {
            placed.fragment.write_svg(&mut out);
        }
        out.push_str("</g>");

        let eye = xml_escape(&self.eye_color);
        for finder in &self.finders {
            finder.write_svg(&mut out, &eye);
        }

        if let Some(logo) = &self.logo {
            logo.write_svg(&mut out);
        }

        out.push_str("</svg>");
        out
    }
}

/// Compose the document for `matrix` styled by `design`.
///
/// Returns `None` for an empty matrix ("nothing to render"). `logo` is the
/// loaded image, if any; the logo zone is reserved whenever `design` has a
/// logo configured, loaded or not.
pub fn compose(
    matrix: &Matrix,
    design: &Design,
    logo: Option<&LogoImage>,
    config: &RenderConfig,
) -> Option<SvgDocument> {
    if matrix.is_empty() {
        return None;
    }

    let size = matrix.size();
    let block = logo_block_size(size, design.active_logo_ratio(), config.logo_margin);
    let zones = Zones::new(size, block);

    let body = render_body(matrix, &zones, design.body_shape, config);
    let finders = finder_patterns(size, design.eye_frame, design.eye_ball);

    let logo = match logo {
        Some(image) if block > 0 => {
            let side = block as f64;
            let origin = size as f64 / 2.0 - side / 2.0;
            Some(LogoPlacement {
                href: image.href.clone(),
                x: origin,
                y: origin,
                side,
                style: design.logo_style,
                knockout: design
                    .logo_background
                    .then(|| design.background.fill_or_white().to_string()),
            })
        }
        _ => None,
    };

    Some(SvgDocument {
        size,
        quiet_zone: config.quiet_zone,
        zones,
        background: design.background.clone(),
        body_color: design.body_color.clone(),
        eye_color: design.eye_color.clone(),
        body,
        finders,
        logo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::BodyShape;
    use crate::symbol::EcLevel;
    use pretty_assertions::assert_eq;

    fn matrix() -> Matrix {
        Matrix::build("https://example.com/compose", EcLevel::Quartile).unwrap()
    }

    fn with_logo() -> Design {
        Design {
            logo: Some("logo.png".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_matrix_renders_nothing() {
        assert!(compose(&Matrix::empty(), &Design::default(), None, &RenderConfig::DEFAULT).is_none());
    }

    #[test]
    fn test_view_box_includes_quiet_zone() {
        let m = Matrix::from_fn(21, |_, _| false);
        let doc = compose(&m, &Design::default(), None, &RenderConfig::DEFAULT).unwrap();
        assert_eq!(doc.view_box(), "-2 -2 25 25");
        assert!(doc.to_svg().starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-2 -2 25 25" width="25" height="25""#
        ));
    }

    #[test]
    fn test_background() {
        let m = matrix();
        let doc = compose(&m, &Design::default(), None, &RenderConfig::DEFAULT).unwrap();
        assert!(doc.to_svg().contains(r##"fill="#ffffff"/>"##));

        let design = Design {
            background: Background::Transparent,
            ..Default::default()
        };
        let doc = compose(&m, &design, None, &RenderConfig::DEFAULT).unwrap();
        assert!(!doc.to_svg().contains(r#"<rect x="-2""#));
    }

    #[test]
    fn test_logo_zone_reserved_before_image_loads() {
        let m = matrix();
        let plain = compose(&m, &Design::default(), None, &RenderConfig::DEFAULT).unwrap();
        let pending = compose(&m, &with_logo(), None, &RenderConfig::DEFAULT).unwrap();
        assert!(pending.body.len() < plain.body.len());
        assert!(pending.logo.is_none());
        assert!(pending.logo_zone().is_some());
        assert!(!pending.to_svg().contains("<image"));
    }

    #[test]
    fn test_logo_contained_and_centered() {
        let m = matrix();
        let image = LogoImage::new("data:image/png;base64,AAAA");
        let doc = compose(&m, &with_logo(), Some(&image), &RenderConfig::DEFAULT).unwrap();
        let logo = doc.logo.as_ref().unwrap().bounds();
        let zone = doc.logo_zone().unwrap();
        assert!(zone.contains(&logo, 1e-9));
        let (lx, ly) = logo.center();
        let (zx, zy) = zone.center();
        assert!((lx - zx).abs() < 1e-9 && (ly - zy).abs() < 1e-9);
        assert!(doc.to_svg().contains(r#"<image href="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn test_logo_image_without_configured_logo_is_ignored() {
        let m = matrix();
        let image = LogoImage::new("logo.png");
        let doc = compose(&m, &Design::default(), Some(&image), &RenderConfig::DEFAULT).unwrap();
        assert!(doc.logo.is_none());
    }

    #[test]
    fn test_circle_logo_with_knockout() {
        let m = matrix();
        let design = Design {
            logo_style: LogoStyle::Circle,
            logo_background: true,
            background: Background::Transparent,
            ..with_logo()
        };
        let image = LogoImage::new("logo.png");
        let svg = compose(&m, &design, Some(&image), &RenderConfig::DEFAULT)
            .unwrap()
            .to_svg();
        assert!(svg.contains(r#"<clipPath id="qrsmith-logo-clip">"#));
        assert!(svg.contains(r#"clip-path="url(#qrsmith-logo-clip)""#));
        // Knock-out on a transparent background paints white.
        assert!(svg.contains(r##"fill="#ffffff"/><defs>"##));
    }

    #[test]
    fn test_colors_are_escaped() {
        let m = Matrix::from_fn(21, |_, _| true);
        let design = Design {
            body_color: r#"red" onload="x"#.into(),
            ..Default::default()
        };
        let svg = compose(&m, &design, None, &RenderConfig::DEFAULT)
            .unwrap()
            .to_svg();
        assert!(svg.contains(r#"<g fill="red&quot; onload=&quot;x">"#));
    }

    #[test]
    fn test_body_never_in_finder_zone() {
        let m = Matrix::from_fn(25, |_, _| true);
        let design = Design {
            body_shape: BodyShape::Fluid,
            ..Default::default()
        };
        let doc = compose(&m, &design, None, &RenderConfig::DEFAULT).unwrap();
        assert_eq!(doc.body.len(), 25 * 25 - 3 * 49);
        assert!(doc.body.iter().all(|p| !doc.zones.is_finder(p.x, p.y)));
    }
}
