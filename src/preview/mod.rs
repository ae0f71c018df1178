//! # Raster Preview
//!
//! Plain PNG rendering of a module grid: one solid square per dark module,
//! no shape styling, no logo. Used for quick previews and for checking that
//! a generated symbol still scans.
//!
//! ```text
//! Matrix ──► RgbImage (scale px per module, quiet zone) ──► PNG bytes
//! ```
//!
//! A raster has no transparency here: a transparent design background is
//! painted white so scanners always see light/dark contrast.
//!
//! ## Example
//!
//! ```
//! use qrsmith::design::Design;
//! use qrsmith::preview::{PreviewOptions, render_png};
//! use qrsmith::symbol::{EcLevel, Matrix};
//!
//! let matrix = Matrix::build("https://example.com", EcLevel::Medium).unwrap();
//! let png = render_png(&matrix, &Design::default(), PreviewOptions::default()).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

use image::{ImageEncoder, Rgb, RgbImage};
use thiserror::Error;

use crate::design::{Design, parse_hex_rgb};
use crate::symbol::{Matrix, is_finder_zone};

/// Errors that can occur during preview rendering.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    #[error("Nothing to render")]
    EmptyMatrix,

    #[error("Invalid preview size: {0}")]
    InvalidSize(String),
}

/// Largest image side accepted, in pixels.
pub const MAX_SIDE_PX: u32 = 8192;

/// Raster geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Pixels per module.
    pub scale: u32,
    /// Light border in modules. Defaults to the 4 modules scanners expect.
    pub quiet_zone: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            scale: 8,
            quiet_zone: 4,
        }
    }
}

/// Solid colors for the three kinds of pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body: [u8; 3],
    pub eye: [u8; 3],
    pub light: [u8; 3],
}

impl Palette {
    pub const MONO: Palette = Palette {
        body: [0, 0, 0],
        eye: [0, 0, 0],
        light: [255, 255, 255],
    };

    /// Colors from a design. Colors that are not hex fall back to black on white.
    pub fn from_design(design: &Design) -> Self {
        Self {
            body: parse_hex_rgb(&design.body_color).unwrap_or(Self::MONO.body),
            eye: parse_hex_rgb(&design.eye_color).unwrap_or(Self::MONO.eye),
            light: parse_hex_rgb(design.background.fill_or_white()).unwrap_or(Self::MONO.light),
        }
    }
}

/// Side of the rendered image in pixels.
pub fn image_side(matrix: &Matrix, options: PreviewOptions) -> Result<u32, PreviewError> {
    if matrix.is_empty() {
        return Err(PreviewError::EmptyMatrix);
    }
    if options.scale == 0 {
        return Err(PreviewError::InvalidSize("scale must be at least 1".into()));
    }
    let modules = matrix.size() as u64 + 2 * options.quiet_zone as u64;
    let side = modules * options.scale as u64;
    if side > MAX_SIDE_PX as u64 {
        return Err(PreviewError::InvalidSize(format!(
            "{side}px exceeds the {MAX_SIDE_PX}px limit"
        )));
    }
    Ok(side as u32)
}

/// Rasterize `matrix` into an RGB image.
pub fn render_image(
    matrix: &Matrix,
    palette: &Palette,
    options: PreviewOptions,
) -> Result<RgbImage, PreviewError> {
    let side = image_side(matrix, options)?;
    let size = matrix.size() as i64;
    let (scale, quiet) = (options.scale as i64, options.quiet_zone as i64);

    let img = RgbImage::from_fn(side, side, |px, py| {
        let mx = px as i64 / scale - quiet;
        let my = py as i64 / scale - quiet;
        if !matrix.is_dark(mx, my) {
            return Rgb(palette.light);
        }
        // is_dark is only true inside the grid, so the casts are in range.
        if is_finder_zone(mx as usize, my as usize, size as usize) {
            Rgb(palette.eye)
        } else {
            Rgb(palette.body)
        }
    });
    Ok(img)
}

/// Rasterize `matrix` with `design`'s colors and encode as PNG.
pub fn render_png(
    matrix: &Matrix,
    design: &Design,
    options: PreviewOptions,
) -> Result<Vec<u8>, PreviewError> {
    let img = render_image(matrix, &Palette::from_design(design), options)?;
    encode_png(&img)
}

/// PNG-encode an RGB image.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PreviewError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PreviewError::ImageEncode(e.to_string()))?;
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Background;
    use crate::symbol::EcLevel;

    #[test]
    fn test_image_size() {
        let m = Matrix::build("HELLO", EcLevel::Low).unwrap();
        let opts = PreviewOptions {
            scale: 3,
            quiet_zone: 2,
        };
        assert_eq!(image_side(&m, opts).unwrap(), (21 + 4) * 3);
        let img = render_image(&m, &Palette::MONO, opts).unwrap();
        assert_eq!(img.dimensions(), (75, 75));
        // Quiet zone is light, finder corner is dark.
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(6, 6), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(matches!(
            image_side(&Matrix::empty(), PreviewOptions::default()),
            Err(PreviewError::EmptyMatrix)
        ));
        let m = Matrix::from_fn(21, |_, _| false);
        let zero = PreviewOptions {
            scale: 0,
            ..Default::default()
        };
        assert!(image_side(&m, zero).is_err());
        let huge = PreviewOptions {
            scale: 1000,
            ..Default::default()
        };
        assert!(image_side(&m, huge).is_err());
    }

    #[test]
    fn test_transparent_background_is_white() {
        let design = Design {
            background: Background::Transparent,
            body_color: "#2563eb".into(),
            eye_color: "not-a-hex".into(),
            ..Default::default()
        };
        let palette = Palette::from_design(&design);
        assert_eq!(palette.light, [255, 255, 255]);
        assert_eq!(palette.body, [0x25, 0x63, 0xeb]);
        assert_eq!(palette.eye, [0, 0, 0]);
    }

    #[test]
    fn test_eye_color_applies_to_finders_only() {
        let m = Matrix::from_fn(21, |_, _| true);
        let palette = Palette {
            body: [1, 1, 1],
            eye: [2, 2, 2],
            light: [255, 255, 255],
        };
        let opts = PreviewOptions {
            scale: 1,
            quiet_zone: 0,
        };
        let img = render_image(&m, &palette, opts).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([2, 2, 2]));
        assert_eq!(img.get_pixel(10, 10), &Rgb([1, 1, 1]));
    }

    #[test]
    fn test_png_signature() {
        let m = Matrix::build("png", EcLevel::Low).unwrap();
        let png = render_png(&m, &Design::default(), PreviewOptions::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
