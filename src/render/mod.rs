//! # Rendering Module
//!
//! Turns a module grid plus a [`Design`](crate::design::Design) into SVG.
//!
//! ## Modules
//!
//! - [`path`]: path-data builder with bounds tracking
//! - [`shapes`]: body shape renderer, one fragment per dark module
//! - [`finder`]: the three styled finder patterns
//! - [`composer`]: document assembly and serialization
//! - [`samples`]: standalone style-picker previews
//!
//! ## Usage Example
//!
//! ```
//! use qrsmith::config::RenderConfig;
//! use qrsmith::design::{BodyShape, Design};
//! use qrsmith::render::compose;
//! use qrsmith::symbol::{EcLevel, Matrix};
//!
//! let matrix = Matrix::build("https://example.com", EcLevel::Medium)?;
//! let design = Design {
//!     body_shape: BodyShape::Fluid,
//!     ..Default::default()
//! };
//!
//! let doc = compose(&matrix, &design, None, &RenderConfig::DEFAULT).unwrap();
//! assert!(doc.to_svg().starts_with("<svg"));
//! # Ok::<(), qrsmith::symbol::MatrixError>(())
//! ```

pub mod composer;
pub mod finder;
pub mod path;
pub mod samples;
pub mod shapes;

pub use composer::{LogoPlacement, SvgDocument, compose, xml_escape};
pub use finder::{Corner, FinderPattern, finder_patterns};
pub use shapes::{Fragment, PlacedFragment, render_body, render_module};
