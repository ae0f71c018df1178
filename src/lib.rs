//! # qrsmith - Styled QR Code Generation
//!
//! qrsmith turns user content into a scannable, styled QR code:
//!
//! - **Content encoding**: URL, text and Wi-Fi payloads, dynamic redirects
//! - **Error correction**: level chosen from payload length and logo size
//! - **Neighbor-aware rendering**: 13 body shapes, 7 frame and ball styles
//! - **Logo compositing**: a reserved center zone, two-phase rendering
//! - **Editing sessions**: debounced, last-write-wins regeneration
//!
//! ## Quick Start
//!
//! ```
//! use qrsmith::{
//!     content::Content,
//!     design::{BodyShape, Design, EyeStyle},
//!     pipeline::Pipeline,
//! };
//!
//! let content = Content::url("https://example.com");
//! let design = Design {
//!     body_shape: BodyShape::Fluid,
//!     eye_frame: EyeStyle::Leaf,
//!     eye_ball: EyeStyle::Circle,
//!     ..Default::default()
//! };
//!
//! let rendered = Pipeline::new().run(&content, &design, None);
//! let svg = rendered.svg().unwrap();
//! assert!(svg.contains("viewBox"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`content`] | Content values, drafts, payload strings |
//! | [`symbol`] | EC selection, module grid, zone classification |
//! | [`design`] | Design record and style names |
//! | [`render`] | Shapes, finder patterns, SVG composition |
//! | [`pipeline`] | Content to SVG in one call |
//! | [`preview`] | Plain PNG preview |
//! | [`session`] | Per-document editing state and debounce |
//! | [`server`] | HTTP preview service |
//! | [`config`] | Tuning constants |
//! | [`error`] | Error types |

pub mod config;
pub mod content;
pub mod design;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod server;
pub mod session;
pub mod symbol;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::QrsmithError;
pub use pipeline::{Pipeline, Rendered};
