//! HTTP handlers for the server.

pub mod render;
pub mod sessions;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub(crate) const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// An SVG body, or 204 when there is nothing to show.
pub(crate) fn svg_response(svg: Option<String>) -> Response {
    match svg {
        Some(svg) => ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
