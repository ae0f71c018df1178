//! Stateless render API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::super::state::AppState;
use super::svg_response;
use crate::content::Content;
use crate::design::{BodyShape, Design, EyeStyle, LogoImage};
use crate::pipeline::Rendered;
use crate::preview::{self, PreviewOptions};
use crate::render::samples;
use crate::symbol::{EcLevel, EcPolicy};

/// Request body shared by the render endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub design: Design,
    /// Loaded logo image; omit to render with the logo slot empty.
    #[serde(default)]
    pub logo: Option<LogoImage>,
    /// Override the server's error-correction policy.
    #[serde(default)]
    pub policy: Option<EcPolicy>,
    /// Pixels per module for the PNG preview.
    #[serde(default)]
    pub scale: Option<u32>,
}

impl RenderRequest {
    fn run(&self, state: &AppState) -> Rendered {
        let mut pipeline = state.config.pipeline.clone();
        if let Some(policy) = self.policy {
            pipeline = pipeline.with_policy(policy);
        }
        pipeline.run(&self.content, &self.design, self.logo.as_ref())
    }
}

/// Response from the matrix endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub payload: Option<String>,
    pub size: usize,
    pub version: Option<u8>,
    pub ec_level: Option<EcLevel>,
    /// Row-major, 1 = dark.
    pub rows: Vec<Vec<u8>>,
}

/// Response from the styles endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct StylesResponse {
    pub body_shapes: Vec<String>,
    pub eye_styles: Vec<String>,
    pub ec_levels: Vec<EcLevel>,
}

/// POST /api/render - Styled SVG, 204 when there is nothing to encode.
pub async fn svg(State(state): State<Arc<AppState>>, Json(req): Json<RenderRequest>) -> Response {
    svg_response(req.run(&state).svg())
}

/// POST /api/matrix - The raw module grid.
pub async fn matrix(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Json<MatrixResponse> {
    let rendered = req.run(&state);
    let rows = rendered
        .matrix
        .rows()
        .map(|row| row.iter().map(|&dark| u8::from(dark)).collect())
        .collect();

    Json(MatrixResponse {
        payload: rendered.payload,
        size: rendered.matrix.size(),
        version: rendered.matrix.version(),
        ec_level: rendered.matrix.ec_level(),
        rows,
    })
}

/// POST /api/preview.png - Plain raster preview.
pub async fn png(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, (StatusCode, String)> {
    let rendered = req.run(&state);
    if rendered.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let mut options = PreviewOptions::default();
    if let Some(scale) = req.scale {
        options.scale = scale;
    }

    let png_bytes = preview::render_png(&rendered.matrix, &req.design, options)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes).into_response())
}

/// GET /api/styles - Known style names.
pub async fn styles() -> Json<StylesResponse> {
    Json(StylesResponse {
        body_shapes: BodyShape::ALL.iter().map(|s| s.name().to_string()).collect(),
        eye_styles: EyeStyle::ALL.iter().map(|s| s.name().to_string()).collect(),
        ec_levels: EcLevel::ALL.to_vec(),
    })
}

/// GET /api/styles/:kind/:name - Style-picker sample SVG.
///
/// `kind` is `body`, `frame` or `ball`.
pub async fn style_sample(
    State(state): State<Arc<AppState>>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    let unknown = || (StatusCode::NOT_FOUND, format!("Unknown {} style: {}", kind, name));

    let svg = match kind.as_str() {
        "body" => {
            let shape = BodyShape::parse(&name).ok_or_else(unknown)?;
            samples::body_sample(shape, &state.config.pipeline.config)
        }
        "frame" => samples::frame_sample(EyeStyle::parse(&name).ok_or_else(unknown)?),
        "ball" => samples::ball_sample(EyeStyle::parse(&name).ok_or_else(unknown)?),
        _ => return Err((StatusCode::NOT_FOUND, format!("Unknown style kind: {}", kind))),
    };

    Ok(svg_response(Some(svg)))
}
