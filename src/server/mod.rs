//! # HTTP Preview Service
//!
//! JSON-in, SVG/PNG-out rendering plus debounced editing sessions.
//!
//! ## Usage
//!
//! ```bash
//! qrsmith serve --listen 127.0.0.1:8080
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/health` | status, start time, session count |
//! | POST | `/api/render` | styled SVG (204 when empty) |
//! | POST | `/api/matrix` | module grid as JSON |
//! | POST | `/api/preview.png` | plain raster preview |
//! | GET | `/api/styles` | known style names |
//! | GET | `/api/styles/:kind/:name` | style-picker sample SVG |
//! | POST | `/api/sessions` | new session id |
//! | GET | `/api/sessions/:id` | session snapshot |
//! | POST | `/api/sessions/:id/edit` | debounce ticket |
//! | POST | `/api/sessions/:id/flush` | snapshot after immediate render |
//! | POST | `/api/sessions/:id/logo` | snapshot after logo render |
//! | GET | `/api/sessions/:id/svg` | latest SVG (204 when empty) |
//! | DELETE | `/api/sessions/:id` | 204 |

mod handlers;
mod state;

pub use handlers::render::{MatrixResponse, RenderRequest, StylesResponse};
pub use handlers::sessions::{CreateRequest, CreateResponse, EditResponse, SessionState};
pub use state::{AppState, SESSION_EXPIRATION_SECS, ServerConfig};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use log::info;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;

use crate::error::QrsmithError;

/// Logo data URIs arrive inline, so bodies may be larger than axum's default.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Stateless rendering
        .route("/api/render", post(handlers::render::svg))
        .route("/api/matrix", post(handlers::render::matrix))
        .route("/api/preview.png", post(handlers::render::png))
        .route("/api/styles", get(handlers::render::styles))
        .route("/api/styles/:kind/:name", get(handlers::render::style_sample))
        // Editing sessions
        .route("/api/sessions", post(handlers::sessions::create))
        .route(
            "/api/sessions/:id",
            get(handlers::sessions::show).delete(handlers::sessions::delete),
        )
        .route("/api/sessions/:id/edit", post(handlers::sessions::edit))
        .route("/api/sessions/:id/flush", post(handlers::sessions::flush))
        .route("/api/sessions/:id/logo", post(handlers::sessions::logo))
        .route("/api/sessions/:id/svg", get(handlers::sessions::svg))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use qrsmith::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), qrsmith::error::QrsmithError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), QrsmithError> {
    config.pipeline.config.validate()?;
    let app_state = Arc::new(AppState::new(config.clone()));

    tokio::spawn(sweep_sessions(app_state.clone()));

    let app = router(app_state);

    info!("qrsmith HTTP server listening on {}", config.listen_addr);
    info!(
        "debounce {}ms, session ttl {}s",
        config.debounce.as_millis(),
        config.session_ttl.as_secs()
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            QrsmithError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| QrsmithError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "started_at": state.started_at.to_rfc3339(),
        "sessions": state.sessions.read().await.len(),
    }))
}

/// Background task dropping idle sessions.
async fn sweep_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));

    loop {
        interval.tick().await;
        let removed = state.sweep(Instant::now()).await;
        if removed > 0 {
            info!(
                "dropped {} idle sessions ({} remaining)",
                removed,
                state.sessions.read().await.len()
            );
        }
    }
}
