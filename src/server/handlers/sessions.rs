//! Editing session API handlers.
//!
//! Each session sits behind its own lock. An edit is applied under the lock
//! and returns at once; a timer task then waits out the debounce window and
//! regenerates only if its ticket is still the latest.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use super::super::state::{AppState, SharedSlot};
use super::svg_response;
use crate::content::{Content, ContentKind};
use crate::design::{Design, LogoImage};
use crate::session::{Edit, Session, Ticket};
use crate::symbol::EcLevel;

/// Optional seed for a new session.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub design: Option<Design>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditResponse {
    pub ticket: u64,
}

/// Snapshot of a session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub active: ContentKind,
    pub content: Content,
    pub design: Design,
    pub generation: u64,
    pub pending: Option<u64>,
    pub payload: Option<String>,
    pub ec_level: Option<EcLevel>,
    pub size: usize,
}

type ApiError = (StatusCode, String);

fn not_found(id: &Uuid) -> ApiError {
    (StatusCode::NOT_FOUND, format!("Session not found: {}", id))
}

async fn slot(state: &AppState, id: &Uuid) -> Result<SharedSlot, ApiError> {
    state.get(id).await.ok_or_else(|| not_found(id))
}

fn snapshot(id: Uuid, created_at: DateTime<Utc>, session: &Session) -> SessionState {
    let rendered = session.rendered();
    SessionState {
        id,
        created_at,
        active: session.drafts().active_kind(),
        content: session.content(),
        design: session.design().clone(),
        generation: session.generation(),
        pending: session.pending().map(Ticket::id),
        payload: rendered.payload.clone(),
        ec_level: rendered.ec_level,
        size: rendered.matrix.size(),
    }
}

/// POST /api/sessions - Create a session, rendered immediately when seeded.
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateRequest>>,
) -> Json<CreateResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mut session = state.new_session();

    let seeded = req.content.is_some() || req.design.is_some();
    if let Some(content) = req.content {
        session.apply(Edit::Replace(content), Instant::now());
    }
    if let Some(design) = req.design {
        session.apply(Edit::Design(design), Instant::now());
    }
    if seeded {
        session.flush();
    }

    let (id, created_at) = state.insert(session).await;
    debug!("created session {}", id);
    Json(CreateResponse { id, created_at })
}

/// GET /api/sessions/:id - Session snapshot.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, ApiError> {
    let slot = slot(&state, &id).await?;
    let mut slot = slot.lock().await;
    slot.touch();
    Ok(Json(snapshot(id, slot.created_at, &slot.session)))
}

/// POST /api/sessions/:id/edit - Apply an edit and schedule a debounced render.
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(edit): Json<Edit>,
) -> Result<Json<EditResponse>, ApiError> {
    let shared = slot(&state, &id).await?;

    let ticket = {
        let mut slot = shared.lock().await;
        slot.touch();
        slot.session.apply(edit, Instant::now())
    };

    let window = state.config.debounce;
    tokio::spawn(async move {
        tokio::time::sleep(window).await;
        let mut slot = shared.lock().await;
        slot.session.regenerate(ticket);
    });

    Ok(Json(EditResponse {
        ticket: ticket.id(),
    }))
}

/// POST /api/sessions/:id/flush - Render now, dropping any pending edit timer.
pub async fn flush(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, ApiError> {
    let slot = slot(&state, &id).await?;
    let mut slot = slot.lock().await;
    slot.touch();
    slot.session.flush();
    Ok(Json(snapshot(id, slot.created_at, &slot.session)))
}

/// POST /api/sessions/:id/logo - Supply the loaded logo image.
pub async fn logo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(image): Json<LogoImage>,
) -> Result<Json<SessionState>, ApiError> {
    let slot = slot(&state, &id).await?;
    let mut slot = slot.lock().await;
    slot.touch();
    if !slot.session.resolve_logo(image) {
        return Err((
            StatusCode::CONFLICT,
            "Logo was loaded for a different logo reference".to_string(),
        ));
    }
    Ok(Json(snapshot(id, slot.created_at, &slot.session)))
}

/// GET /api/sessions/:id/svg - Latest render, 204 when empty.
pub async fn svg(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let slot = slot(&state, &id).await?;
    let mut slot = slot.lock().await;
    slot.touch();
    Ok(svg_response(slot.session.rendered().svg()))
}

/// DELETE /api/sessions/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
