use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{EventInput, EventModel},
    service::EventService,
};
use crate::auth::{AdminSession, OkResponse};
use crate::shared::{ApiJson, AppError, AppState};

/// Query parameters for listing events
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    /// Include events whose date has passed
    #[serde(default)]
    pub all: bool,
}

/// HTTP handler for listing events
///
/// GET /api/events?all=true
/// Returns upcoming events, or every event when `all` is set
#[instrument(name = "list_events", skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventModel>>, AppError> {
    let service = EventService::new(Arc::clone(&state.event_repository));
    let events = service.list_events(query.all).await?;

    Ok(Json(events))
}

/// GET /api/events/:id
#[instrument(name = "get_event", skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventModel>, AppError> {
    let service = EventService::new(Arc::clone(&state.event_repository));
    let event = service.get_event(id).await?;

    Ok(Json(event))
}

/// HTTP handler for creating an event (admin only)
///
/// POST /api/events
/// Returns 201 with the stored event
#[instrument(name = "create_event", skip(state, input))]
pub async fn create_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<EventInput>,
) -> Result<(StatusCode, Json<EventModel>), AppError> {
    info!("Creating new event");

    let service = EventService::new(Arc::clone(&state.event_repository));
    let event = service.create_event(input).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:id (admin only)
#[instrument(name = "update_event", skip(state, input))]
pub async fn update_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<EventInput>,
) -> Result<Json<EventModel>, AppError> {
    let service = EventService::new(Arc::clone(&state.event_repository));
    let event = service.update_event(id, input).await?;

    Ok(Json(event))
}

/// DELETE /api/events/:id (admin only)
#[instrument(name = "delete_event", skip(state))]
pub async fn delete_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    let service = EventService::new(Arc::clone(&state.event_repository));
    service.delete_event(id).await?;

    Ok(Json(OkResponse::new()))
}
