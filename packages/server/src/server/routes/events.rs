use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, FromRequestParts, Path, Query,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::EventId;
use crate::domains::approvals::activities::{decision_history, record_decision};
use crate::domains::approvals::{ApprovalDecision, ApprovalType, Decision};
use crate::domains::events::activities::{
    cancel_event, delete_event, get_event, list_events, propose_event, public_calendar,
    submit_event, update_event,
};
use crate::domains::events::{Event, EventInput, EventStatus, EventView};
use crate::domains::registrations::activities::event_registrations;
use crate::domains::registrations::Registration;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::error::{ApiError, ApiResult};

/// The `:id` path segment as a typed event id
pub struct EventPath(pub EventId);

#[async_trait]
impl<S> FromRequestParts<S> for EventPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state).await?;
        Ok(EventPath(EventId::from_uuid(id)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(flatten)]
    pub event: EventInput,
    /// Submit for GS review straight away instead of saving a draft
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<EventStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub approval_type: ApprovalType,
    pub decision: Decision,
    #[serde(default)]
    pub comments: Option<String>,
}

/// A recorded decision with the event it moved
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub decision: ApprovalDecision,
    pub event: EventView,
}

fn views(events: Vec<Event>) -> Vec<EventView> {
    events.into_iter().map(EventView::from).collect()
}

/// POST /api/events
pub async fn create_event_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EventView>)> {
    let Json(request) = payload?;
    let event = propose_event(request.event, request.submit, user.actor(), &state.deps).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// GET /api/events?status=
pub async fn list_events_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EventView>>> {
    let Query(query) = query?;
    let events = list_events(user.actor(), query.status, &state.deps).await?;
    Ok(Json(views(events)))
}

/// GET /api/events/calendar
pub async fn calendar_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<EventView>>> {
    Ok(Json(views(public_calendar(&state.deps).await?)))
}

/// GET /api/events/:id
pub async fn get_event_handler(
    Extension(state): Extension<AppState>,
    user: Option<AuthUser>,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<EventView>> {
    let viewer = user.map(|u| u.actor());
    let event = get_event(event_id, viewer, &state.deps).await?;
    Ok(Json(event.into()))
}

/// PUT /api/events/:id
pub async fn update_event_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> ApiResult<Json<EventView>> {
    let Json(input) = payload?;
    let event = update_event(event_id, input, user.actor(), &state.deps).await?;
    Ok(Json(event.into()))
}

/// DELETE /api/events/:id
pub async fn delete_event_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<StatusCode> {
    delete_event(event_id, user.actor(), &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/events/:id/submit
pub async fn submit_event_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<EventView>> {
    let event = submit_event(event_id, user.actor(), &state.deps).await?;
    Ok(Json(event.into()))
}

/// POST /api/events/:id/cancel
pub async fn cancel_event_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<EventView>> {
    let event = cancel_event(event_id, user.actor(), &state.deps).await?;
    Ok(Json(event.into()))
}

/// POST /api/events/:id/decisions
pub async fn record_decision_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DecisionResponse>)> {
    let Json(request) = payload?;
    let outcome = record_decision(
        event_id,
        request.approval_type,
        request.decision,
        request.comments,
        user.actor(),
        &state.deps,
    )
    .await?;
    let response = DecisionResponse {
        decision: outcome.decision,
        event: outcome.event.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/events/:id/decisions
pub async fn decision_history_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<Vec<ApprovalDecision>>> {
    let decisions = decision_history(event_id, user.actor(), &state.deps).await?;
    Ok(Json(decisions))
}

/// GET /api/events/:id/registrations
pub async fn event_registrations_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<Vec<Registration>>> {
    let registrations =
        event_registrations(event_id, user.actor(), &state.deps).await?;
    Ok(Json(registrations))
}
