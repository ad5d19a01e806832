use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::EventId;
use crate::domains::registrations::activities::{my_registrations, request_code, verify_code};
use crate::domains::registrations::StudentRegistration;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    pub phone_number: String,
    pub event_id: EventId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeResponse {
    pub success: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub phone_number: String,
    pub otp_code: String,
    pub event_id: EventId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub ticket_number: String,
}

/// POST /api/registrations/request-code
pub async fn request_code_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<RequestCodeRequest>, JsonRejection>,
) -> ApiResult<Json<RequestCodeResponse>> {
    let Json(request) = payload?;
    let issued = request_code(
        &request.phone_number,
        request.event_id,
        user.actor(),
        &state.deps,
    )
    .await?;

    Ok(Json(RequestCodeResponse {
        success: true,
        expires_at: issued.expires_at,
    }))
}

/// POST /api/registrations/verify-code
pub async fn verify_code_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> ApiResult<Json<VerifyCodeResponse>> {
    let Json(request) = payload?;
    let registration = verify_code(
        &request.phone_number,
        &request.otp_code,
        request.event_id,
        user.actor(),
        &state.deps,
    )
    .await?;

    Ok(Json(VerifyCodeResponse {
        success: true,
        ticket_number: registration.ticket_number,
    }))
}

/// GET /api/registrations/mine
pub async fn my_registrations_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<StudentRegistration>>> {
    Ok(Json(my_registrations(user.actor(), &state.deps).await?))
}
