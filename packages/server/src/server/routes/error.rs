use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::common::{CoreError, ErrorKind};

/// `CoreError` on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub CoreError);

#[derive(Serialize)]
pub struct ErrorBody {
    success: bool,
    error: ErrorKind,
    message: String,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::InvalidOrExpiredCode => StatusCode::BAD_REQUEST,
        ErrorKind::AlreadyRegistered => StatusCode::CONFLICT,
        ErrorKind::DeliveryFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        match &self.0 {
            CoreError::Internal(e) => error!(error = ?e, "Request failed"),
            CoreError::DeliveryFailed(detail) => warn!(detail = %detail, "SMS delivery failed"),
            _ => {}
        }

        let body = ErrorBody {
            success: false,
            error: kind,
            message: self.0.public_message(),
        };
        (status_for(kind), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(CoreError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(CoreError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(CoreError::validation(rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_per_kind() {
        assert_eq!(status_for(ErrorKind::ValidationError), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::PermissionDenied), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::InvalidState), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::AlreadyRegistered), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::DeliveryFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_answer_500_without_detail() {
        let response =
            ApiError(CoreError::Internal(anyhow::anyhow!("pool timed out"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
