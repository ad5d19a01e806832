use serde::Serialize;
use thiserror::Error;

/// Unique constraint guarding one registration per (event, student).
pub const REGISTRATION_UNIQUE_CONSTRAINT: &str = "event_registrations_event_student_key";

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by every core operation.
///
/// Each variant maps to exactly one [`ErrorKind`]; callers branch on the kind,
/// never on the message text.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    InvalidState(String),

    /// Wrong, expired, consumed and never-issued codes all look the same.
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("You are already registered for this event")]
    AlreadyRegistered,

    #[error("Failed to deliver SMS: {0}")]
    DeliveryFailed(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Stable tag for each error class, serialized in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    PermissionDenied,
    InvalidState,
    InvalidOrExpiredCode,
    AlreadyRegistered,
    DeliveryFailed,
    NotFound,
    InternalError,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::ValidationError,
            CoreError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            CoreError::InvalidState(_) => ErrorKind::InvalidState,
            CoreError::InvalidOrExpiredCode => ErrorKind::InvalidOrExpiredCode,
            CoreError::AlreadyRegistered => ErrorKind::AlreadyRegistered,
            CoreError::DeliveryFailed(_) => ErrorKind::DeliveryFailed,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Message safe to show an end user. Internal details never leave the server.
    pub fn public_message(&self) -> String {
        match self {
            CoreError::Internal(_) => "Something went wrong, please try again".to_string(),
            CoreError::DeliveryFailed(_) => {
                "Could not send the verification SMS, please try again".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        CoreError::PermissionDenied(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CoreError::InvalidState(message.into())
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_registration_conflict(&err) {
            return CoreError::AlreadyRegistered;
        }
        CoreError::Internal(err.into())
    }
}

/// True when `err` is the (event_id, student_id) uniqueness violation.
pub fn is_registration_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(REGISTRATION_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_as_snake_case_tags() {
        let tag = serde_json::to_value(CoreError::InvalidOrExpiredCode.kind()).unwrap();
        assert_eq!(tag, "invalid_or_expired_code");

        let tag = serde_json::to_value(CoreError::validation("bad phone").kind()).unwrap();
        assert_eq!(tag, "validation_error");

        let tag =
            serde_json::to_value(CoreError::Internal(anyhow::anyhow!("boom")).kind()).unwrap();
        assert_eq!(tag, "internal_error");
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = CoreError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert!(!err.public_message().contains("10.0.0.3"));
    }

    #[test]
    fn delivery_failure_hides_provider_detail() {
        let err = CoreError::DeliveryFailed("Twilio returned 401: bad auth".to_string());
        assert!(!err.public_message().contains("401"));
        assert_eq!(err.kind(), ErrorKind::DeliveryFailed);
    }

    #[test]
    fn non_database_sqlx_errors_are_internal() {
        let err: CoreError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }
}
