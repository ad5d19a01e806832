use serde::{Deserialize, Serialize};

/// Message resource returned by `POST /Accounts/{sid}/Messages.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Error body Twilio returns alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
    pub status: Option<u16>,
}

impl MessageResponse {
    /// Twilio marks synchronous rejections with `failed` or `undelivered`
    pub fn is_rejected(&self) -> bool {
        matches!(self.status.as_str(), "failed" | "undelivered")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_queued_message() {
        let body = r#"{
            "sid": "SM123",
            "status": "queued",
            "to": "+919876543210",
            "error_code": null,
            "error_message": null,
            "num_segments": "1"
        }"#;

        let message: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(message.sid, "SM123");
        assert!(!message.is_rejected());
    }

    #[test]
    fn failed_status_is_rejected() {
        let body = r#"{"sid": "SM9", "status": "failed", "to": "+919876543210"}"#;
        let message: MessageResponse = serde_json::from_str(body).unwrap();
        assert!(message.is_rejected());
    }
}
