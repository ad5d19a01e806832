//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. External services sit behind trait objects so tests can swap in
//! the doubles from `test_dependencies`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseClock, BaseSmsService};

// =============================================================================
// TwilioService Adapter (implements BaseSmsService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseSmsService trait
pub struct TwilioSmsAdapter {
    service: Arc<TwilioService>,
    country_code: String,
}

impl TwilioSmsAdapter {
    pub fn new(service: Arc<TwilioService>, country_code: impl Into<String>) -> Self {
        Self {
            service,
            country_code: country_code.into(),
        }
    }

    fn to_e164(&self, phone_number: &str) -> String {
        format!("{}{}", self.country_code, phone_number)
    }
}

#[async_trait]
impl BaseSmsService for TwilioSmsAdapter {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<()> {
        self.service
            .send_sms(&self.to_e164(phone_number), message)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// System clock
// =============================================================================

pub struct SystemClock;

impl BaseClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub sms: Arc<dyn BaseSmsService>,
    pub clock: Arc<dyn BaseClock>,
    /// Verifies bearer tokens issued by the identity provider
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        sms: Arc<dyn BaseSmsService>,
        clock: Arc<dyn BaseClock>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            sms,
            clock,
            jwt_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twilio::TwilioOptions;

    #[test]
    fn adapter_prefixes_country_code() {
        let service = Arc::new(TwilioService::new(TwilioOptions {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15005550006".to_string(),
        }));
        let adapter = TwilioSmsAdapter::new(service, "+91");
        assert_eq!(adapter.to_e164("9876543210"), "+919876543210");
    }
}
