// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseSmsService, BaseClock)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// =============================================================================
// SMS Trait (Infrastructure - outbound text messages)
// =============================================================================

#[async_trait]
pub trait BaseSmsService: Send + Sync {
    /// Hand `message` to the provider for delivery to a 10-digit local number.
    ///
    /// Best effort: `Ok` means the provider accepted it, not that it arrived.
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<()>;
}

// =============================================================================
// Clock Trait (Infrastructure - wall clock)
// =============================================================================

pub trait BaseClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
