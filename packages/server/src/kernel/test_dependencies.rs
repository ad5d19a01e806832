// Test doubles for the infrastructure traits.
//
// Injected into ServerDeps by the integration test harness.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

use super::{BaseClock, BaseSmsService};

// =============================================================================
// Mock SMS Service
// =============================================================================

/// A message captured by [`MockSmsService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub phone_number: String,
    pub message: String,
}

#[derive(Clone, Default)]
pub struct MockSmsService {
    sent: Arc<Mutex<Vec<SentSms>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail (provider outage)
    pub fn fail_deliveries(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// All messages accepted so far
    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent message sent to `phone_number`
    pub fn last_to(&self, phone_number: &str) -> Option<SentSms> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.phone_number == phone_number)
            .cloned()
    }

    /// Pull the six-digit code out of the most recent message to `phone_number`
    pub fn last_code_to(&self, phone_number: &str) -> Option<String> {
        let sms = self.last_to(phone_number)?;
        sms.message
            .split(|c: char| !c.is_ascii_digit())
            .find(|chunk| chunk.len() == 6)
            .map(str::to_string)
    }
}

#[async_trait]
impl BaseSmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<()> {
        if *self.failing.lock().unwrap() {
            anyhow::bail!("mock SMS provider unavailable");
        }
        self.sent.lock().unwrap().push(SentSms {
            phone_number: phone_number.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Mock Clock
// =============================================================================

/// Clock that starts at the real current time and only moves when told to
#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseClock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_sms_records_and_extracts_code() {
        let sms = MockSmsService::new();
        sms.send_sms(
            "9876543210",
            "Your OTP for event registration is: 042917. Valid for 10 minutes.",
        )
        .await
        .unwrap();

        assert_eq!(sms.sent().len(), 1);
        assert_eq!(sms.last_code_to("9876543210").as_deref(), Some("042917"));
        assert!(sms.last_code_to("9999999999").is_none());
    }

    #[tokio::test]
    async fn mock_sms_can_fail() {
        let sms = MockSmsService::new();
        sms.fail_deliveries(true);
        assert!(sms.send_sms("9876543210", "hi").await.is_err());
        assert!(sms.sent().is_empty());
    }

    #[test]
    fn mock_clock_advances() {
        let clock = MockClock::new();
        let start = clock.now();
        clock.advance(Duration::minutes(11));
        assert_eq!(clock.now() - start, Duration::minutes(11));
    }
}
