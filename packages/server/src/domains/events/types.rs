use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CoreError, CoreResult};
use crate::domains::events::machines::EventAction;
use crate::domains::events::models::Event;

/// Proposal form fields, used for both create and draft edits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub expected_attendees: Option<i32>,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub resources_needed: Option<String>,
    #[serde(default)]
    pub google_form_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub registration_enabled: bool,
}

impl EventInput {
    /// Trim text fields, blank optionals become `None`, then check the rules
    /// the store relies on.
    pub fn normalized(mut self) -> CoreResult<Self> {
        self.title = self.title.trim().to_string();
        self.venue = self.venue.trim().to_string();
        self.description = non_blank(self.description);
        self.department = non_blank(self.department);
        self.resources_needed = non_blank(self.resources_needed);
        self.google_form_url = non_blank(self.google_form_url);

        if self.title.is_empty() {
            return Err(CoreError::validation("title is required"));
        }
        if self.venue.is_empty() {
            return Err(CoreError::validation("venue is required"));
        }
        if self.end_date <= self.start_date {
            return Err(CoreError::validation("end date must be after start date"));
        }
        if matches!(self.expected_attendees, Some(n) if n < 0) {
            return Err(CoreError::validation(
                "expected attendees cannot be negative",
            ));
        }
        if let Some(budget) = self.budget {
            if budget < Decimal::ZERO {
                return Err(CoreError::validation("budget cannot be negative"));
            }
            if budget >= max_budget() {
                return Err(CoreError::validation("budget must be below 10,000,000,000"));
            }
            // Stored as NUMERIC(12, 2); anything finer would be rounded away
            if budget.normalize().scale() > BUDGET_SCALE {
                return Err(CoreError::validation(
                    "budget can have at most two decimal places",
                ));
            }
            self.budget = Some(budget.round_dp(BUDGET_SCALE));
        }
        if let Some(link) = &self.google_form_url {
            let parsed = url::Url::parse(link)
                .map_err(|_| CoreError::validation("registration form link is not a valid URL"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CoreError::validation(
                    "registration form link must be http or https",
                ));
            }
        }
        Ok(self)
    }
}

/// An event as clients render it: the stored row plus what the lifecycle
/// table says about its status, so no client keeps its own badge mapping.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub status_label: &'static str,
    pub allowed_actions: Vec<EventAction>,
    pub review_complete: bool,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        let status = event.status;
        Self {
            event,
            status_label: status.label(),
            allowed_actions: status.allowed_actions(),
            review_complete: status.is_terminal(),
        }
    }
}

const BUDGET_SCALE: u32 = 2;

/// Ten integer digits, the most `NUMERIC(12, 2)` holds
fn max_budget() -> Decimal {
    Decimal::new(10_000_000_000, 0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::domains::events::models::EventStatus;
    use chrono::Duration;

    fn input() -> EventInput {
        let start = Utc::now() + Duration::days(7);
        EventInput {
            title: "  Tech Fest  ".to_string(),
            description: Some("Annual showcase".to_string()),
            venue: "Main Auditorium".to_string(),
            start_date: start,
            end_date: start + Duration::hours(6),
            department: Some("   ".to_string()),
            expected_attendees: Some(300),
            budget: Some(Decimal::new(2500000, 2)),
            resources_needed: None,
            google_form_url: None,
            is_private: false,
            registration_enabled: true,
        }
    }

    #[test]
    fn trims_and_drops_blank_optionals() {
        let event = input().normalized().unwrap();
        assert_eq!(event.title, "Tech Fest");
        assert_eq!(event.department, None);
    }

    #[test]
    fn title_and_venue_are_required() {
        let mut blank_title = input();
        blank_title.title = "   ".to_string();
        assert_eq!(
            blank_title.normalized().unwrap_err().kind(),
            ErrorKind::ValidationError
        );

        let mut blank_venue = input();
        blank_venue.venue = String::new();
        assert!(blank_venue.normalized().is_err());
    }

    #[test]
    fn end_must_follow_start() {
        let mut same_instant = input();
        same_instant.end_date = same_instant.start_date;
        assert!(same_instant.normalized().is_err());
    }

    #[test]
    fn negative_metadata_is_rejected() {
        let mut attendees = input();
        attendees.expected_attendees = Some(-1);
        assert!(attendees.normalized().is_err());

        let mut budget = input();
        budget.budget = Some(Decimal::new(-100, 2));
        assert!(budget.normalized().is_err());

        let mut free = input();
        free.budget = Some(Decimal::ZERO);
        assert!(free.normalized().is_ok());
    }

    #[test]
    fn budget_must_fit_the_column() {
        let mut huge = input();
        huge.budget = Some(Decimal::new(1_000_000_000_000_001, 3));
        assert_eq!(
            huge.normalized().unwrap_err().kind(),
            ErrorKind::ValidationError
        );

        let mut at_limit = input();
        at_limit.budget = Some(Decimal::new(10_000_000_000, 0));
        assert!(at_limit.normalized().is_err());

        let mut just_below = input();
        just_below.budget = Some(Decimal::new(999_999_999_999, 2));
        assert!(just_below.normalized().is_ok());
    }

    #[test]
    fn budget_allows_only_paise_precision() {
        let mut fractional = input();
        fractional.budget = Some(Decimal::new(1_234_567, 3));
        assert_eq!(
            fractional.normalized().unwrap_err().kind(),
            ErrorKind::ValidationError
        );

        let mut trailing_zero = input();
        trailing_zero.budget = Some(Decimal::new(1_234_500, 3));
        let event = trailing_zero.normalized().unwrap();
        assert_eq!(event.budget, Some(Decimal::new(123_450, 2)));
    }

    #[test]
    fn form_link_must_be_web_url() {
        let mut ok = input();
        ok.google_form_url = Some("https://forms.gle/abc123".to_string());
        assert!(ok.normalized().is_ok());

        let mut bad = input();
        bad.google_form_url = Some("not a link".to_string());
        assert!(bad.normalized().is_err());

        let mut ftp = input();
        ftp.google_form_url = Some("ftp://example.com/form".to_string());
        assert!(ftp.normalized().is_err());
    }

    #[test]
    fn view_carries_label_and_next_actions() {
        let normalized = input().normalized().unwrap();
        let now = Utc::now();
        let event = Event {
            id: crate::common::EventId::new(),
            title: normalized.title,
            description: normalized.description,
            venue: normalized.venue,
            start_date: normalized.start_date,
            end_date: normalized.end_date,
            status: EventStatus::GsApproved,
            department: None,
            expected_attendees: None,
            budget: normalized.budget,
            resources_needed: None,
            google_form_url: None,
            is_private: false,
            registration_enabled: true,
            created_by: crate::common::MemberId::new(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(EventView::from(event)).unwrap();
        assert_eq!(json["status"], "gs_approved");
        assert_eq!(json["statusLabel"], "Pending Dean");
        assert_eq!(
            json["allowedActions"],
            serde_json::json!(["dean_approve", "dean_reject", "cancel"])
        );
        assert_eq!(json["reviewComplete"], false);
        assert_eq!(json["title"], "Tech Fest");
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = serde_json::json!({
            "title": "Hackathon",
            "venue": "Lab 2",
            "startDate": "2026-11-01T09:00:00Z",
            "endDate": "2026-11-02T09:00:00Z",
            "budget": "1500.50"
        });
        let parsed: EventInput = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.budget, Some(Decimal::new(150050, 2)));
        assert!(!parsed.registration_enabled);
        assert!(parsed.description.is_none());
    }
}
