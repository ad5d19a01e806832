use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{EventId, MemberId};
use crate::domains::events::types::EventInput;

/// Event - a committee proposal moving through GS and Dean review
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,

    // Content
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    // Lifecycle
    pub status: EventStatus,

    // Descriptive metadata
    pub department: Option<String>,
    pub expected_attendees: Option<i32>,
    pub budget: Option<Decimal>,
    pub resources_needed: Option<String>,
    pub google_form_url: Option<String>,

    // Visibility hint, not enforced here
    pub is_private: bool,
    pub registration_enabled: bool,

    pub created_by: MemberId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event status enum (Postgres `event_status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Submitted,
    GsApproved,
    FinalApproved,
    Rejected,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 6] = [
        EventStatus::Draft,
        EventStatus::Submitted,
        EventStatus::GsApproved,
        EventStatus::FinalApproved,
        EventStatus::Rejected,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Submitted => "submitted",
            EventStatus::GsApproved => "gs_approved",
            EventStatus::FinalApproved => "final_approved",
            EventStatus::Rejected => "rejected",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid event status: {}", s))
    }
}

/// Statuses the Dean's review queue covers (kept in step with `find_for_dean`)
const DEAN_VISIBLE: [EventStatus; 3] = [
    EventStatus::GsApproved,
    EventStatus::FinalApproved,
    EventStatus::Rejected,
];

impl Event {
    /// Insert a new draft owned by `created_by`
    pub async fn create(
        id: EventId,
        input: &EventInput,
        created_by: MemberId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (
                id, title, description, venue, start_date, end_date, status,
                department, expected_attendees, budget, resources_needed,
                google_form_url, is_private, registration_enabled, created_by
             )
             VALUES ($1, $2, $3, $4, $5, $6, 'draft', $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.venue)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.department)
        .bind(input.expected_attendees)
        .bind(input.budget)
        .bind(&input.resources_needed)
        .bind(&input.google_form_url)
        .bind(input.is_private)
        .bind(input.registration_enabled)
        .bind(created_by)
        .fetch_one(&mut *conn)
        .await?;
        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(id: EventId, pool: &PgPool) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(event)
    }

    /// Lock the row for a status change. Every writer of `status` goes through here.
    pub async fn lock_for_update(id: EventId, conn: &mut PgConnection) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(event)
    }

    /// Shared lock: blocks status changes until the caller's transaction ends
    pub async fn lock_for_share(id: EventId, conn: &mut PgConnection) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(event)
    }

    pub async fn set_status(
        id: EventId,
        status: EventStatus,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await?;
        Ok(event)
    }

    /// Replace the descriptive fields; status and ownership are untouched
    pub async fn update_details(
        id: EventId,
        input: &EventInput,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET
                title = $2,
                description = $3,
                venue = $4,
                start_date = $5,
                end_date = $6,
                department = $7,
                expected_attendees = $8,
                budget = $9,
                resources_needed = $10,
                google_form_url = $11,
                is_private = $12,
                registration_enabled = $13,
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.venue)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.department)
        .bind(input.expected_attendees)
        .bind(input.budget)
        .bind(&input.resources_needed)
        .bind(&input.google_form_url)
        .bind(input.is_private)
        .bind(input.registration_enabled)
        .fetch_one(&mut *conn)
        .await?;
        Ok(event)
    }

    pub async fn delete(id: EventId, conn: &mut PgConnection) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// A committee's own proposals, newest first
    pub async fn find_by_owner(created_by: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE created_by = $1
             ORDER BY created_at DESC",
        )
        .bind(created_by)
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    /// Everything past draft, optionally narrowed to one status
    pub async fn find_for_general_secretary(
        status: Option<EventStatus>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE status <> 'draft'
               AND ($1::event_status IS NULL OR status = $1)
             ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    /// Events that have cleared the GS stage, optionally narrowed to one status
    pub async fn find_for_dean(status: Option<EventStatus>, pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE status IN ('gs_approved', 'final_approved', 'rejected')
               AND ($1::event_status IS NULL OR status = $1)
             ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    /// Published events in date order
    pub async fn find_calendar(pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE status = 'final_approved'
             ORDER BY start_date ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    /// Whether the Dean's queue includes an event in `status`
    pub fn dean_can_see(status: EventStatus) -> bool {
        DEAN_VISIBLE.contains(&status)
    }
}
