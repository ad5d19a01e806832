use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{EventId, MemberId, RegistrationId};

/// A student's seat at an event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub student_id: MemberId,
    pub phone_number: String,
    pub ticket_number: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

/// Registration status (Postgres `registration_status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
}

/// A student's registration joined with the event it is for
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub ticket_number: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub event_title: String,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Registration {
    /// Insert on the caller's transaction. Returns the raw `sqlx::Error` so a
    /// duplicate (event, student) surfaces as `AlreadyRegistered`.
    pub async fn insert(
        event_id: EventId,
        student_id: MemberId,
        phone_number: &str,
        ticket_number: &str,
        registered_at: DateTime<Utc>,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Registration>(
            "INSERT INTO event_registrations
                (id, event_id, student_id, phone_number, ticket_number, status, registered_at)
             VALUES ($1, $2, $3, $4, $5, 'registered', $6)
             RETURNING *",
        )
        .bind(RegistrationId::new())
        .bind(event_id)
        .bind(student_id)
        .bind(phone_number)
        .bind(ticket_number)
        .bind(registered_at)
        .fetch_one(&mut *conn)
        .await
    }

    /// Registration tracker for an event, oldest first
    pub async fn find_by_event(event_id: EventId, pool: &PgPool) -> Result<Vec<Self>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations
             WHERE event_id = $1
             ORDER BY registered_at ASC",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(registrations)
    }

    pub async fn find_for_student(
        student_id: MemberId,
        pool: &PgPool,
    ) -> Result<Vec<StudentRegistration>> {
        let registrations = sqlx::query_as::<_, StudentRegistration>(
            "SELECT r.id, r.event_id, r.ticket_number, r.status, r.registered_at,
                    e.title AS event_title, e.venue, e.start_date, e.end_date
             FROM event_registrations r
             JOIN events e ON e.id = r.event_id
             WHERE r.student_id = $1
             ORDER BY e.start_date ASC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(registrations)
    }
}
