//! Registration ledger. Only reachable through a redeemed code.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::info;

use crate::common::{CoreError, CoreResult, MemberId};
use crate::domains::events::Event;
use crate::domains::registrations::models::Registration;
use crate::domains::registrations::ticket::generate_ticket_number;

/// Codes and tickets are only issued for published events that opted in.
pub fn ensure_registration_open(event: &Event) -> CoreResult<()> {
    if !event.registration_enabled {
        return Err(CoreError::invalid_state(
            "registration is not enabled for this event",
        ));
    }
    if !event.status.accepts_registrations() {
        return Err(CoreError::invalid_state(format!(
            "registration is closed (event is {})",
            event.status
        )));
    }
    Ok(())
}

/// Issue a ticket for `student_id`. The (event, student) unique constraint
/// decides races: exactly one concurrent caller succeeds, the rest get
/// `AlreadyRegistered`.
pub async fn register(
    event: &Event,
    student_id: MemberId,
    phone_number: &str,
    registered_at: DateTime<Utc>,
    conn: &mut PgConnection,
) -> CoreResult<Registration> {
    ensure_registration_open(event)?;

    let ticket_number = generate_ticket_number(registered_at);
    let registration = Registration::insert(
        event.id,
        student_id,
        phone_number,
        &ticket_number,
        registered_at,
        conn,
    )
    .await?;

    info!(
        event_id = %event.id,
        student_id = %student_id,
        ticket_number = %registration.ticket_number,
        "Ticket issued"
    );
    Ok(registration)
}
