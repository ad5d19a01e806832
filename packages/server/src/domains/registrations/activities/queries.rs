use crate::common::{Actor, Capability, CoreError, CoreResult, EventId};
use crate::domains::events::Event;
use crate::domains::registrations::models::{Registration, StudentRegistration};
use crate::kernel::ServerDeps;

/// Registration tracker: the event's owner sees who signed up.
pub async fn event_registrations(
    event_id: EventId,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Vec<Registration>> {
    let event = Event::find_by_id(event_id, &deps.db_pool)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;
    actor.must_own(event.created_by, "event")?;

    Ok(Registration::find_by_event(event_id, &deps.db_pool).await?)
}

/// The calling student's tickets with event details
pub async fn my_registrations(
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Vec<StudentRegistration>> {
    actor.can(Capability::RegisterForEvents).check()?;
    Ok(Registration::find_for_student(actor.member_id, &deps.db_pool).await?)
}
