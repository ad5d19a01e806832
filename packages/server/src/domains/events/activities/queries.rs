use crate::common::{Actor, CoreError, CoreResult, EventId, Role};
use crate::domains::events::models::{Event, EventStatus};
use crate::kernel::ServerDeps;

/// Whether `viewer` may see `event`. Published events are public; otherwise
/// the owner and whichever review queue currently holds it.
pub fn can_view(event: &Event, viewer: Option<Actor>) -> bool {
    if event.status == EventStatus::FinalApproved {
        return true;
    }
    let Some(actor) = viewer else {
        return false;
    };
    if actor.member_id == event.created_by {
        return true;
    }
    match actor.role {
        Role::GeneralSecretary => event.status != EventStatus::Draft,
        Role::Dean => Event::dean_can_see(event.status),
        Role::Committee | Role::Student => false,
    }
}

/// Events outside the viewer's reach look absent rather than forbidden.
pub async fn get_event(
    event_id: EventId,
    viewer: Option<Actor>,
    deps: &ServerDeps,
) -> CoreResult<Event> {
    Event::find_by_id(event_id, &deps.db_pool)
        .await?
        .filter(|event| can_view(event, viewer))
        .ok_or(CoreError::NotFound("Event"))
}

/// Role-scoped listing: committees see their own proposals, each approver
/// sees their queue, students see the calendar.
pub async fn list_events(
    actor: Actor,
    status: Option<EventStatus>,
    deps: &ServerDeps,
) -> CoreResult<Vec<Event>> {
    let events = match actor.role {
        Role::Committee => Event::find_by_owner(actor.member_id, &deps.db_pool).await?,
        Role::GeneralSecretary => {
            Event::find_for_general_secretary(status, &deps.db_pool).await?
        }
        Role::Dean => Event::find_for_dean(status, &deps.db_pool).await?,
        Role::Student => Event::find_calendar(&deps.db_pool).await?,
    };

    Ok(match status {
        Some(status) => events.into_iter().filter(|e| e.status == status).collect(),
        None => events,
    })
}

/// Published events in start-date order
pub async fn public_calendar(deps: &ServerDeps) -> CoreResult<Vec<Event>> {
    Ok(Event::find_calendar(&deps.db_pool).await?)
}
