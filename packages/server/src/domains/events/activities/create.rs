use tracing::info;

use crate::common::{Actor, Capability, CoreError, CoreResult, EventId};
use crate::domains::events::machines::{EventAction, Transition};
use crate::domains::events::models::Event;
use crate::domains::events::types::EventInput;
use crate::kernel::ServerDeps;

/// Save a proposal as a draft owned by the calling committee member.
/// Status is always `draft` regardless of input.
pub async fn create_event(input: EventInput, actor: Actor, deps: &ServerDeps) -> CoreResult<Event> {
    propose_event(input, false, actor, deps).await
}

/// Create a proposal and, when `submit` is set, send it straight to GS review.
/// Both writes share one transaction: a failed submit leaves no draft behind.
pub async fn propose_event(
    input: EventInput,
    submit: bool,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Event> {
    actor.can(Capability::ProposeEvents).check()?;
    let input = input.normalized()?;

    let mut tx = deps.db_pool.begin().await?;
    let mut event = Event::create(EventId::new(), &input, actor.member_id, &mut *tx).await?;

    if submit {
        let next = match event.status.apply(EventAction::Submit) {
            Some(Transition::To(next)) => next,
            _ => {
                return Err(CoreError::invalid_state(format!(
                    "cannot submit an event that is {}",
                    event.status
                )))
            }
        };
        event = Event::set_status(event.id, next, &mut *tx).await?;
    }
    tx.commit().await?;

    info!(
        event_id = %event.id,
        created_by = %event.created_by,
        title = %event.title,
        status = %event.status,
        "Event proposed"
    );
    Ok(event)
}
