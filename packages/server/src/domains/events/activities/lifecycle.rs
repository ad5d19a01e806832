//! Owner-driven status changes: submit, cancel, delete, and draft edits.
//!
//! Each runs in one transaction holding the event row lock, the same lock the
//! approval engine takes, so owner actions and review decisions on one event
//! are serialized.

use tracing::info;

use crate::common::{Actor, CoreError, CoreResult, EventId};
use crate::domains::events::machines::{EventAction, Transition};
use crate::domains::events::models::{Event, EventStatus};
use crate::domains::events::types::EventInput;
use crate::kernel::ServerDeps;

/// draft → submitted
pub async fn submit_event(event_id: EventId, actor: Actor, deps: &ServerDeps) -> CoreResult<Event> {
    match apply_owner_action(event_id, EventAction::Submit, actor, deps).await? {
        Some(event) => Ok(event),
        None => Err(unexpected_removal(EventAction::Submit)),
    }
}

/// submitted | gs_approved | final_approved → cancelled
pub async fn cancel_event(event_id: EventId, actor: Actor, deps: &ServerDeps) -> CoreResult<Event> {
    match apply_owner_action(event_id, EventAction::Cancel, actor, deps).await? {
        Some(event) => Ok(event),
        None => Err(unexpected_removal(EventAction::Cancel)),
    }
}

/// Physically removes a draft
pub async fn delete_event(event_id: EventId, actor: Actor, deps: &ServerDeps) -> CoreResult<()> {
    apply_owner_action(event_id, EventAction::Delete, actor, deps).await?;
    Ok(())
}

/// Replace a draft's descriptive fields. Anything past draft is frozen.
pub async fn update_event(
    event_id: EventId,
    input: EventInput,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Event> {
    let input = input.normalized()?;

    let mut tx = deps.db_pool.begin().await?;
    let event = Event::lock_for_update(event_id, &mut *tx)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;
    actor.must_own(event.created_by, "event")?;

    if event.status == EventStatus::Draft {
        let updated = Event::update_details(event_id, &input, &mut *tx).await?;
        tx.commit().await?;
        info!(event_id = %event_id, "Draft updated");
        Ok(updated)
    } else {
        Err(CoreError::invalid_state(format!(
            "only drafts can be edited (event is {})",
            event.status
        )))
    }
}

/// Lock, check ownership, look up the transition, write it.
/// Returns `None` when the action removed the event.
async fn apply_owner_action(
    event_id: EventId,
    action: EventAction,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Option<Event>> {
    let mut tx = deps.db_pool.begin().await?;

    let event = Event::lock_for_update(event_id, &mut *tx)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;
    actor.must_own(event.created_by, "event")?;

    let transition = event.status.apply(action).ok_or_else(|| {
        CoreError::invalid_state(format!("cannot {} an event that is {}", action, event.status))
    })?;

    let result = match transition {
        Transition::To(next) => Some(Event::set_status(event_id, next, &mut *tx).await?),
        Transition::Removed => {
            Event::delete(event_id, &mut *tx).await?;
            None
        }
    };
    tx.commit().await?;

    info!(
        event_id = %event_id,
        actor_id = %actor.member_id,
        action = %action,
        from = %event.status,
        "Event status changed by owner"
    );
    Ok(result)
}

fn unexpected_removal(action: EventAction) -> CoreError {
    CoreError::Internal(anyhow::anyhow!("{} unexpectedly removed the event", action))
}
