use crate::common::{Actor, CoreError, CoreResult, EventId, Role};
use crate::domains::approvals::models::ApprovalDecision;
use crate::domains::events::activities::can_view;
use crate::domains::events::Event;
use crate::kernel::ServerDeps;

/// Decisions on an event in recorded order. Visible to the event's owner and
/// to both approvers. Events the caller cannot see answer `NotFound`, the
/// same as event detail, so a draft's existence never leaks.
pub async fn decision_history(
    event_id: EventId,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Vec<ApprovalDecision>> {
    let event = Event::find_by_id(event_id, &deps.db_pool)
        .await?
        .filter(|event| can_view(event, Some(actor)))
        .ok_or(CoreError::NotFound("Event"))?;

    let reviewer = matches!(actor.role, Role::GeneralSecretary | Role::Dean);
    if !reviewer {
        actor.must_own(event.created_by, "event")?;
    }

    Ok(ApprovalDecision::find_by_event(event_id, &deps.db_pool).await?)
}
