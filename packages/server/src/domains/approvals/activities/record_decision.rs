use serde::Serialize;
use tracing::info;

use crate::common::{Actor, CoreError, CoreResult, EventId};
use crate::domains::approvals::models::{ApprovalDecision, ApprovalType, Decision};
use crate::domains::events::{Event, Transition};
use crate::kernel::ServerDeps;

/// The appended decision together with the event it moved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub decision: ApprovalDecision,
    pub event: Event,
}

/// Record a GS or Dean ruling and apply its status change atomically.
///
/// The event row is locked before the transition is evaluated, so two
/// reviewers racing on one event serialize and the second sees the first's
/// result. On any failure neither the decision nor the status is written.
pub async fn record_decision(
    event_id: EventId,
    approval_type: ApprovalType,
    decision: Decision,
    comments: Option<String>,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<DecisionOutcome> {
    actor.can(approval_type.required_capability()).check()?;
    let comments = comments
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let mut tx = deps.db_pool.begin().await?;

    let event = Event::lock_for_update(event_id, &mut *tx)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;

    let action = approval_type.action(decision);
    let next = match event.status.apply(action) {
        Some(Transition::To(next)) => next,
        _ => {
            return Err(CoreError::invalid_state(format!(
                "{} cannot be recorded while the event is {}",
                approval_type, event.status
            )))
        }
    };

    let recorded = ApprovalDecision::insert(
        event_id,
        actor.member_id,
        approval_type,
        decision,
        comments.as_deref(),
        &mut *tx,
    )
    .await?;
    let updated = Event::set_status(event_id, next, &mut *tx).await?;

    tx.commit().await?;

    info!(
        event_id = %event_id,
        approver_id = %actor.member_id,
        approval_type = %approval_type,
        decision = %decision,
        from = %event.status,
        to = %updated.status,
        "Approval decision recorded"
    );

    Ok(DecisionOutcome {
        decision: recorded,
        event: updated,
    })
}
