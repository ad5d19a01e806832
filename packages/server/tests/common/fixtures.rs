//! Test fixtures for creating test data.
//!
//! Events are driven through the real activities so every fixture passes the
//! same transitions production data does.

use campus_core::common::{Actor, MemberId, Role};
use campus_core::domains::approvals::activities::record_decision;
use campus_core::domains::approvals::{ApprovalType, Decision};
use campus_core::domains::events::activities::{create_event, submit_event};
use campus_core::domains::events::{Event, EventInput};
use campus_core::kernel::ServerDeps;
use chrono::{Duration, Utc};

pub const STUDENT_PHONE: &str = "9876543210";

pub fn committee() -> Actor {
    Actor::new(MemberId::new(), Role::Committee)
}

pub fn general_secretary() -> Actor {
    Actor::new(MemberId::new(), Role::GeneralSecretary)
}

pub fn dean() -> Actor {
    Actor::new(MemberId::new(), Role::Dean)
}

pub fn student() -> Actor {
    Actor::new(MemberId::new(), Role::Student)
}

/// A valid proposal a week out, with registration enabled
pub fn event_input(title: &str) -> EventInput {
    let start = Utc::now() + Duration::days(7);
    EventInput {
        title: title.to_string(),
        description: Some("Integration test event".to_string()),
        venue: "Seminar Hall B".to_string(),
        start_date: start,
        end_date: start + Duration::hours(3),
        department: Some("Computer Science".to_string()),
        expected_attendees: Some(120),
        budget: None,
        resources_needed: None,
        google_form_url: None,
        is_private: false,
        registration_enabled: true,
    }
}

pub async fn draft_event(deps: &ServerDeps, owner: Actor) -> Event {
    create_event(event_input("Draft Event"), owner, deps)
        .await
        .expect("Failed to create draft")
}

pub async fn submitted_event(deps: &ServerDeps, owner: Actor) -> Event {
    let draft = draft_event(deps, owner).await;
    submit_event(draft.id, owner, deps)
        .await
        .expect("Failed to submit event")
}

pub async fn gs_approved_event(deps: &ServerDeps, owner: Actor) -> Event {
    let submitted = submitted_event(deps, owner).await;
    record_decision(
        submitted.id,
        ApprovalType::GsApproval,
        Decision::Approved,
        None,
        general_secretary(),
        deps,
    )
    .await
    .expect("Failed to record GS approval")
    .event
}

/// Fully approved with registration open
pub async fn published_event(deps: &ServerDeps, owner: Actor) -> Event {
    let pending_dean = gs_approved_event(deps, owner).await;
    record_decision(
        pending_dean.id,
        ApprovalType::DeanApproval,
        Decision::Approved,
        Some("Approved".to_string()),
        dean(),
        deps,
    )
    .await
    .expect("Failed to record Dean approval")
    .event
}

/// Fully approved but with registration switched off
pub async fn published_event_without_registration(deps: &ServerDeps, owner: Actor) -> Event {
    let mut input = event_input("Invite-only Talk");
    input.registration_enabled = false;
    let draft = create_event(input, owner, deps)
        .await
        .expect("Failed to create draft");
    submit_event(draft.id, owner, deps)
        .await
        .expect("Failed to submit event");
    record_decision(
        draft.id,
        ApprovalType::GsApproval,
        Decision::Approved,
        None,
        general_secretary(),
        deps,
    )
    .await
    .expect("Failed to record GS approval");
    record_decision(
        draft.id,
        ApprovalType::DeanApproval,
        Decision::Approved,
        None,
        dean(),
        deps,
    )
    .await
    .expect("Failed to record Dean approval")
    .event
}
