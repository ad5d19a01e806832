//! The event lifecycle as one transition table.
//!
//! Every status write in the event store and the approval engine looks up its
//! next state here; presentation code asks the same table which actions to
//! offer.
//!
//! ```text
//! draft --submit--> submitted
//! submitted --gs_approve--> gs_approved
//! submitted --gs_reject--> rejected
//! gs_approved --dean_approve--> final_approved
//! gs_approved --dean_reject--> rejected
//! {submitted, gs_approved, final_approved} --cancel--> cancelled
//! draft --delete--> (removed)
//! ```

use serde::Serialize;

use super::models::EventStatus;

/// Something a committee member or approver can do to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Submit,
    GsApprove,
    GsReject,
    DeanApprove,
    DeanReject,
    Cancel,
    Delete,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Submit => "submit",
            EventAction::GsApprove => "gs_approve",
            EventAction::GsReject => "gs_reject",
            EventAction::DeanApprove => "dean_approve",
            EventAction::DeanReject => "dean_reject",
            EventAction::Cancel => "cancel",
            EventAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a legal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    To(EventStatus),
    /// The row is physically removed (drafts only)
    Removed,
}

use EventAction::*;
use EventStatus::*;

const TRANSITIONS: &[(EventStatus, EventAction, Transition)] = &[
    (Draft, Submit, Transition::To(Submitted)),
    (Draft, Delete, Transition::Removed),
    (Submitted, GsApprove, Transition::To(GsApproved)),
    (Submitted, GsReject, Transition::To(Rejected)),
    (Submitted, Cancel, Transition::To(Cancelled)),
    (GsApproved, DeanApprove, Transition::To(FinalApproved)),
    (GsApproved, DeanReject, Transition::To(Rejected)),
    (GsApproved, Cancel, Transition::To(Cancelled)),
    (FinalApproved, Cancel, Transition::To(Cancelled)),
];

impl EventStatus {
    /// Where `action` leads from this status, or `None` if it is illegal here.
    pub fn apply(self, action: EventAction) -> Option<Transition> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == action)
            .map(|(_, _, to)| *to)
    }

    /// Actions the table allows from this status, in table order
    pub fn allowed_actions(self) -> Vec<EventAction> {
        TRANSITIONS
            .iter()
            .filter(|(from, _, _)| *from == self)
            .map(|(_, action, _)| *action)
            .collect()
    }

    /// No review step follows. `final_approved` still accepts cancellation and
    /// registrations, but the approval workflow is over.
    pub fn is_terminal(self) -> bool {
        !TRANSITIONS.iter().any(|(from, action, _)| {
            *from == self && !matches!(action, EventAction::Cancel | EventAction::Delete)
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Draft => "Draft",
            Submitted => "Pending GS",
            GsApproved => "Pending Dean",
            FinalApproved => "Approved",
            Rejected => "Rejected",
            Cancelled => "Cancelled",
        }
    }

    /// Only published events take registrations
    pub fn accepts_registrations(self) -> bool {
        self == FinalApproved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [EventAction; 7] = [
        Submit,
        GsApprove,
        GsReject,
        DeanApprove,
        DeanReject,
        Cancel,
        Delete,
    ];

    #[test]
    fn happy_path_reaches_final_approval() {
        let mut status = Draft;
        for action in [Submit, GsApprove, DeanApprove] {
            status = match status.apply(action) {
                Some(Transition::To(next)) => next,
                other => panic!("{} from {} gave {:?}", action, status, other),
            };
        }
        assert_eq!(status, FinalApproved);
    }

    #[test]
    fn dean_cannot_skip_the_general_secretary() {
        assert_eq!(Submitted.apply(DeanApprove), None);
        assert_eq!(Submitted.apply(DeanReject), None);
        assert_eq!(Draft.apply(GsApprove), None);
    }

    #[test]
    fn either_stage_can_reject() {
        assert_eq!(Submitted.apply(GsReject), Some(Transition::To(Rejected)));
        assert_eq!(GsApproved.apply(DeanReject), Some(Transition::To(Rejected)));
    }

    #[test]
    fn cancel_only_from_live_review_states() {
        for status in EventStatus::ALL {
            let expected = matches!(status, Submitted | GsApproved | FinalApproved);
            assert_eq!(
                status.apply(Cancel) == Some(Transition::To(Cancelled)),
                expected,
                "cancel from {}",
                status
            );
        }
    }

    #[test]
    fn only_drafts_can_be_deleted() {
        for status in EventStatus::ALL {
            let deleted = status.apply(Delete) == Some(Transition::Removed);
            assert_eq!(deleted, status == Draft, "delete from {}", status);
        }
    }

    #[test]
    fn rejected_and_cancelled_are_dead_ends() {
        for action in ACTIONS {
            assert_eq!(Rejected.apply(action), None);
            assert_eq!(Cancelled.apply(action), None);
        }
        assert!(Rejected.allowed_actions().is_empty());
        assert!(Cancelled.allowed_actions().is_empty());
    }

    #[test]
    fn terminal_states() {
        assert!(Rejected.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(FinalApproved.is_terminal());
        assert!(!Draft.is_terminal());
        assert!(!Submitted.is_terminal());
        assert!(!GsApproved.is_terminal());
    }

    #[test]
    fn allowed_actions_follow_the_table() {
        assert_eq!(Draft.allowed_actions(), vec![Submit, Delete]);
        assert_eq!(FinalApproved.allowed_actions(), vec![Cancel]);
    }

    #[test]
    fn labels_for_review_queues() {
        assert_eq!(Submitted.label(), "Pending GS");
        assert_eq!(GsApproved.label(), "Pending Dean");
        assert_eq!(FinalApproved.label(), "Approved");
    }

    #[test]
    fn registrations_need_final_approval() {
        for status in EventStatus::ALL {
            assert_eq!(status.accepts_registrations(), status == FinalApproved);
        }
    }
}
