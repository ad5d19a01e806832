//! Typed ids for every persisted entity.
//!
//! Members are owned by the external identity provider; `MemberId` is only a
//! reference to whoever the bearer token says the caller is.

pub use super::id::{Id, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker for identities issued by the identity provider.
pub struct Member;

/// Marker for campus events.
pub struct Event;

/// Marker for GS / Dean approval decisions.
pub struct ApprovalDecision;

/// Marker for one-time registration codes.
pub struct OtpChallenge;

/// Marker for event registrations (tickets).
pub struct EventRegistration;

// ============================================================================
// Type aliases
// ============================================================================

pub type MemberId = Id<Member>;

pub type EventId = Id<Event>;

pub type ApprovalDecisionId = Id<ApprovalDecision>;

pub type OtpChallengeId = Id<OtpChallenge>;

pub type RegistrationId = Id<EventRegistration>;
