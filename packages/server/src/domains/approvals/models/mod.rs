pub mod approval_decision;

pub use approval_decision::{ApprovalDecision, ApprovalType, Decision};
