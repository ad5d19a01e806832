//! Approvals domain: GS and Dean decisions, each appended together with the
//! status change it causes.

pub mod activities;
pub mod models;

pub use models::{ApprovalDecision, ApprovalType, Decision};
