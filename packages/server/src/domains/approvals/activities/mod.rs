//! Approval engine entry points.

pub mod history;
pub mod record_decision;

pub use history::decision_history;
pub use record_decision::{record_decision, DecisionOutcome};
