//! Event store entry points, called from the HTTP routes.
//!
//! Activities take an explicit `Actor`, do their own authorization, and
//! return models or `CoreError`.

pub mod create;
pub mod lifecycle;
pub mod queries;

pub use create::{create_event, propose_event};
pub use lifecycle::{cancel_event, delete_event, submit_event, update_event};
pub use queries::{can_view, get_event, list_events, public_calendar};
