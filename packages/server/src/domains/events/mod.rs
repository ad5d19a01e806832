//! Events domain: the event store and its lifecycle table.

pub mod activities;
pub mod machines;
pub mod models;
pub mod types;

pub use machines::{EventAction, Transition};
pub use models::{Event, EventStatus};
pub use types::{EventInput, EventView};
