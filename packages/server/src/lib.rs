// Campus Events - API Core
//
// Committees propose events, the General Secretary and the Dean review them in
// turn, and published events take phone-verified student registrations.
//
// Business logic lives in domains/*/activities; HTTP glue lives in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
