// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod phone;

pub use auth::{Actor, Capability, Role};
pub use entity_ids::*;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use id::{Id, V7};
