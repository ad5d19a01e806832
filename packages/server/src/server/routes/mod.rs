// HTTP routes
pub mod error;
pub mod events;
pub mod health;
pub mod registrations;

pub use error::{ApiError, ApiResult};
pub use events::*;
pub use health::*;
pub use registrations::*;
