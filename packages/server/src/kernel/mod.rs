//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, SystemClock, TwilioSmsAdapter};
pub use test_dependencies::{MockClock, MockSmsService, SentSms};
pub use traits::*;
