//! Verification gate and registration ledger entry points.

pub mod queries;
pub mod register;
pub mod request_code;
pub mod verify_code;

pub use queries::{event_registrations, my_registrations};
pub use register::{ensure_registration_open, register};
pub use request_code::{request_code, CodeIssued};
pub use verify_code::verify_code;
