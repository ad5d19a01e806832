//! Registrations domain: phone-verified sign-up and ticket issuance.

pub mod activities;
pub mod code;
pub mod models;
pub mod ticket;

pub use models::{OtpChallenge, Registration, RegistrationStatus, StudentRegistration};
