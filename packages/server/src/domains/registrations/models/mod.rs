pub mod otp_challenge;
pub mod registration;

pub use otp_challenge::OtpChallenge;
pub use registration::{Registration, RegistrationStatus, StudentRegistration};
