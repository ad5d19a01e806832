//! One-time registration codes.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;

use crate::common::{CoreError, CoreResult};

/// How long an issued code stays redeemable
pub const OTP_TTL_MINUTES: i64 = 10;

pub const OTP_CODE_LEN: usize = 6;

/// Uniform over 000000..=999999, leading zeros kept
pub fn generate_otp_code() -> String {
    let n: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:06}", n)
}

pub fn validate_otp_code(code: &str) -> CoreResult<()> {
    if code.len() != OTP_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::validation("code must be exactly 6 digits"));
    }
    Ok(())
}

pub fn expires_at(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::minutes(OTP_TTL_MINUTES)
}

pub fn sms_message(code: &str) -> String {
    format!(
        "Your OTP for event registration is: {}. Valid for {} minutes.",
        code, OTP_TTL_MINUTES
    )
}
