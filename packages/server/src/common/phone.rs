//! Phone number handling for registration codes.
//!
//! Numbers are stored and compared as exactly ten ASCII digits (no country code,
//! no separators); the SMS adapter adds the country prefix at delivery time.

use super::error::{CoreError, CoreResult};

pub const PHONE_NUMBER_LEN: usize = 10;

/// Reject anything that is not exactly ten digits.
pub fn validate_phone_number(phone_number: &str) -> CoreResult<()> {
    if phone_number.len() != PHONE_NUMBER_LEN
        || !phone_number.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CoreError::validation(
            "Phone number must be exactly 10 digits",
        ));
    }
    Ok(())
}

/// Last four digits only, for logs.
pub fn mask_phone_number(phone_number: &str) -> String {
    let visible: String = phone_number
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("******{}", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn accepts_ten_digits() {
        assert!(validate_phone_number("9876543210").is_ok());
        assert!(validate_phone_number("0000000000").is_ok());
    }

    #[test]
    fn rejects_short_numbers() {
        let err = validate_phone_number("12345").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn rejects_country_codes_and_separators() {
        assert!(validate_phone_number("+919876543210").is_err());
        assert!(validate_phone_number("98765-43210").is_err());
        assert!(validate_phone_number("98765 4321").is_err());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(validate_phone_number("٠١٢٣٤٥٦٧٨٩").is_err());
    }

    #[test]
    fn masks_all_but_last_four() {
        assert_eq!(mask_phone_number("9876543210"), "******3210");
        assert_eq!(mask_phone_number("12"), "******12");
    }
}
