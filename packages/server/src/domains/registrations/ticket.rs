//! Ticket numbers: `EVT-<YYYYMMDD>-<10 Crockford base32 chars>`.
//!
//! 50 random bits per day; the unique index on `ticket_number` backs the
//! collision guarantee.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::Rng;

/// Crockford base32 (no I, L, O, U)
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const SUFFIX_LEN: usize = 10;

pub fn generate_ticket_number(issued_at: DateTime<Utc>) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[OsRng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("EVT-{}-{}", issued_at.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn format_is_prefix_date_suffix() {
        let issued = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let ticket = generate_ticket_number(issued);

        let parts: Vec<&str> = ticket.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "EVT");
        assert_eq!(parts[1], "20260314");
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn no_ambiguous_characters() {
        for _ in 0..200 {
            let ticket = generate_ticket_number(Utc::now());
            assert!(!ticket[13..].contains(&['I', 'L', 'O', 'U'][..]));
        }
    }

    #[test]
    fn tickets_do_not_repeat() {
        let now = Utc::now();
        let tickets: HashSet<_> = (0..10_000).map(|_| generate_ticket_number(now)).collect();
        assert_eq!(tickets.len(), 10_000);
    }
}
