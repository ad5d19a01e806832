use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::common::{EventId, MemberId, OtpChallengeId};

/// A code issued to one student, for one event, at one phone number
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OtpChallenge {
    pub id: OtpChallengeId,
    pub phone_number: String,
    pub otp_code: String,
    pub event_id: EventId,
    pub student_id: MemberId,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Persist a fresh, unverified challenge. Earlier challenges for the same
    /// tuple stay valid until they expire.
    pub async fn create(
        phone_number: &str,
        otp_code: &str,
        event_id: EventId,
        student_id: MemberId,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let challenge = sqlx::query_as::<_, OtpChallenge>(
            "INSERT INTO otp_challenges (id, phone_number, otp_code, event_id, student_id, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(OtpChallengeId::new())
        .bind(phone_number)
        .bind(otp_code)
        .bind(event_id)
        .bind(student_id)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;
        Ok(challenge)
    }

    /// Lock the newest unconsumed, unexpired challenge matching all four
    /// fields. A concurrent redeemer of the same row waits here and then
    /// finds nothing.
    pub async fn lock_redeemable(
        phone_number: &str,
        otp_code: &str,
        event_id: EventId,
        student_id: MemberId,
        now: DateTime<Utc>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let challenge = sqlx::query_as::<_, OtpChallenge>(
            "SELECT * FROM otp_challenges
             WHERE phone_number = $1
               AND otp_code = $2
               AND event_id = $3
               AND student_id = $4
               AND verified = false
               AND expires_at > $5
             ORDER BY created_at DESC
             LIMIT 1
             FOR UPDATE",
        )
        .bind(phone_number)
        .bind(otp_code)
        .bind(event_id)
        .bind(student_id)
        .bind(now)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(challenge)
    }

    /// Flip `verified`. Returns false if someone else already did.
    pub async fn mark_verified(id: OtpChallengeId, conn: &mut PgConnection) -> Result<bool> {
        let result =
            sqlx::query("UPDATE otp_challenges SET verified = true WHERE id = $1 AND verified = false")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Every challenge a student has been issued for an event, newest first
    pub async fn find_for_student(
        event_id: EventId,
        student_id: MemberId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let challenges = sqlx::query_as::<_, OtpChallenge>(
            "SELECT * FROM otp_challenges
             WHERE event_id = $1 AND student_id = $2
             ORDER BY created_at DESC",
        )
        .bind(event_id)
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(challenges)
    }
}
