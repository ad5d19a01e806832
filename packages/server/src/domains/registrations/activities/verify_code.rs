use tracing::info;

use crate::common::phone::{mask_phone_number, validate_phone_number};
use crate::common::{Actor, Capability, CoreError, CoreResult, EventId};
use crate::domains::events::Event;
use crate::domains::registrations::code::validate_otp_code;
use crate::domains::registrations::models::{OtpChallenge, Registration};
use crate::kernel::ServerDeps;

use super::register::register;

/// Redeem a code and issue the ticket, as one transaction.
///
/// Wrong, expired, already-used and never-issued codes all fail with
/// `InvalidOrExpiredCode`. If the ledger refuses (already registered,
/// registration closed) the code is left unconsumed.
pub async fn verify_code(
    phone_number: &str,
    otp_code: &str,
    event_id: EventId,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<Registration> {
    validate_phone_number(phone_number)?;
    validate_otp_code(otp_code)?;
    actor.can(Capability::RegisterForEvents).check()?;

    let now = deps.clock.now();
    let mut tx = deps.db_pool.begin().await?;

    let challenge = OtpChallenge::lock_redeemable(
        phone_number,
        otp_code,
        event_id,
        actor.member_id,
        now,
        &mut *tx,
    )
    .await?
    .ok_or(CoreError::InvalidOrExpiredCode)?;

    let event = Event::lock_for_share(event_id, &mut *tx)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;

    if !OtpChallenge::mark_verified(challenge.id, &mut *tx).await? {
        return Err(CoreError::InvalidOrExpiredCode);
    }

    let registration = register(&event, actor.member_id, phone_number, now, &mut *tx).await?;

    tx.commit().await?;

    info!(
        event_id = %event_id,
        student_id = %actor.member_id,
        challenge_id = %challenge.id,
        phone = %mask_phone_number(phone_number),
        "Registration code redeemed"
    );
    Ok(registration)
}
