use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::common::phone::{mask_phone_number, validate_phone_number};
use crate::common::{Actor, Capability, CoreError, CoreResult, EventId};
use crate::domains::events::Event;
use crate::domains::registrations::code::{expires_at, generate_otp_code, sms_message};
use crate::domains::registrations::models::OtpChallenge;
use crate::kernel::ServerDeps;

use super::register::ensure_registration_open;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeIssued {
    pub expires_at: DateTime<Utc>,
}

/// Issue a code bound to (phone, event, student) and text it to the phone.
///
/// The challenge is persisted before dispatch. If the SMS provider fails the
/// caller gets `DeliveryFailed`, but the stored challenge stays redeemable for
/// its full window.
pub async fn request_code(
    phone_number: &str,
    event_id: EventId,
    actor: Actor,
    deps: &ServerDeps,
) -> CoreResult<CodeIssued> {
    validate_phone_number(phone_number)?;
    actor.can(Capability::RegisterForEvents).check()?;

    let event = Event::find_by_id(event_id, &deps.db_pool)
        .await?
        .ok_or(CoreError::NotFound("Event"))?;
    ensure_registration_open(&event)?;

    let code = generate_otp_code();
    let valid_until = expires_at(deps.clock.now());
    let challenge = OtpChallenge::create(
        phone_number,
        &code,
        event_id,
        actor.member_id,
        valid_until,
        &deps.db_pool,
    )
    .await?;

    info!(
        event_id = %event_id,
        student_id = %actor.member_id,
        challenge_id = %challenge.id,
        phone = %mask_phone_number(phone_number),
        "Registration code issued"
    );

    if let Err(e) = deps.sms.send_sms(phone_number, &sms_message(&code)).await {
        warn!(
            challenge_id = %challenge.id,
            phone = %mask_phone_number(phone_number),
            error = %e,
            "SMS delivery failed"
        );
        return Err(CoreError::DeliveryFailed(e.to_string()));
    }

    Ok(CodeIssued {
        expires_at: challenge.expires_at,
    })
}
