use super::{Capability, Role};
use crate::common::entity_ids::MemberId;
use crate::common::error::{CoreError, CoreResult};

/// The caller of a core operation: who they are and which role they hold.
///
/// Usage:
/// ```ignore
/// actor.can(Capability::ReviewAsDean).check()?;
/// actor.must_own(event.created_by, "event")?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub member_id: MemberId,
    pub role: Role,
}

impl Actor {
    pub fn new(member_id: MemberId, role: Role) -> Self {
        Self { member_id, role }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            role: self.role,
            capability,
        }
    }

    /// Fails with `PermissionDenied` unless the actor is `owner`.
    pub fn must_own(&self, owner: MemberId, what: &str) -> CoreResult<()> {
        if self.member_id != owner {
            return Err(CoreError::permission_denied(format!(
                "only the creator of this {} can do that",
                what
            )));
        }
        Ok(())
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    role: Role,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> CoreResult<()> {
        if self.role != self.capability.required_role() {
            return Err(CoreError::permission_denied(self.capability.describe()));
        }
        Ok(())
    }
}
