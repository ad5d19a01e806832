use super::Role;

/// Actions that require a specific role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create and own event proposals
    ProposeEvents,

    /// Record the first-stage (General Secretary) decision
    ReviewAsGeneralSecretary,

    /// Record the final (Dean) decision
    ReviewAsDean,

    /// Request and redeem registration codes
    RegisterForEvents,
}

impl Capability {
    /// The single role allowed to exercise this capability.
    pub fn required_role(&self) -> Role {
        match self {
            Capability::ProposeEvents => Role::Committee,
            Capability::ReviewAsGeneralSecretary => Role::GeneralSecretary,
            Capability::ReviewAsDean => Role::Dean,
            Capability::RegisterForEvents => Role::Student,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Capability::ProposeEvents => "only committees can propose events",
            Capability::ReviewAsGeneralSecretary => {
                "only the General Secretary can record this decision"
            }
            Capability::ReviewAsDean => "only the Dean can record this decision",
            Capability::RegisterForEvents => "only students can register for events",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_review_stage_belongs_to_one_role() {
        assert_eq!(
            Capability::ReviewAsGeneralSecretary.required_role(),
            Role::GeneralSecretary
        );
        assert_eq!(Capability::ReviewAsDean.required_role(), Role::Dean);
        assert_ne!(
            Capability::ReviewAsGeneralSecretary.required_role(),
            Capability::ReviewAsDean.required_role()
        );
    }
}
