use serde::{Deserialize, Serialize};

/// Role claim issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Committee,
    GeneralSecretary,
    Dean,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Committee => write!(f, "committee"),
            Role::GeneralSecretary => write!(f, "general_secretary"),
            Role::Dean => write!(f, "dean"),
            Role::Student => write!(f, "student"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "committee" => Ok(Role::Committee),
            "general_secretary" => Ok(Role::GeneralSecretary),
            "dean" => Ok(Role::Dean),
            "student" => Ok(Role::Student),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for role in [
            Role::Committee,
            Role::GeneralSecretary,
            Role::Dean,
            Role::Student,
        ] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn serde_uses_claim_spelling() {
        let json = serde_json::to_string(&Role::GeneralSecretary).unwrap();
        assert_eq!(json, "\"general_secretary\"");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("admin".parse::<Role>().is_err());
    }
}
