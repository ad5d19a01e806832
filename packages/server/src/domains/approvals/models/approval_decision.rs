use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ApprovalDecisionId, Capability, EventId, MemberId};
use crate::domains::events::EventAction;

/// One immutable GS or Dean ruling on an event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDecision {
    pub id: ApprovalDecisionId,
    pub event_id: EventId,
    pub approver_id: MemberId,
    pub approval_type: ApprovalType,
    #[serde(rename = "decision")]
    pub status: Decision,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review stage (Postgres `approval_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    GsApproval,
    DeanApproval,
}

/// Ruling (Postgres `approval_decision`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_decision", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
}

impl ApprovalType {
    /// Who may record a decision of this type
    pub fn required_capability(self) -> Capability {
        match self {
            ApprovalType::GsApproval => Capability::ReviewAsGeneralSecretary,
            ApprovalType::DeanApproval => Capability::ReviewAsDean,
        }
    }

    /// The lifecycle action a ruling at this stage performs
    pub fn action(self, decision: Decision) -> EventAction {
        match (self, decision) {
            (ApprovalType::GsApproval, Decision::Approved) => EventAction::GsApprove,
            (ApprovalType::GsApproval, Decision::Rejected) => EventAction::GsReject,
            (ApprovalType::DeanApproval, Decision::Approved) => EventAction::DeanApprove,
            (ApprovalType::DeanApproval, Decision::Rejected) => EventAction::DeanReject,
        }
    }
}

impl std::fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalType::GsApproval => write!(f, "gs_approval"),
            ApprovalType::DeanApproval => write!(f, "dean_approval"),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approved => write!(f, "approved"),
            Decision::Rejected => write!(f, "rejected"),
        }
    }
}

impl ApprovalDecision {
    /// Append a decision. Runs on the caller's transaction so it commits with
    /// the status change.
    pub async fn insert(
        event_id: EventId,
        approver_id: MemberId,
        approval_type: ApprovalType,
        decision: Decision,
        comments: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let row = sqlx::query_as::<_, ApprovalDecision>(
            "INSERT INTO event_approvals (id, event_id, approver_id, approval_type, status, comments)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(ApprovalDecisionId::new())
        .bind(event_id)
        .bind(approver_id)
        .bind(approval_type)
        .bind(decision)
        .bind(comments)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// All decisions for an event in the order they were recorded
    pub async fn find_by_event(event_id: EventId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, ApprovalDecision>(
            "SELECT * FROM event_approvals
             WHERE event_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_event(event_id: EventId, pool: &PgPool) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM event_approvals WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_stage_maps_to_its_own_actions() {
        assert_eq!(
            ApprovalType::GsApproval.action(Decision::Approved),
            EventAction::GsApprove
        );
        assert_eq!(
            ApprovalType::DeanApproval.action(Decision::Rejected),
            EventAction::DeanReject
        );
    }

    #[test]
    fn stages_require_distinct_reviewers() {
        assert_eq!(
            ApprovalType::GsApproval.required_capability(),
            Capability::ReviewAsGeneralSecretary
        );
        assert_eq!(
            ApprovalType::DeanApproval.required_capability(),
            Capability::ReviewAsDean
        );
    }

    #[test]
    fn wire_tags_are_snake_case() {
        let parsed: ApprovalType = serde_json::from_str("\"dean_approval\"").unwrap();
        assert_eq!(parsed, ApprovalType::DeanApproval);
        assert_eq!(Decision::Rejected.to_string(), "rejected");
    }
}
