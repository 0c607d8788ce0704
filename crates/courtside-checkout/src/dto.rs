//! Boundary DTOs for the hosting UI layer
//!
//! camelCase JSON shapes; amounts are rounded to cents here and nowhere
//! earlier.

use serde::{Deserialize, Serialize};

use courtside_payments::PaymentBreakdown;

use crate::backend::RewardPreview;
use crate::flow::{CompletionOutcome, FlowState};

/// Payment breakdown as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownDto {
    pub tokens: i64,
    /// Cash owed, rounded to cents
    pub cash: f64,
    pub total_value: f64,
    pub savings: f64,
    pub savings_pct: f64,
    pub status: String,
}

impl From<&PaymentBreakdown> for BreakdownDto {
    fn from(b: &PaymentBreakdown) -> Self {
        Self {
            tokens: b.tokens,
            cash: b.cash_display(),
            total_value: courtside_core::round_cents(b.total_value),
            savings: b.savings_display(),
            savings_pct: b.savings_pct,
            status: b.status.as_str().to_string(),
        }
    }
}

/// Reward preview as shown on the confirmation page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPreviewDto {
    pub total_stakes: i64,
    pub platform_fee: i64,
    pub net_payout: i64,
}

impl From<&RewardPreview> for RewardPreviewDto {
    fn from(p: &RewardPreview) -> Self {
        Self {
            total_stakes: p.total_stakes,
            platform_fee: p.platform_fee,
            net_payout: p.net_payout,
        }
    }
}

/// Flow state for the dialog shell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FlowStateDto {
    Select,
    #[serde(rename_all = "camelCase")]
    Preview {
        target: String,
        loading: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        preview: Option<RewardPreviewDto>,
    },
    #[serde(rename_all = "camelCase")]
    Error { target: String, reason: String },
}

impl From<&FlowState> for FlowStateDto {
    fn from(state: &FlowState) -> Self {
        match state {
            FlowState::Select => Self::Select,
            FlowState::Preview { target, preview } => Self::Preview {
                target: target.describe(),
                loading: preview.is_none(),
                preview: preview.as_ref().map(RewardPreviewDto::from),
            },
            FlowState::Error { target, reason } => Self::Error {
                target: target.describe(),
                reason: reason.clone(),
            },
        }
    }
}

/// Completed confirmation record for the activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcomeDto {
    /// Winning player; null means a draw (or a plain purchase)
    pub winner_id: Option<String>,
    pub preview: RewardPreviewDto,
    pub reference: String,
}

impl From<&CompletionOutcome> for CompletionOutcomeDto {
    fn from(outcome: &CompletionOutcome) -> Self {
        Self {
            winner_id: outcome.winner_id.as_ref().map(|p| p.as_str().to_string()),
            preview: RewardPreviewDto::from(&outcome.preview),
            reference: outcome.receipt.reference.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_payments::{compute_breakdown, SplitRequest};

    #[test]
    fn test_breakdown_dto_rounds_cash() {
        let b = compute_breakdown(&SplitRequest::new(150, 75, 0.01), 75);
        let dto = BreakdownDto::from(&b);
        assert_eq!(dto.cash, 0.75);
        assert_eq!(dto.status, "valid");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["totalValue"], 1.5);
        assert_eq!(json["savingsPct"], 50.0);
    }

    #[test]
    fn test_flow_state_dto_shapes() {
        let dto = FlowStateDto::from(&FlowState::Select);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["state"], "select");

        let dto = FlowStateDto::from(&FlowState::Preview {
            target: crate::backend::OutcomeTarget::Draw,
            preview: None,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["state"], "preview");
        assert_eq!(json["loading"], true);
        // Pending preview omitted entirely
        assert!(json.get("preview").is_none());
    }

    #[test]
    fn test_draw_outcome_serializes_null_winner() {
        use crate::backend::CommitReceipt;
        let outcome = CompletionOutcome {
            winner_id: None,
            preview: RewardPreview {
                total_stakes: 100,
                platform_fee: 10,
                net_payout: 100,
            },
            receipt: CommitReceipt {
                reference: "tx-9".into(),
            },
        };
        let json = serde_json::to_value(CompletionOutcomeDto::from(&outcome)).unwrap();
        assert!(json["winnerId"].is_null());
        assert_eq!(json["preview"]["netPayout"], 100);
    }
}
