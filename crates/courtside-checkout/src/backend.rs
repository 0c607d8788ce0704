//! Collaborator contracts for the confirmation flow
//!
//! The balance, preview, and commit operations live on a remote backend
//! that is not part of this core. The flow drives them through these
//! traits; the hosting application supplies the implementation.
//!
//! No timeout is imposed here. A production implementation should bound
//! its own calls; the flow only guarantees that late responses cannot
//! corrupt state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use courtside_core::{BackendError, ListingId, PlayerId, SessionId, TokenBalance};
use courtside_payments::PaymentBreakdown;

/// What the confirmation is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeTarget {
    /// Complete a session with this player as the winner
    Winner(PlayerId),
    /// Complete a session as a draw; stakes are refunded
    Draw,
    /// Purchase a marketplace listing
    Listing(ListingId),
}

impl OutcomeTarget {
    /// Winner ID for the completion record; None for draws and purchases.
    pub fn winner_id(&self) -> Option<&PlayerId> {
        match self {
            Self::Winner(player) => Some(player),
            Self::Draw | Self::Listing(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Winner(player) => format!("winner {}", player),
            Self::Draw => "draw".to_string(),
            Self::Listing(listing) => format!("listing {}", listing),
        }
    }
}

/// Reward distribution preview, computed remotely.
///
/// All amounts are whole tokens. For a draw the fee is waived and stakes
/// are refunded in full, so `net_payout == total_stakes`; for a winner
/// `net_payout == total_stakes - platform_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPreview {
    pub total_stakes: i64,
    pub platform_fee: i64,
    pub net_payout: i64,
}

/// Acknowledgement of a committed purchase or completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Backend reference for the committed operation
    pub reference: String,
}

/// Remote operations the confirmation flow depends on.
///
/// `commit` is irreversible; the flow never issues two commits
/// concurrently, but server-side idempotency is the implementor's concern.
#[async_trait]
pub trait CheckoutBackend: Send + Sync {
    /// Current token balance for the payer.
    async fn fetch_balance(&self, player: &PlayerId) -> Result<TokenBalance, BackendError>;

    /// Preview the reward/cost outcome for a candidate target. Safe to
    /// retry; must not change any state.
    async fn preview_outcome(
        &self,
        session: &SessionId,
        target: &OutcomeTarget,
    ) -> Result<RewardPreview, BackendError>;

    /// Execute the purchase or session completion.
    async fn commit(
        &self,
        session: &SessionId,
        target: &OutcomeTarget,
        breakdown: &PaymentBreakdown,
    ) -> Result<CommitReceipt, BackendError>;
}

/// User-facing notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Error,
}

/// Fire-and-forget notification surface (toasts in the hosting UI).
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Default notifier that writes notifications to the log. Hosts replace
/// this with their toast adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Success => tracing::info!("Notification: {}", message),
            NotifyKind::Error => tracing::warn!("Notification: {}", message),
        }
    }
}
