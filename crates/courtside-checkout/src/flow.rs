//! Purchase / Session-Completion Confirmation Flow
//!
//! A short state machine: select -> preview -> confirm -> {done | error}.
//! Used identically for confirming a marketplace purchase and completing a
//! social session with reward distribution.
//!
//! # Important Notes
//!
//! - The commit is irreversible, so it can only fire from a loaded preview
//!   and never while another commit is in flight.
//! - Preview responses are matched against a request epoch; a response for
//!   a selection the user has since abandoned is discarded.
//! - Backend failures become flow states, never errors propagated past
//!   this boundary. The `Err` returns of `confirm` are contract misuse
//!   (wrong state, invalid breakdown, double submission), not backend
//!   outcomes.

use std::sync::Arc;

use courtside_core::{BackendError, CheckoutError, PlayerId, SessionId, TokenBalance};
use courtside_payments::PaymentBreakdown;

use crate::backend::{
    CheckoutBackend, CommitReceipt, Notifier, NotifyKind, OutcomeTarget, RewardPreview,
};

/// Current state of one confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Waiting for the user to pick a winner, draw, or listing
    Select,
    /// Target chosen; preview is `None` while the fetch is outstanding
    Preview {
        target: OutcomeTarget,
        preview: Option<RewardPreview>,
    },
    /// Commit failed; offers start-over and retry
    Error {
        target: OutcomeTarget,
        reason: String,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Preview {
                preview: Some(_), ..
            } => "preview",
            Self::Preview { preview: None, .. } => "preview-pending",
            Self::Error { .. } => "error",
        }
    }
}

/// Handle for an outstanding preview request.
///
/// Captures the epoch at issue time; `apply_preview` compares it against
/// the current epoch to discard late responses.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    epoch: u64,
    target: OutcomeTarget,
}

impl PreviewTicket {
    pub fn target(&self) -> &OutcomeTarget {
        &self.target
    }
}

/// A completed preview fetch, ready to be applied to the flow.
#[derive(Debug)]
pub struct PreviewResponse {
    ticket: PreviewTicket,
    result: Result<RewardPreview, BackendError>,
}

/// Terminal record of one successful confirmation. Never persisted here;
/// the backend owns durability.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    /// Winning player, or `None` for draws and purchases
    pub winner_id: Option<PlayerId>,
    /// The preview the user confirmed against
    pub preview: RewardPreview,
    /// Backend acknowledgement
    pub receipt: CommitReceipt,
}

/// Drives one purchase or completion dialog.
///
/// One instance per dialog; opening a new dialog discards any unfinished
/// flow state. Collaborators are injected, keeping the flow testable
/// without a UI or a live backend.
pub struct ConfirmationFlow {
    backend: Arc<dyn CheckoutBackend>,
    notifier: Arc<dyn Notifier>,
    session: SessionId,
    player: PlayerId,
    state: FlowState,
    epoch: u64,
    confirming: bool,
    balance: Option<TokenBalance>,
}

impl ConfirmationFlow {
    pub fn new(
        backend: Arc<dyn CheckoutBackend>,
        notifier: Arc<dyn Notifier>,
        session: SessionId,
        player: PlayerId,
    ) -> Self {
        Self {
            backend,
            notifier,
            session,
            player,
            state: FlowState::Select,
            epoch: 0,
            confirming: false,
            balance: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Last fetched balance, if any. A read cache; the backend is
    /// authoritative.
    pub fn balance(&self) -> Option<TokenBalance> {
        self.balance
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Fetch the payer's balance. Called on open and after a successful
    /// commit; a failure keeps the previous cached value.
    pub async fn refresh_balance(&mut self) {
        match self.backend.fetch_balance(&self.player).await {
            Ok(balance) => {
                tracing::debug!("Balance for {}: {} tokens", self.player, balance.tokens);
                self.balance = Some(balance);
            }
            Err(e) => {
                tracing::warn!("Balance refresh failed for {}: {}", self.player, e);
            }
        }
    }

    /// Pick a target and enter the preview state. Returns the ticket the
    /// caller must use to fetch and apply the preview; issuing a new
    /// selection invalidates all earlier tickets.
    pub fn select_target(&mut self, target: OutcomeTarget) -> PreviewTicket {
        self.epoch += 1;
        // A commit abandoned mid-await (dropped future) must not wedge the
        // dialog; picking a target starts a fresh attempt.
        self.confirming = false;
        tracing::info!(
            "Session {}: selected {} (epoch {})",
            self.session,
            target.describe(),
            self.epoch
        );
        self.state = FlowState::Preview {
            target: target.clone(),
            preview: None,
        };
        PreviewTicket {
            epoch: self.epoch,
            target,
        }
    }

    /// Fetch the reward preview for a ticket. Does not touch flow state;
    /// pass the response to `apply_preview`.
    pub async fn request_preview(&self, ticket: PreviewTicket) -> PreviewResponse {
        let result = self
            .backend
            .preview_outcome(&self.session, &ticket.target)
            .await;
        PreviewResponse { ticket, result }
    }

    /// Apply a fetched preview. A response whose epoch no longer matches
    /// the current selection is dropped; a fetch failure is non-fatal and
    /// returns the flow to target selection.
    pub fn apply_preview(&mut self, response: PreviewResponse) {
        if response.ticket.epoch != self.epoch {
            tracing::debug!(
                "Discarding stale preview for {} (epoch {} != {})",
                response.ticket.target.describe(),
                response.ticket.epoch,
                self.epoch
            );
            return;
        }
        match response.result {
            Ok(preview) => {
                tracing::debug!(
                    "Preview loaded: stakes {}, fee {}, payout {}",
                    preview.total_stakes,
                    preview.platform_fee,
                    preview.net_payout
                );
                self.state = FlowState::Preview {
                    target: response.ticket.target,
                    preview: Some(preview),
                };
            }
            Err(e) => {
                tracing::warn!("Preview fetch failed: {}", e);
                self.notifier
                    .notify(NotifyKind::Error, "Could not load the outcome preview");
                self.state = FlowState::Select;
            }
        }
    }

    /// Convenience wrapper: fetch and apply in one call, for hosts that do
    /// not interleave user input with the fetch.
    pub async fn load_preview(&mut self, ticket: PreviewTicket) {
        let response = self.request_preview(ticket).await;
        self.apply_preview(response);
    }

    /// Leave the preview and return to target selection. Any in-flight
    /// preview response becomes stale.
    pub fn back(&mut self) {
        if matches!(self.state, FlowState::Preview { .. }) {
            self.epoch += 1;
            self.state = FlowState::Select;
        }
    }

    /// Execute the commit against the confirmed preview.
    ///
    /// Returns `Ok(Some(outcome))` on success, `Ok(None)` when the commit
    /// failed and the flow moved to the error state, and `Err` only for
    /// contract misuse: confirming from the wrong state, submitting an
    /// invalid breakdown, or double submission.
    pub async fn confirm(
        &mut self,
        breakdown: &PaymentBreakdown,
    ) -> Result<Option<CompletionOutcome>, CheckoutError> {
        if self.confirming {
            return Err(CheckoutError::AlreadyInFlight);
        }
        let (target, preview) = match &self.state {
            FlowState::Preview {
                target,
                preview: Some(preview),
            } => (target.clone(), *preview),
            other => {
                return Err(CheckoutError::NotConfirmable {
                    state: other.name(),
                })
            }
        };
        if !breakdown.is_valid() {
            return Err(CheckoutError::InvalidBreakdown);
        }

        self.confirming = true;
        tracing::info!(
            "Session {}: committing {} ({} tokens + ${:.2})",
            self.session,
            target.describe(),
            breakdown.tokens,
            breakdown.cash_display()
        );
        let result = self.backend.commit(&self.session, &target, breakdown).await;
        self.confirming = false;

        match result {
            Ok(receipt) => {
                tracing::info!("Session {}: commit acknowledged ({})", self.session, receipt.reference);
                self.notifier.notify(NotifyKind::Success, "Confirmed");
                self.refresh_balance().await;
                self.epoch += 1;
                self.state = FlowState::Select;
                Ok(Some(CompletionOutcome {
                    winner_id: target.winner_id().cloned(),
                    preview,
                    receipt,
                }))
            }
            Err(BackendError::Rejected { reason }) => {
                tracing::warn!("Session {}: commit rejected: {}", self.session, reason);
                self.notifier.notify(NotifyKind::Error, &reason);
                // Outstanding preview tickets die with the attempt; leaving
                // the error state requires an explicit start-over or retry.
                self.epoch += 1;
                self.state = FlowState::Error { target, reason };
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Session {}: commit failed: {}", self.session, e);
                let reason = "Something went wrong - please try again".to_string();
                self.notifier.notify(NotifyKind::Error, &reason);
                self.epoch += 1;
                self.state = FlowState::Error { target, reason };
                Ok(None)
            }
        }
    }

    /// From the error state, discard the chosen target and start fresh.
    pub fn start_over(&mut self) {
        if matches!(self.state, FlowState::Error { .. }) {
            self.epoch += 1;
            self.confirming = false;
            self.state = FlowState::Select;
        }
    }

    /// From the error state, keep the chosen target and re-request its
    /// preview (the old preview may be stale by now). Returns the new
    /// ticket, or `None` when not in the error state.
    pub fn retry(&mut self) -> Option<PreviewTicket> {
        let target = match &self.state {
            FlowState::Error { target, .. } => target.clone(),
            _ => return None,
        };
        Some(self.select_target(target))
    }
}
