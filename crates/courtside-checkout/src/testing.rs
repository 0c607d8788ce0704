//! Scriptable in-memory collaborators for flow tests
//!
//! `MockBackend` pops pre-scripted responses in FIFO order; an unscripted
//! call fails loudly so tests cannot silently pass on a missing script.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use courtside_core::{BackendError, PlayerId, SessionId, TokenBalance};
use courtside_payments::PaymentBreakdown;

use crate::backend::{
    CheckoutBackend, CommitReceipt, Notifier, NotifyKind, OutcomeTarget, RewardPreview,
};

type Scripted<T> = Mutex<VecDeque<Result<T, BackendError>>>;

/// Backend double with scripted responses and a call log.
#[derive(Default)]
pub struct MockBackend {
    balances: Scripted<TokenBalance>,
    previews: Scripted<RewardPreview>,
    commits: Scripted<CommitReceipt>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_balance(&self, result: Result<TokenBalance, BackendError>) {
        self.balances.lock().unwrap().push_back(result);
    }

    pub fn push_preview(&self, result: Result<RewardPreview, BackendError>) {
        self.previews.lock().unwrap().push_back(result);
    }

    pub fn push_commit(&self, result: Result<CommitReceipt, BackendError>) {
        self.commits.lock().unwrap().push_back(result);
    }

    /// Every call made so far, in order, as "operation target" strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn pop<T>(queue: &Scripted<T>, operation: &str) -> Result<T, BackendError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::ApiError {
                    message: format!("unscripted {} call", operation),
                })
            })
    }
}

#[async_trait]
impl CheckoutBackend for MockBackend {
    async fn fetch_balance(&self, player: &PlayerId) -> Result<TokenBalance, BackendError> {
        self.record(format!("fetch_balance {}", player));
        Self::pop(&self.balances, "fetch_balance")
    }

    async fn preview_outcome(
        &self,
        session: &SessionId,
        target: &OutcomeTarget,
    ) -> Result<RewardPreview, BackendError> {
        self.record(format!("preview {} {}", session, target.describe()));
        Self::pop(&self.previews, "preview_outcome")
    }

    async fn commit(
        &self,
        session: &SessionId,
        target: &OutcomeTarget,
        breakdown: &PaymentBreakdown,
    ) -> Result<CommitReceipt, BackendError> {
        self.record(format!(
            "commit {} {} tokens={}",
            session,
            target.describe(),
            breakdown.tokens
        ));
        Self::pop(&self.commits, "commit")
    }
}

/// Notifier double counting what the user would have seen.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<(NotifyKind, String)>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> usize {
        self.count(NotifyKind::Success)
    }

    pub fn errors(&self) -> usize {
        self.count(NotifyKind::Error)
    }

    pub fn messages(&self) -> Vec<(NotifyKind, String)> {
        self.notifications.lock().unwrap().clone()
    }

    fn count(&self, kind: NotifyKind) -> usize {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}
