//! Courtside Checkout
//!
//! The purchase / session-completion confirmation flow:
//! select -> preview -> confirm -> {done | error}.
//!
//! The flow sequences two remote operations (preview and commit) supplied
//! through the [`CheckoutBackend`] trait and maps every outcome onto an
//! explicit state. Late preview responses are discarded, commits are
//! guarded against double submission, and backend failures surface as
//! states rather than propagated errors.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use courtside_checkout::{ConfirmationFlow, LogNotifier, OutcomeTarget};
//!
//! let mut flow = ConfirmationFlow::new(backend, Arc::new(LogNotifier), session, player);
//! flow.refresh_balance().await;
//! let ticket = flow.select_target(OutcomeTarget::Draw);
//! flow.load_preview(ticket).await;
//! if let Some(outcome) = flow.confirm(&breakdown).await? {
//!     // hand off to the activity feed
//! }
//! ```

pub mod backend;
pub mod dto;
pub mod flow;
pub mod testing;

pub use backend::{
    CheckoutBackend, CommitReceipt, LogNotifier, Notifier, NotifyKind, OutcomeTarget,
    RewardPreview,
};
pub use dto::{BreakdownDto, CompletionOutcomeDto, FlowStateDto, RewardPreviewDto};
pub use flow::{CompletionOutcome, ConfirmationFlow, FlowState, PreviewResponse, PreviewTicket};
