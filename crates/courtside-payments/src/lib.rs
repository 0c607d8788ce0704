//! Courtside Payments
//!
//! Hybrid token/cash payment splitting for club purchases and session fees.
//!
//! This crate provides:
//! - A pure split calculator (`compute_breakdown`) turning a cost, balance,
//!   and candidate token amount into a classified `PaymentBreakdown`
//! - A selection controller translating numeric entry, slider movement, and
//!   presets into recomputations, publishing only valid breakdowns
//!
//! # Example
//!
//! ```
//! use courtside_payments::{compute_breakdown, SplitRequest, SplitStatus};
//!
//! let req = SplitRequest::new(150, 75, 0.01);
//! let breakdown = compute_breakdown(&req, 75);
//! assert_eq!(breakdown.cash_display(), 0.75);
//! assert_eq!(breakdown.status, SplitStatus::Valid);
//! ```

pub mod calculator;
pub mod selection;

pub use calculator::{compute_breakdown, PaymentBreakdown, SplitRequest, SplitStatus};
pub use selection::{PaymentSelectionController, Preset, PresetParseError};
