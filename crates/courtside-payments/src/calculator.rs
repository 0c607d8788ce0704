//! Hybrid Payment Split Calculator
//!
//! Pure math functions for splitting a service cost between tokens and cash.
//! No I/O, no async - just deterministic calculations.
//!
//! # Units
//!
//! - Service cost and token amounts: whole tokens (i64), 100 tokens = $1.00
//! - Cash and savings: dollars (f64), rounded to cents only for display

use serde::{Deserialize, Serialize};

use courtside_core::round_cents;

/// Input for one split computation
#[derive(Debug, Clone, Copy)]
pub struct SplitRequest {
    /// Cost of the service or item (whole tokens)
    pub service_cost: i64,
    /// Payer's current token balance (whole tokens)
    pub available_tokens: i64,
    /// Dollars per token (0.01 in production)
    pub token_rate: f64,
}

impl SplitRequest {
    pub fn new(service_cost: i64, available_tokens: i64, token_rate: f64) -> Self {
        Self {
            service_cost,
            available_tokens,
            token_rate,
        }
    }

    /// Most tokens a valid selection may apply to this cost.
    pub fn max_usable_tokens(&self) -> i64 {
        self.available_tokens.min(self.service_cost).max(0)
    }
}

/// Validity of a token selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStatus {
    /// Selection is within both balance and cost
    Valid,
    /// Selection exceeds the balance, the cost, or is negative
    Overspend,
}

impl SplitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Overspend => "overspend",
        }
    }
}

/// Computed split between token-paid and cash-paid portions of a cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentBreakdown {
    /// Tokens applied to the cost (echoes the requested selection)
    pub tokens: i64,
    /// Cash owed for the remainder, in dollars (unrounded)
    pub cash: f64,
    /// Full cost expressed in dollars
    pub total_value: f64,
    /// Dollar value of the tokens applied
    pub savings: f64,
    /// Share of the cost covered by tokens, 0-100
    pub savings_pct: f64,
    /// Whether this selection could actually be submitted
    pub status: SplitStatus,
}

impl PaymentBreakdown {
    /// Cash rounded to cents for display.
    pub fn cash_display(&self) -> f64 {
        round_cents(self.cash)
    }

    /// Savings rounded to cents for display.
    pub fn savings_display(&self) -> f64 {
        round_cents(self.savings)
    }

    pub fn is_valid(&self) -> bool {
        self.status == SplitStatus::Valid
    }
}

/// Compute the token/cash breakdown for a candidate selection.
///
/// `tokens_to_use` carries no precondition: out-of-range values are
/// classified as `Overspend`, never rejected. The result is fully
/// determined by the inputs.
pub fn compute_breakdown(request: &SplitRequest, tokens_to_use: i64) -> PaymentBreakdown {
    let overspend = tokens_to_use < 0
        || tokens_to_use > request.available_tokens
        || tokens_to_use > request.service_cost;

    // Saturating: a wildly negative selection must classify as overspend,
    // not wrap the subtraction.
    let remaining_cost = request.service_cost.saturating_sub(tokens_to_use).max(0);
    let cash = remaining_cost as f64 * request.token_rate;
    let total_value = request.service_cost as f64 * request.token_rate;

    // Savings only make sense for a non-negative selection; a negative
    // selection saves nothing (and is flagged overspend anyway).
    let applied = tokens_to_use.max(0);
    let savings = applied as f64 * request.token_rate;
    let savings_pct = if request.service_cost > 0 && applied > 0 {
        (applied as f64 / request.service_cost as f64) * 100.0
    } else {
        0.0
    };

    PaymentBreakdown {
        tokens: tokens_to_use,
        cash,
        total_value,
        savings,
        savings_pct,
        status: if overspend {
            SplitStatus::Overspend
        } else {
            SplitStatus::Valid
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 0.01;

    #[test]
    fn test_exact_match_selection() {
        // 150-token cost, 75 tokens available, spend all 75
        let req = SplitRequest::new(150, 75, RATE);
        let b = compute_breakdown(&req, 75);
        assert_eq!(b.tokens, 75);
        // Remaining 75 tokens * 0.01 = $0.75
        assert_eq!(b.cash_display(), 0.75);
        assert_eq!(b.status, SplitStatus::Valid);
        assert_eq!(b.savings_pct, 50.0);
    }

    #[test]
    fn test_pure_cash_with_empty_balance() {
        // No tokens at all: cash-only is the one valid selection
        let req = SplitRequest::new(100, 0, RATE);
        let b = compute_breakdown(&req, 0);
        assert_eq!(b.tokens, 0);
        assert_eq!(b.cash_display(), 1.00);
        assert_eq!(b.status, SplitStatus::Valid);

        let b = compute_breakdown(&req, 1);
        assert_eq!(b.status, SplitStatus::Overspend);
    }

    #[test]
    fn test_overspend_beyond_cost_not_just_balance() {
        // Balance covers 60 tokens, but the item only costs 50
        let req = SplitRequest::new(50, 200, RATE);
        let b = compute_breakdown(&req, 60);
        assert_eq!(b.status, SplitStatus::Overspend);
        // Cash never goes negative even when the selection overshoots
        assert_eq!(b.cash, 0.0);
    }

    #[test]
    fn test_negative_selection_is_overspend() {
        let req = SplitRequest::new(50, 50, RATE);
        let b = compute_breakdown(&req, -1);
        assert_eq!(b.status, SplitStatus::Overspend);
        assert_eq!(b.savings, 0.0);
        assert_eq!(b.savings_pct, 0.0);
    }

    #[test]
    fn test_extreme_selections_classify_without_panicking() {
        // No precondition on the selection: even values a buggy host could
        // never legitimately produce must come back classified.
        let req = SplitRequest::new(100, 50, RATE);

        let b = compute_breakdown(&req, i64::MIN);
        assert_eq!(b.status, SplitStatus::Overspend);
        // A negative selection owes at least the full cost; cash stays
        // finite and non-negative
        assert!(b.cash >= b.total_value);
        assert!(b.cash.is_finite());
        assert_eq!(b.savings, 0.0);

        let b = compute_breakdown(&req, i64::MAX);
        assert_eq!(b.status, SplitStatus::Overspend);
        assert_eq!(b.cash, 0.0);
    }

    #[test]
    fn test_zero_cost_service() {
        let req = SplitRequest::new(0, 500, RATE);
        assert_eq!(req.max_usable_tokens(), 0);

        let b = compute_breakdown(&req, 0);
        assert_eq!(b.cash, 0.0);
        assert_eq!(b.status, SplitStatus::Valid);
        assert_eq!(b.savings_pct, 0.0);

        // Any positive selection against a free service is overspend
        let b = compute_breakdown(&req, 1);
        assert_eq!(b.status, SplitStatus::Overspend);
    }

    #[test]
    fn test_full_token_payment_zeroes_cash() {
        let req = SplitRequest::new(80, 80, RATE);
        let b = compute_breakdown(&req, 80);
        assert_eq!(b.cash, 0.0);
        assert_eq!(b.status, SplitStatus::Valid);
        assert_eq!(b.savings_pct, 100.0);
    }

    #[test]
    fn test_conservation_over_valid_range() {
        // tokens * rate + cash == service_cost * rate, within one cent
        let req = SplitRequest::new(137, 91, RATE);
        for tokens in 0..=req.max_usable_tokens() {
            let b = compute_breakdown(&req, tokens);
            assert_eq!(b.status, SplitStatus::Valid);
            let reassembled = b.tokens as f64 * RATE + b.cash;
            assert!(
                (reassembled - b.total_value).abs() < 0.01,
                "conservation broken at tokens={}",
                tokens
            );
        }
    }

    #[test]
    fn test_monotonic_savings_and_cash() {
        let req = SplitRequest::new(200, 160, RATE);
        let mut prev = compute_breakdown(&req, 0);
        for tokens in 1..=req.max_usable_tokens() {
            let b = compute_breakdown(&req, tokens);
            assert!(b.savings >= prev.savings);
            assert!(b.cash <= prev.cash);
            prev = b;
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let req = SplitRequest::new(150, 75, RATE);
        let a = compute_breakdown(&req, 40);
        let b = compute_breakdown(&req, 40);
        assert_eq!(a, b);
    }
}
