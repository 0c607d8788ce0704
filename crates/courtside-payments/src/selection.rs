//! Payment Selection Controller
//!
//! Owns the user's chosen token amount and translates the three input
//! modalities (numeric entry, slider, presets) into breakdown recomputations.
//!
//! # Important Notes
//!
//! - Only valid breakdowns are published to the change callback; an
//!   overspend is shown locally but never propagated upward, so the last
//!   published valid breakdown stays authoritative for the caller.
//! - Direct numeric entry is the one path that self-corrects (clamps);
//!   slider and preset paths cannot produce out-of-range values and are
//!   stored as-is.

use std::fmt;
use std::str::FromStr;

use courtside_core::PaymentError;

use crate::calculator::{compute_breakdown, PaymentBreakdown, SplitRequest};

/// Quick-pick split presets offered next to the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Apply every usable token
    MaxTokens,
    /// Cover half the usable amount with tokens (floor)
    HalfAndHalf,
    /// Pay entirely in cash
    CashOnly,
}

/// Error returned when parsing a `Preset` from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetParseError;

impl fmt::Display for PresetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid preset (expected 'max-tokens', 'half-and-half', or 'cash-only')"
        )
    }
}

impl std::error::Error for PresetParseError {}

impl FromStr for Preset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max-tokens" => Ok(Self::MaxTokens),
            "half-and-half" => Ok(Self::HalfAndHalf),
            "cash-only" => Ok(Self::CashOnly),
            _ => Err(PresetParseError),
        }
    }
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxTokens => "max-tokens",
            Self::HalfAndHalf => "half-and-half",
            Self::CashOnly => "cash-only",
        }
    }
}

/// Callback invoked with every newly valid breakdown.
pub type OnChange = Box<dyn FnMut(&PaymentBreakdown) + Send>;

/// Stateful controller over the split calculator.
///
/// Created when the purchase UI opens, mutated on every interaction, and
/// discarded when the dialog closes or the purchase completes.
pub struct PaymentSelectionController {
    request: SplitRequest,
    tokens_to_use: i64,
    current: PaymentBreakdown,
    last_valid: PaymentBreakdown,
    on_change: Option<OnChange>,
}

impl PaymentSelectionController {
    /// Start with a cash-only selection, which is valid for any request.
    pub fn new(request: SplitRequest) -> Self {
        let initial = compute_breakdown(&request, 0);
        Self {
            request,
            tokens_to_use: 0,
            current: initial,
            last_valid: initial,
            on_change: None,
        }
    }

    /// Register the change callback and immediately publish the current
    /// valid breakdown so the caller starts in sync.
    pub fn with_on_change(mut self, mut on_change: OnChange) -> Self {
        on_change(&self.last_valid);
        self.on_change = Some(on_change);
        self
    }

    /// The breakdown for whatever is currently selected, valid or not.
    pub fn current(&self) -> &PaymentBreakdown {
        &self.current
    }

    /// The most recent breakdown that passed validation. This is what a
    /// submit action should use.
    pub fn last_valid(&self) -> &PaymentBreakdown {
        &self.last_valid
    }

    /// The breakdown a submit action may hand to the confirmation flow,
    /// or the reason the submit button is disabled.
    pub fn submission(&self) -> Result<PaymentBreakdown, PaymentError> {
        if self.current.is_valid() {
            return Ok(self.current);
        }
        if self.tokens_to_use > self.request.available_tokens {
            return Err(PaymentError::InsufficientTokens {
                required: self.tokens_to_use,
                available: self.request.available_tokens,
            });
        }
        Err(PaymentError::Overspend {
            requested: self.tokens_to_use,
            limit: self.request.max_usable_tokens(),
        })
    }

    pub fn tokens_to_use(&self) -> i64 {
        self.tokens_to_use
    }

    pub fn request(&self) -> &SplitRequest {
        &self.request
    }

    /// Replace the request (cost or balance changed) and re-clamp the
    /// stored selection into the new usable range.
    pub fn set_request(&mut self, request: SplitRequest) {
        self.request = request;
        let clamped = self.tokens_to_use.clamp(0, request.max_usable_tokens());
        self.store(clamped);
    }

    /// Direct numeric entry. Unparseable input becomes 0; the parsed value
    /// is clamped into `[0, max_usable_tokens]` before storing.
    pub fn set_from_input(&mut self, raw: &str) {
        let parsed = raw.trim().parse::<i64>().unwrap_or(0);
        let clamped = parsed.clamp(0, self.request.max_usable_tokens());
        if clamped != parsed {
            tracing::debug!(
                "Clamped numeric entry {} to {} (max usable {})",
                parsed,
                clamped,
                self.request.max_usable_tokens()
            );
        }
        self.store(clamped);
    }

    /// Slider movement. The slider's own bounds keep the value in range,
    /// so it is stored as-is and merely classified.
    pub fn set_from_slider(&mut self, value: i64) {
        self.store(value);
    }

    /// Apply a quick-pick preset.
    pub fn apply_preset(&mut self, preset: Preset) {
        let max = self.request.max_usable_tokens();
        let tokens = match preset {
            Preset::MaxTokens => max,
            Preset::HalfAndHalf => max / 2,
            Preset::CashOnly => 0,
        };
        tracing::debug!("Applying preset '{}': {} tokens", preset.as_str(), tokens);
        self.store(tokens);
    }

    fn store(&mut self, tokens_to_use: i64) {
        self.tokens_to_use = tokens_to_use;
        self.current = compute_breakdown(&self.request, tokens_to_use);
        if self.current.is_valid() {
            self.last_valid = self.current;
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(&self.current);
            }
        } else {
            tracing::debug!(
                "Withholding overspend selection from caller: {} tokens against cost {} / balance {}",
                tokens_to_use,
                self.request.service_cost,
                self.request.available_tokens
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SplitStatus;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn controller(cost: i64, balance: i64) -> PaymentSelectionController {
        PaymentSelectionController::new(SplitRequest::new(cost, balance, 0.01))
    }

    #[test]
    fn test_initial_state_is_cash_only() {
        let c = controller(150, 75);
        assert_eq!(c.tokens_to_use(), 0);
        assert!(c.current().is_valid());
        assert_eq!(c.current().cash_display(), 1.50);
    }

    #[test]
    fn test_numeric_input_clamps_instead_of_flagging() {
        let mut c = controller(150, 75);
        // 500 is over both balance and cost; input path clamps to 75
        c.set_from_input("500");
        assert_eq!(c.tokens_to_use(), 75);
        assert!(c.current().is_valid());

        c.set_from_input("-40");
        assert_eq!(c.tokens_to_use(), 0);

        // Garbage parses to 0
        c.set_from_input("7x");
        assert_eq!(c.tokens_to_use(), 0);
    }

    #[test]
    fn test_slider_value_stored_as_is() {
        let mut c = controller(150, 75);
        c.set_from_slider(60);
        assert_eq!(c.tokens_to_use(), 60);
        assert!(c.current().is_valid());
    }

    #[test]
    fn test_presets() {
        let mut c = controller(150, 75);

        c.apply_preset(Preset::MaxTokens);
        assert_eq!(c.tokens_to_use(), 75);

        c.apply_preset(Preset::HalfAndHalf);
        // floor(75 / 2) = 37
        assert_eq!(c.tokens_to_use(), 37);

        c.apply_preset(Preset::CashOnly);
        assert_eq!(c.tokens_to_use(), 0);
        assert_eq!(c.current().cash_display(), 1.50);
    }

    #[test]
    fn test_max_tokens_bounded_by_cost() {
        // Balance exceeds cost; max preset must stop at the cost
        let mut c = controller(50, 200);
        c.apply_preset(Preset::MaxTokens);
        assert_eq!(c.tokens_to_use(), 50);
        assert_eq!(c.current().cash, 0.0);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("max-tokens".parse::<Preset>().unwrap(), Preset::MaxTokens);
        assert_eq!(
            "half-and-half".parse::<Preset>().unwrap(),
            Preset::HalfAndHalf
        );
        assert!("all-in".parse::<Preset>().is_err());
        assert_eq!(Preset::CashOnly.as_str(), "cash-only");
    }

    #[test]
    fn test_invalid_selection_withheld_from_callback() {
        let published = Arc::new(AtomicI64::new(-1));
        let seen = published.clone();

        let mut c = controller(150, 75).with_on_change(Box::new(move |b| {
            seen.store(b.tokens, Ordering::SeqCst);
        }));
        // Registration publishes the initial valid selection
        assert_eq!(published.load(Ordering::SeqCst), 0);

        c.set_from_slider(60);
        assert_eq!(published.load(Ordering::SeqCst), 60);

        // Out-of-range slider value (host bug): classified, shown locally,
        // but never published
        c.set_from_slider(90);
        assert_eq!(c.current().status, SplitStatus::Overspend);
        assert_eq!(published.load(Ordering::SeqCst), 60);
        assert_eq!(c.last_valid().tokens, 60);

        // Recovery publishes again
        c.set_from_slider(75);
        assert_eq!(published.load(Ordering::SeqCst), 75);
    }

    #[test]
    fn test_submission_reports_why_submit_is_disabled() {
        let mut c = controller(150, 75);
        c.set_from_slider(60);
        assert_eq!(c.submission().unwrap().tokens, 60);

        // Over the balance
        c.set_from_slider(90);
        assert!(matches!(
            c.submission(),
            Err(PaymentError::InsufficientTokens {
                required: 90,
                available: 75
            })
        ));

        // Within the balance but over the cost
        let mut c = controller(50, 200);
        c.set_from_slider(60);
        assert!(matches!(
            c.submission(),
            Err(PaymentError::Overspend {
                requested: 60,
                limit: 50
            })
        ));
    }

    #[test]
    fn test_set_request_reclamps_selection() {
        let mut c = controller(150, 75);
        c.set_from_slider(75);

        // Balance drops after a refresh; stored selection is re-clamped
        c.set_request(SplitRequest::new(150, 40, 0.01));
        assert_eq!(c.tokens_to_use(), 40);
        assert!(c.current().is_valid());
    }
}
