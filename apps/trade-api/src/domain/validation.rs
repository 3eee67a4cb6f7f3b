//! Field validation for candidate trades.
//!
//! Every constraint is evaluated independently so that one pass reports
//! all failing fields, not just the first.

use thiserror::Error;

use super::trade::{NewTrade, constraints};

/// One or more field constraints were violated.
///
/// Carries every violation message; `Display` joins them with "; ".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", violations.join("; "))]
pub struct ValidationError {
    /// All violation messages collected in one pass.
    pub violations: Vec<String>,
}

/// Validator for candidate trades. Pure: no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeValidator;

impl TradeValidator {
    /// Create a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Check a candidate trade against all field constraints.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` carrying every failing constraint.
    pub fn validate(&self, candidate: &NewTrade) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        let ticker_len = candidate.ticker.len();
        if !(constraints::TICKER_MIN_LEN..=constraints::TICKER_MAX_LEN).contains(&ticker_len) {
            violations.push(format!(
                "ticker length must be between {} and {} characters",
                constraints::TICKER_MIN_LEN,
                constraints::TICKER_MAX_LEN
            ));
        }

        if candidate.price <= constraints::AMOUNT_MIN || candidate.price > constraints::AMOUNT_MAX
        {
            violations.push(format!(
                "price must be greater than {} and at most {}",
                constraints::AMOUNT_MIN,
                constraints::AMOUNT_MAX
            ));
        }

        if candidate.quantity <= constraints::AMOUNT_MIN
            || candidate.quantity > constraints::AMOUNT_MAX
        {
            violations.push(format!(
                "quantity must be greater than {} and at most {}",
                constraints::AMOUNT_MIN,
                constraints::AMOUNT_MAX
            ));
        }

        let broker_len = candidate.broker_id.as_str().chars().count();
        if broker_len == 0 || broker_len > constraints::BROKER_ID_MAX_LEN {
            violations.push(format!(
                "broker id must be between 1 and {} characters",
                constraints::BROKER_ID_MAX_LEN
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}
