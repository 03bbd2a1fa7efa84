use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Money is represented as an exact decimal to avoid floating-point drift.
/// Both operation amounts and running balances use this type.
pub type Amount = Decimal;

/// Format an amount as a human-readable string with at least two decimals.
/// Example: 50 -> "50.00", 12.5 -> "12.50", 0.125 -> "0.125"
pub fn format_amount(amount: Amount) -> String {
    let mut normalized = amount.normalize();
    if normalized.scale() < 2 {
        normalized.rescale(2);
    }
    normalized.to_string()
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "-3" -> -3
///
/// The sign is kept: rejecting zero or negative amounts is the ledger's job,
/// not the parser's.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat(input) => write!(f, "invalid amount format: {}", input),
        }
    }
}

impl std::error::Error for ParseAmountError {}
