//! The working currency and its display formatting.
//!
//! divvy tracks a single display currency per ledger. There is no conversion or exchange-rate
//! handling anywhere in the program; the currency only affects how amounts are rendered.

use crate::model::Amount;
use rust_decimal::prelude::ToPrimitive;

/// The display currency for a ledger. Stored in `config.json` and changed with
/// `divvy currency --set CODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Cad,
    Aud,
    Cny,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    /// Every supported currency, in menu order.
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
        Currency::Cad,
        Currency::Aud,
        Currency::Cny,
    ];

    /// The ISO 4217 code, e.g. `USD`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Cny => "CNY",
        }
    }

    /// The symbol used when formatting amounts, e.g. `$`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
            Currency::Cny => "¥",
        }
    }

    /// The human-readable name, e.g. `US Dollar`.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Inr => "Indian Rupee",
            Currency::Cad => "Canadian Dollar",
            Currency::Aud => "Australian Dollar",
            Currency::Cny => "Chinese Yuan",
        }
    }

    /// Formats an amount for display with the currency symbol, two decimal places and thousands
    /// separators. The sign comes before the symbol: `-€1,250.00`.
    pub fn format(&self, amount: Amount) -> String {
        let (sign, value) = if amount.is_negative() {
            ("-", amount.abs())
        } else {
            ("", amount)
        };
        format!(
            "{sign}{}{}",
            self.symbol(),
            format_num::format_num!(",.2", value.value().to_f64().unwrap_or_default())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_codes_and_symbols() {
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Cad.symbol(), "C$");
        assert_eq!(Currency::Eur.name(), "Euro");
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::from_str("INR").unwrap(), Currency::Inr);
        assert!(Currency::from_str("XYZ").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Currency::Aud).unwrap();
        assert_eq!(json, "\"AUD\"");
        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Currency::Aud);
    }

    #[test]
    fn test_format_positive() {
        let amount = Amount::from_cents(125_000);
        assert_eq!(Currency::Usd.format(amount), "$1,250.00");
    }

    #[test]
    fn test_format_negative_sign_before_symbol() {
        let amount = Amount::from_cents(-4_550);
        assert_eq!(Currency::Eur.format(amount), "-€45.50");
    }

    #[test]
    fn test_format_two_character_symbol() {
        let amount = Amount::from_cents(999);
        assert_eq!(Currency::Cad.format(amount), "C$9.99");
    }

    #[test]
    fn test_default_is_usd() {
        assert_eq!(Currency::default(), Currency::Usd);
    }
}
