//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., lira, not kuruş).
    pub amount: Decimal,
    /// Currency the amount is expressed in.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Price of `quantity` units at this unit price, saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount.saturating_mul(Decimal::from(quantity)),
            currency_code: self.currency_code.clone(),
        }
    }

    /// Format for display, e.g. `₺ 749.99`, `$ 19.00` or `12.50 AZN`.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match self.currency_code.symbol() {
            Some(symbol) => format!("{symbol} {amount:.2}"),
            None => format!("{amount:.2} {}", self.currency_code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Currency codes seen in the catalog.
///
/// Catalog data mixes ISO codes and bare symbols (`"$"`), so parsing is
/// lenient and anything unrecognised is kept verbatim as [`CurrencyCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    USD,
    TRY,
    EUR,
    GBP,
    AZN,
    RUB,
    Other(String),
}

impl CurrencyCode {
    /// Parse a currency from an ISO code or a symbol.
    ///
    /// An empty string maps to the default currency (USD).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_uppercase().as_str() {
            "" | "$" | "USD" => Self::USD,
            "TRY" | "TL" | "₺" => Self::TRY,
            "EUR" | "€" => Self::EUR,
            "GBP" | "£" => Self::GBP,
            "AZN" | "₼" => Self::AZN,
            "RUB" | "₽" => Self::RUB,
            other => Self::Other(other.to_string()),
        }
    }

    /// ISO 4217 code (or the verbatim value for unknown currencies).
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::TRY => "TRY",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::AZN => "AZN",
            Self::RUB => "RUB",
            Self::Other(code) => code,
        }
    }

    /// Prefix symbol used when formatting, if the currency has one.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::USD => Some("$"),
            Self::TRY => Some("₺"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::AZN | Self::RUB | Self::Other(_) => None,
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_string()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
