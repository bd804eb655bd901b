//! The closed set of currencies an invoice and its lines may use.
//!
//! This list is the single source of truth for both validation and the
//! wire format. Adding a currency means adding a variant here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported currency, serialized as its upper-case ISO 4217 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// New Zealand Dollar
    Nzd,
    /// US Dollar
    Usd,
    /// Australian Dollar
    Aud,
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// Japanese Yen
    Jpy,
}

/// Initial base currency for a fresh draft. Never used as a fallback.
pub const DEFAULT_BASE_CURRENCY: Currency = Currency::Nzd;

/// Initial currency for a fresh line. Never used as a fallback.
pub const DEFAULT_LINE_CURRENCY: Currency = Currency::Usd;

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 6] = [
        Currency::Nzd,
        Currency::Usd,
        Currency::Aud,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
    ];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Nzd => "NZD",
            Self::Usd => "USD",
            Self::Aud => "AUD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    /// Exact, case-sensitive lookup by code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A token that is not one of [`Currency::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid enum value. Expected {}, received '{}'", expected_codes(), .received)]
pub struct UnknownCurrency {
    /// The rejected token, as given.
    pub received: String,
}

fn expected_codes() -> String {
    Currency::ALL
        .iter()
        .map(|c| format!("'{}'", c.code()))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCurrency {
            received: s.to_string(),
        })
    }
}
