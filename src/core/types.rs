use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::Currency;

/// A validated invoice.
///
/// Only [`validate`](super::validate) constructs this type, so holding one
/// means every rule has passed: the date is on or after
/// [`MIN_INVOICE_DATE`](super::MIN_INVOICE_DATE), there is at least one
/// line, and every line is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    date: NaiveDate,
    currency: Currency,
    lines: Vec<LineItem>,
}

impl Invoice {
    pub(crate) fn new(date: NaiveDate, currency: Currency, lines: Vec<LineItem>) -> Self {
        Self {
            date,
            currency,
            lines,
        }
    }

    /// Exchange-rate date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Base currency the total is expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }
}

/// A validated invoice line. `amount` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    description: String,
    amount: Decimal,
    currency: Currency,
}

impl LineItem {
    pub(crate) fn new(description: String, amount: Decimal, currency: Currency) -> Self {
        Self {
            description,
            amount,
            currency,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}
