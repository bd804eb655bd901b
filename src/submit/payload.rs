//! Wire format of the total-calculator request.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{Currency, Invoice};

/// Endpoint path, relative to the service base URL.
pub const TOTAL_PATH: &str = "/invoice/total";

/// Request body: `{"invoice": {...}}`.
#[derive(Debug, Serialize)]
pub struct InvoiceRequest<'a> {
    pub invoice: InvoicePayload<'a>,
}

#[derive(Debug, Serialize)]
pub struct InvoicePayload<'a> {
    /// `YYYY-MM-DD`, no time or offset.
    pub date: String,
    pub currency: Currency,
    pub lines: Vec<LinePayload<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LinePayload<'a> {
    pub description: &'a str,
    /// Sent as a JSON number with every digit of the decimal.
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub amount: Decimal,
    pub currency: Currency,
}

impl<'a> InvoiceRequest<'a> {
    pub fn from_invoice(invoice: &'a Invoice) -> Self {
        Self {
            invoice: InvoicePayload {
                date: invoice.date().format("%Y-%m-%d").to_string(),
                currency: invoice.currency(),
                lines: invoice
                    .lines()
                    .iter()
                    .map(|line| LinePayload {
                        description: line.description(),
                        amount: line.amount(),
                        currency: line.currency(),
                    })
                    .collect(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
