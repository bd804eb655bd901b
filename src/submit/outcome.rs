use std::fmt;

use thiserror::Error;

use super::transport::TransportError;
use crate::core::Currency;

/// Message shown whenever the service gave no error payload of its own.
pub const UNEXPECTED_RESPONSE: &str = "Error: Unexpected response";

/// Result of one submission.
pub type SubmissionOutcome = Result<Total, SubmissionError>;

/// The computed total, as text, in the invoice's base currency.
///
/// The amount is passed through exactly as the service returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Total {
    amount: String,
    currency: Currency,
}

impl Total {
    pub fn new(amount: impl Into<String>, currency: Currency) -> Self {
        Self {
            amount: amount.into(),
            currency,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The service sent an error payload; its text is shown verbatim.
    #[error("{0}")]
    Server(String),

    /// No usable error payload. Transport detail is logged, never shown.
    #[error("{}", UNEXPECTED_RESPONSE)]
    Unexpected,
}

impl SubmissionError {
    /// Text to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Server(msg) => msg,
            Self::Unexpected => UNEXPECTED_RESPONSE,
        }
    }

    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Server(_))
    }
}

impl From<&TransportError> for SubmissionError {
    fn from(err: &TransportError) -> Self {
        match err.error_payload() {
            Some(payload) => Self::Server(payload.to_string()),
            None => Self::Unexpected,
        }
    }
}

impl From<TransportError> for SubmissionError {
    fn from(err: TransportError) -> Self {
        Self::from(&err)
    }
}
