//! Submission of validated invoices to the remote total calculator.
//!
//! The request is `POST /invoice/total` with body `{"invoice": {...}}`.
//! A success response is plain text and becomes a [`Total`]. Failures are
//! a [`SubmissionError`]: the service's own error text when it sent one,
//! otherwise a fixed generic message.
//!
//! # Example
//!
//! ```ignore
//! use invoice_total::submit::*;
//!
//! let client = SubmissionClient::from_config(&ClientConfig::from_env()?)?;
//! match client.submit_invoice(&invoice).await {
//!     Ok(total) => println!("{total}"),
//!     Err(e) => eprintln!("{}", e.message()),
//! }
//! ```

mod client;
mod config;
mod outcome;
mod payload;
mod transport;

pub use client::{SubmissionClient, submit_invoice};
pub use config::{ClientConfig, DEFAULT_TIMEOUT, ENV_API_BASE, ENV_API_TIMEOUT_SECS};
pub use outcome::{SubmissionError, SubmissionOutcome, Total, UNEXPECTED_RESPONSE};
pub use payload::{InvoicePayload, InvoiceRequest, LinePayload, TOTAL_PATH};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{Transport, TransportError};
