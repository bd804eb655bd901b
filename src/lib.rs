//! # invoice-total
//!
//! Multi-currency invoice validation and submission to a remote total
//! calculator.
//!
//! An invoice has a date, a base currency and one or more lines, each with
//! its own currency. Raw input is validated into a typed [`Invoice`] or a
//! set of field-keyed errors; a validated invoice can then be submitted,
//! and the service answers with the total in the base currency.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Conversion math is
//! done by the remote service, never here.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use invoice_total::core::*;
//! use rust_decimal_macros::dec;
//!
//! let draft = InvoiceDraft::new()
//!     .date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
//!     .currency(Currency::Nzd)
//!     .add_line(LineDraft::new("Design work", dec!(100), Currency::Usd))
//!     .add_line(LineDraft::blank().description("Hosting"));
//!
//! let errors = validate(&draft).unwrap_err();
//! assert_eq!(errors.get("lines[1].amount"), Some("Amount is required"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Currencies, drafts, validated invoice types, validation |
//! | `submit` | Wire payload, `Transport` seam, submission client and outcomes |
//! | `http` | `reqwest`-backed `HttpTransport` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "submit")]
pub mod submit;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
