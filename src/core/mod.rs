//! Invoice data model and validation.
//!
//! Raw input arrives as an [`InvoiceDraft`]; [`validate`] turns it into an
//! [`Invoice`] or a set of field-keyed [`FieldErrors`].

mod currency;
mod draft;
mod error;
mod types;
mod validation;

pub use currency::*;
pub use draft::*;
pub use error::*;
pub use types::*;
pub use validation::*;
