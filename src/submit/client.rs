use tracing::{debug, info, warn};

use super::outcome::{SubmissionError, SubmissionOutcome, Total};
use super::payload::{InvoiceRequest, TOTAL_PATH};
use super::transport::Transport;
use crate::core::Invoice;

/// Send a validated invoice to the total calculator and classify the result.
///
/// The invoice is not re-validated. Nothing is cached or retried; each
/// call is independent.
pub async fn submit_invoice<T: Transport>(
    transport: &T,
    invoice: &Invoice,
) -> SubmissionOutcome {
    let body = match InvoiceRequest::from_invoice(invoice).to_json() {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "failed to encode invoice request");
            return Err(SubmissionError::Unexpected);
        }
    };

    debug!(
        currency = %invoice.currency(),
        date = %invoice.date(),
        lines = invoice.lines().len(),
        "submitting invoice"
    );

    match transport.post_json(TOTAL_PATH, body).await {
        Ok(text) => {
            info!(total = %text, currency = %invoice.currency(), "invoice total received");
            Ok(Total::new(text, invoice.currency()))
        }
        Err(err) => {
            let failure = SubmissionError::from(&err);
            match &failure {
                SubmissionError::Server(msg) => {
                    warn!(message = %msg, "total calculator reported an error")
                }
                SubmissionError::Unexpected => {
                    warn!(error = %err, "invoice submission failed")
                }
            }
            Err(failure)
        }
    }
}

/// A [`Transport`] bound to [`submit_invoice`].
///
/// Holds no state besides the transport, so it can be shared freely
/// between concurrent submissions.
#[derive(Debug, Clone)]
pub struct SubmissionClient<T> {
    transport: T,
}

impl<T: Transport> SubmissionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit_invoice(&self, invoice: &Invoice) -> SubmissionOutcome {
        submit_invoice(&self.transport, invoice).await
    }
}

#[cfg(feature = "http")]
impl SubmissionClient<super::transport::HttpTransport> {
    /// HTTP client for the service described by `config`.
    pub fn from_config(config: &super::ClientConfig) -> Result<Self, crate::core::InvoiceError> {
        Ok(Self::new(super::transport::HttpTransport::new(config)?))
    }
}
