//! The network seam: send a JSON body, get text back or an error.

use std::future::Future;

use thiserror::Error;

/// Failure reported by a [`Transport`].
///
/// The detail strings are for logs. Only a [`Rejected`](Self::Rejected)
/// body ever reaches a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("remote rejected request with HTTP {status}")]
    Rejected { status: u16, body: String },

    /// No response arrived (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but its body could not be read.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// The error payload the service sent, if there was a non-empty one.
    pub fn error_payload(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

/// Posts a JSON body to a path of the total-calculator service.
///
/// Implementations own timeouts and connection handling. A successful
/// call returns the response body as text, untouched.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        path: &str,
        body: String,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use reqwest::header::{ACCEPT, CONTENT_TYPE};

    use super::{Transport, TransportError};
    use crate::core::InvoiceError;
    use crate::submit::ClientConfig;

    /// [`Transport`] over HTTP using `reqwest`.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpTransport {
        pub fn new(config: &ClientConfig) -> Result<Self, InvoiceError> {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| InvoiceError::Config(e.to_string()))?;

            Ok(Self {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            })
        }

        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    impl Transport for HttpTransport {
        async fn post_json(&self, path: &str, body: String) -> Result<String, TransportError> {
            let url = self.url(path);
            tracing::debug!(%url, "posting to total calculator");

            let resp = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "text/plain")
                .body(body)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = resp.status();
            let text = resp
                .text()
                .await
                .map_err(|e| TransportError::Malformed(e.to_string()))?;

            if !status.is_success() {
                return Err(TransportError::Rejected {
                    status: status.as_u16(),
                    body: text,
                });
            }

            Ok(text)
        }
    }

}
