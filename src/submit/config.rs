use std::time::Duration;

use crate::core::InvoiceError;

/// Environment variable holding the service base URL.
pub const ENV_API_BASE: &str = "INVOICE_API_BASE";
/// Environment variable holding the request timeout in whole seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "INVOICE_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the total calculator lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:8080`. A trailing slash is fine.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read [`ENV_API_BASE`] and, optionally, [`ENV_API_TIMEOUT_SECS`].
    pub fn from_env() -> Result<Self, InvoiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvoiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_BASE)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| InvoiceError::Config(format!("{ENV_API_BASE} is not set")))?;

        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                InvoiceError::Config(format!(
                    "{ENV_API_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            if secs == 0 {
                return Err(InvoiceError::Config(format!(
                    "{ENV_API_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
