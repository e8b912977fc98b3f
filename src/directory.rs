//! Directory API client for backend communication.
//!
//! Wraps the two operations the backend offers, listing the user
//! collection and probing reachability, behind one configured base
//! endpoint with a fixed request timeout. Callers never see transport
//! detail: every failure mode collapses into a single normalized error
//! (or `false`, for the probe), and the underlying cause goes to the log
//! stream instead.

use crate::config::{Config, REQUEST_TIMEOUT};
use crate::models::User;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Fixed user-facing message for any failed list fetch.
const FETCH_FAILURE_MESSAGE: &str = "Failed to load the user directory";

/// Internal failure classification. Logged for diagnostics, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FailureKind {
    /// No response reached us.
    Network,
    /// The fixed request budget was exceeded.
    Timeout,
    /// The server answered with a non-success status.
    Server(u16),
    /// The body did not match the expected schema.
    Shape,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network unreachable"),
            FailureKind::Timeout => write!(f, "request timed out"),
            FailureKind::Server(status) => write!(f, "server returned status {}", status),
            FailureKind::Shape => write!(f, "response shape mismatch"),
        }
    }
}

/// Normalized error for a failed list fetch.
///
/// Carries only the fixed user-facing message; the failure kind it was
/// normalized from is already in the log stream.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    fn normalized() -> Self {
        Self {
            message: FETCH_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Client for the user directory backend.
///
/// The base endpoint is fixed at construction and the client performs no
/// internal retries; re-entry is the caller's concern.
pub struct DirectoryClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl DirectoryClient {
    /// Create a client against the configured base endpoint.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    /// Create a client against a custom base endpoint.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_timeout(base_url: String, timeout: Duration) -> Self {
        Self {
            base_url,
            client: Client::new(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full user collection.
    ///
    /// Succeeds with the decoded collection (possibly empty, server order
    /// preserved). Network unreachability, timeout, non-success status and
    /// body-shape mismatch all collapse into [`FetchError`]; the specific
    /// kind is logged here.
    pub async fn list_users(&self) -> Result<Vec<User>, FetchError> {
        match self.try_list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "user list fetched");
                Ok(users)
            }
            Err(kind) => {
                tracing::warn!(failure = %kind, "user list fetch failed");
                Err(FetchError::normalized())
            }
        }
    }

    async fn try_list_users(&self) -> Result<Vec<User>, FailureKind> {
        let url = format!("{}/api/users", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        if !response.status().is_success() {
            return Err(FailureKind::Server(response.status().as_u16()));
        }

        response
            .json::<Vec<User>>()
            .await
            .map_err(classify_transport_error)
    }

    /// Probe backend reachability.
    ///
    /// There is no dedicated health path; the probe reuses the list
    /// endpoint and only looks at the status line: a success status with
    /// a malformed body is still healthy. Total: every failure mode
    /// collapses to `false`, never an error.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/api/users", self.base_url);

        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => {
                let healthy = response.status().is_success();
                if !healthy {
                    tracing::warn!(
                        status = response.status().as_u16(),
                        "health probe got non-success status"
                    );
                }
                healthy
            }
            Err(err) => {
                tracing::warn!(failure = %classify_transport_error(err), "health probe failed");
                false
            }
        }
    }
}

/// Map a transport-level error onto the internal taxonomy.
fn classify_transport_error(err: reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_decode() {
        FailureKind::Shape
    } else {
        FailureKind::Network
    }
}
