//! Wait request configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::NamespaceScope;

/// Default time budget for a wait (5 minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default delay between cluster polls (5 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for waiting on external service availability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitConfig {
    /// Names to wait for. Each is matched as a substring of pod names.
    pub service_names: Vec<String>,

    /// The namespace to search.
    /// If `None` or empty, all namespaces are searched.
    pub namespace: Option<String>,

    /// Total time budget for the wait.
    pub timeout: Duration,

    /// Delay between polls.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a configuration for the given service names with default timing,
    /// searching all namespaces.
    #[must_use]
    pub fn new<I, S>(service_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service_names: service_names.into_iter().map(Into::into).collect(),
            namespace: None,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Restricts the search to a single namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the total time budget.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the delay between polls.
    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The namespace scope queries are restricted to.
    #[must_use]
    pub fn scope(&self) -> NamespaceScope {
        NamespaceScope::from(self.namespace.as_deref())
    }

    /// Checks the request before any polling happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no service names were given, any
    /// name is empty, or either duration is zero.
    pub fn validate(&self) -> Result<()> {
        if self.service_names.is_empty() {
            return Err(Error::invalid_argument(
                "you must provide a list of services to poll",
            ));
        }

        if self.service_names.iter().any(String::is_empty) {
            return Err(Error::invalid_argument("service names must not be empty"));
        }

        if self.timeout.is_zero() {
            return Err(Error::invalid_argument("timeout must be greater than zero"));
        }

        if self.poll_interval.is_zero() {
            return Err(Error::invalid_argument(
                "poll interval must be greater than zero",
            ));
        }

        Ok(())
    }
}
