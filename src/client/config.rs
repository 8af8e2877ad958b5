//! Client configuration options.

use std::time::Duration;

use crate::models::{Endpoints, Environment};
use crate::{Error, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Paddle client.
///
/// Configuration is a value: every `with_*` call returns a new one, and a
/// client never changes the configuration it was built with.
///
/// # Example
///
/// ```
/// use paddle_rs::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_environment(Environment::Sandbox)
///     .with_user_agent("my-shop/1.0");
///
/// assert_eq!(config.endpoints().vendor(), "https://sandbox-vendors.paddle.com/api");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    environment: Environment,
    endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("paddle-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            environment: Environment::Production,
            endpoints: Endpoints::for_environment(Environment::Production),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `PADDLE_SANDBOX` and `PADDLE_TIMEOUT_SECS`.
    ///
    /// Unset variables keep their defaults. `PADDLE_SANDBOX` accepts
    /// `1`/`true`/`yes`/`on` (any case) as true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `PADDLE_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(flag) = std::env::var("PADDLE_SANDBOX") {
            config = config.with_sandbox(parse_flag(&flag));
        }

        if let Ok(secs) = std::env::var("PADDLE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("PADDLE_TIMEOUT_SECS must be a number of seconds, got {secs:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Switch environment. Endpoints reset to that environment's defaults,
    /// discarding any custom endpoints.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self.endpoints = Endpoints::for_environment(environment);
        self
    }

    /// Shorthand for choosing sandbox or production from a flag.
    pub fn with_sandbox(self, sandbox: bool) -> Self {
        self.with_environment(Environment::from_sandbox_flag(sandbox))
    }

    /// Send requests to custom base URLs while keeping the environment label.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// The selected environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The base URLs requests are sent to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
