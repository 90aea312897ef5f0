//! # Transport Configuration
//!
//! Timeouts and identification for the HTTP transport.

use std::time::Duration;

/// Version of this SDK, sent in the default User-Agent
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Module identifier used when the host does not set its own
pub const SDK_MODULE: &str = "elefunds-sdk";

/// Compose a User-Agent of the form `"<module> v<version>"`
pub fn user_agent(module: &str, version: &str) -> String {
    format!("{} v{}", module, version)
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Total time allowed for one call
    pub timeout: Duration,

    /// Time allowed to establish the connection
    pub connect_timeout: Duration,

    /// User-Agent sent with every call
    pub user_agent: String,
}

impl RestConfig {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: user_agent(SDK_MODULE, SDK_VERSION),
        }
    }

    /// Builder: set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builder: set the User-Agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::new()
    }
}
