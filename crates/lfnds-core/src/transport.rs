//! # Transport Trait
//!
//! Abstraction over the network call to the donation API.
//! The default implementation lives in `lfnds-rest`; hosts may plug in their
//! own (a proxying client, a recording double in tests, ...).
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                Transport (trait)                 │
//! │  ├── perform_call(method, url, key, payload)     │
//! │  ├── set_user_agent()                            │
//! │  └── user_agent()                                │
//! └──────────────────────────────────────────────────┘
//!                         ▲
//!            ┌────────────┴────────────┐
//!   ┌────────┴────────┐       ┌────────┴────────┐
//!   │  HttpTransport  │       │  host specific  │
//!   │  (lfnds-rest)   │       │   transports    │
//!   └─────────────────┘       └─────────────────┘
//! ```
//!
//! Implementations report failures as one of three categories:
//! [`ElefundsError::Transport`](crate::ElefundsError::Transport) when the
//! call never produced a response,
//! [`ElefundsError::RemoteRejected`](crate::ElefundsError::RemoteRejected)
//! for non-success statuses and
//! [`ElefundsError::Protocol`](crate::ElefundsError::Protocol) for bodies that
//! are not JSON. Retrying is up to the implementation or the host.

use crate::error::ElefundsResult;
use async_trait::async_trait;
use serde_json::Value;

/// HTTP verbs the donation API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network capability used by the facade.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a call against the donation API.
    ///
    /// # Arguments
    /// * `method` - HTTP verb
    /// * `url` - Fully qualified URL, may already carry query parameters
    /// * `hashed_key` - Credential to attach to the call
    /// * `payload` - JSON body, if any
    ///
    /// # Returns
    /// The parsed JSON response, `Value::Null` for an empty body.
    async fn perform_call(
        &self,
        method: HttpMethod,
        url: &str,
        hashed_key: &str,
        payload: Option<&Value>,
    ) -> ElefundsResult<Value>;

    /// Set the User-Agent sent with every call
    fn set_user_agent(&mut self, user_agent: String);

    /// Current User-Agent
    fn user_agent(&self) -> &str;
}

/// Type alias for a boxed transport (dynamic dispatch)
pub type BoxedTransport = Box<dyn Transport>;
