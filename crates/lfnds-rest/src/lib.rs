//! # lfnds-rest
//!
//! Default HTTPS transport for the elefunds donation SDK.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lfnds_core::{HttpMethod, Transport};
//! use lfnds_rest::HttpTransport;
//!
//! let transport = HttpTransport::new()?;
//!
//! let receivers = transport
//!     .perform_call(HttpMethod::Get, "https://connect.elefunds.de/receivers/for/1001", &hashed_key, None)
//!     .await?;
//! ```

pub mod config;
pub mod http;

// Re-exports
pub use config::{user_agent, RestConfig, SDK_MODULE, SDK_VERSION};
pub use http::HttpTransport;
