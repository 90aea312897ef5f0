//! # SDK Error Types
//!
//! Typed error handling for the elefunds SDK.
//! Every fallible operation returns `Result<T, ElefundsError>`.
//!
//! Each error carries a stable numeric code (see [`codes`]) so that hosts can
//! branch on it without parsing messages.

use thiserror::Error;

/// Stable error codes.
///
/// The first four values match the ones earlier elefunds SDKs reported, so
/// existing integrations can keep matching on them.
pub mod codes {
    /// `clientId` or `apiKey` missing when the hashed key is requested.
    pub const CREDENTIALS_MISSING: u64 = 1_347_889_008_107;
    /// Donation implementation name was never registered.
    pub const UNKNOWN_DONATION_IMPLEMENTATION: u64 = 1_347_893_442_819;
    /// Receiver implementation name was never registered.
    pub const UNKNOWN_RECEIVER_IMPLEMENTATION: u64 = 1_347_893_442_820;
    /// Countrycode is not exactly two characters.
    pub const INVALID_COUNTRYCODE: u64 = 1_347_965_897;

    /// No transport attached to the configuration.
    pub const TRANSPORT_MISSING: u64 = 1_347_965_901;
    /// No view attached to the configuration.
    pub const VIEW_MISSING: u64 = 1_347_965_902;
    /// Facade used before a configuration was bound.
    pub const CONFIGURATION_NOT_BOUND: u64 = 1_347_965_903;
    /// Settings source (environment, TOML) is missing values or malformed.
    pub const SETTINGS_INVALID: u64 = 1_347_965_904;
    /// Bound configuration is not of the requested concrete type.
    pub const CONFIGURATION_TYPE_MISMATCH: u64 = 1_347_965_905;

    /// Connection, DNS, TLS or timeout failure.
    pub const TRANSPORT_FAILED: u64 = 1_348_046_880;
    /// Remote API answered with a non-success status.
    pub const REMOTE_REJECTED: u64 = 1_348_046_881;
    /// Remote API answered with a body we cannot interpret.
    pub const MALFORMED_RESPONSE: u64 = 1_348_046_882;

    /// Template could not be located.
    pub const TEMPLATE_NOT_FOUND: u64 = 1_348_046_890;
    /// Template references a variable that was never assigned.
    pub const TEMPLATE_VARIABLE_MISSING: u64 = 1_348_046_891;

    /// Donation record failed validation before submission.
    pub const INVALID_DONATION: u64 = 1_348_046_895;
}

/// Coarse error category, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Transport,
    RemoteRejected,
    Protocol,
    View,
    State,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::RemoteRejected => "remote-rejected",
            ErrorKind::Protocol => "protocol",
            ErrorKind::View => "view",
            ErrorKind::State => "state",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for all SDK operations
#[derive(Debug, Error)]
pub enum ElefundsError {
    /// Missing or invalid required configuration (credentials, implementations, collaborators)
    #[error("Configuration error [{code}]: {message}")]
    Configuration { code: u64, message: String },

    /// Argument rejected by a validating setter or a model check
    #[error("Invalid argument [{code}]: {message}")]
    Validation { code: u64, message: String },

    /// Network/connection failure talking to the donation API
    #[error("Transport error: {message}")]
    Transport { message: String, details: String },

    /// Donation API answered with a non-success status
    #[error("Remote API rejected the request with HTTP {status}")]
    RemoteRejected { status: u16, body: String },

    /// Response body could not be interpreted
    #[error("Protocol error: {message}")]
    Protocol {
        message: String,
        details: Option<String>,
    },

    /// Template lookup or rendering failed
    #[error("View error [{code}]: {message}")]
    View { code: u64, message: String },

    /// Operation invoked before the required binding
    #[error("State error [{code}]: {message}")]
    State { code: u64, message: String },
}

impl ElefundsError {
    pub fn configuration(code: u64, message: impl Into<String>) -> Self {
        ElefundsError::Configuration {
            code,
            message: message.into(),
        }
    }

    pub fn validation(code: u64, message: impl Into<String>) -> Self {
        ElefundsError::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>, details: impl Into<String>) -> Self {
        ElefundsError::Transport {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn protocol(message: impl Into<String>, details: Option<String>) -> Self {
        ElefundsError::Protocol {
            message: message.into(),
            details,
        }
    }

    pub fn view(code: u64, message: impl Into<String>) -> Self {
        ElefundsError::View {
            code,
            message: message.into(),
        }
    }

    pub fn state(code: u64, message: impl Into<String>) -> Self {
        ElefundsError::State {
            code,
            message: message.into(),
        }
    }

    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElefundsError::Configuration { .. } => ErrorKind::Configuration,
            ElefundsError::Validation { .. } => ErrorKind::Validation,
            ElefundsError::Transport { .. } => ErrorKind::Transport,
            ElefundsError::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            ElefundsError::Protocol { .. } => ErrorKind::Protocol,
            ElefundsError::View { .. } => ErrorKind::View,
            ElefundsError::State { .. } => ErrorKind::State,
        }
    }

    /// Returns the stable numeric code of this error
    pub fn code(&self) -> u64 {
        match self {
            ElefundsError::Configuration { code, .. }
            | ElefundsError::Validation { code, .. }
            | ElefundsError::View { code, .. }
            | ElefundsError::State { code, .. } => *code,
            ElefundsError::Transport { .. } => codes::TRANSPORT_FAILED,
            ElefundsError::RemoteRejected { .. } => codes::REMOTE_REJECTED,
            ElefundsError::Protocol { .. } => codes::MALFORMED_RESPONSE,
        }
    }

    /// Diagnostic text beyond the message, if the failure produced any
    pub fn additional_information(&self) -> Option<String> {
        match self {
            ElefundsError::Transport { details, .. } => Some(details.clone()),
            ElefundsError::RemoteRejected { status, body } => {
                Some(format!("HTTP {}: {}", status, body))
            }
            ElefundsError::Protocol { details, .. } => details.clone(),
            _ => None,
        }
    }

    /// Returns true if repeating the same call may succeed.
    ///
    /// The SDK never retries on its own; this is a hint for hosts.
    pub fn is_retryable(&self) -> bool {
        match self {
            ElefundsError::Transport { .. } => true,
            ElefundsError::RemoteRejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for SDK operations
pub type ElefundsResult<T> = Result<T, ElefundsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ElefundsError::transport("connect failed", "dns error").is_retryable());
        assert!(ElefundsError::RemoteRejected {
            status: 503,
            body: "maintenance".into()
        }
        .is_retryable());
        assert!(!ElefundsError::RemoteRejected {
            status: 403,
            body: "forbidden".into()
        }
        .is_retryable());
        assert!(!ElefundsError::validation(codes::INVALID_COUNTRYCODE, "bad").is_retryable());
    }

    #[test]
    fn test_codes_and_kinds() {
        let err = ElefundsError::configuration(codes::CREDENTIALS_MISSING, "missing");
        assert_eq!(err.code(), 1347889008107);
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = ElefundsError::protocol("not json", None);
        assert_eq!(err.code(), codes::MALFORMED_RESPONSE);
        assert_eq!(err.kind().as_str(), "protocol");
    }

    #[test]
    fn test_additional_information() {
        let err = ElefundsError::RemoteRejected {
            status: 401,
            body: "{\"error\":\"bad key\"}".into(),
        };
        assert_eq!(
            err.additional_information().as_deref(),
            Some("HTTP 401: {\"error\":\"bad key\"}")
        );
        assert_eq!(err.kind().to_string(), "remote-rejected");

        let err = ElefundsError::transport("request failed", "operation timed out");
        assert_eq!(
            err.additional_information().as_deref(),
            Some("operation timed out")
        );

        assert!(ElefundsError::state(codes::CONFIGURATION_NOT_BOUND, "unbound")
            .additional_information()
            .is_none());
    }
}
