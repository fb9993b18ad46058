//! Operation outcome sum type returned by every registrar operation.
//!
//! The registrar never raises to its caller: identity and profile-store
//! failures are folded into this type so request handlers only branch on
//! the outcome and display the message field.

use serde::{Deserialize, Serialize};

/// Result of a registrar operation.
///
/// `PartialFailure` reports the one inconsistency the registration saga
/// cannot repair on its own: the credential write committed, the profile
/// write failed, and the compensating credential delete failed too. A
/// caller seeing it should retry the profile step rather than the whole
/// registration.
///
/// # Examples
/// ```
/// use backend::domain::OperationOutcome;
///
/// let outcome = OperationOutcome::failure("email already in use");
/// assert!(!outcome.is_success());
/// assert_eq!(outcome.message(), Some("email already in use"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OperationOutcome {
    /// The operation completed; no payload beyond the marker.
    Success,
    /// The operation failed; `message` is the underlying service's text.
    Failure {
        /// Human-readable failure message, surfaced verbatim.
        message: String,
    },
    /// The credential committed but the profile record is missing.
    PartialFailure {
        /// Human-readable description of the stranded-credential state.
        message: String,
    },
}

impl OperationOutcome {
    /// Build a `Failure` outcome from any message-like value.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Build a `PartialFailure` outcome from any message-like value.
    pub fn partial_failure(message: impl Into<String>) -> Self {
        Self::PartialFailure {
            message: message.into(),
        }
    }

    /// Whether the operation completed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } | Self::PartialFailure { message } => {
                Some(message.as_str())
            }
        }
    }
}
