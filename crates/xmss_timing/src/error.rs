use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Keygen,
    Sign,
    Verify,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keygen => "keygen",
            Self::Sign => "signing",
            Self::Verify => "verification",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-zero status code returned by a signature backend call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BackendStatus(pub i32);

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationFailure {
    Rejected(BackendStatus),
    LengthMismatch { expected: usize, actual: usize },
    ContentMismatch { offset: usize },
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(status) => {
                write!(f, "signature rejected ({status})")
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "recovered message length {actual}, expected {expected}"
            ),
            Self::ContentMismatch { offset } => write!(
                f,
                "recovered message differs from original at byte {offset}"
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to allocate {bytes} bytes for {what}")]
    Resource { what: &'static str, bytes: usize },

    #[error("no signature backend linked: {0}")]
    BackendUnavailable(&'static str),

    #[error("random source failed: {0}")]
    Randomness(String),

    #[error("{phase} failed in trial {trial} ({status})")]
    CryptoOperation {
        phase: Phase,
        trial: usize,
        status: BackendStatus,
    },

    #[error(
        "{phase} in trial {trial} reported {len} bytes for a {capacity}-byte \
         buffer"
    )]
    MalformedOutput {
        phase: Phase,
        trial: usize,
        len: usize,
        capacity: usize,
    },

    #[error("verification failed in trial {trial}: {reason}")]
    Verification {
        trial: usize,
        reason: VerificationFailure,
    },
}

impl HarnessError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::CryptoOperation { phase, .. }
            | Self::MalformedOutput { phase, .. } => Some(*phase),
            Self::Verification { .. } => Some(Phase::Verify),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BackendStatus, HarnessError, Phase, VerificationFailure,
    };

    #[test]
    fn crypto_error_names_phase_and_trial() {
        let err = HarnessError::CryptoOperation {
            phase: Phase::Sign,
            trial: 3,
            status: BackendStatus(-1),
        };
        assert_eq!(err.to_string(), "signing failed in trial 3 (status -1)");
        assert_eq!(err.phase(), Some(Phase::Sign));
    }

    #[test]
    fn verification_error_names_reason() {
        let err = HarnessError::Verification {
            trial: 7,
            reason: VerificationFailure::ContentMismatch { offset: 5 },
        };
        assert_eq!(
            err.to_string(),
            "verification failed in trial 7: recovered message differs \
             from original at byte 5"
        );
        assert_eq!(err.phase(), Some(Phase::Verify));
    }

    #[test]
    fn configuration_error_has_no_phase() {
        let err = HarnessError::configuration("iterations must be positive");
        assert_eq!(err.phase(), None);
        assert_eq!(
            err.to_string(),
            "configuration error: iterations must be positive"
        );
    }
}
