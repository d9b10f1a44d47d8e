//! Unified error type for navtree.
//!
//! Each subsystem carries its own error enum (`PatternError`, `HostError`,
//! `ConfigError`); `NavError` bridges them into a single type suitable for
//! surfacing at the library boundary and mapping to CLI exit codes.
//!
//! Propagation policy:
//! - Pattern translation failures are structural configuration bugs and
//!   propagate to the caller so bad configuration stays visible.
//! - Host I/O failures are caught at the point of use inside the resolver
//!   and degrade the affected branch to empty results; they appear here only
//!   when an operation outside tree resolution (e.g. loading the settings
//!   file) fails outright.

use thiserror::Error;

use crate::config::ConfigError;
use crate::host::HostError;
use crate::pattern::PatternError;

/// Exit codes for the CLI front door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation completed.
    Success = 0,
    /// Runtime failure (host I/O, workspace access).
    Failure = 1,
    /// Bad arguments or bad configuration.
    InvalidConfiguration = 2,
}

impl ExitCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Unified error type for navtree operations.
#[derive(Debug, Error)]
pub enum NavError {
    /// A glob pattern failed to translate to a matcher.
    #[error("pattern error: {0}")]
    InvalidPattern(#[from] PatternError),

    /// The configuration document could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A host collaborator operation failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl NavError {
    /// Map this error to a CLI exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            NavError::InvalidPattern(_) => ExitCode::InvalidConfiguration,
            NavError::Config(_) => ExitCode::InvalidConfiguration,
            NavError::Host(_) => ExitCode::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod exit_code_mapping {
        use super::*;

        #[test]
        fn pattern_errors_map_to_invalid_configuration() {
            let err = NavError::InvalidPattern(PatternError::Invalid {
                pattern: "**".to_string(),
                message: "unreachable".to_string(),
            });
            assert_eq!(err.exit_code(), ExitCode::InvalidConfiguration);
            assert_eq!(err.exit_code().code(), 2);
        }

        #[test]
        fn host_errors_map_to_failure() {
            let err = NavError::Host(HostError::Io("disk on fire".to_string()));
            assert_eq!(err.exit_code(), ExitCode::Failure);
            assert_eq!(err.exit_code().code(), 1);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn pattern_error_display_includes_pattern() {
            let err = NavError::InvalidPattern(PatternError::Invalid {
                pattern: "a[".to_string(),
                message: "boom".to_string(),
            });
            assert_eq!(err.to_string(), "pattern error: invalid glob pattern 'a[': boom");
        }
    }
}
