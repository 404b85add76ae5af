//! Error types for contacts-core
//!
//! Errors fall into two groups:
//!
//! - **Recoverable**: bad phone/email input and bad selections. The shell
//!   reports these and carries on; the store is never modified.
//! - **Fatal**: unreadable or malformed contact documents, IO failures and
//!   bad configuration. These end the process with a non-zero exit code.

use std::path::Path;

use thiserror::Error;

/// Core error type for contact book operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Phone number does not match `+91` followed by 10 digits
    #[error("Invalid phone number. Please enter a valid phone number with +91 and 10 digits.")]
    InvalidPhone(String),

    /// Email address does not match the accepted pattern
    #[error("Invalid email address. Please enter a valid email.")]
    InvalidEmail(String),

    /// Selection text is not an integer
    #[error("Please enter a valid number.")]
    InvalidNumber(String),

    /// Selection is an integer outside `1..=len`
    #[error("Invalid choice!")]
    InvalidChoice { position: i64, len: usize },

    /// Contact document exists but does not hold a list of contacts
    #[error("Malformed contacts file {path}: {reason}")]
    MalformedData { path: String, reason: String },

    /// Filesystem failure while reading or writing the contact document
    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// Configuration value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),
}

impl Error {
    /// Create an IO error for the given path.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Create a malformed data error for the given path.
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::MalformedData {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the shell can report this error and keep going.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidPhone(_)
                | Self::InvalidEmail(_)
                | Self::InvalidNumber(_)
                | Self::InvalidChoice { .. }
        )
    }

    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPhone(_)
            | Self::InvalidEmail(_)
            | Self::InvalidNumber(_)
            | Self::InvalidChoice { .. } => 1,
            Self::Io { .. } => 2,
            Self::MalformedData { .. } | Self::InvalidConfig(_) | Self::ConfigParse(_) => 3,
        }
    }
}

/// Result type alias for contacts-core operations
pub type Result<T> = std::result::Result<T, Error>;
