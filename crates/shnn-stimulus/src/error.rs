//! Error types for stimulus identifier handling

use thiserror::Error;

/// Result type for stimulus identifier operations
pub type Result<T> = std::result::Result<T, StimulusError>;

/// Errors that can occur while decoding or building stimulus records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StimulusError {
    /// The identifier does not follow the canonical encoding
    #[error("Malformed stimulus identifier {id:?}: {reason}")]
    Malformed {
        /// Offending identifier
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// The same parameter name appears twice in one identifier
    #[error("Duplicate parameter {name:?} in stimulus identifier {id:?}")]
    DuplicateParameter {
        /// Offending identifier
        id: String,
        /// Repeated parameter name
        name: String,
    },
}

impl StimulusError {
    /// Create a malformed identifier error
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate parameter error
    pub fn duplicate_parameter(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateParameter {
            id: id.into(),
            name: name.into(),
        }
    }
}
