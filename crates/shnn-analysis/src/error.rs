//! Error types for the analysis layer

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Boxed error produced by a stimulus identifier parser
pub type AdapterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or grouping analysis results
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Paired sequences do not line up
    #[error("Shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Which pairing was violated
        what: String,
        /// Expected length
        expected: usize,
        /// Length actually provided
        found: usize,
    },

    /// Cyclic parameter value outside `[0, period)`
    #[error("CyclicTuningCurve with period {period}: {value} does not belong to [0, {period}) range")]
    DomainViolation {
        /// Period of the cyclic parameter
        period: f64,
        /// Offending value
        value: f64,
    },

    /// Period of a cyclic tuning curve is not a positive finite number
    #[error("Invalid period {period}: must be finite and > 0")]
    InvalidPeriod {
        /// Rejected period
        period: f64,
    },

    /// Parameter index not valid for a parsed stimulus
    #[error("Parameter index {index} out of range for stimulus {stimulus_id:?} with {len} parameters")]
    IndexOutOfRange {
        /// Requested parameter index
        index: usize,
        /// Number of parameters the stimulus actually has
        len: usize,
        /// Stimulus identifier that was parsed
        stimulus_id: String,
    },

    /// Parameter value expected to be numeric is not
    #[error("Parameter value {value:?} of stimulus {stimulus_id:?} is not a number")]
    NonNumericParameter {
        /// Stimulus identifier carrying the value
        stimulus_id: String,
        /// Literal value that failed to parse
        value: String,
    },

    /// Stimulus identifier parser failed
    #[error("{source}")]
    Adapter {
        /// Identifier handed to the parser
        stimulus_id: String,
        /// Parser error, untouched
        #[source]
        source: AdapterError,
    },

    /// Invalid signal or spike train data
    #[error("Invalid signal: {reason}")]
    InvalidSignal {
        /// Reason the signal was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config {
        /// Reason for the configuration failure
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        /// Source I/O error
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Wrap a parser failure for the given identifier
    pub fn adapter<E>(stimulus_id: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Adapter {
            stimulus_id: stimulus_id.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid signal error
    pub fn invalid_signal(reason: impl Into<String>) -> Self {
        Self::InvalidSignal {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
