//! Stimulus identifiers for the analysis layer
//!
//! Every stimulus presentation in an experiment is named by an encoded
//! identifier string. This crate turns such strings into structured,
//! index-addressable [`StimulusRecord`]s and back. Analysis code consumes
//! the parsing step through the [`StimulusIdParser`] trait, so alternative
//! encodings can be plugged in without touching the analysis data model.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod codec;
pub mod error;
pub mod record;

// Re-export essential types
pub use codec::StimulusCodec;
pub use error::{Result, StimulusError};
pub use record::{ParameterValue, StimulusParameter, StimulusRecord};

/// Parses encoded stimulus identifiers into structured records
///
/// Implementations own the encoding. Callers treat the identifier string as
/// opaque and only ever look at the returned record.
pub trait StimulusIdParser {
    /// Error produced for identifiers the parser cannot decode
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parse a single encoded identifier
    fn parse(&self, id: &str) -> core::result::Result<StimulusRecord, Self::Error>;
}

impl<P: StimulusIdParser + ?Sized> StimulusIdParser for &P {
    type Error = P::Error;

    fn parse(&self, id: &str) -> core::result::Result<StimulusRecord, Self::Error> {
        (**self).parse(id)
    }
}

/// Characters that separate the structural parts of an encoded identifier
pub const RESERVED_CHARS: [char; 4] = ['(', ')', ',', '='];
