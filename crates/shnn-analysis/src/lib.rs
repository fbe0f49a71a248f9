//! Typed analysis results for neuromorphic experiments
//!
//! This crate defines the data structures analyses hand to storage, querying
//! and plotting: tuning curves (with the grouping of stimulus presentations
//! into one curve per parametrization), cyclic tuning curves, per-unit signal
//! lists and multi-sheet recording bundles. All of them share a common
//! envelope, a [`ResultKind`] plus free-form [`Tags`].
//!
//! Stimulus identifiers are decoded through the
//! [`StimulusIdParser`](shnn_stimulus::StimulusIdParser) trait; the canonical
//! [`StimulusCodec`](shnn_stimulus::StimulusCodec) is re-exported for
//! convenience.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export stimulus types used in the public API
pub use shnn_stimulus::{
    ParameterValue, StimulusCodec, StimulusError, StimulusIdParser, StimulusParameter,
    StimulusRecord,
};

// Core modules
pub mod error;
pub mod structure;

// Result types
pub mod cyclic;
pub mod recording;
pub mod result;
pub mod signals;
pub mod tuning;

#[cfg(feature = "config")]
pub mod config;

// Re-export essential types
pub use cyclic::CyclicTuningCurve;
pub use error::{AnalysisError, Result};
pub use recording::{RecordingBundle, SheetRecording};
pub use result::AnalysisResult;
pub use signals::{AnalogSignal, AnalogSignalList, ConductanceSignalList, SpikeTrain};
pub use structure::{AnalysisDataStructure, ResultKind, Tags};
pub use tuning::{ParametrizationKey, TuningCurve, TuningGroup, DEFAULT_WILDCARD};

#[cfg(feature = "config")]
pub use config::AnalysisConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_integration() {
        // Every concrete result reports the kind it is stored under
        assert_eq!(TuningCurve::KIND, ResultKind::TuningCurve);
        assert_eq!(CyclicTuningCurve::KIND, TuningCurve::KIND);
        assert_eq!(AnalogSignalList::KIND, ResultKind::AnalogSignalList);
        assert_eq!(ConductanceSignalList::KIND, ResultKind::ConductanceSignalList);
        assert_eq!(RecordingBundle::KIND, ResultKind::RecordingBundle);
    }
}
