//! Tagged union over all analysis results

use crate::{
    cyclic::CyclicTuningCurve,
    recording::RecordingBundle,
    signals::{AnalogSignalList, ConductanceSignalList},
    structure::{AnalysisDataStructure, ResultKind, Tags},
    tuning::TuningCurve,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Any analysis result, for uniform storage and lookup
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum AnalysisResult {
    /// Tuning curve over an unbounded parameter
    TuningCurve(TuningCurve),
    /// Tuning curve over a periodic parameter
    CyclicTuningCurve(CyclicTuningCurve),
    /// Per-unit analog signals
    AnalogSignalList(AnalogSignalList),
    /// Per-unit conductances
    ConductanceSignalList(ConductanceSignalList),
    /// Multi-sheet recordings
    RecordingBundle(RecordingBundle),
}

impl AnalysisResult {
    /// View as a plain tuning curve, for either tuning curve variant
    pub fn as_tuning_curve(&self) -> Option<&TuningCurve> {
        match self {
            AnalysisResult::TuningCurve(curve) => Some(curve),
            AnalysisResult::CyclicTuningCurve(cyclic) => Some(cyclic.curve()),
            _ => None,
        }
    }

    /// Whether the result has the given kind and carries all the given tags
    pub fn matches<I, S>(&self, kind: ResultKind, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.kind() == kind && self.tags().contains_all(tags)
    }
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            AnalysisResult::TuningCurve($inner) => $body,
            AnalysisResult::CyclicTuningCurve($inner) => $body,
            AnalysisResult::AnalogSignalList($inner) => $body,
            AnalysisResult::ConductanceSignalList($inner) => $body,
            AnalysisResult::RecordingBundle($inner) => $body,
        }
    };
}

impl AnalysisDataStructure for AnalysisResult {
    fn kind(&self) -> ResultKind {
        dispatch!(self, inner => inner.kind())
    }

    fn tags(&self) -> &Tags {
        dispatch!(self, inner => inner.tags())
    }

    fn tags_mut(&mut self) -> &mut Tags {
        dispatch!(self, inner => inner.tags_mut())
    }
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AnalysisResult {
                fn from(value: $variant) -> Self {
                    AnalysisResult::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    TuningCurve,
    CyclicTuningCurve,
    AnalogSignalList,
    ConductanceSignalList,
    RecordingBundle,
);
