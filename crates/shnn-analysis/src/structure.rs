//! Common envelope shared by all analysis results
//!
//! Every analysis result carries a [`ResultKind`] used as a storage/lookup key
//! and a set of free-form [`Tags`]. Several analyses may emit the same kind of
//! data (two different orientation analyses both produce tuning curves); they
//! share a kind so generic tooling treats them alike, and tags tell them apart
//! when a filter cannot.

use core::fmt;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of analysis results for storage and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResultKind {
    /// Response as a function of one stimulus parameter (cyclic or not)
    TuningCurve,
    /// Per-unit analog signals
    AnalogSignalList,
    /// Per-unit excitatory/inhibitory conductances
    ConductanceSignalList,
    /// Multi-sheet recording bundle
    RecordingBundle,
}

impl ResultKind {
    /// All kinds
    pub const ALL: [ResultKind; 4] = [
        ResultKind::TuningCurve,
        ResultKind::AnalogSignalList,
        ResultKind::ConductanceSignalList,
        ResultKind::RecordingBundle,
    ];

    /// Stable name used as a storage key
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResultKind::TuningCurve => "TuningCurve",
            ResultKind::AnalogSignalList => "AnalogSignalList",
            ResultKind::ConductanceSignalList => "ConductanceSignalList",
            ResultKind::RecordingBundle => "RecordingBundle",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form labels attached to an analysis result
///
/// Tags never influence the numeric payload; they only disambiguate results
/// of the same kind coming from different analyses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tags(BTreeSet<String>);

impl Tags {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag; returns `false` if it was already present
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Remove a tag; returns `true` if it was present
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    /// Check for a tag
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Check that every given tag is present
    pub fn contains_all<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter().all(|t| self.contains(t.as_ref()))
    }

    /// Iterate over tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tags are attached
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for Tags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Shared contract of every analysis result
pub trait AnalysisDataStructure {
    /// Storage/lookup classification
    fn kind(&self) -> ResultKind;

    /// Attached tags
    fn tags(&self) -> &Tags;

    /// Mutable access to the attached tags
    fn tags_mut(&mut self) -> &mut Tags;

    /// Attach a tag after construction
    fn add_tag(&mut self, tag: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        self.tags_mut().insert(tag)
    }

    /// Check whether a tag is attached
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(tag)
    }
}
