//! Multi-sheet recording bundles
//!
//! A [`RecordingBundle`] gathers the raw recordings of an experiment per
//! sheet: spike trains, membrane potentials and synaptic conductances, so
//! that generic tooling can consume them without knowing which analysis
//! produced them.

use crate::{
    error::Result,
    signals::{check_indexed, AnalogSignal, SpikeTrain},
    structure::{AnalysisDataStructure, ResultKind, Tags},
};

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Recordings of one sheet
///
/// Each channel is either empty (not recorded) or holds one trace per entry
/// of `indexes`, in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SheetRecording {
    indexes: Vec<usize>,
    spikes: Vec<SpikeTrain>,
    vm: Vec<AnalogSignal>,
    gsyn_e: Vec<AnalogSignal>,
    gsyn_i: Vec<AnalogSignal>,
}

impl SheetRecording {
    /// Create an empty recording over the given units
    pub fn new(indexes: Vec<usize>) -> Self {
        Self {
            indexes,
            ..Self::default()
        }
    }

    /// Attach spike trains
    pub fn with_spikes(mut self, spikes: Vec<SpikeTrain>) -> Result<Self> {
        check_channel("spike trains", &spikes, &self.indexes)?;
        self.spikes = spikes;
        Ok(self)
    }

    /// Attach membrane potentials
    pub fn with_vm(mut self, vm: Vec<AnalogSignal>) -> Result<Self> {
        check_channel("membrane potentials", &vm, &self.indexes)?;
        self.vm = vm;
        Ok(self)
    }

    /// Attach excitatory and inhibitory conductances
    pub fn with_gsyn(
        mut self,
        gsyn_e: Vec<AnalogSignal>,
        gsyn_i: Vec<AnalogSignal>,
    ) -> Result<Self> {
        check_channel("excitatory conductances", &gsyn_e, &self.indexes)?;
        check_channel("inhibitory conductances", &gsyn_i, &self.indexes)?;
        self.gsyn_e = gsyn_e;
        self.gsyn_i = gsyn_i;
        Ok(self)
    }

    /// Sheet-local unit indexes
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Spike trains, empty if not recorded
    pub fn spikes(&self) -> &[SpikeTrain] {
        &self.spikes
    }

    /// Membrane potentials, empty if not recorded
    pub fn vm(&self) -> &[AnalogSignal] {
        &self.vm
    }

    /// Excitatory conductances, empty if not recorded
    pub fn gsyn_e(&self) -> &[AnalogSignal] {
        &self.gsyn_e
    }

    /// Inhibitory conductances, empty if not recorded
    pub fn gsyn_i(&self) -> &[AnalogSignal] {
        &self.gsyn_i
    }
}

fn check_channel<T>(what: &str, traces: &[T], indexes: &[usize]) -> Result<()> {
    if traces.is_empty() {
        return Ok(());
    }
    check_indexed(what, traces, indexes)
}

/// Recordings of several sheets
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RecordingBundle {
    sheets: BTreeMap<String, SheetRecording>,
    tags: Tags,
}

impl RecordingBundle {
    /// Storage kind
    pub const KIND: ResultKind = ResultKind::RecordingBundle;

    /// Create a bundle from per-sheet recordings
    pub fn new<I, S>(sheets: I) -> Self
    where
        I: IntoIterator<Item = (S, SheetRecording)>,
        S: Into<String>,
    {
        Self {
            sheets: sheets.into_iter().map(|(name, rec)| (name.into(), rec)).collect(),
            tags: Tags::new(),
        }
    }

    /// Attach tags, builder style
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    /// Recording of one sheet
    pub fn sheet(&self, name: &str) -> Option<&SheetRecording> {
        self.sheets.get(name)
    }

    /// Names of the recorded sheets, sorted
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Iterate over all sheets
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SheetRecording)> {
        self.sheets.iter().map(|(name, rec)| (name.as_str(), rec))
    }

    /// Number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether no sheet is recorded
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl AnalysisDataStructure for RecordingBundle {
    fn kind(&self) -> ResultKind {
        Self::KIND
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }
}
