//! Per-unit signal containers

use crate::{
    error::{AnalysisError, Result},
    structure::{AnalysisDataStructure, ResultKind, Tags},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Regularly sampled analog trace of a single unit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnalogSignal {
    samples: Vec<f64>,
    t_start: f64,
    sampling_period: f64,
    units: String,
}

impl AnalogSignal {
    /// Create a signal starting at `t_start` ms, sampled every `sampling_period` ms
    pub fn new(samples: Vec<f64>, t_start: f64, sampling_period: f64) -> Result<Self> {
        if !sampling_period.is_finite() || sampling_period <= 0.0 {
            return Err(AnalysisError::invalid_signal(format!(
                "sampling period must be finite and > 0, got {}",
                sampling_period
            )));
        }
        if !t_start.is_finite() {
            return Err(AnalysisError::invalid_signal(format!(
                "start time must be finite, got {}",
                t_start
            )));
        }
        Ok(Self {
            samples,
            t_start,
            sampling_period,
            units: "mV".to_string(),
        })
    }

    /// Set the physical units of the samples (default `mV`)
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Time of the first sample (ms)
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// Time between samples (ms)
    pub fn sampling_period(&self) -> f64 {
        self.sampling_period
    }

    /// End of the recorded window (ms)
    pub fn t_stop(&self) -> f64 {
        self.t_start + self.duration()
    }

    /// Length of the recorded window (ms)
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.sampling_period
    }

    /// Physical units of the samples
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of the samples, `None` for an empty signal
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        }
    }
}

/// Spike times of a single unit within a recording window
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpikeTrain {
    times: Vec<f64>,
    t_start: f64,
    t_stop: f64,
}

impl SpikeTrain {
    /// Create a spike train; times (ms) must be sorted and inside `[t_start, t_stop]`
    pub fn new(times: Vec<f64>, t_start: f64, t_stop: f64) -> Result<Self> {
        if !(t_start.is_finite() && t_stop.is_finite()) || t_stop < t_start {
            return Err(AnalysisError::invalid_signal(format!(
                "invalid spike train window [{}, {}]",
                t_start, t_stop
            )));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(AnalysisError::invalid_signal("spike times must be finite"));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(AnalysisError::invalid_signal("spike times must be sorted"));
        }
        if let Some(&t) = times.iter().find(|&&t| !(t_start..=t_stop).contains(&t)) {
            return Err(AnalysisError::invalid_signal(format!(
                "spike at {} outside window [{}, {}]",
                t, t_start, t_stop
            )));
        }
        Ok(Self { times, t_start, t_stop })
    }

    /// Spike times (ms)
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Start of the recording window (ms)
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// End of the recording window (ms)
    pub fn t_stop(&self) -> f64 {
        self.t_stop
    }

    /// Number of spikes
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the unit did not spike
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Mean firing rate in Hz, zero for an empty window
    pub fn mean_rate(&self) -> f64 {
        let window_ms = self.t_stop - self.t_start;
        if window_ms > 0.0 {
            self.times.len() as f64 * 1000.0 / window_ms
        } else {
            0.0
        }
    }
}

pub(crate) fn check_indexed<T>(what: &str, traces: &[T], indexes: &[usize]) -> Result<()> {
    if traces.len() != indexes.len() {
        return Err(AnalysisError::shape_mismatch(
            format!("{} vs indexes", what),
            indexes.len(),
            traces.len(),
        ));
    }
    Ok(())
}

/// Analog signals of a set of units from one sheet
///
/// `signals[i]` belongs to the unit `indexes[i]` of the sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnalogSignalList {
    sheet_name: String,
    signals: Vec<AnalogSignal>,
    indexes: Vec<usize>,
    tags: Tags,
}

impl AnalogSignalList {
    /// Storage kind
    pub const KIND: ResultKind = ResultKind::AnalogSignalList;

    /// Create a signal list; one index per signal
    pub fn new(
        sheet_name: impl Into<String>,
        signals: Vec<AnalogSignal>,
        indexes: Vec<usize>,
    ) -> Result<Self> {
        check_indexed("signals", &signals, &indexes)?;
        Ok(Self {
            sheet_name: sheet_name.into(),
            signals,
            indexes,
            tags: Tags::new(),
        })
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

    /// Sheet the signals were recorded in
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Signals, in index order
    pub fn signals(&self) -> &[AnalogSignal] {
        &self.signals
    }

    /// Sheet-local unit indexes
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Signal of a sheet-local unit
    pub fn signal_of(&self, unit: usize) -> Option<&AnalogSignal> {
        self.indexes
            .iter()
            .position(|&i| i == unit)
            .map(|pos| &self.signals[pos])
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl AnalysisDataStructure for AnalogSignalList {
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

/// Excitatory and inhibitory conductances of a set of units from one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConductanceSignalList {
    sheet_name: String,
    e_con: Vec<AnalogSignal>,
    i_con: Vec<AnalogSignal>,
    indexes: Vec<usize>,
    tags: Tags,
}

impl ConductanceSignalList {
    /// Storage kind
    pub const KIND: ResultKind = ResultKind::ConductanceSignalList;

    /// Create a conductance list; both collections must match the indexes
    pub fn new(
        sheet_name: impl Into<String>,
        e_con: Vec<AnalogSignal>,
        i_con: Vec<AnalogSignal>,
        indexes: Vec<usize>,
    ) -> Result<Self> {
        check_indexed("excitatory conductances", &e_con, &indexes)?;
        check_indexed("inhibitory conductances", &i_con, &indexes)?;
        Ok(Self {
            sheet_name: sheet_name.into(),
            e_con,
            i_con,
            indexes,
            tags: Tags::new(),
        })
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

    /// Sheet the conductances were recorded in
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Excitatory conductances, in index order
    pub fn e_con(&self) -> &[AnalogSignal] {
        &self.e_con
    }

    /// Inhibitory conductances, in index order
    pub fn i_con(&self) -> &[AnalogSignal] {
        &self.i_con
    }

    /// Sheet-local unit indexes
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl AnalysisDataStructure for ConductanceSignalList {
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
