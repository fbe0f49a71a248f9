//! Tuning curves over a periodic parameter

use crate::{
    error::{AnalysisError, Result},
    structure::{AnalysisDataStructure, ResultKind, Tags},
    tuning::{ParametrizationKey, TuningCurve, TuningGroup},
};

#[cfg(feature = "config")]
use crate::config::AnalysisConfig;

use log::debug;
use shnn_stimulus::StimulusIdParser;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Tuning curve whose varying parameter lives in `[0, period)`
///
/// The domain is checked once, when the curve is built, so a curve holding an
/// out-of-range stimulus can never be constructed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CyclicTuningCurve {
    #[cfg_attr(feature = "serde", serde(flatten))]
    curve: TuningCurve,
    period: f64,
}

impl CyclicTuningCurve {
    /// Cyclic curves are stored alongside plain tuning curves
    pub const KIND: ResultKind = ResultKind::TuningCurve;

    /// Wrap a tuning curve, validating every stimulus against the period
    pub fn new<P>(curve: TuningCurve, period: f64, parser: &P) -> Result<Self>
    where
        P: StimulusIdParser + ?Sized,
    {
        if !period.is_finite() || period <= 0.0 {
            return Err(AnalysisError::InvalidPeriod { period });
        }

        for id in curve.stimulus_ids() {
            let (_, varying) = curve.split_stimulus(parser, id)?;
            let value = varying.as_f64().ok_or_else(|| AnalysisError::NonNumericParameter {
                stimulus_id: id.clone(),
                value: varying.to_string(),
            })?;
            if !(0.0..period).contains(&value) {
                return Err(AnalysisError::DomainViolation { period, value });
            }
        }

        debug!(
            "validated {} stimuli of sheet {} against period {}",
            curve.len(),
            curve.sheet_name(),
            period
        );
        Ok(Self { curve, period })
    }

    /// Wrap a tuning curve using the period configured for its varying parameter
    ///
    /// Every stimulus must vary the same parameter name at the curve's
    /// parameter index.
    #[cfg(feature = "config")]
    pub fn from_config<P>(curve: TuningCurve, parser: &P, config: &AnalysisConfig) -> Result<Self>
    where
        P: StimulusIdParser + ?Sized,
    {
        let mut varying_name: Option<String> = None;
        for id in curve.stimulus_ids() {
            let (key, _) = curve.split_stimulus(parser, id)?;
            let name = varying_name.get_or_insert_with(|| key.varying_name().to_string());
            if name.as_str() != key.varying_name() {
                return Err(AnalysisError::config(format!(
                    "stimulus {} varies {:?}, other stimuli vary {:?}",
                    id,
                    key.varying_name(),
                    name
                )));
            }
        }

        let name = varying_name.ok_or_else(|| {
            AnalysisError::config("cannot infer the cyclic parameter of an empty tuning curve")
        })?;
        let period = config.period_for(&name).ok_or_else(|| {
            AnalysisError::config(format!("no period configured for parameter {:?}", name))
        })?;
        Self::new(curve, period, parser)
    }

    /// Period of the varying parameter
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Underlying tuning curve
    pub fn curve(&self) -> &TuningCurve {
        &self.curve
    }

    /// Unwrap into the underlying tuning curve
    pub fn into_inner(self) -> TuningCurve {
        self.curve
    }

    /// Group the rows into one tuning curve per parametrization
    pub fn group_by_parametrization<P>(
        &self,
        parser: &P,
    ) -> Result<HashMap<ParametrizationKey, TuningGroup>>
    where
        P: StimulusIdParser + ?Sized,
    {
        self.curve.group_by_parametrization(parser)
    }
}

impl AnalysisDataStructure for CyclicTuningCurve {
    fn kind(&self) -> ResultKind {
        Self::KIND
    }

    fn tags(&self) -> &Tags {
        self.curve.tags()
    }

    fn tags_mut(&mut self) -> &mut Tags {
        self.curve.tags_mut()
    }
}
