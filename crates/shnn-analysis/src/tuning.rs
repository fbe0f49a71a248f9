//! Tuning curves and grouping by parametrization
//!
//! A [`TuningCurve`] stores one value row per stimulus presentation together
//! with the encoded stimulus identifiers and the position of the parameter the
//! curve was computed against. Every other parameter is either collapsed
//! already (averaged out, e.g. phase or trial) or is a parametrization of the
//! curve (e.g. contrast for orientation tuning).
//! [`TuningCurve::group_by_parametrization`] splits the rows into one curve per
//! parametrization.

use crate::{
    error::{AnalysisError, Result},
    structure::{AnalysisDataStructure, ResultKind, Tags},
};

#[cfg(feature = "config")]
use crate::config::AnalysisConfig;

use core::fmt;
use log::{debug, trace};
use ndarray::Array2;
use shnn_stimulus::{ParameterValue, StimulusIdParser, StimulusParameter, StimulusRecord};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Marker printed in place of the varying parameter
pub const DEFAULT_WILDCARD: &str = "x";

/// Every stimulus parameter except the varying one
///
/// Two stimuli share a key exactly when they differ at most in the value of
/// the varying parameter. Consumers must treat keys as opaque; the
/// [`fmt::Display`] form is meant for labels only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParametrizationKey {
    stimulus: String,
    varying_index: usize,
    varying_name: String,
    fixed: Vec<StimulusParameter>,
}

impl ParametrizationKey {
    /// Split a parsed record into its key and the value at `index`
    ///
    /// Returns `None` if the record has no parameter at `index`.
    pub fn split(record: StimulusRecord, index: usize) -> Option<(Self, ParameterValue)> {
        if index >= record.len() {
            return None;
        }
        let StimulusRecord { name, mut parameters } = record;
        let varying = parameters.remove(index);
        let key = Self {
            stimulus: name,
            varying_index: index,
            varying_name: varying.name,
            fixed: parameters,
        };
        Some((key, varying.value))
    }

    /// Stimulus type name
    pub fn stimulus_name(&self) -> &str {
        &self.stimulus
    }

    /// Position of the varying parameter
    pub fn varying_index(&self) -> usize {
        self.varying_index
    }

    /// Name of the varying parameter
    pub fn varying_name(&self) -> &str {
        &self.varying_name
    }

    /// Parameters held fixed, in stimulus order
    pub fn fixed_parameters(&self) -> &[StimulusParameter] {
        &self.fixed
    }

    /// Value of a fixed parameter by name
    pub fn fixed_value(&self, name: &str) -> Option<&ParameterValue> {
        self.fixed.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Rebuild the full stimulus record for one value of the varying parameter
    pub fn with_value(&self, value: impl Into<ParameterValue>) -> StimulusRecord {
        let mut parameters = self.fixed.clone();
        parameters.insert(
            self.varying_index,
            StimulusParameter::new(self.varying_name.clone(), value),
        );
        StimulusRecord {
            name: self.stimulus.clone(),
            parameters,
        }
    }

    /// Render with a custom wildcard marker
    pub fn render(&self, wildcard: &str) -> String {
        self.with_value(wildcard).to_string()
    }

    /// Render with the wildcard marker of a configuration
    #[cfg(feature = "config")]
    pub fn render_with(&self, config: &AnalysisConfig) -> String {
        self.render(&config.wildcard)
    }
}

/// Renders with [`DEFAULT_WILDCARD`]

impl fmt::Display for ParametrizationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_WILDCARD))
    }
}

/// Rows of one parametrization, in presentation order
#[derive(Debug, Clone, PartialEq)]
pub struct TuningGroup {
    /// Value rows (stimuli × units)
    pub values: Array2<f64>,
    /// Varying parameter value of each row, as written in the identifier
    pub parameter_values: Vec<ParameterValue>,
}

impl TuningGroup {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.parameter_values.len()
    }

    /// Whether the group holds no rows
    pub fn is_empty(&self) -> bool {
        self.parameter_values.is_empty()
    }

    /// Number of measured units per row
    pub fn num_units(&self) -> usize {
        self.values.ncols()
    }

    /// Varying parameter values as floats, `None` if any is not numeric
    pub fn parameter_values_f64(&self) -> Option<Vec<f64>> {
        self.parameter_values.iter().map(ParameterValue::as_f64).collect()
    }
}

/// Response as a function of one stimulus parameter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TuningCurve {
    sheet_name: String,
    values: Vec<Vec<f64>>,
    stimulus_ids: Vec<String>,
    parameter_index: usize,
    tags: Tags,
}

impl TuningCurve {
    /// Kind shared by all tuning curves
    pub const KIND: ResultKind = ResultKind::TuningCurve;

    /// Create a tuning curve
    ///
    /// `values[i]` holds the per-unit measurements for `stimulus_ids[i]`; every
    /// row must cover the same units. The parameter index is checked against
    /// the parsed identifiers only when the curve is grouped.
    pub fn new(
        sheet_name: impl Into<String>,
        values: Vec<Vec<f64>>,
        stimulus_ids: Vec<String>,
        parameter_index: usize,
    ) -> Result<Self> {
        if values.len() != stimulus_ids.len() {
            return Err(AnalysisError::shape_mismatch(
                "values vs stimulus_ids",
                stimulus_ids.len(),
                values.len(),
            ));
        }

        let units = values.first().map_or(0, Vec::len);
        if let Some((row, found)) = values
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != units)
        {
            return Err(AnalysisError::shape_mismatch(
                format!("units of value row {}", row),
                units,
                found,
            ));
        }

        Ok(Self {
            sheet_name: sheet_name.into(),
            values,
            stimulus_ids,
            parameter_index,
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

    /// Sheet the data were recorded in
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Value rows, one per stimulus
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Encoded stimulus identifiers, one per value row
    pub fn stimulus_ids(&self) -> &[String] {
        &self.stimulus_ids
    }

    /// Position of the varying parameter in the parsed identifiers
    pub fn parameter_index(&self) -> usize {
        self.parameter_index
    }

    /// Number of stimulus presentations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the curve holds no presentations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of measured units per row
    pub fn num_units(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Group the rows into one tuning curve per parametrization
    ///
    /// Each identifier is parsed, the varying parameter is cut out and the
    /// remaining parameters form the [`ParametrizationKey`]. Within a group,
    /// rows and parameter values keep their original relative order. The
    /// mapping is recomputed on every call.
    pub fn group_by_parametrization<P>(
        &self,
        parser: &P,
    ) -> Result<HashMap<ParametrizationKey, TuningGroup>>
    where
        P: StimulusIdParser + ?Sized,
    {
        let units = self.num_units();
        let mut rows: HashMap<ParametrizationKey, (Vec<f64>, Vec<ParameterValue>)> = HashMap::new();

        for (row, id) in self.values.iter().zip(&self.stimulus_ids) {
            let (key, varying) = self.split_stimulus(parser, id)?;
            trace!("stimulus {} -> {} at {}", id, key, varying);

            let (flat, parameter_values) = rows.entry(key).or_default();
            flat.extend_from_slice(row);
            parameter_values.push(varying);
        }

        let mut groups = HashMap::with_capacity(rows.len());
        for (key, (flat, parameter_values)) in rows {
            let expected = parameter_values.len() * units;
            let found = flat.len();
            let values = Array2::from_shape_vec((parameter_values.len(), units), flat)
                .map_err(|_| AnalysisError::shape_mismatch("grouped value rows", expected, found))?;
            groups.insert(key, TuningGroup { values, parameter_values });
        }

        debug!(
            "grouped {} rows of sheet {} into {} parametrizations",
            self.len(),
            self.sheet_name,
            groups.len()
        );
        Ok(groups)
    }

    /// Parse one identifier and split it at the varying parameter
    pub(crate) fn split_stimulus<P>(
        &self,
        parser: &P,
        id: &str,
    ) -> Result<(ParametrizationKey, ParameterValue)>
    where
        P: StimulusIdParser + ?Sized,
    {
        let record = parser.parse(id).map_err(|e| AnalysisError::adapter(id, e))?;
        let len = record.len();
        ParametrizationKey::split(record, self.parameter_index).ok_or_else(|| {
            AnalysisError::IndexOutOfRange {
                index: self.parameter_index,
                len,
                stimulus_id: id.to_string(),
            }
        })
    }
}

impl AnalysisDataStructure for TuningCurve {
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

#[cfg(test)]
mod tests {
    use super::*;
    use shnn_stimulus::StimulusCodec;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_split_and_render() {
        let record = StimulusRecord::new("Grating")
            .with_parameter("contrast", "50")
            .with_parameter("orientation", "90")
            .with_parameter("phase", "0");
        let (key, value) = ParametrizationKey::split(record.clone(), 1).unwrap();

        assert_eq!(value, ParameterValue::from("90"));
        assert_eq!(key.stimulus_name(), "Grating");
        assert_eq!(key.varying_index(), 1);
        assert_eq!(key.varying_name(), "orientation");
        assert_eq!(key.fixed_parameters().len(), 2);
        assert_eq!(key.fixed_value("phase"), Some(&ParameterValue::from("0")));
        assert_eq!(key.fixed_value("orientation"), None);
        assert_eq!(key.to_string(), "Grating(contrast=50, orientation=x, phase=0)");
        assert_eq!(key.render("*"), "Grating(contrast=50, orientation=*, phase=0)");
        assert_eq!(key.with_value("90"), record);

        assert!(ParametrizationKey::split(record, 3).is_none());
    }

    #[test]
    fn test_new_validates_shapes() {
        let err = TuningCurve::new("V1", vec![vec![1.0]], vec![], 0).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ShapeMismatch { expected: 0, found: 1, .. }
        ));

        let err = TuningCurve::new(
            "V1",
            vec![vec![1.0, 2.0], vec![3.0]],
            ids(&["G(o=0)", "G(o=1)"]),
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ShapeMismatch { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_accessors_and_tags() {
        let mut curve = TuningCurve::new("V1_Exc", vec![vec![1.0, 2.0]], ids(&["G(o=0)"]), 0)
            .unwrap()
            .with_tags(["averaged"]);
        assert_eq!(curve.kind(), ResultKind::TuningCurve);
        assert_eq!(curve.sheet_name(), "V1_Exc");
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.num_units(), 2);
        assert_eq!(curve.parameter_index(), 0);
        assert!(curve.has_tag("averaged"));
        assert!(curve.add_tag("late"));
        assert_eq!(curve.tags().len(), 2);
    }

    #[test]
    fn test_grouping_preserves_order() {
        let curve = TuningCurve::new(
            "V1",
            vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]],
            ids(&["G(c=50, o=0)", "G(c=75, o=0)", "G(c=50, o=45)", "G(c=75, o=45)"]),
            1,
        )
        .unwrap();
        let groups = curve.group_by_parametrization(&StimulusCodec::new()).unwrap();
        assert_eq!(groups.len(), 2);

        let c50 = groups
            .iter()
            .find(|(k, _)| k.fixed_value("c").map(|v| v.as_str()) == Some("50"))
            .unwrap()
            .1;
        assert_eq!(c50.values, ndarray::array![[1.0], [3.0]]);
        assert_eq!(c50.parameter_values_f64(), Some(vec![0.0, 45.0]));
        assert_eq!(c50.num_units(), 1);
    }

    #[test]
    fn test_index_out_of_range_is_lazy() {
        let curve = TuningCurve::new("V1", vec![vec![1.0]], ids(&["G(o=0)"]), 2).unwrap();
        let err = curve.group_by_parametrization(&StimulusCodec::new()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::IndexOutOfRange { index: 2, len: 1, .. }
        ));
    }

    #[test]
    fn test_adapter_failure_propagates() {
        let curve = TuningCurve::new("V1", vec![vec![1.0]], ids(&["not an id"]), 0).unwrap();
        let err = curve.group_by_parametrization(&StimulusCodec::new()).unwrap_err();
        match err {
            AnalysisError::Adapter { stimulus_id, .. } => assert_eq!(stimulus_id, "not an id"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_curve_groups_to_nothing() {
        let curve = TuningCurve::new("V1", vec![], vec![], 0).unwrap();
        assert!(curve.is_empty());
        assert!(curve.group_by_parametrization(&StimulusCodec::new()).unwrap().is_empty());
    }
}
