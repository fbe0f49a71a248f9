//! Structured stimulus records

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Literal value of a stimulus parameter
///
/// The textual form is kept exactly as it appeared in the identifier, so
/// `"0"` and `"0.0"` are distinct values. Use [`ParameterValue::as_f64`] when
/// a numeric reading is needed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterValue(String);

impl ParameterValue {
    /// Create a new parameter value from its textual form
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the literal textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the value as a float, if it is one
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }

    /// Consume the value, returning its textual form
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterValue {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ParameterValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A single named parameter of a stimulus
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StimulusParameter {
    /// Parameter name (e.g. `orientation`)
    pub name: String,
    /// Parameter value as written in the identifier
    pub value: ParameterValue,
}

impl StimulusParameter {
    /// Create a new named parameter
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for StimulusParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Parsed form of a stimulus identifier
///
/// Parameters keep the order in which the identifier lists them; analysis
/// code addresses them by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StimulusRecord {
    /// Stimulus type name (e.g. `FullfieldDriftingSinusoidalGrating`)
    pub name: String,
    /// Ordered parameters
    pub parameters: Vec<StimulusParameter>,
}

impl StimulusRecord {
    /// Create a record without parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter, builder style
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.parameters.push(StimulusParameter::new(name, value));
        self
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the record has no parameters
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter at a position
    pub fn parameter(&self, index: usize) -> Option<&StimulusParameter> {
        self.parameters.get(index)
    }

    /// Mutable parameter at a position
    pub fn parameter_mut(&mut self, index: usize) -> Option<&mut StimulusParameter> {
        self.parameters.get_mut(index)
    }

    /// Position of the parameter with the given name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// Value of the parameter with the given name
    pub fn value_of(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// Canonical serialization, `Name(key=value, key=value)`
impl fmt::Display for StimulusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for ParameterValue {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.0.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for ParameterValue {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            Ok(ParameterValue::new(raw))
        }
    }
}
