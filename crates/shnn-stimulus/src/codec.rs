//! Canonical stimulus identifier codec
//!
//! Identifiers are encoded as `Name(key=value, key=value, ...)`. Whitespace
//! around names, keys and values is ignored on input; [`StimulusCodec::encode`]
//! always emits the canonical spacing, so `encode(parse(s))` normalizes `s`.

use crate::{
    error::{Result, StimulusError},
    record::{StimulusParameter, StimulusRecord},
    StimulusIdParser, RESERVED_CHARS,
};

use log::trace;

/// Parser/encoder for the canonical identifier encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct StimulusCodec;

impl StimulusCodec {
    /// Create a new codec
    pub const fn new() -> Self {
        Self
    }

    /// Decode an identifier into a record
    pub fn decode(&self, id: &str) -> Result<StimulusRecord> {
        let trimmed = id.trim();
        let open = trimmed
            .find('(')
            .ok_or_else(|| StimulusError::malformed(id, "missing '('"))?;
        if !trimmed.ends_with(')') {
            return Err(StimulusError::malformed(id, "missing closing ')'"));
        }

        let name = trimmed[..open].trim();
        check_token(id, name, "stimulus name")?;

        let mut record = StimulusRecord::new(name);
        let body = &trimmed[open + 1..trimmed.len() - 1];
        if body.trim().is_empty() {
            return Ok(record);
        }

        for item in body.split(',') {
            let (key, value) = item.split_once('=').ok_or_else(|| {
                StimulusError::malformed(id, format!("expected key=value, found {:?}", item.trim()))
            })?;
            let key = key.trim();
            let value = value.trim();
            check_token(id, key, "parameter name")?;
            check_token(id, value, "parameter value")?;

            if record.position_of(key).is_some() {
                return Err(StimulusError::duplicate_parameter(id, key));
            }
            record.parameters.push(StimulusParameter::new(key, value));
        }

        trace!("decoded stimulus {} with {} parameters", record.name, record.len());
        Ok(record)
    }

    /// Encode a record into its canonical identifier
    pub fn encode(&self, record: &StimulusRecord) -> Result<String> {
        let id = record.to_string();
        check_token(&id, &record.name, "stimulus name")?;
        for parameter in &record.parameters {
            check_token(&id, &parameter.name, "parameter name")?;
            check_token(&id, parameter.value.as_str(), "parameter value")?;
        }
        Ok(id)
    }
}

impl StimulusIdParser for StimulusCodec {
    type Error = StimulusError;

    fn parse(&self, id: &str) -> Result<StimulusRecord> {
        self.decode(id)
    }
}

fn check_token(id: &str, token: &str, what: &str) -> Result<()> {
    if token.is_empty() {
        return Err(StimulusError::malformed(id, format!("empty {}", what)));
    }
    if token.chars().any(|c| c.is_whitespace() || RESERVED_CHARS.contains(&c)) {
        return Err(StimulusError::malformed(
            id,
            format!("{} {:?} contains whitespace or one of ( ) , =", what, token),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParameterValue;

    #[test]
    fn test_decode() {
        let codec = StimulusCodec::new();
        let record = codec.decode("Grating(contrast=50, orientation=1.57)").unwrap();
        assert_eq!(record.name, "Grating");
        assert_eq!(record.len(), 2);
        assert_eq!(record.parameters[0], StimulusParameter::new("contrast", "50"));
        assert_eq!(record.parameters[1].value, ParameterValue::from("1.57"));
    }

    #[test]
    fn test_decode_tolerates_spacing() {
        let codec = StimulusCodec::new();
        let record = codec.decode("  Grating ( contrast = 50 ,orientation=0 ) ").unwrap();
        assert_eq!(record.to_string(), "Grating(contrast=50, orientation=0)");
    }

    #[test]
    fn test_decode_without_parameters() {
        let codec = StimulusCodec::new();
        let record = codec.decode("Blank()").unwrap();
        assert!(record.is_empty());
        assert_eq!(record.name, "Blank");
    }

    #[test]
    fn test_malformed_identifiers() {
        let codec = StimulusCodec::new();
        for bad in [
            "Grating",
            "Grating(contrast=50",
            "(contrast=50)",
            "Grating(contrast)",
            "Grating(contrast=)",
            "Grating(=50)",
            "Grating(contrast=50,)",
            "Grating(contrast=5 0)",
            "Grating(contrast=(50))",
            "Drifting Grating(contrast=50)",
        ] {
            let err = codec.decode(bad).unwrap_err();
            assert!(matches!(err, StimulusError::Malformed { .. }), "{bad} -> {err:?}");
        }
    }

    #[test]
    fn test_duplicate_parameter() {
        let codec = StimulusCodec::new();
        let err = codec.decode("Grating(contrast=50, contrast=75)").unwrap_err();
        assert_eq!(
            err,
            StimulusError::duplicate_parameter("Grating(contrast=50, contrast=75)", "contrast")
        );
    }

    #[test]
    fn test_encode() {
        let codec = StimulusCodec::new();
        let record = StimulusRecord::new("Grating")
            .with_parameter("contrast", "50")
            .with_parameter("orientation", "0");
        let id = codec.encode(&record).unwrap();
        assert_eq!(id, "Grating(contrast=50, orientation=0)");
        assert_eq!(codec.decode(&id).unwrap(), record);

        let bad = StimulusRecord::new("Grating").with_parameter("contrast", "5,0");
        assert!(codec.encode(&bad).is_err());
    }
}
