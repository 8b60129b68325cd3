use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ActorError;

/// Free-form actor parameters from the stage manifest.
///
/// Accessors fall back to a default when the key is absent and reject values
/// of the wrong type, so a typo in a manifest surfaces as
/// `ActorError::InvalidConfiguration` instead of silently using the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorParams(Map<String, Value>);

impl ActorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, ActorError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v
                .as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| ActorError::invalid(format!("'{key}' must be a number, got {v}"))),
        }
    }

    /// Like `f32_or`, but the result must be finite and greater than zero.
    pub fn positive_f32_or(&self, key: &str, default: f32) -> Result<f32, ActorError> {
        let value = self.f32_or(key, default)?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ActorError::invalid(format!("'{key}' must be positive, got {value}")))
        }
    }

    pub fn u32_or(&self, key: &str, default: u32) -> Result<u32, ActorError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ActorError::invalid(format!("'{key}' must be an unsigned integer, got {v}"))),
        }
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, ActorError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v
                .as_str()
                .ok_or_else(|| ActorError::invalid(format!("'{key}' must be a string, got {v}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let params = ActorParams::new();
        assert_eq!(params.f32_or("speed", 10.0).unwrap(), 10.0);
        assert_eq!(params.str_or("texture", "nginz.png").unwrap(), "nginz.png");
    }

    #[test]
    fn wrong_types_are_rejected() {
        let params = ActorParams::new().with("speed", "fast").with("tiles", -3);
        assert!(matches!(params.f32_or("speed", 1.0), Err(ActorError::InvalidConfiguration(_))));
        assert!(matches!(params.u32_or("tiles", 8), Err(ActorError::InvalidConfiguration(_))));
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        let zero = ActorParams::new().with("speed", 0.0);
        let negative = ActorParams::new().with("speed", -4);
        assert!(zero.positive_f32_or("speed", 1.0).is_err());
        assert!(negative.positive_f32_or("speed", 1.0).is_err());
        assert_eq!(ActorParams::new().with("speed", 2.5).positive_f32_or("speed", 1.0).unwrap(), 2.5);
    }

    #[test]
    fn deserializes_from_json_object() {
        let params: ActorParams = serde_json::from_str(r#"{ "speed": 10, "texture": "a.png" }"#).unwrap();
        assert_eq!(params.f32_or("speed", 0.0).unwrap(), 10.0);
        assert_eq!(params.str_or("texture", "").unwrap(), "a.png");
    }
}
