//! Error types for the Parameter Registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    #[error("value {value} out of bounds [{min:?}, {max:?}]")]
    OutOfBounds {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("duplicate parameter: {name}")]
    Duplicate { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_display() {
        let err = RegistryError::UnknownParameter {
            name: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "unknown parameter: foo");
    }
}
