use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadbalError {
    /// A physical argument was outside its domain (e.g. a non-positive temperature).
    #[error("Invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A simulation configuration violated one of its invariants.
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),
    /// A calculation produced a value that cannot be represented as a finite number.
    #[error("Numeric degeneracy in {quantity}: {detail}")]
    NumericDegeneracy {
        quantity: &'static str,
        detail: String,
    },
    #[error("Could not parse scenario: {0}")]
    ConfigParse(String),
}

impl RadbalError {
    /// Shorthand for [`RadbalError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value,
            reason,
        }
    }
}

/// Convenience type for `Result<T, RadbalError>`.
pub type RadbalResult<T> = Result<T, RadbalError>;

/// Fail with [`RadbalError::InvalidArgument`] unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> RadbalResult<f64> {
    if !value.is_finite() {
        return Err(RadbalError::invalid_argument(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(RadbalError::invalid_argument(
            name,
            value,
            "must be strictly positive",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("temperature", 288.0), Ok(288.0));
        assert!(matches!(
            ensure_positive("temperature", 0.0),
            Err(RadbalError::InvalidArgument {
                name: "temperature",
                ..
            })
        ));
        assert!(ensure_positive("wavelength", -1e-6).is_err());
        assert!(ensure_positive("wavelength", f64::NAN).is_err());
        assert!(ensure_positive("wavelength", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = RadbalError::invalid_argument("time_step", -0.1, "must be strictly positive");
        assert_eq!(
            err.to_string(),
            "Invalid argument time_step=-0.1: must be strictly positive"
        );

        let err = RadbalError::InvalidConfig("time_step 2 exceeds end_year 1".to_string());
        assert!(err.to_string().contains("time_step 2 exceeds end_year 1"));
    }
}
