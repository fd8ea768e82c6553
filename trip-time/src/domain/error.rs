//! Domain error types.
//!
//! These errors represent trip parameters that cannot describe a real
//! journey. They are raised before any network traffic happens.

/// Validation failures for a [`TripRequest`](super::TripRequest).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A parameter is NaN or infinite
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    /// Distance, speed or range is zero or negative
    #[error("{field} must be strictly positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    /// Recharge duration is negative
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the offending parameter.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonFinite { field, .. }
            | ValidationError::NonPositive { field, .. }
            | ValidationError::Negative { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NonPositive {
            field: "distance",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "distance must be strictly positive (got 0)");

        let err = ValidationError::Negative {
            field: "recharge duration",
            value: -5.0,
        };
        assert_eq!(
            err.to_string(),
            "recharge duration must not be negative (got -5)"
        );

        let err = ValidationError::NonFinite {
            field: "speed",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "speed must be a finite number (got NaN)");
        assert_eq!(err.field(), "speed");
    }
}
