//! Input validation for label percentages and can weight
//!
//! Raw text from an input field is checked here before it is committed to
//! the calculator state.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{NutrientField, NutrientPercentages};

/// Highest value a single label percentage may take
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Slack allowed when summing two-decimal percentages as floats
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Integer part, optional single dot, up to two fractional digits
static PERCENTAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]{0,2})?$").expect("percentage pattern is a valid regex")
});

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid input. Please enter a number between 0 and 100 with up to 2 decimal places.")]
    InvalidFormat { field: NutrientField, value: String },

    #[error("The sum of all percentages cannot exceed 100%.")]
    PercentageOverflow { field: NutrientField, total: f64 },

    #[error("Can weight must be greater than 0.")]
    NonPositiveWeight { value: String },
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::PercentageOverflow { .. } => "percentage_overflow",
            ValidationError::NonPositiveWeight { .. } => "non_positive_weight",
        }
    }
}

/// Validate a new value for one percentage field
///
/// Returns the full percentage set with `field` replaced. `current` is left
/// untouched whether or not validation succeeds.
pub fn validate_percentage_input(
    field: NutrientField,
    raw: &str,
    current: &NutrientPercentages,
) -> Result<NutrientPercentages, ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        field,
        value: raw.to_string(),
    };

    if !PERCENTAGE_PATTERN.is_match(raw) {
        tracing::debug!(field = field.as_str(), raw, "percentage rejected: bad format");
        return Err(invalid());
    }

    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if value > MAX_PERCENTAGE {
        tracing::debug!(field = field.as_str(), value, "percentage rejected: above 100");
        return Err(invalid());
    }

    let candidate = current.with(field, value);
    let total = candidate.total();
    if total > MAX_PERCENTAGE + TOTAL_TOLERANCE {
        tracing::debug!(field = field.as_str(), total, "percentage rejected: total above 100");
        return Err(ValidationError::PercentageOverflow { field, total });
    }

    Ok(candidate)
}

/// Validate a can weight in grams
///
/// Any finite number above zero is accepted. There is no upper bound and
/// no limit on decimal places.
pub fn validate_can_weight(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight > 0.0 => Ok(weight),
        _ => {
            tracing::debug!(raw, "can weight rejected");
            Err(ValidationError::NonPositiveWeight {
                value: raw.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NutrientPercentages {
        NutrientPercentages {
            protein: 50.0,
            fat: 40.0,
            fiber: 0.0,
            moisture: 0.0,
            ash: 0.0,
        }
    }

    #[test]
    fn test_accepts_plain_and_decimal_values() {
        let current = NutrientPercentages::zero();
        for raw in ["0", "10", "100", "12.5", "12.34", "12.", "007"] {
            let result = validate_percentage_input(NutrientField::Protein, raw, &current);
            assert!(result.is_ok(), "expected {raw:?} to be accepted");
        }
        let updated = validate_percentage_input(NutrientField::Ash, "2.75", &current).unwrap();
        assert!((updated.ash - 2.75).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_format() {
        let current = NutrientPercentages::zero();
        for raw in ["12.345", "-1", "101", "abc", "", " 12", "1e2", ".5", "1.2.3", "100.01"] {
            let err = validate_percentage_input(NutrientField::Fat, raw, &current).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: NutrientField::Fat, .. }),
                "expected InvalidFormat for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        let current = NutrientPercentages::zero();
        let err = validate_percentage_input(NutrientField::Fat, "١٢", &current).unwrap_err();
        assert_eq!(err.code(), "invalid_format");
    }

    #[test]
    fn test_rejects_total_over_100() {
        let err = validate_percentage_input(NutrientField::Fiber, "20", &sample()).unwrap_err();
        match err {
            ValidationError::PercentageOverflow { field, total } => {
                assert_eq!(field, NutrientField::Fiber);
                assert!((total - 110.0).abs() < 1e-9);
            }
            other => panic!("expected PercentageOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_replacing_a_field_does_not_double_count() {
        // protein 50 -> 60 keeps the total at 100, not 150
        let updated = validate_percentage_input(NutrientField::Protein, "60", &sample()).unwrap();
        assert!((updated.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_of_exactly_100_is_accepted() {
        let current = NutrientPercentages::zero()
            .with(NutrientField::Protein, 33.33)
            .with(NutrientField::Fat, 33.33);
        let updated = validate_percentage_input(NutrientField::Moisture, "33.34", &current).unwrap();
        assert!((updated.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_current_is_not_mutated() {
        let current = sample();
        let _ = validate_percentage_input(NutrientField::Ash, "5", &current).unwrap();
        assert_eq!(current, sample());
    }

    #[test]
    fn test_can_weight() {
        assert_eq!(validate_can_weight("100.5"), Ok(100.5));
        assert_eq!(validate_can_weight(" 85 "), Ok(85.0));
        assert_eq!(validate_can_weight("0.001"), Ok(0.001));
        assert_eq!(validate_can_weight("12.3456"), Ok(12.3456));
        assert!(validate_can_weight("100000").is_ok());
    }

    #[test]
    fn test_can_weight_rejects_non_positive() {
        for raw in ["0", "-5", "0.0", "", "abc", "inf", "NaN"] {
            let err = validate_can_weight(raw).unwrap_err();
            assert!(
                matches!(err, ValidationError::NonPositiveWeight { .. }),
                "expected NonPositiveWeight for {raw:?}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = validate_can_weight("0").unwrap_err();
        assert_eq!(err.to_string(), "Can weight must be greater than 0.");
        assert_eq!(err.code(), "non_positive_weight");

        let err = validate_percentage_input(NutrientField::Fiber, "20", &sample()).unwrap_err();
        assert_eq!(err.to_string(), "The sum of all percentages cannot exceed 100%.");
    }
}
