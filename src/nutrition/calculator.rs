//! Gram and dry matter calculations
//!
//! Callers validate inputs first; these functions trust that the can weight
//! is positive and the percentages sum to at most 100.

use thiserror::Error;

use crate::models::{Computation, DryMatterResult, GramResult, NutrientPercentages};

/// Calculation that cannot produce a defined result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("Dry matter is zero; dry matter percentages are undefined.")]
    ZeroDryMatter { dry_matter: f64 },
}

impl ComputationError {
    pub fn code(&self) -> &'static str {
        match self {
            ComputationError::ZeroDryMatter { .. } => "zero_dry_matter",
        }
    }
}

/// Grams of a nutrient in a can of `can_weight` grams
fn grams_of(can_weight: f64, percentage: f64) -> f64 {
    (can_weight * percentage) / 100.0
}

/// Scale label percentages to grams for the whole can
///
/// Carbohydrates are whatever is left of the can weight after the five label
/// nutrients, so the six fields always add back up to `can_weight`.
pub fn compute_gram_result(can_weight: f64, percentages: &NutrientPercentages) -> GramResult {
    let protein = grams_of(can_weight, percentages.protein);
    let fat = grams_of(can_weight, percentages.fat);
    let fiber = grams_of(can_weight, percentages.fiber);
    let moisture = grams_of(can_weight, percentages.moisture);
    let ash = grams_of(can_weight, percentages.ash);

    let carbohydrates = can_weight - (protein + fat + fiber + moisture + ash);

    GramResult {
        protein,
        fat,
        fiber,
        moisture,
        ash,
        carbohydrates,
    }
}

/// Rounding slack on dry matter, relative to the can weight
///
/// `can_weight * 100 / 100` can land a few ulps below `can_weight`, so an
/// all-moisture can may leave a residue this small instead of exactly zero.
const DRY_MATTER_EPSILON: f64 = 4.0 * f64::EPSILON;

/// Can weight minus moisture grams
fn dry_matter_of(grams: &GramResult, can_weight: f64) -> f64 {
    can_weight - grams.moisture
}

/// Express everything except moisture as a share of dry matter
pub fn compute_dry_matter_result(
    grams: &GramResult,
    can_weight: f64,
) -> Result<DryMatterResult, ComputationError> {
    let dry_matter = dry_matter_of(grams, can_weight);
    if dry_matter <= can_weight.abs() * DRY_MATTER_EPSILON {
        return Err(ComputationError::ZeroDryMatter { dry_matter });
    }

    let share = |value: f64| (value / dry_matter) * 100.0;

    Ok(DryMatterResult {
        protein: share(grams.protein),
        fat: share(grams.fat),
        fiber: share(grams.fiber),
        ash: share(grams.ash),
        carbohydrates: share(grams.carbohydrates),
    })
}

/// Run both calculations for one can
pub fn compute(
    can_weight: f64,
    percentages: &NutrientPercentages,
) -> Result<Computation, ComputationError> {
    let grams = compute_gram_result(can_weight, percentages);
    let dry_matter = compute_dry_matter_result(&grams, can_weight)?;

    Ok(Computation {
        can_weight,
        grams,
        dry_matter_grams: dry_matter_of(&grams, can_weight),
        dry_matter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientField;
    use proptest::prelude::*;

    fn wet_food() -> NutrientPercentages {
        NutrientPercentages {
            protein: 10.0,
            fat: 5.0,
            fiber: 1.0,
            moisture: 78.0,
            ash: 2.0,
        }
    }

    #[test]
    fn test_gram_result_for_100g_can() {
        let grams = compute_gram_result(100.0, &wet_food());
        assert!((grams.protein - 10.0).abs() < 1e-9);
        assert!((grams.fat - 5.0).abs() < 1e-9);
        assert!((grams.fiber - 1.0).abs() < 1e-9);
        assert!((grams.moisture - 78.0).abs() < 1e-9);
        assert!((grams.ash - 2.0).abs() < 1e-9);
        assert!((grams.carbohydrates - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_gram_result_scales_with_weight() {
        let grams = compute_gram_result(85.0, &wet_food());
        assert!((grams.protein - 8.5).abs() < 1e-9);
        assert!((grams.moisture - 66.3).abs() < 1e-9);
        assert!((grams.carbohydrates - 3.4).abs() < 1e-9);
    }

    #[test]
    fn test_carbohydrates_absorb_unlabelled_share() {
        let grams = compute_gram_result(200.0, &NutrientPercentages::zero());
        assert!((grams.carbohydrates - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_dry_matter_result() {
        let computation = compute(100.0, &wet_food()).unwrap();
        assert!((computation.dry_matter_grams - 22.0).abs() < 1e-9);

        let dm = computation.dry_matter;
        assert!((dm.protein - 45.45).abs() < 0.01);
        assert!((dm.fat - 22.73).abs() < 0.01);
        assert!((dm.fiber - 4.55).abs() < 0.01);
        assert!((dm.ash - 9.09).abs() < 0.01);
        assert!((dm.carbohydrates - 18.18).abs() < 0.01);
    }

    #[test]
    fn test_all_moisture_is_an_error() {
        let percentages = NutrientPercentages::zero().with(NutrientField::Moisture, 100.0);
        let grams = compute_gram_result(100.0, &percentages);
        let err = compute_dry_matter_result(&grams, 100.0).unwrap_err();
        assert!(matches!(err, ComputationError::ZeroDryMatter { .. }));
        assert_eq!(err.code(), "zero_dry_matter");

        assert!(compute(100.0, &percentages).is_err());
    }

    #[test]
    fn test_all_moisture_with_rounding_residue() {
        // 0.119 * 100 / 100 is one ulp short of 0.119
        let percentages = NutrientPercentages::zero().with(NutrientField::Moisture, 100.0);
        for can_weight in [0.119, 0.167, 0.173, 0.0007] {
            let err = compute(can_weight, &percentages).unwrap_err();
            assert_eq!(err.code(), "zero_dry_matter", "weight {can_weight}");
        }
    }

    #[test]
    fn test_small_dry_matter_still_computes() {
        let percentages = NutrientPercentages::zero()
            .with(NutrientField::Moisture, 99.99)
            .with(NutrientField::Protein, 0.01);
        let computation = compute(0.0007, &percentages).unwrap();
        assert!((computation.dry_matter.protein - 100.0).abs() < 1e-6);
    }

    fn percentages_strategy() -> impl Strategy<Value = NutrientPercentages> {
        // Five shares in hundredths that never sum past 100.00
        prop::collection::vec(0u32..=10_000, 5).prop_map(|raw| {
            let mut remaining = 10_000u32;
            let mut parts = [0f64; 5];
            for (slot, value) in parts.iter_mut().zip(raw) {
                let taken = value.min(remaining);
                remaining -= taken;
                *slot = f64::from(taken) / 100.0;
            }
            NutrientPercentages {
                protein: parts[0],
                fat: parts[1],
                fiber: parts[2],
                moisture: parts[3],
                ash: parts[4],
            }
        })
    }

    proptest! {
        #[test]
        fn test_grams_sum_to_can_weight(
            can_weight in 0.01f64..10_000.0,
            percentages in percentages_strategy(),
        ) {
            let grams = compute_gram_result(can_weight, &percentages);
            prop_assert!((grams.total() - can_weight).abs() < 1e-9 * can_weight.max(1.0));
        }

        #[test]
        fn test_dry_matter_sums_to_100(
            can_weight in 0.01f64..10_000.0,
            percentages in percentages_strategy(),
        ) {
            prop_assume!(percentages.moisture < 100.0);
            let computation = compute(can_weight, &percentages).unwrap();
            prop_assert!((computation.dry_matter.total() - 100.0).abs() < 1e-6);
        }

        #[test]
        fn test_all_moisture_never_computes(can_weight in 0.0001f64..1e6) {
            let percentages = NutrientPercentages::zero().with(NutrientField::Moisture, 100.0);
            let err = compute(can_weight, &percentages).unwrap_err();
            prop_assert!(matches!(err, ComputationError::ZeroDryMatter { .. }), "expected ZeroDryMatter, got {:?}", err);
        }
    }
}
