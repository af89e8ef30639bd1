//! Nutrition calculation module
//!
//! Validates label input, converts percentages to grams and derives the
//! dry matter breakdown.

pub mod calculator;
pub mod report;
pub mod validation;

pub use calculator::{compute, compute_dry_matter_result, compute_gram_result, ComputationError};
pub use report::{format_grams, format_percent, NutritionReport, ReportLine, DEFAULT_PRECISION};
pub use validation::{validate_can_weight, validate_percentage_input, ValidationError};
