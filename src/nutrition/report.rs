//! Display formatting for calculation results
//!
//! Values are rendered with a fixed number of decimals and a unit suffix,
//! in the order the label lists them.

use std::fmt;

use serde::Serialize;

use crate::models::{Computation, NutrientField};

/// Decimals shown unless configured otherwise
pub const DEFAULT_PRECISION: usize = 2;

const CARBOHYDRATES_KEY: &str = "carbohydrates";
const CARBOHYDRATES_LABEL: &str = "Carbohydrates";

pub fn format_grams(value: f64, precision: usize) -> String {
    format!("{:.*}g", precision, value)
}

pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

/// One rendered result row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

/// Both result sections, ready to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    pub can_weight: String,
    pub grams: Vec<ReportLine>,
    pub dry_matter: Vec<ReportLine>,
}

impl NutritionReport {
    pub fn from_computation(computation: &Computation, precision: usize) -> Self {
        let grams_line = |key: &'static str, label: &'static str, value: f64| ReportLine {
            key,
            label,
            value,
            display: format_grams(value, precision),
        };
        let percent_line = |key: &'static str, label: &'static str, value: f64| ReportLine {
            key,
            label,
            value,
            display: format_percent(value, precision),
        };

        let mut grams: Vec<ReportLine> = NutrientField::ALL
            .iter()
            .map(|f| grams_line(f.as_str(), f.label(), computation.grams.get(*f)))
            .collect();
        grams.push(grams_line(
            CARBOHYDRATES_KEY,
            CARBOHYDRATES_LABEL,
            computation.grams.carbohydrates,
        ));

        let dm = &computation.dry_matter;
        let dry_matter = vec![
            percent_line(NutrientField::Protein.as_str(), NutrientField::Protein.label(), dm.protein),
            percent_line(NutrientField::Fat.as_str(), NutrientField::Fat.label(), dm.fat),
            percent_line(NutrientField::Fiber.as_str(), NutrientField::Fiber.label(), dm.fiber),
            percent_line(NutrientField::Ash.as_str(), NutrientField::Ash.label(), dm.ash),
            percent_line(CARBOHYDRATES_KEY, CARBOHYDRATES_LABEL, dm.carbohydrates),
        ];

        Self {
            can_weight: format_grams(computation.can_weight, precision),
            grams,
            dry_matter,
        }
    }
}

impl fmt::Display for NutritionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Can weight: {}", self.can_weight)?;
        writeln!(f)?;
        writeln!(f, "Results (grams):")?;
        for line in &self.grams {
            writeln!(f, "  {:<14} {:>10}", format!("{}:", line.label), line.display)?;
        }
        writeln!(f)?;
        writeln!(f, "Dry Matter Composition (%):")?;
        for line in &self.dry_matter {
            writeln!(f, "  {:<14} {:>10}", format!("{}:", line.label), line.display)?;
        }
        Ok(())
    }
}
