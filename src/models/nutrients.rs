//! Cat food nutrient data structures
//!
//! Label percentages, gram amounts and dry matter breakdowns.

use serde::{Deserialize, Serialize};

/// A nutrient printed on a cat food label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientField {
    Protein,
    Fat,
    Fiber,
    Moisture,
    Ash,
}

/// Key and display label for each nutrient, in display order
static FIELD_TABLE: [(NutrientField, &str, &str); 5] = [
    (NutrientField::Protein, "protein", "Protein"),
    (NutrientField::Fat, "fat", "Fat"),
    (NutrientField::Fiber, "fiber", "Fiber"),
    (NutrientField::Moisture, "moisture", "Moisture"),
    (NutrientField::Ash, "ash", "Ash"),
];

impl NutrientField {
    /// All label nutrients in display order
    pub const ALL: [NutrientField; 5] = [
        NutrientField::Protein,
        NutrientField::Fat,
        NutrientField::Fiber,
        NutrientField::Moisture,
        NutrientField::Ash,
    ];

    fn entry(&self) -> &'static (NutrientField, &'static str, &'static str) {
        // Table order matches the declaration order of the variants
        &FIELD_TABLE[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        self.entry().2
    }

    /// Parse from a field key (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        FIELD_TABLE
            .iter()
            .find(|(_, key, _)| *key == lower)
            .map(|(field, _, _)| *field)
    }
}

impl std::fmt::Display for NutrientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label percentages for one can
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientPercentages {
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub moisture: f64,
    pub ash: f64,
}

impl NutrientPercentages {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::Protein => self.protein,
            NutrientField::Fat => self.fat,
            NutrientField::Fiber => self.fiber,
            NutrientField::Moisture => self.moisture,
            NutrientField::Ash => self.ash,
        }
    }

    /// Copy with one field replaced
    pub fn with(&self, field: NutrientField, value: f64) -> Self {
        let mut next = *self;
        match field {
            NutrientField::Protein => next.protein = value,
            NutrientField::Fat => next.fat = value,
            NutrientField::Fiber => next.fiber = value,
            NutrientField::Moisture => next.moisture = value,
            NutrientField::Ash => next.ash = value,
        }
        next
    }

    /// Sum of all five percentages
    pub fn total(&self) -> f64 {
        NutrientField::ALL.iter().map(|f| self.get(*f)).sum()
    }
}

/// Nutrient amounts in grams for a whole can
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GramResult {
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub moisture: f64,
    pub ash: f64,
    /// Remainder of the can weight after the five label nutrients
    pub carbohydrates: f64,
}

impl GramResult {
    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::Protein => self.protein,
            NutrientField::Fat => self.fat,
            NutrientField::Fiber => self.fiber,
            NutrientField::Moisture => self.moisture,
            NutrientField::Ash => self.ash,
        }
    }

    /// Sum of all six components, including carbohydrates
    pub fn total(&self) -> f64 {
        self.protein + self.fat + self.fiber + self.moisture + self.ash + self.carbohydrates
    }
}

/// Nutrients as a percentage of dry matter (moisture excluded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DryMatterResult {
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub ash: f64,
    pub carbohydrates: f64,
}

impl DryMatterResult {
    pub fn total(&self) -> f64 {
        self.protein + self.fat + self.fiber + self.ash + self.carbohydrates
    }
}

/// Output of one calculate action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    pub can_weight: f64,
    pub grams: GramResult,
    /// Can weight minus moisture grams
    pub dry_matter_grams: f64,
    pub dry_matter: DryMatterResult,
}
