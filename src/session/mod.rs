//! Calculator session state
//!
//! A session holds the can weight, the committed percentages, the single
//! active error and the last results. Every user action produces a new
//! session value; nothing is mutated in place.

pub mod store;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Computation, NutrientField, NutrientPercentages};
use crate::nutrition::{self, ComputationError, ValidationError};

pub use store::{SessionStore, StoreError, StoreResult};

/// Error shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Validation(e) => e.code(),
            SessionError::Computation(e) => e.code(),
        }
    }
}

/// Where the session is in the edit/calculate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No results on display
    Idle,
    /// Results from the last calculate action are on display
    Computed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorSession {
    can_weight: f64,
    percentages: NutrientPercentages,
    error: Option<SessionError>,
    computation: Option<Computation>,
}

impl CalculatorSession {
    /// Fresh session: no weight entered, all percentages zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset() -> Self {
        tracing::debug!("session reset");
        Self::new()
    }

    /// Fresh session with every field entered in order
    ///
    /// Entry stops at the first rejected field so that error stays visible.
    pub fn with_inputs(can_weight: &str, percentages: &[(NutrientField, &str)]) -> Self {
        let mut session = Self::new().edit_can_weight(can_weight);
        for (field, raw) in percentages {
            if session.error.is_some() {
                break;
            }
            session = session.edit_percentage(*field, raw);
        }
        session
    }

    /// Fresh session from positional text: weight, then one value per
    /// nutrient in display order
    ///
    /// Returns `None` when the argument count does not match.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let (can_weight, rest) = args.split_first()?;
        if rest.len() != NutrientField::ALL.len() {
            return None;
        }

        let percentages: Vec<(NutrientField, &str)> = NutrientField::ALL
            .iter()
            .copied()
            .zip(rest.iter().map(|s| s.as_ref()))
            .collect();
        Some(Self::with_inputs(can_weight.as_ref(), &percentages))
    }

    pub fn can_weight(&self) -> f64 {
        self.can_weight
    }

    pub fn percentages(&self) -> &NutrientPercentages {
        &self.percentages
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn computation(&self) -> Option<&Computation> {
        self.computation.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.computation.is_some() {
            SessionPhase::Computed
        } else {
            SessionPhase::Idle
        }
    }

    /// Calculate is refused while an error is shown or no weight is set
    pub fn can_calculate(&self) -> bool {
        self.error.is_none() && self.can_weight > 0.0
    }

    /// Apply an edit to the can weight field
    ///
    /// Any edit clears the results. On failure the previous weight is kept
    /// and the error replaces whatever was shown before.
    pub fn edit_can_weight(&self, raw: &str) -> Self {
        match nutrition::validate_can_weight(raw) {
            Ok(can_weight) => {
                tracing::debug!(can_weight, "can weight updated");
                Self {
                    can_weight,
                    percentages: self.percentages,
                    error: None,
                    computation: None,
                }
            }
            Err(e) => self.with_error(e.into()),
        }
    }

    /// Apply an edit to one percentage field
    pub fn edit_percentage(&self, field: NutrientField, raw: &str) -> Self {
        match nutrition::validate_percentage_input(field, raw, &self.percentages) {
            Ok(percentages) => {
                tracing::debug!(field = field.as_str(), total = percentages.total(), "percentage updated");
                Self {
                    can_weight: self.can_weight,
                    percentages,
                    error: None,
                    computation: None,
                }
            }
            Err(e) => self.with_error(e.into()),
        }
    }

    /// Run the calculation for the current inputs
    ///
    /// When refused the returned session equals `self`.
    pub fn calculate(&self) -> Self {
        if !self.can_calculate() {
            tracing::warn!(
                can_weight = self.can_weight,
                error = self.error.as_ref().map(|e| e.code()),
                "calculate refused"
            );
            return self.clone();
        }

        match nutrition::compute(self.can_weight, &self.percentages) {
            Ok(computation) => {
                tracing::info!(
                    can_weight = self.can_weight,
                    dry_matter_grams = computation.dry_matter_grams,
                    "calculated nutrients"
                );
                Self {
                    computation: Some(computation),
                    ..self.clone()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "calculation failed");
                self.with_error(e.into())
            }
        }
    }

    fn with_error(&self, error: SessionError) -> Self {
        tracing::debug!(code = error.code(), "session error");
        Self {
            can_weight: self.can_weight,
            percentages: self.percentages,
            error: Some(error),
            computation: None,
        }
    }
}
