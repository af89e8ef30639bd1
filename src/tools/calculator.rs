//! Calculator MCP Tools
//!
//! Session edits, the calculate action and one-shot can reports.

use serde::Serialize;

use crate::models::{Computation, NutrientField, NutrientPercentages};
use crate::nutrition::NutritionReport;
use crate::session::{CalculatorSession, SessionError, SessionPhase, SessionStore, StoreResult};

/// The single error currently shown
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

impl From<&SessionError> for ErrorInfo {
    fn from(error: &SessionError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Everything a client needs to render the calculator
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub can_weight: f64,
    pub percentages: NutrientPercentages,
    pub percentage_total: f64,
    pub can_calculate: bool,
    pub error: Option<ErrorInfo>,
    pub computation: Option<Computation>,
    pub report: Option<NutritionReport>,
}

impl SessionView {
    pub fn from_session(session: &CalculatorSession, precision: usize) -> Self {
        let computation = session.computation().copied();
        Self {
            phase: session.phase(),
            can_weight: session.can_weight(),
            percentages: *session.percentages(),
            percentage_total: session.percentages().total(),
            can_calculate: session.can_calculate(),
            error: session.error().map(ErrorInfo::from),
            report: computation
                .as_ref()
                .map(|c| NutritionReport::from_computation(c, precision)),
            computation,
        }
    }
}

/// Response for set_can_weight and set_nutrient_percentage
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub accepted: bool,
    pub session: SessionView,
}

/// Response for calculate
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub calculated: bool,
    /// True when the action was a no-op because of an active error or missing weight
    pub refused: bool,
    pub computed_at: Option<String>,
    pub session: SessionView,
}

fn edit_response(next: &CalculatorSession, precision: usize) -> EditResponse {
    EditResponse {
        accepted: next.error().is_none(),
        session: SessionView::from_session(next, precision),
    }
}

pub fn set_can_weight(store: &SessionStore, raw: &str, precision: usize) -> StoreResult<EditResponse> {
    let (_, next) = store.apply(|s| s.edit_can_weight(raw))?;
    Ok(edit_response(&next, precision))
}

pub fn set_nutrient_percentage(
    store: &SessionStore,
    field: NutrientField,
    raw: &str,
    precision: usize,
) -> StoreResult<EditResponse> {
    let (_, next) = store.apply(|s| s.edit_percentage(field, raw))?;
    Ok(edit_response(&next, precision))
}

pub fn calculate(store: &SessionStore, precision: usize) -> StoreResult<CalculateResponse> {
    let (previous, next) = store.apply(CalculatorSession::calculate)?;
    let refused = !previous.can_calculate();
    let calculated = next.phase() == SessionPhase::Computed;

    Ok(CalculateResponse {
        calculated,
        refused,
        computed_at: calculated
            .then(|| chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        session: SessionView::from_session(&next, precision),
    })
}

pub fn get_session(store: &SessionStore, precision: usize) -> StoreResult<SessionView> {
    let session = store.snapshot()?;
    Ok(SessionView::from_session(&session, precision))
}

pub fn reset_session(store: &SessionStore, precision: usize) -> StoreResult<SessionView> {
    let (_, next) = store.apply(|_| CalculatorSession::reset())?;
    Ok(SessionView::from_session(&next, precision))
}

/// Validate and calculate one can without touching the shared session
///
/// Numbers go through the same text validation as typed input, so a value
/// like 12.345 is rejected exactly as it would be in the form.
pub fn compute_can(
    can_weight: f64,
    percentages: &NutrientPercentages,
    precision: usize,
) -> SessionView {
    let raw: Vec<(NutrientField, String)> = NutrientField::ALL
        .iter()
        .map(|f| (*f, percentages.get(*f).to_string()))
        .collect();
    let inputs: Vec<(NutrientField, &str)> =
        raw.iter().map(|(f, s)| (*f, s.as_str())).collect();

    let session = CalculatorSession::with_inputs(&can_weight.to_string(), &inputs).calculate();
    SessionView::from_session(&session, precision)
}
