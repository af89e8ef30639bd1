//! Meow-trition MCP Server Implementation
//!
//! Exposes the calculator session as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{NutrientField, NutrientPercentages};
use crate::session::SessionStore;
use crate::tools::calculator;
use crate::tools::status::StatusTracker;

/// Meow-trition MCP Service
#[derive(Clone)]
pub struct MeowtritionService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: SessionStore,
    precision: usize,
    tool_router: ToolRouter<MeowtritionService>,
}

impl MeowtritionService {
    pub fn new(session: SessionStore, precision: usize) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(precision))),
            session,
            precision,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCanWeightParams {
    /// Can weight in grams, as typed (e.g. "85" or "156.5")
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetNutrientPercentageParams {
    /// Nutrient: protein, fat, fiber, moisture, or ash
    pub field: String,
    /// Percentage as printed on the label, 0-100 with up to 2 decimals (e.g. "10" or "4.5")
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputeCanParams {
    /// Can weight in grams
    pub can_weight: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub moisture: f64,
    #[serde(default)]
    pub ash: f64,
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_field(raw: &str) -> Result<NutrientField, McpError> {
    NutrientField::from_str(raw).ok_or_else(|| {
        McpError::invalid_params(
            format!(
                "Unknown nutrient field '{}'. Expected one of: protein, fat, fiber, moisture, ash",
                raw
            ),
            None,
        )
    })
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MeowtritionService {
    // --- Status ---

    #[tool(description = "Get the current status of the Meow-trition service including build info, process information and session phase")]
    async fn meowtrition_status(&self) -> Result<CallToolResult, McpError> {
        let phase = self
            .session
            .snapshot()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?
            .phase();
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(phase))
    }

    #[tool(description = "Get step-by-step instructions for the cat food calculator. Call this when unsure how to enter label values or read the results.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Session ---

    #[tool(description = "Set the can weight in grams. Must be greater than 0. Clears any previous results.")]
    fn set_can_weight(&self, Parameters(p): Parameters<SetCanWeightParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::set_can_weight(&self.session, &p.value, self.precision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json_result(&result)
    }

    #[tool(description = "Set one label percentage (protein, fat, fiber, moisture, ash). Accepts 0-100 with up to 2 decimals; the five values may not total more than 100. Clears any previous results.")]
    fn set_nutrient_percentage(&self, Parameters(p): Parameters<SetNutrientPercentageParams>) -> Result<CallToolResult, McpError> {
        let field = parse_field(&p.field)?;
        let result = calculator::set_nutrient_percentage(&self.session, field, &p.value, self.precision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate grams per nutrient, carbohydrates and dry matter composition for the current session. Refused while an error is active or no can weight is set.")]
    fn calculate(&self) -> Result<CallToolResult, McpError> {
        let result = calculator::calculate(&self.session, self.precision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json_result(&result)
    }

    #[tool(description = "Get the current session: inputs, active error and the last results if any")]
    fn get_session(&self) -> Result<CallToolResult, McpError> {
        let result = calculator::get_session(&self.session, self.precision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json_result(&result)
    }

    #[tool(description = "Reset the session to an empty calculator (no can weight, all percentages 0)")]
    fn reset_session(&self) -> Result<CallToolResult, McpError> {
        let result = calculator::reset_session(&self.session, self.precision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json_result(&result)
    }

    // --- One-shot ---

    #[tool(description = "Validate and calculate a single can in one call without changing the session. Percentages follow the same rules as set_nutrient_percentage.")]
    fn compute_can(&self, Parameters(p): Parameters<ComputeCanParams>) -> Result<CallToolResult, McpError> {
        let percentages = NutrientPercentages {
            protein: p.protein,
            fat: p.fat,
            fiber: p.fiber,
            moisture: p.moisture,
            ash: p.ash,
        };
        let result = calculator::compute_can(p.can_weight, &percentages, self.precision);
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MeowtritionService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "meowtrition".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meow-trition Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Meow-trition - cat food label calculator. \
                 Call calculator_instructions first if unsure. \
                 Session: set_can_weight, set_nutrient_percentage, calculate, get_session, reset_session. \
                 One-shot: compute_can. \
                 Status: meowtrition_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("Fiber").unwrap(), NutrientField::Fiber);
        assert!(parse_field("carbs").is_err());
    }

    #[test]
    fn test_server_info() {
        let service = MeowtritionService::new(SessionStore::new(), 2);
        let info = service.get_info();
        assert_eq!(info.server_info.name, "meowtrition");
        assert!(info.instructions.unwrap().contains("compute_can"));
    }
}
