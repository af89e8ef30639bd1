//! Meow-trition Status Tool
//!
//! Provides runtime status information about the calculator service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::session::SessionPhase;

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Meow-trition Calculator Instructions

Converts the guaranteed analysis printed on a cat food can into grams for
the whole can, and shows the dry matter composition.

## Inputs

| Input | Tool | Accepted values |
|-------|------|-----------------|
| Can weight | `set_can_weight` | Any number greater than 0 (grams) |
| Protein, fat, fiber, moisture, ash | `set_nutrient_percentage` | 0 to 100, at most 2 decimal places |

- Field names for `set_nutrient_percentage`: `protein`, `fat`, `fiber`, `moisture`, `ash`
- Percentages are entered as text exactly as printed, e.g. `"10"`, `"4.5"`, `"0.75"`
- The five percentages together may not exceed 100
- Values like `"12.345"`, `"-1"` or `"101"` are rejected

## Workflow

1. `set_can_weight(value: "85")`
2. `set_nutrient_percentage(field: "protein", value: "10")` for each nutrient
3. `calculate()`
4. Read `session.report` in the response

For a single can without touching the session, use `compute_can` with all
six numbers at once.

## Errors

Only one error is active at a time. A new rejection replaces the previous
one; a successful edit clears it. While an error is active, or before a can
weight is set, `calculate` does nothing and returns `refused: true`.

| Code | Meaning |
|------|---------|
| `invalid_format` | Percentage is not a number from 0 to 100 with up to 2 decimals |
| `percentage_overflow` | The five percentages would add up to more than 100 |
| `non_positive_weight` | Can weight is missing, zero or negative |
| `zero_dry_matter` | Moisture is the whole can, so dry matter percentages are undefined |

## How results are derived

- Grams of a nutrient = can weight x percentage / 100
- Carbohydrates = can weight minus the five label nutrients in grams
- Dry matter = can weight minus moisture grams
- Dry matter % = nutrient grams / dry matter x 100 (moisture excluded)

Any edit clears the last results; call `calculate` again afterwards.
"#;

/// Runtime status of the calculator service
#[derive(Debug, Clone, Serialize)]
pub struct MeowtritionStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,

    pub session_phase: SessionPhase,
    pub display_precision: usize,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    precision: usize,
}

impl StatusTracker {
    pub fn new(precision: usize) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            precision,
        }
    }

    /// Get the current status
    pub fn get_status(&self, session_phase: SessionPhase) -> MeowtritionStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MeowtritionStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            session_phase,
            display_precision: self.precision,
        }
    }
}
