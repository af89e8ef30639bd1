//! Meow-trition Tools module
//!
//! MCP tool implementations for the calculator.

pub mod calculator;
pub mod status;
