//! Meow-trition Library
//!
//! Cat food label calculator: validates guaranteed-analysis percentages,
//! converts them to grams for a can, and derives the dry matter breakdown.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod session;
pub mod tools;
