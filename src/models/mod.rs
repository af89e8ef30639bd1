//! Data models
//!
//! Plain value types shared by the calculator, the session and the tools.

mod nutrients;

pub use nutrients::{
    Computation, DryMatterResult, GramResult, NutrientField, NutrientPercentages,
};
