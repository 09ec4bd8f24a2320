//! cbamcalc-core - emission accounting, allocation and cost projection.
//!
//! The calculation core is pure and synchronous: given identical inputs it
//! produces identical outputs with no hidden state or I/O. Reference tables
//! are explicit immutable inputs to every entry point; nothing in this crate
//! reads ambient global state.

pub mod allocation;
pub mod emissions;
pub mod error;
pub mod model;
pub mod projection;
pub mod reference;
pub mod storage;

pub use allocation::{AllocationSettings, ProductFootprint, calculate_pcf};
pub use emissions::{EmissionResult, EmissionTotals, calculate_total_emissions};
pub use error::{CbamError, Result};
pub use projection::{
    ProjectionConfig, ProjectionResult, ProjectionRow, calculate_projection,
    scenario::{ScenarioResult, ScenarioSpec, compare_cert_price_scenarios, compare_scenarios},
};
pub use reference::ReferenceTables;
