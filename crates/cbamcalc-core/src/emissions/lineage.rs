//! Calculation lineage records.
//!
//! Every per-entry computation carries a lineage: the inputs it consumed
//! (with default-vs-override provenance for factors), and each intermediate
//! conversion in the exact order it was applied. Downstream audits recompute
//! results from these records, so step order matters.

use serde::{Deserialize, Serialize};

/// Where an input value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorSource {
    /// Measured activity data from the entry itself.
    Activity,
    /// Reference-table default.
    Default,
    /// Per-entry user override.
    Override,
}

/// One named input of a computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageInput {
    pub name: String,
    pub value: f64,
    pub source: FactorSource,
}

/// One intermediate conversion: the formula applied and its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageStep {
    pub expression: String,
    pub value: f64,
}

/// The full lineage of one per-entry computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lineage {
    pub inputs: Vec<LineageInput>,
    pub steps: Vec<LineageStep>,
}

impl Lineage {
    pub fn new() -> Lineage {
        Lineage::default()
    }

    pub fn input(&mut self, name: &str, value: f64, source: FactorSource) {
        self.inputs.push(LineageInput {
            name: name.to_string(),
            value,
            source,
        });
    }

    pub fn step(&mut self, expression: &str, value: f64) {
        self.steps.push(LineageStep {
            expression: expression.to_string(),
            value,
        });
    }
}
