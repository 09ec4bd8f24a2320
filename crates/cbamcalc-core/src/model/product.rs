//! Products and their precursor inputs.

use serde::{Deserialize, Serialize};

use super::de_non_negative;

/// Where a precursor's specific embedded emissions value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecursorSource {
    /// Measured/reported by the upstream producer.
    Actual,
    /// Regulatory default value.
    Default,
}

/// An upstream input good whose embedded emissions roll up into a complex
/// downstream product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precursor {
    pub name: String,
    /// Mass consumed per unit of product (t/t).
    #[serde(alias = "massFraction")]
    pub mass_fraction: f64,
    /// Specific embedded emissions of the precursor (tCO₂e/t).
    pub see: f64,
    #[serde(default = "default_source")]
    pub source: PrecursorSource,
}

fn default_source() -> PrecursorSource {
    PrecursorSource::Default
}

/// An output product of the installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Quantity produced (t).
    #[serde(deserialize_with = "de_non_negative")]
    pub quantity: f64,
    /// Residue/by-product flag; residues can be excluded from allocation.
    #[serde(default, alias = "isResidue")]
    pub residue: bool,
    /// True when the product is classified as a complex good using
    /// upstream precursor inputs.
    #[serde(default, alias = "isComplex")]
    pub complex: bool,
    #[serde(default)]
    pub precursors: Vec<Precursor>,
}

impl Product {
    /// Precursor embedded emissions per tonne of product (tCO₂e/t).
    /// Zero for simple goods.
    pub fn precursor_see(&self) -> f64 {
        if !self.complex {
            return 0.0;
        }
        self.precursors
            .iter()
            .map(|p| p.mass_fraction * p.see)
            .sum()
    }
}
