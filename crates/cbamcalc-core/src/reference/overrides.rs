//! Partial reference-table overrides loaded from TOML.
//!
//! Each override replaces the corresponding table wholesale; absent tables
//! keep their built-in defaults. Used by the CLI's `--tables` flag.

use std::path::Path;

use serde::Deserialize;

use super::{
    CreditSchedule, DefaultIntensity, FuelFactors, GwpSet, MarkupSchedule, PhaseInSchedule,
    PriceSchedule, ReferenceTables,
};
use crate::error::Result;

/// A partial reference-table file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablesOverride {
    pub fuel_factors: Option<Vec<FuelFactors>>,
    pub gwp: Option<GwpSet>,
    pub phase_in: Option<PhaseInSchedule>,
    pub cert_prices: Option<PriceSchedule>,
    pub markup: Option<MarkupSchedule>,
    pub default_intensities: Option<Vec<DefaultIntensity>>,
    pub credit_prices: Option<CreditSchedule>,
    pub reference_prices: Option<PriceSchedule>,
}

impl TablesOverride {
    /// Merge this override onto a table set, replacing present sections.
    pub fn apply(self, tables: &mut ReferenceTables) {
        if let Some(fuel_factors) = self.fuel_factors {
            tables.fuel_factors = fuel_factors;
        }
        if let Some(gwp) = self.gwp {
            tables.gwp = gwp;
        }
        if let Some(phase_in) = self.phase_in {
            tables.phase_in = phase_in;
        }
        if let Some(cert_prices) = self.cert_prices {
            tables.cert_prices = cert_prices;
        }
        if let Some(markup) = self.markup {
            tables.markup = markup;
        }
        if let Some(default_intensities) = self.default_intensities {
            tables.default_intensities = default_intensities;
        }
        if let Some(credit_prices) = self.credit_prices {
            tables.credit_prices = credit_prices;
        }
        if let Some(reference_prices) = self.reference_prices {
            tables.reference_prices = reference_prices;
        }
    }
}

/// Load a `TablesOverride` from a TOML file.
pub fn load_overrides(path: &Path) -> Result<TablesOverride> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
