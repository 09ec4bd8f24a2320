//! Activity records: the raw per-period inputs the emission engine consumes.
//!
//! Entries are immutable once read into a calculation. Per-entry factor
//! overrides always win over the fuel-type defaults from the reference
//! tables.

use serde::{Deserialize, Serialize};

use super::{Period, de_non_negative};

/// Fuel combustion entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEntry {
    pub period: Period,
    #[serde(alias = "processRef")]
    pub process_ref: String,
    #[serde(alias = "fuelType")]
    pub fuel_type: String,
    /// Quantity burned, in the entry's unit (tonnes by convention).
    #[serde(deserialize_with = "de_non_negative")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Net calorific value override (GJ/t); wins over the fuel-type default.
    #[serde(default, alias = "ncvOverride")]
    pub ncv_override: Option<f64>,
    #[serde(default, alias = "efCo2Override")]
    pub ef_co2_override: Option<f64>,
    #[serde(default, alias = "efCh4Override")]
    pub ef_ch4_override: Option<f64>,
    #[serde(default, alias = "efN2oOverride")]
    pub ef_n2o_override: Option<f64>,
}

fn default_unit() -> String {
    "t".to_string()
}

/// Grid electricity entry. The factor is already tCO₂e/MWh; no further
/// conversion applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityEntry {
    pub period: Period,
    #[serde(alias = "processRef")]
    pub process_ref: String,
    #[serde(deserialize_with = "de_non_negative")]
    pub mwh: f64,
    /// Grid emission factor (tCO₂e/MWh).
    #[serde(alias = "emissionFactor")]
    pub factor: f64,
    /// True when the factor was user-supplied rather than the grid default.
    #[serde(default, alias = "factorOverridden")]
    pub factor_overridden: bool,
}

/// Legacy anode-consumption entry (aluminium electrolysis).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnodeEntry {
    pub period: Period,
    #[serde(alias = "processRef")]
    pub process_ref: String,
    /// Metal production (t).
    #[serde(deserialize_with = "de_non_negative")]
    pub production: f64,
    /// Net anode consumption (kg per tonne of metal).
    #[serde(alias = "anodeRate")]
    pub anode_rate: f64,
    #[serde(alias = "carbonFraction")]
    pub carbon_fraction: f64,
    #[serde(alias = "sulfurFraction")]
    pub sulfur_fraction: f64,
    #[serde(alias = "ashFraction")]
    pub ash_fraction: f64,
}

/// Legacy perfluorocarbon entry (anode effects).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PfcEntry {
    pub period: Period,
    #[serde(alias = "processRef")]
    pub process_ref: String,
    /// Metal production (t).
    #[serde(deserialize_with = "de_non_negative")]
    pub production: f64,
    /// Anode-effect minutes per cell-day.
    #[serde(alias = "aemMinutes")]
    pub aem_minutes: f64,
    /// CF₄ slope factor.
    #[serde(alias = "slopeFactor")]
    pub slope_factor: f64,
    /// C₂F₆/CF₄ weight ratio.
    #[serde(alias = "c2f6Ratio")]
    pub c2f6_ratio: f64,
}

/// A named numeric parameter of an emission block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockParameter {
    pub name: String,
    pub value: f64,
}

/// A generic process emission source expressed as an arithmetic formula
/// over named parameters. The formula's result is tonnes of the output gas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionBlock {
    pub id: String,
    pub period: Period,
    #[serde(alias = "processRef")]
    pub process_ref: String,
    /// Output gas name. Kept as a free string: a gas the GWP set does not
    /// recognize converts with a multiplier of 1.
    #[serde(alias = "outputGas")]
    pub gas: String,
    pub formula: String,
    /// Ordered parameter set; order is preserved for display and lineage.
    #[serde(default)]
    pub parameters: Vec<BlockParameter>,
}

/// The flat activity collection for one calculation scope: the latest
/// version of each entry per period, as supplied by the persistence
/// collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityData {
    #[serde(default)]
    pub fuel: Vec<FuelEntry>,
    #[serde(default)]
    pub electricity: Vec<ElectricityEntry>,
    #[serde(default)]
    pub anode: Vec<AnodeEntry>,
    #[serde(default)]
    pub pfc: Vec<PfcEntry>,
    #[serde(default)]
    pub blocks: Vec<EmissionBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_entry_accepts_camel_case_aliases() {
        let entry: FuelEntry = serde_json::from_str(
            r#"{
                "period": "2026-01",
                "processRef": "kiln-1",
                "fuelType": "natural_gas",
                "quantity": 500.0,
                "ncvOverride": 47.2
            }"#,
        )
        .unwrap();
        assert_eq!(entry.process_ref, "kiln-1");
        assert_eq!(entry.fuel_type, "natural_gas");
        assert_eq!(entry.ncv_override, Some(47.2));
        assert_eq!(entry.unit, "t");
    }

    #[test]
    fn test_negative_quantity_coerced_to_zero() {
        let entry: ElectricityEntry = serde_json::from_str(
            r#"{"period": "2026-01", "process_ref": "p1", "mwh": -5.0, "factor": 0.3}"#,
        )
        .unwrap();
        assert_eq!(entry.mwh, 0.0);
    }
}
