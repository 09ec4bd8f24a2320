//! Grid electricity (indirect) emissions.

use serde::{Deserialize, Serialize};

use super::lineage::{FactorSource, Lineage};
use crate::model::{ElectricityEntry, Period, non_negative};

/// Per-entry electricity result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityResult {
    pub period: Period,
    pub process_ref: String,
    pub mwh: f64,
    pub factor: f64,
    pub factor_overridden: bool,
    pub co2e_t: f64,
    pub lineage: Lineage,
}

/// Compute indirect emissions for one electricity entry. The grid factor
/// is already tCO₂e/MWh, so no unit conversion applies.
pub fn calc_electricity(entry: &ElectricityEntry) -> ElectricityResult {
    let mwh = non_negative(entry.mwh);
    let factor_source = if entry.factor_overridden {
        FactorSource::Override
    } else {
        FactorSource::Default
    };

    let mut lineage = Lineage::new();
    lineage.input("mwh", mwh, FactorSource::Activity);
    lineage.input("grid_factor", entry.factor, factor_source);

    let co2e_t = mwh * entry.factor;
    lineage.step("co2e_t = mwh * grid_factor", co2e_t);

    ElectricityResult {
        period: entry.period,
        process_ref: entry.process_ref.clone(),
        mwh,
        factor: entry.factor,
        factor_overridden: entry.factor_overridden,
        co2e_t,
        lineage,
    }
}
