//! Fuel combustion emissions.

use serde::{Deserialize, Serialize};

use super::lineage::{FactorSource, Lineage};
use crate::model::{FuelEntry, Period, non_negative};
use crate::reference::ReferenceTables;

/// Per-entry combustion result: energy, per-gas masses and CO₂e.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombustionResult {
    pub period: Period,
    pub process_ref: String,
    pub fuel_type: String,
    pub energy_gj: f64,
    pub energy_tj: f64,
    pub co2_t: f64,
    pub ch4_t: f64,
    pub n2o_t: f64,
    pub co2e_t: f64,
    pub lineage: Lineage,
}

/// Resolve a factor: the per-entry override wins over the fuel-type
/// default; a fuel type missing from the tables degrades to 0.
fn resolve(override_value: Option<f64>, default_value: Option<f64>) -> (f64, FactorSource) {
    match override_value {
        Some(value) => (value, FactorSource::Override),
        None => (default_value.unwrap_or(0.0), FactorSource::Default),
    }
}

/// Compute combustion emissions for one fuel entry.
///
/// Energy is computed once and reused for all three gases; the lineage
/// preserves that exact order so audits can recompute from it.
pub fn calc_combustion(entry: &FuelEntry, tables: &ReferenceTables) -> CombustionResult {
    let defaults = tables.fuel(&entry.fuel_type);
    let quantity = non_negative(entry.quantity);

    let (ncv, ncv_source) = resolve(entry.ncv_override, defaults.map(|f| f.ncv));
    let (ef_co2, ef_co2_source) = resolve(entry.ef_co2_override, defaults.map(|f| f.ef_co2));
    let (ef_ch4, ef_ch4_source) = resolve(entry.ef_ch4_override, defaults.map(|f| f.ef_ch4));
    let (ef_n2o, ef_n2o_source) = resolve(entry.ef_n2o_override, defaults.map(|f| f.ef_n2o));

    let mut lineage = Lineage::new();
    lineage.input("quantity", quantity, FactorSource::Activity);
    lineage.input("ncv", ncv, ncv_source);
    lineage.input("ef_co2", ef_co2, ef_co2_source);
    lineage.input("ef_ch4", ef_ch4, ef_ch4_source);
    lineage.input("ef_n2o", ef_n2o, ef_n2o_source);

    let energy_gj = quantity * ncv;
    lineage.step("energy_gj = quantity * ncv", energy_gj);
    let energy_tj = energy_gj / 1000.0;
    lineage.step("energy_tj = energy_gj / 1000", energy_tj);

    let co2_t = energy_tj * ef_co2 / 1000.0;
    lineage.step("co2_t = energy_tj * ef_co2 / 1000", co2_t);
    let ch4_t = energy_tj * ef_ch4 / 1000.0;
    lineage.step("ch4_t = energy_tj * ef_ch4 / 1000", ch4_t);
    let n2o_t = energy_tj * ef_n2o / 1000.0;
    lineage.step("n2o_t = energy_tj * ef_n2o / 1000", n2o_t);

    let gwp = &tables.gwp;
    let co2e_t = co2_t * gwp.co2 + ch4_t * gwp.ch4 + n2o_t * gwp.n2o;
    lineage.step(
        "co2e_t = co2_t * gwp_co2 + ch4_t * gwp_ch4 + n2o_t * gwp_n2o",
        co2e_t,
    );

    CombustionResult {
        period: entry.period,
        process_ref: entry.process_ref.clone(),
        fuel_type: entry.fuel_type.clone(),
        energy_gj,
        energy_tj,
        co2_t,
        ch4_t,
        n2o_t,
        co2e_t,
        lineage,
    }
}
