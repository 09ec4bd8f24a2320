//! Process direct emissions: legacy anode and PFC computations, and the
//! generic formula blocks that replace them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::lineage::{FactorSource, Lineage};
use crate::model::{AnodeEntry, EmissionBlock, Period, PfcEntry, non_negative};
use crate::reference::ReferenceTables;

/// Molar mass ratio CO₂/C.
const CO2_PER_CARBON: f64 = 44.0 / 12.0;

/// Legacy anode-consumption result (aluminium electrolysis).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnodeResult {
    pub period: Period,
    pub process_ref: String,
    pub co2_t: f64,
    pub co2e_t: f64,
    pub lineage: Lineage,
}

pub fn calc_anode(entry: &AnodeEntry, tables: &ReferenceTables) -> AnodeResult {
    let production = non_negative(entry.production);

    let mut lineage = Lineage::new();
    lineage.input("production", production, FactorSource::Activity);
    lineage.input("anode_rate", entry.anode_rate, FactorSource::Activity);
    lineage.input("carbon_fraction", entry.carbon_fraction, FactorSource::Activity);
    lineage.input("sulfur_fraction", entry.sulfur_fraction, FactorSource::Activity);
    lineage.input("ash_fraction", entry.ash_fraction, FactorSource::Activity);

    let carbon_share = entry.carbon_fraction - entry.sulfur_fraction - entry.ash_fraction;
    let co2_t = production * entry.anode_rate / 1000.0 * carbon_share * CO2_PER_CARBON;
    lineage.step(
        "co2_t = production * anode_rate / 1000 * (carbon_fraction - sulfur_fraction - ash_fraction) * 44/12",
        co2_t,
    );
    let co2e_t = co2_t * tables.gwp.co2;
    lineage.step("co2e_t = co2_t * gwp_co2", co2e_t);

    AnodeResult {
        period: entry.period,
        process_ref: entry.process_ref.clone(),
        co2_t,
        co2e_t,
        lineage,
    }
}

/// Legacy perfluorocarbon result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PfcResult {
    pub period: Period,
    pub process_ref: String,
    pub cf4_t: f64,
    pub c2f6_t: f64,
    pub co2e_t: f64,
    pub lineage: Lineage,
}

pub fn calc_pfc(entry: &PfcEntry, tables: &ReferenceTables) -> PfcResult {
    let production = non_negative(entry.production);

    let mut lineage = Lineage::new();
    lineage.input("production", production, FactorSource::Activity);
    lineage.input("aem_minutes", entry.aem_minutes, FactorSource::Activity);
    lineage.input("slope_factor", entry.slope_factor, FactorSource::Activity);
    lineage.input("c2f6_ratio", entry.c2f6_ratio, FactorSource::Activity);

    let cf4_t = production * entry.aem_minutes * entry.slope_factor;
    lineage.step("cf4_t = production * aem_minutes * slope_factor", cf4_t);
    let c2f6_t = cf4_t * entry.c2f6_ratio;
    lineage.step("c2f6_t = cf4_t * c2f6_ratio", c2f6_t);
    let co2e_t = cf4_t * tables.gwp.cf4 + c2f6_t * tables.gwp.c2f6;
    lineage.step("co2e_t = cf4_t * gwp_cf4 + c2f6_t * gwp_c2f6", co2e_t);

    PfcResult {
        period: entry.period,
        process_ref: entry.process_ref.clone(),
        cf4_t,
        c2f6_t,
        co2e_t,
        lineage,
    }
}

/// Result of one generic emission block. A formula error zeroes the block
/// and carries the error string; it never aborts sibling blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResult {
    pub block_id: String,
    pub period: Period,
    pub process_ref: String,
    pub gas: String,
    pub tonnes: f64,
    pub co2e_t: f64,
    pub error: Option<String>,
    pub lineage: Lineage,
}

pub fn calc_block(block: &EmissionBlock, tables: &ReferenceTables) -> BlockResult {
    let variables: HashMap<String, f64> = block
        .parameters
        .iter()
        .map(|p| (p.name.clone(), p.value))
        .collect();

    let mut lineage = Lineage::new();
    for parameter in &block.parameters {
        lineage.input(&parameter.name, parameter.value, FactorSource::Activity);
    }

    let outcome = cbamcalc_engine::evaluate(&block.formula, &variables);
    let tonnes = outcome.value_or_zero();
    lineage.step(&block.formula, tonnes);

    let gwp = tables.gwp.factor_named(&block.gas);
    let co2e_t = tonnes * gwp;
    lineage.step("co2e_t = tonnes * gwp", co2e_t);

    BlockResult {
        block_id: block.id.clone(),
        period: block.period,
        process_ref: block.process_ref.clone(),
        gas: block.gas.clone(),
        tonnes,
        co2e_t,
        error: outcome.error,
        lineage,
    }
}
