//! Emission engine: per-entry computation and aggregation.
//!
//! - [`calc_combustion`] - fuel energy and per-gas masses
//! - [`calc_electricity`] - grid (indirect) emissions
//! - [`calc_anode`] / [`calc_pfc`] - legacy aluminium process emissions
//! - [`calc_block`] - generic formula-block emissions
//! - [`calculate_total_emissions`] - full aggregation with lineage

mod combustion;
mod electricity;
mod lineage;
mod process;

pub use combustion::{CombustionResult, calc_combustion};
pub use electricity::{ElectricityResult, calc_electricity};
pub use lineage::{FactorSource, Lineage, LineageInput, LineageStep};
pub use process::{AnodeResult, BlockResult, PfcResult, calc_anode, calc_block, calc_pfc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ActivityData, Gas};
use crate::reference::ReferenceTables;

/// Aggregate totals over one calculation scope: energy, per-gas masses and
/// CO₂e split by scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmissionTotals {
    pub energy_gj: f64,
    pub co2_t: f64,
    pub ch4_t: f64,
    pub n2o_t: f64,
    pub cf4_t: f64,
    pub c2f6_t: f64,
    pub combustion_co2e_t: f64,
    /// Process-direct subtotal: generic blocks when any exist, the legacy
    /// anode+PFC total otherwise.
    pub process_co2e_t: f64,
    pub direct_co2e_t: f64,
    pub indirect_co2e_t: f64,
    pub total_co2e_t: f64,
}

/// Full emission result: per-entry records with lineage, plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionResult {
    pub combustion: Vec<CombustionResult>,
    pub electricity: Vec<ElectricityResult>,
    pub anode: Vec<AnodeResult>,
    pub pfc: Vec<PfcResult>,
    pub blocks: Vec<BlockResult>,
    /// True when generic blocks replaced the legacy anode+PFC subtotal.
    pub blocks_supersede_legacy: bool,
    pub totals: EmissionTotals,
}

/// Compute and aggregate all emissions for one activity scope.
///
/// Aggregation switch: if any generic emission blocks exist in the scope,
/// they entirely replace the legacy anode+PFC computation in the
/// process-direct subtotal. Legacy entries are still computed and returned
/// for transparency, but contribute zero. This is a binary switch per
/// aggregation call, not a per-entry merge.
pub fn calculate_total_emissions(
    activity: &ActivityData,
    tables: &ReferenceTables,
) -> EmissionResult {
    let combustion: Vec<CombustionResult> = activity
        .fuel
        .iter()
        .map(|entry| calc_combustion(entry, tables))
        .collect();
    let electricity: Vec<ElectricityResult> = activity
        .electricity
        .iter()
        .map(calc_electricity)
        .collect();
    let anode: Vec<AnodeResult> = activity
        .anode
        .iter()
        .map(|entry| calc_anode(entry, tables))
        .collect();
    let pfc: Vec<PfcResult> = activity
        .pfc
        .iter()
        .map(|entry| calc_pfc(entry, tables))
        .collect();
    let blocks: Vec<BlockResult> = activity
        .blocks
        .iter()
        .map(|block| calc_block(block, tables))
        .collect();

    let blocks_supersede_legacy = !blocks.is_empty();

    let mut totals = EmissionTotals::default();
    for result in &combustion {
        totals.energy_gj += result.energy_gj;
        totals.co2_t += result.co2_t;
        totals.ch4_t += result.ch4_t;
        totals.n2o_t += result.n2o_t;
        totals.combustion_co2e_t += result.co2e_t;
    }

    if blocks_supersede_legacy {
        for result in &blocks {
            // Unrecognized gas names still count toward CO2e, but have no
            // per-gas mass bucket.
            match Gas::parse(&result.gas) {
                Some(Gas::Co2) => totals.co2_t += result.tonnes,
                Some(Gas::Ch4) => totals.ch4_t += result.tonnes,
                Some(Gas::N2o) => totals.n2o_t += result.tonnes,
                Some(Gas::Cf4) => totals.cf4_t += result.tonnes,
                Some(Gas::C2f6) => totals.c2f6_t += result.tonnes,
                None => {}
            }
            totals.process_co2e_t += result.co2e_t;
        }
    } else {
        for result in &anode {
            totals.co2_t += result.co2_t;
            totals.process_co2e_t += result.co2e_t;
        }
        for result in &pfc {
            totals.cf4_t += result.cf4_t;
            totals.c2f6_t += result.c2f6_t;
            totals.process_co2e_t += result.co2e_t;
        }
    }

    totals.direct_co2e_t = totals.combustion_co2e_t + totals.process_co2e_t;
    totals.indirect_co2e_t = electricity.iter().map(|r| r.co2e_t).sum();
    totals.total_co2e_t = totals.direct_co2e_t + totals.indirect_co2e_t;

    debug!(
        direct = totals.direct_co2e_t,
        indirect = totals.indirect_co2e_t,
        total = totals.total_co2e_t,
        blocks_supersede_legacy,
        "aggregated emissions"
    );

    EmissionResult {
        combustion,
        electricity,
        anode,
        pfc,
        blocks,
        blocks_supersede_legacy,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AnodeEntry, BlockParameter, ElectricityEntry, EmissionBlock, FuelEntry, Period, PfcEntry,
    };

    fn fuel_entry() -> FuelEntry {
        FuelEntry {
            period: Period::new(2026, 1),
            process_ref: "furnace-1".into(),
            fuel_type: "natural_gas".into(),
            quantity: 500.0,
            unit: "t".into(),
            ncv_override: None,
            ef_co2_override: None,
            ef_ch4_override: None,
            ef_n2o_override: None,
        }
    }

    fn anode_entry() -> AnodeEntry {
        AnodeEntry {
            period: Period::new(2026, 1),
            process_ref: "potline-1".into(),
            production: 1000.0,
            anode_rate: 420.0,
            carbon_fraction: 0.98,
            sulfur_fraction: 0.02,
            ash_fraction: 0.004,
        }
    }

    fn pfc_entry() -> PfcEntry {
        PfcEntry {
            period: Period::new(2026, 1),
            process_ref: "potline-1".into(),
            production: 1000.0,
            aem_minutes: 0.2,
            slope_factor: 0.000143,
            c2f6_ratio: 0.1,
        }
    }

    fn co2_block(formula: &str, params: &[(&str, f64)]) -> EmissionBlock {
        EmissionBlock {
            id: "blk-1".into(),
            period: Period::new(2026, 1),
            process_ref: "kiln-1".into(),
            gas: "CO2".into(),
            formula: formula.into(),
            parameters: params
                .iter()
                .map(|(name, value)| BlockParameter {
                    name: name.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_totals_without_blocks_use_legacy() {
        let tables = ReferenceTables::default();
        let activity = ActivityData {
            fuel: vec![fuel_entry()],
            electricity: vec![ElectricityEntry {
                period: Period::new(2026, 1),
                process_ref: "grid".into(),
                mwh: 14500.0,
                factor: 0.328,
                factor_overridden: false,
            }],
            anode: vec![anode_entry()],
            pfc: vec![pfc_entry()],
            blocks: vec![],
        };
        let result = calculate_total_emissions(&activity, &tables);

        assert!(!result.blocks_supersede_legacy);
        let legacy_co2e = result.anode[0].co2e_t + result.pfc[0].co2e_t;
        assert!((result.totals.process_co2e_t - legacy_co2e).abs() < 1e-9);
        assert!(
            (result.totals.direct_co2e_t
                - (result.combustion[0].co2e_t + legacy_co2e))
                .abs()
                < 1e-9
        );
        assert!((result.totals.indirect_co2e_t - 4756.0).abs() < 1e-9);
        assert!(
            (result.totals.total_co2e_t
                - (result.totals.direct_co2e_t + result.totals.indirect_co2e_t))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_any_block_supersedes_all_legacy_entries() {
        let tables = ReferenceTables::default();
        let activity = ActivityData {
            fuel: vec![],
            electricity: vec![],
            anode: vec![anode_entry()],
            pfc: vec![pfc_entry()],
            // A single block for an unrelated process still flips the
            // switch for the whole scope.
            blocks: vec![co2_block("100", &[])],
        };
        let result = calculate_total_emissions(&activity, &tables);

        assert!(result.blocks_supersede_legacy);
        assert!((result.totals.process_co2e_t - 100.0).abs() < 1e-9);
        // Legacy results are still present for transparency.
        assert_eq!(result.anode.len(), 1);
        assert!(result.anode[0].co2e_t > 0.0);
        assert_eq!(result.pfc.len(), 1);
        // But contribute nothing to the per-gas totals.
        assert_eq!(result.totals.cf4_t, 0.0);
        assert_eq!(result.totals.c2f6_t, 0.0);
    }

    #[test]
    fn test_block_error_does_not_abort_siblings() {
        let tables = ReferenceTables::default();
        let mut broken = co2_block("qty +", &[("qty", 5.0)]);
        broken.id = "blk-broken".into();
        let activity = ActivityData {
            blocks: vec![broken, co2_block("40+2", &[])],
            ..Default::default()
        };
        let result = calculate_total_emissions(&activity, &tables);

        assert_eq!(result.blocks.len(), 2);
        assert!(result.blocks[0].error.is_some());
        assert_eq!(result.blocks[0].co2e_t, 0.0);
        assert!(result.blocks[1].error.is_none());
        assert!((result.totals.process_co2e_t - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_activity_yields_zero_totals() {
        let tables = ReferenceTables::default();
        let result = calculate_total_emissions(&ActivityData::default(), &tables);
        assert_eq!(result.totals.total_co2e_t, 0.0);
        assert!(!result.blocks_supersede_legacy);
    }
}
