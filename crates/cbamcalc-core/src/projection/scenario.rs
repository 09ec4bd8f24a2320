//! Scenario comparison: re-run the projector with overridden parameters.
//!
//! Each run clones the base configuration, shallow-merges the overrides and
//! projects independently; there is no shared mutable state, so runs are
//! pure and order-independent.

use serde::{Deserialize, Serialize};

use super::{
    CalculationBasis, CreditScenario, EmissionScope, ProjectionConfig, ProjectionResult,
    calculate_projection,
};
use crate::reference::{PriceLevel, ReferenceTables, Sector};

/// Partial configuration: present fields replace the base value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub basis: Option<CalculationBasis>,
    pub scope: Option<EmissionScope>,
    #[serde(alias = "certPriceLevel")]
    pub cert_price_level: Option<PriceLevel>,
    pub credit: Option<CreditScenario>,
    #[serde(alias = "importedQuantity")]
    pub imported_quantity: Option<f64>,
    #[serde(alias = "cnCode")]
    pub cn_code: Option<String>,
    pub sector: Option<Sector>,
    #[serde(alias = "seeDirect")]
    pub see_direct: Option<f64>,
    #[serde(alias = "seeIndirect")]
    pub see_indirect: Option<f64>,
}

impl ConfigOverrides {
    /// Shallow-merge onto a base configuration.
    pub fn apply(&self, base: &ProjectionConfig) -> ProjectionConfig {
        ProjectionConfig {
            basis: self.basis.unwrap_or(base.basis),
            scope: self.scope.unwrap_or(base.scope),
            cert_price_level: self.cert_price_level.unwrap_or(base.cert_price_level),
            credit: self.credit.unwrap_or(base.credit),
            imported_quantity: self.imported_quantity.unwrap_or(base.imported_quantity),
            cn_code: self.cn_code.clone().unwrap_or_else(|| base.cn_code.clone()),
            sector: self.sector.unwrap_or(base.sector),
            see_direct: self.see_direct.unwrap_or(base.see_direct),
            see_indirect: self.see_indirect.unwrap_or(base.see_indirect),
        }
    }
}

/// One named scenario to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub overrides: ConfigOverrides,
}

/// A scenario's projection, tagged with its name and label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub label: String,
    pub projection: ProjectionResult,
}

/// Run the projector once per scenario, each over the merged configuration.
pub fn compare_scenarios(
    base: &ProjectionConfig,
    scenarios: &[ScenarioSpec],
    tables: &ReferenceTables,
) -> Vec<ScenarioResult> {
    scenarios
        .iter()
        .map(|scenario| {
            let config = scenario.overrides.apply(base);
            ScenarioResult {
                name: scenario.name.clone(),
                label: scenario.label.clone(),
                projection: calculate_projection(&config, tables),
            }
        })
        .collect()
}

/// Compare the three certificate-price scenarios holding all else constant.
pub fn compare_cert_price_scenarios(
    base: &ProjectionConfig,
    tables: &ReferenceTables,
) -> Vec<ScenarioResult> {
    let specs: Vec<ScenarioSpec> = [
        (PriceLevel::Low, "LOW", "Low certificate price"),
        (PriceLevel::Mid, "MID", "Mid certificate price"),
        (PriceLevel::High, "HIGH", "High certificate price"),
    ]
    .into_iter()
    .map(|(level, name, label)| ScenarioSpec {
        name: name.to_string(),
        label: label.to_string(),
        overrides: ConfigOverrides {
            cert_price_level: Some(level),
            ..Default::default()
        },
    })
    .collect();
    compare_scenarios(base, &specs, tables)
}
