//! JSON installation datasets and audit snapshots.
//!
//! The dataset schema is the single normalization layer between external
//! exports and the canonical model: serde aliases on the model types absorb
//! the camelCase spellings older exports used, and quantity coercion runs
//! during deserialization. Everything downstream consumes canonical data.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationSettings, ProductFootprint};
use crate::emissions::EmissionResult;
use crate::error::Result;
use crate::model::{ActivityData, Product};
use crate::projection::scenario::ScenarioResult;
use crate::projection::{
    CalculationBasis, CreditScenario, EmissionScope, ProjectionConfig, ProjectionResult,
};
use crate::reference::{PriceLevel, Sector};

/// Projection settings as they appear in a dataset: the SEE values are not
/// stored, they come from the allocation result for `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSettings {
    #[serde(alias = "productId")]
    pub product_id: String,
    pub basis: CalculationBasis,
    pub scope: EmissionScope,
    #[serde(alias = "certPriceLevel")]
    pub cert_price_level: PriceLevel,
    #[serde(default = "default_credit")]
    pub credit: CreditScenario,
    #[serde(alias = "importedQuantity")]
    pub imported_quantity: f64,
    #[serde(alias = "cnCode")]
    pub cn_code: String,
    pub sector: Sector,
}

fn default_credit() -> CreditScenario {
    CreditScenario::None
}

impl ProjectionSettings {
    /// Bind the settings to a product's computed footprint.
    pub fn to_config(&self, footprint: &ProductFootprint) -> ProjectionConfig {
        ProjectionConfig {
            basis: self.basis,
            scope: self.scope,
            cert_price_level: self.cert_price_level,
            credit: self.credit,
            imported_quantity: self.imported_quantity,
            cn_code: self.cn_code.clone(),
            sector: self.sector,
            see_direct: footprint.see_direct,
            see_indirect: footprint.see_indirect,
        }
    }
}

/// A complete installation dataset: the flat latest-version records the
/// persistence collaborator hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub activity: ActivityData,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub allocation: AllocationSettings,
    #[serde(default)]
    pub projection: Option<ProjectionSettings>,
}

/// Parse a dataset from JSON text.
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    Ok(serde_json::from_str(content)?)
}

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)?;
    parse_dataset(&content)
}

/// A combined calculation snapshot, safe to persist for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSnapshot {
    pub generated_at: DateTime<Utc>,
    pub emissions: EmissionResult,
    pub footprints: Vec<ProductFootprint>,
    #[serde(default)]
    pub projection: Option<ProjectionResult>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioResult>,
}

/// Write an audit snapshot as pretty-printed JSON.
pub fn write_snapshot(path: &Path, snapshot: &AuditSnapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}
