//! Product carbon footprint: mass-share allocation of installation
//! emissions and specific embedded emissions per product.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emissions::EmissionResult;
use crate::model::Product;

/// Allocation policy switches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AllocationSettings {
    /// Exclude residue products from allocation (treat them as waste).
    #[serde(default, alias = "treatResidueAsWaste")]
    pub treat_residue_as_waste: bool,
}

/// Per-product allocation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFootprint {
    pub product_id: String,
    pub name: String,
    pub quantity: f64,
    /// Mass share of the eligible production; 0 for excluded products.
    pub share: f64,
    pub allocated_direct_t: f64,
    pub allocated_indirect_t: f64,
    /// Precursor embedded emissions (t), added on top of the allocation.
    pub precursor_t: f64,
    /// Specific embedded emissions excluding precursors (tCO₂e/t).
    pub see_direct: f64,
    pub see_indirect: f64,
    /// Total SEE including the precursor contribution (tCO₂e/t).
    pub see_total: f64,
}

/// Allocate aggregate emissions across products by mass share.
///
/// Precursor embedded emissions of complex goods are not allocated by
/// share; they are added directly on top of the product's own total.
pub fn calculate_pcf(
    emissions: &EmissionResult,
    products: &[Product],
    settings: &AllocationSettings,
) -> Vec<ProductFootprint> {
    let totals = &emissions.totals;
    let eligible_mass: f64 = products
        .iter()
        .filter(|p| is_eligible(p, settings))
        .map(|p| p.quantity)
        .sum();

    debug!(
        products = products.len(),
        eligible_mass, "allocating emissions to products"
    );

    products
        .iter()
        .map(|product| {
            let share = if is_eligible(product, settings) && eligible_mass > 0.0 {
                product.quantity / eligible_mass
            } else {
                0.0
            };
            let allocated_direct_t = totals.direct_co2e_t * share;
            let allocated_indirect_t = totals.indirect_co2e_t * share;
            let precursor_t = product.quantity * product.precursor_see();

            let (see_direct, see_indirect, see_total) = if product.quantity > 0.0 {
                (
                    allocated_direct_t / product.quantity,
                    allocated_indirect_t / product.quantity,
                    (allocated_direct_t + allocated_indirect_t + precursor_t)
                        / product.quantity,
                )
            } else {
                (0.0, 0.0, 0.0)
            };

            ProductFootprint {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: product.quantity,
                share,
                allocated_direct_t,
                allocated_indirect_t,
                precursor_t,
                see_direct,
                see_indirect,
                see_total,
            }
        })
        .collect()
}

fn is_eligible(product: &Product, settings: &AllocationSettings) -> bool {
    !(settings.treat_residue_as_waste && product.residue)
}
