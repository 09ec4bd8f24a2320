//! Carbon-border cost projection over the 2026-2034 phase-in window.

pub mod scenario;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reference::{PriceLevel, ReferenceTables, Sector};

pub const PROJECTION_START_YEAR: i32 = 2026;
pub const PROJECTION_END_YEAR: i32 = 2034;

/// Which emission intensity the projection is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalculationBasis {
    /// Use the computed SEE of the installation's own product.
    Actual,
    /// Use the regulatory default intensity for the CN code, with the
    /// sector markup schedule applied.
    Default,
}

/// Whether indirect emissions are included in the intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmissionScope {
    DirectOnly,
    Total,
}

/// Deduction-credit scenario: not eligible, or eligible at a price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditScenario {
    None,
    Low,
    Mid,
    High,
}

impl CreditScenario {
    pub fn level(&self) -> Option<PriceLevel> {
        match self {
            CreditScenario::None => None,
            CreditScenario::Low => Some(PriceLevel::Low),
            CreditScenario::Mid => Some(PriceLevel::Mid),
            CreditScenario::High => Some(PriceLevel::High),
        }
    }
}

/// One projection scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub basis: CalculationBasis,
    pub scope: EmissionScope,
    #[serde(alias = "certPriceLevel")]
    pub cert_price_level: PriceLevel,
    #[serde(default = "default_credit")]
    pub credit: CreditScenario,
    /// Annual imported quantity (t).
    #[serde(alias = "importedQuantity")]
    pub imported_quantity: f64,
    #[serde(alias = "cnCode")]
    pub cn_code: String,
    pub sector: Sector,
    /// Computed SEE of the projected product (tCO₂e/t), used by the
    /// ACTUAL basis.
    #[serde(default, alias = "seeDirect")]
    pub see_direct: f64,
    #[serde(default, alias = "seeIndirect")]
    pub see_indirect: f64,
}

fn default_credit() -> CreditScenario {
    CreditScenario::None
}

/// One calendar year of the projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: i32,
    pub markup: f64,
    /// Emission intensity applied this year (tCO₂e/t).
    pub intensity: f64,
    pub embedded_t: f64,
    pub payable_share: f64,
    pub payable_t: f64,
    pub cert_price: f64,
    pub gross_cost: f64,
    pub deduction: f64,
    pub net_cost: f64,
    pub cost_per_tonne: f64,
    /// Net cost per tonne as a percentage of the reference commodity price.
    pub cost_pct_of_price: f64,
}

/// Nine-year sums.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub embedded_t: f64,
    pub payable_t: f64,
    pub gross_cost: f64,
    pub deduction: f64,
    pub net_cost: f64,
}

/// Full projection output: rows, totals and the configuration echo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub rows: Vec<ProjectionRow>,
    pub totals: ProjectionTotals,
    pub config: ProjectionConfig,
}

/// Intensity for one year under the configured basis and scope.
fn intensity_for_year(config: &ProjectionConfig, tables: &ReferenceTables, markup: f64) -> f64 {
    match config.basis {
        CalculationBasis::Actual => match config.scope {
            EmissionScope::DirectOnly => config.see_direct,
            EmissionScope::Total => config.see_direct + config.see_indirect,
        },
        CalculationBasis::Default => {
            // A CN code missing from the table degrades to zero intensity
            // rather than failing.
            let Some(entry) = tables.default_intensity(&config.cn_code) else {
                return 0.0;
            };
            let base = match config.scope {
                EmissionScope::DirectOnly => entry.direct,
                EmissionScope::Total => entry.direct + entry.indirect,
            };
            base * (1.0 + markup)
        }
    }
}

/// Project the carbon-border cost for one configuration over 2026-2034.
pub fn calculate_projection(
    config: &ProjectionConfig,
    tables: &ReferenceTables,
) -> ProjectionResult {
    let mut rows = Vec::with_capacity(9);
    let mut totals = ProjectionTotals::default();

    for year in PROJECTION_START_YEAR..=PROJECTION_END_YEAR {
        let markup = tables.markup.rate(config.sector, year);
        let intensity = intensity_for_year(config, tables, markup);
        let embedded_t = config.imported_quantity * intensity;
        let payable_share = tables.phase_in.payable_share(year);
        let payable_t = embedded_t * payable_share;
        let cert_price = tables.cert_prices.price(year, config.cert_price_level);
        let gross_cost = payable_t * cert_price;

        // The credit quota applies to embedded, not payable, emissions.
        let deduction = match config.credit.level() {
            Some(level) => match tables.credit_prices.terms(year, level) {
                Some(terms) => terms.price.min(cert_price) * embedded_t * terms.quota_share,
                None => 0.0,
            },
            None => 0.0,
        };

        let net_cost = (gross_cost - deduction).max(0.0);
        let cost_per_tonne = if config.imported_quantity > 0.0 {
            net_cost / config.imported_quantity
        } else {
            0.0
        };
        let reference_price = tables
            .reference_prices
            .price(year, config.cert_price_level);
        let cost_pct_of_price = if reference_price > 0.0 {
            cost_per_tonne / reference_price * 100.0
        } else {
            0.0
        };

        totals.embedded_t += embedded_t;
        totals.payable_t += payable_t;
        totals.gross_cost += gross_cost;
        totals.deduction += deduction;
        totals.net_cost += net_cost;

        rows.push(ProjectionRow {
            year,
            markup,
            intensity,
            embedded_t,
            payable_share,
            payable_t,
            cert_price,
            gross_cost,
            deduction,
            net_cost,
            cost_per_tonne,
            cost_pct_of_price,
        });
    }

    debug!(
        net_cost = totals.net_cost,
        embedded = totals.embedded_t,
        "projection complete"
    );

    ProjectionResult {
        rows,
        totals,
        config: config.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actual_config() -> ProjectionConfig {
        ProjectionConfig {
            basis: CalculationBasis::Actual,
            scope: EmissionScope::DirectOnly,
            cert_price_level: PriceLevel::Mid,
            credit: CreditScenario::None,
            imported_quantity: 110000.0,
            cn_code: "76011000".into(),
            sector: Sector::Aluminium,
            see_direct: 1.87,
            see_indirect: 5.2,
        }
    }

    #[test]
    fn test_reference_projection_case_2026() {
        let tables = ReferenceTables::default();
        let result = calculate_projection(&actual_config(), &tables);

        let row = &result.rows[0];
        assert_eq!(row.year, 2026);
        assert!((row.embedded_t - 205700.0).abs() < 1e-6);
        assert!((row.payable_t - 5142.5).abs() < 1e-6);
        assert!((row.cert_price - 93.0).abs() < 1e-9);
        assert!((row.gross_cost - 478252.5).abs() < 1e-6);
        assert_eq!(row.deduction, 0.0);
        assert_eq!(row.net_cost, row.gross_cost);
    }

    #[test]
    fn test_projection_spans_all_nine_years() {
        let tables = ReferenceTables::default();
        let result = calculate_projection(&actual_config(), &tables);
        assert_eq!(result.rows.len(), 9);
        assert_eq!(result.rows.first().unwrap().year, 2026);
        assert_eq!(result.rows.last().unwrap().year, 2034);
        // Final year pays in full.
        assert_eq!(result.rows.last().unwrap().payable_share, 1.0);
    }

    #[test]
    fn test_total_scope_includes_indirect_see() {
        let tables = ReferenceTables::default();
        let mut config = actual_config();
        config.scope = EmissionScope::Total;
        let result = calculate_projection(&config, &tables);
        assert!((result.rows[0].intensity - (1.87 + 5.2)).abs() < 1e-12);
    }

    #[test]
    fn test_default_basis_applies_markup() {
        let tables = ReferenceTables::default();
        let mut config = actual_config();
        config.basis = CalculationBasis::Default;
        let result = calculate_projection(&config, &tables);

        // 2026 markup for aluminium is 10% over the 1.60 default.
        assert!((result.rows[0].markup - 0.10).abs() < 1e-12);
        assert!((result.rows[0].intensity - 1.60 * 1.10).abs() < 1e-9);
        // From 2028 the markup sits at the 30% cap.
        assert!((result.rows[2].intensity - 1.60 * 1.30).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_cn_code_degrades_to_zero_intensity() {
        let tables = ReferenceTables::default();
        let mut config = actual_config();
        config.basis = CalculationBasis::Default;
        config.cn_code = "00000000".into();
        let result = calculate_projection(&config, &tables);
        for row in &result.rows {
            assert_eq!(row.intensity, 0.0);
            assert_eq!(row.net_cost, 0.0);
        }
    }

    #[test]
    fn test_deduction_uses_embedded_not_payable_emissions() {
        let tables = ReferenceTables::default();
        let mut config = actual_config();
        config.credit = CreditScenario::Mid;
        let result = calculate_projection(&config, &tables);

        let row = &result.rows[0];
        let terms = tables
            .credit_prices
            .terms(2026, PriceLevel::Mid)
            .unwrap();
        let expected = terms.price.min(row.cert_price) * row.embedded_t * terms.quota_share;
        assert!((row.deduction - expected).abs() < 1e-6);
        // In early years the quota dwarfs the payable volume; net cost is
        // clamped at zero rather than going negative.
        assert!(row.deduction > row.gross_cost);
        assert_eq!(row.net_cost, 0.0);
    }

    #[test]
    fn test_zero_import_quantity_guards_division() {
        let tables = ReferenceTables::default();
        let mut config = actual_config();
        config.imported_quantity = 0.0;
        let result = calculate_projection(&config, &tables);
        for row in &result.rows {
            assert_eq!(row.cost_per_tonne, 0.0);
            assert_eq!(row.cost_pct_of_price, 0.0);
        }
    }

    #[test]
    fn test_totals_are_row_sums() {
        let tables = ReferenceTables::default();
        let result = calculate_projection(&actual_config(), &tables);
        let gross: f64 = result.rows.iter().map(|r| r.gross_cost).sum();
        let net: f64 = result.rows.iter().map(|r| r.net_cost).sum();
        assert!((result.totals.gross_cost - gross).abs() < 1e-6);
        assert!((result.totals.net_cost - net).abs() < 1e-6);
    }
}
