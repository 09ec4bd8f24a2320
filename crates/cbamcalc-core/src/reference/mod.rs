//! Immutable regulatory reference tables.
//!
//! Every calculation entry point takes these as an explicit parameter; the
//! core holds no ambient table state, so tests can substitute alternative
//! tables deterministically. `ReferenceTables::default()` carries the
//! built-in regulation data (see `defaults.rs`); partial overrides can be
//! merged in from a TOML file (see `overrides.rs`).

mod defaults;
mod overrides;

pub use overrides::{TablesOverride, load_overrides};

use serde::{Deserialize, Serialize};

use crate::model::Gas;

/// Certificate / credit / commodity price scenario level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceLevel {
    Low,
    Mid,
    High,
}

/// Goods sector, used for markup schedules and default intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Aluminium,
    IronSteel,
    Cement,
    Fertiliser,
    Hydrogen,
}

/// Default combustion factors for one fuel type. NCV in GJ/t, emission
/// factors in kg per TJ of fuel energy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelFactors {
    pub fuel_type: String,
    pub ncv: f64,
    pub ef_co2: f64,
    pub ef_ch4: f64,
    pub ef_n2o: f64,
}

/// Global-warming-potential multipliers (tCO₂e per t of gas).
///
/// The CO₂ multiplier is 1 by definition; the remaining defaults are the
/// AR5 100-year values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GwpSet {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
    pub cf4: f64,
    pub c2f6: f64,
}

impl GwpSet {
    pub fn factor(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Co2 => self.co2,
            Gas::Ch4 => self.ch4,
            Gas::N2o => self.n2o,
            Gas::Cf4 => self.cf4,
            Gas::C2f6 => self.c2f6,
        }
    }

    /// Multiplier for a gas by name; unrecognized gases convert 1:1.
    pub fn factor_named(&self, name: &str) -> f64 {
        Gas::parse(name).map(|gas| self.factor(gas)).unwrap_or(1.0)
    }
}

/// One year of the phase-in schedule: the free-allocation share and the
/// payable share, which sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseInYear {
    pub year: i32,
    pub free_share: f64,
    pub payable_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseInSchedule {
    pub rows: Vec<PhaseInYear>,
}

impl PhaseInSchedule {
    /// Payable emission share for a year; 0 for years outside the schedule.
    pub fn payable_share(&self, year: i32) -> f64 {
        self.rows
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.payable_share)
            .unwrap_or(0.0)
    }
}

/// One year of a LOW/MID/HIGH price scenario table (€/t).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceYear {
    pub year: i32,
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl PriceYear {
    pub fn at(&self, level: PriceLevel) -> f64 {
        match level {
            PriceLevel::Low => self.low,
            PriceLevel::Mid => self.mid,
            PriceLevel::High => self.high,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSchedule {
    pub rows: Vec<PriceYear>,
}

impl PriceSchedule {
    /// Price for a year and level; 0 for years outside the schedule.
    pub fn price(&self, year: i32, level: PriceLevel) -> f64 {
        self.rows
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.at(level))
            .unwrap_or(0.0)
    }
}

/// One (sector, year) markup rate over the regulatory default intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupRate {
    pub sector: Sector,
    pub year: i32,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupSchedule {
    pub rows: Vec<MarkupRate>,
}

impl MarkupSchedule {
    /// Cap on the markup rate: 1% for the fertiliser sector, 30% otherwise.
    pub fn cap(sector: Sector) -> f64 {
        match sector {
            Sector::Fertiliser => 0.01,
            _ => 0.30,
        }
    }

    /// Markup rate for a sector and year, re-clamped to the sector cap so a
    /// mis-imported table cannot exceed it. 0 for missing entries.
    pub fn rate(&self, sector: Sector, year: i32) -> f64 {
        let rate = self
            .rows
            .iter()
            .find(|row| row.sector == sector && row.year == year)
            .map(|row| row.rate)
            .unwrap_or(0.0);
        rate.min(Self::cap(sector))
    }
}

/// Regulatory default emission intensity for one CN code (tCO₂e/t).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultIntensity {
    pub cn_code: String,
    pub sector: Sector,
    pub direct: f64,
    pub indirect: f64,
}

/// Deduction-credit terms for one year and level: credit price (€/t) and
/// the share of embedded emissions the credit quota covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreditTerms {
    pub price: f64,
    pub quota_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditYear {
    pub year: i32,
    pub low: CreditTerms,
    pub mid: CreditTerms,
    pub high: CreditTerms,
}

impl CreditYear {
    pub fn at(&self, level: PriceLevel) -> CreditTerms {
        match level {
            PriceLevel::Low => self.low,
            PriceLevel::Mid => self.mid,
            PriceLevel::High => self.high,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditSchedule {
    pub rows: Vec<CreditYear>,
}

impl CreditSchedule {
    /// Credit terms for a year and level; None outside the schedule (no
    /// deduction applies).
    pub fn terms(&self, year: i32, level: PriceLevel) -> Option<CreditTerms> {
        self.rows
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.at(level))
    }
}

/// The complete read-only reference data set a calculation consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub fuel_factors: Vec<FuelFactors>,
    pub gwp: GwpSet,
    pub phase_in: PhaseInSchedule,
    pub cert_prices: PriceSchedule,
    pub markup: MarkupSchedule,
    pub default_intensities: Vec<DefaultIntensity>,
    pub credit_prices: CreditSchedule,
    pub reference_prices: PriceSchedule,
}

impl ReferenceTables {
    /// Default factors for a fuel type, if the table knows it.
    pub fn fuel(&self, fuel_type: &str) -> Option<&FuelFactors> {
        self.fuel_factors.iter().find(|f| f.fuel_type == fuel_type)
    }

    /// Default intensity entry for a CN code, if the table knows it.
    pub fn default_intensity(&self, cn_code: &str) -> Option<&DefaultIntensity> {
        self.default_intensities
            .iter()
            .find(|entry| entry.cn_code == cn_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payable_share_monotone_and_bounds() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.phase_in.payable_share(2026), 0.025);
        assert_eq!(tables.phase_in.payable_share(2034), 1.0);
        for year in 2026..2034 {
            assert!(
                tables.phase_in.payable_share(year + 1) >= tables.phase_in.payable_share(year),
                "payable share must be non-decreasing at {}",
                year
            );
        }
    }

    #[test]
    fn test_phase_in_shares_sum_to_one() {
        let tables = ReferenceTables::default();
        for row in &tables.phase_in.rows {
            assert!((row.free_share + row.payable_share - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gwp_co2_is_one() {
        assert_eq!(ReferenceTables::default().gwp.factor(crate::model::Gas::Co2), 1.0);
    }

    #[test]
    fn test_markup_caps() {
        let tables = ReferenceTables::default();
        for year in 2026..=2034 {
            assert!(tables.markup.rate(Sector::Fertiliser, year) <= 0.01);
            assert!(tables.markup.rate(Sector::Aluminium, year) <= 0.30);
        }
        // From 2028 onward the standard ramp sits at the cap.
        assert_eq!(tables.markup.rate(Sector::Aluminium, 2028), 0.30);
        assert_eq!(tables.markup.rate(Sector::Aluminium, 2034), 0.30);
    }

    #[test]
    fn test_markup_non_decreasing_per_sector() {
        let tables = ReferenceTables::default();
        for sector in [
            Sector::Aluminium,
            Sector::IronSteel,
            Sector::Cement,
            Sector::Fertiliser,
            Sector::Hydrogen,
        ] {
            for year in 2026..2034 {
                assert!(
                    tables.markup.rate(sector, year + 1) >= tables.markup.rate(sector, year),
                    "markup must be non-decreasing for {:?} at {}",
                    sector,
                    year
                );
            }
        }
    }

    #[test]
    fn test_cert_price_mid_2026_matches_reference_case() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.cert_prices.price(2026, PriceLevel::Mid), 93.0);
    }

    #[test]
    fn test_missing_year_degrades_to_zero() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.phase_in.payable_share(2050), 0.0);
        assert_eq!(tables.cert_prices.price(2050, PriceLevel::Mid), 0.0);
        assert!(tables.credit_prices.terms(2050, PriceLevel::Mid).is_none());
    }

    #[test]
    fn test_unknown_fuel_and_cn_code_lookups() {
        let tables = ReferenceTables::default();
        assert!(tables.fuel("unobtainium").is_none());
        assert!(tables.default_intensity("00000000").is_none());
    }
}
