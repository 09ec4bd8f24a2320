//! Built-in regulation reference data.
//!
//! IPCC 2006 fuel defaults (NCV in GJ/t, EF in kg/TJ), AR5 100-year GWP
//! values, the 2026-2034 phase-in schedule and the bundled price/markup
//! scenarios. Tests and callers can replace any table wholesale via
//! `TablesOverride`.

use super::{
    CreditSchedule, CreditTerms, CreditYear, DefaultIntensity, FuelFactors, GwpSet,
    MarkupRate, MarkupSchedule, PhaseInSchedule, PhaseInYear, PriceSchedule, PriceYear,
    ReferenceTables, Sector,
};

impl Default for GwpSet {
    fn default() -> Self {
        GwpSet {
            co2: 1.0,
            ch4: 28.0,
            n2o: 265.0,
            cf4: 6630.0,
            c2f6: 11100.0,
        }
    }
}

impl Default for PhaseInSchedule {
    fn default() -> Self {
        let rows = [
            (2026, 0.025),
            (2027, 0.05),
            (2028, 0.10),
            (2029, 0.225),
            (2030, 0.485),
            (2031, 0.61),
            (2032, 0.735),
            (2033, 0.8675),
            (2034, 1.0),
        ]
        .into_iter()
        .map(|(year, payable_share)| PhaseInYear {
            year,
            free_share: 1.0 - payable_share,
            payable_share,
        })
        .collect();
        PhaseInSchedule { rows }
    }
}

fn price_rows(rows: &[(i32, f64, f64, f64)]) -> PriceSchedule {
    PriceSchedule {
        rows: rows
            .iter()
            .map(|&(year, low, mid, high)| PriceYear {
                year,
                low,
                mid,
                high,
            })
            .collect(),
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        let fuel_factors = vec![
            fuel("natural_gas", 48.0, 56100.0, 1.0, 0.1),
            fuel("diesel_oil", 43.0, 74100.0, 3.0, 0.6),
            fuel("heavy_fuel_oil", 40.4, 77400.0, 3.0, 0.6),
            fuel("hard_coal", 25.8, 94600.0, 1.0, 1.5),
            fuel("lignite", 11.9, 101000.0, 1.0, 1.5),
            fuel("coke_oven_coke", 28.2, 107000.0, 1.0, 1.5),
            fuel("petroleum_coke", 32.5, 97500.0, 3.0, 0.6),
        ];

        // Certificate price scenarios (€/tCO₂e).
        let cert_prices = price_rows(&[
            (2026, 70.0, 93.0, 120.0),
            (2027, 74.0, 100.0, 134.0),
            (2028, 78.0, 107.0, 148.0),
            (2029, 82.0, 114.0, 162.0),
            (2030, 86.0, 121.0, 176.0),
            (2031, 90.0, 128.0, 190.0),
            (2032, 94.0, 135.0, 204.0),
            (2033, 98.0, 142.0, 218.0),
            (2034, 102.0, 150.0, 232.0),
        ]);

        // Reference commodity price forecast (€/t of good).
        let reference_prices = price_rows(&[
            (2026, 2200.0, 2500.0, 2900.0),
            (2027, 2230.0, 2550.0, 2980.0),
            (2028, 2260.0, 2600.0, 3060.0),
            (2029, 2290.0, 2650.0, 3140.0),
            (2030, 2320.0, 2700.0, 3220.0),
            (2031, 2350.0, 2750.0, 3300.0),
            (2032, 2380.0, 2800.0, 3380.0),
            (2033, 2410.0, 2850.0, 3460.0),
            (2034, 2440.0, 2900.0, 3540.0),
        ]);

        // Markup over default intensities: standard sectors ramp to the 30%
        // cap by 2028; the fertiliser sector is capped at 1% throughout.
        let mut markup_rows = Vec::new();
        for sector in [
            Sector::Aluminium,
            Sector::IronSteel,
            Sector::Cement,
            Sector::Hydrogen,
        ] {
            for year in 2026..=2034 {
                let rate = match year {
                    2026 => 0.10,
                    2027 => 0.20,
                    _ => 0.30,
                };
                markup_rows.push(MarkupRate { sector, year, rate });
            }
        }
        for year in 2026..=2034 {
            let rate = if year == 2026 { 0.0 } else { 0.01 };
            markup_rows.push(MarkupRate {
                sector: Sector::Fertiliser,
                year,
                rate,
            });
        }

        let default_intensities = vec![
            intensity("76011000", Sector::Aluminium, 1.60, 5.50),
            intensity("76012080", Sector::Aluminium, 1.45, 4.90),
            intensity("72081000", Sector::IronSteel, 1.85, 0.25),
            intensity("72142000", Sector::IronSteel, 1.60, 0.30),
            intensity("25232900", Sector::Cement, 0.79, 0.05),
            intensity("31021010", Sector::Fertiliser, 1.57, 0.10),
            intensity("28041000", Sector::Hydrogen, 9.00, 0.30),
        ];

        // Deduction-credit scenarios: price (€/t) and quota share of
        // embedded emissions per year.
        let credit_rows = [
            (2026, 40.0, 55.0, 75.0, 0.20),
            (2027, 42.0, 58.0, 79.0, 0.25),
            (2028, 44.0, 61.0, 83.0, 0.30),
            (2029, 46.0, 64.0, 87.0, 0.35),
            (2030, 48.0, 67.0, 91.0, 0.40),
            (2031, 50.0, 70.0, 95.0, 0.45),
            (2032, 52.0, 73.0, 99.0, 0.50),
            (2033, 54.0, 76.0, 103.0, 0.50),
            (2034, 56.0, 79.0, 107.0, 0.50),
        ]
        .into_iter()
        .map(|(year, low, mid, high, quota_share)| CreditYear {
            year,
            low: CreditTerms {
                price: low,
                quota_share,
            },
            mid: CreditTerms {
                price: mid,
                quota_share,
            },
            high: CreditTerms {
                price: high,
                quota_share,
            },
        })
        .collect();

        ReferenceTables {
            fuel_factors,
            gwp: GwpSet::default(),
            phase_in: PhaseInSchedule::default(),
            cert_prices,
            markup: MarkupSchedule { rows: markup_rows },
            default_intensities,
            credit_prices: CreditSchedule { rows: credit_rows },
            reference_prices,
        }
    }
}

fn fuel(fuel_type: &str, ncv: f64, ef_co2: f64, ef_ch4: f64, ef_n2o: f64) -> FuelFactors {
    FuelFactors {
        fuel_type: fuel_type.to_string(),
        ncv,
        ef_co2,
        ef_ch4,
        ef_n2o,
    }
}

fn intensity(cn_code: &str, sector: Sector, direct: f64, indirect: f64) -> DefaultIntensity {
    DefaultIntensity {
        cn_code: cn_code.to_string(),
        sector,
        direct,
        indirect,
    }
}
