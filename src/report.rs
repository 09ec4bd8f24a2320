//! Markdown report rendering for the CLI.

use std::fmt::Write;

use cbamcalc_core::allocation::ProductFootprint;
use cbamcalc_core::emissions::EmissionResult;
use cbamcalc_core::projection::ProjectionResult;
use cbamcalc_core::projection::scenario::ScenarioResult;

/// Render the full calculation report as markdown.
pub fn render_report(
    emissions: &EmissionResult,
    footprints: &[ProductFootprint],
    projection: Option<&ProjectionResult>,
    scenarios: &[ScenarioResult],
) -> String {
    let mut out = String::new();

    render_emissions(&mut out, emissions);
    if !footprints.is_empty() {
        render_footprints(&mut out, footprints);
    }
    if let Some(projection) = projection {
        render_projection(&mut out, projection);
    }
    if !scenarios.is_empty() {
        render_scenarios(&mut out, scenarios);
    }

    out
}

fn render_emissions(out: &mut String, emissions: &EmissionResult) {
    let totals = &emissions.totals;
    let _ = writeln!(out, "# Emission summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Quantity | Value |");
    let _ = writeln!(out, "| --- | --- |");
    let _ = writeln!(out, "| Fuel energy (GJ) | {:.1} |", totals.energy_gj);
    let _ = writeln!(out, "| CO2 (t) | {:.1} |", totals.co2_t);
    let _ = writeln!(out, "| CH4 (t) | {:.3} |", totals.ch4_t);
    let _ = writeln!(out, "| N2O (t) | {:.3} |", totals.n2o_t);
    if totals.cf4_t > 0.0 || totals.c2f6_t > 0.0 {
        let _ = writeln!(out, "| CF4 (t) | {:.3} |", totals.cf4_t);
        let _ = writeln!(out, "| C2F6 (t) | {:.3} |", totals.c2f6_t);
    }
    let _ = writeln!(out, "| Direct CO2e (t) | {:.1} |", totals.direct_co2e_t);
    let _ = writeln!(out, "| Indirect CO2e (t) | {:.1} |", totals.indirect_co2e_t);
    let _ = writeln!(out, "| Total CO2e (t) | {:.1} |", totals.total_co2e_t);
    let _ = writeln!(out);

    if emissions.blocks_supersede_legacy && !(emissions.anode.is_empty() && emissions.pfc.is_empty())
    {
        let _ = writeln!(
            out,
            "Process emissions use generic blocks; legacy anode/PFC entries are reported but not counted."
        );
        let _ = writeln!(out);
    }

    let broken: Vec<&str> = emissions
        .blocks
        .iter()
        .filter(|b| b.error.is_some())
        .map(|b| b.block_id.as_str())
        .collect();
    if !broken.is_empty() {
        let _ = writeln!(out, "Blocks with formula errors: {}", broken.join(", "));
        let _ = writeln!(out);
    }
}

fn render_footprints(out: &mut String, footprints: &[ProductFootprint]) {
    let _ = writeln!(out, "# Product footprints");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "| Product | Quantity (t) | Share | SEE direct | SEE indirect | SEE total |"
    );
    let _ = writeln!(out, "| --- | --- | --- | --- | --- | --- |");
    for footprint in footprints {
        let _ = writeln!(
            out,
            "| {} | {:.1} | {:.3} | {:.4} | {:.4} | {:.4} |",
            footprint.name,
            footprint.quantity,
            footprint.share,
            footprint.see_direct,
            footprint.see_indirect,
            footprint.see_total,
        );
    }
    let _ = writeln!(out);
}

fn render_projection(out: &mut String, projection: &ProjectionResult) {
    let _ = writeln!(out, "# Cost projection 2026-2034");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "| Year | Intensity | Embedded (t) | Payable (t) | Price | Gross | Deduction | Net | €/t | % of price |"
    );
    let _ = writeln!(
        out,
        "| --- | --- | --- | --- | --- | --- | --- | --- | --- | --- |"
    );
    for row in &projection.rows {
        let _ = writeln!(
            out,
            "| {} | {:.4} | {:.1} | {:.1} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
            row.year,
            row.intensity,
            row.embedded_t,
            row.payable_t,
            row.cert_price,
            row.gross_cost,
            row.deduction,
            row.net_cost,
            row.cost_per_tonne,
            row.cost_pct_of_price,
        );
    }
    let totals = &projection.totals;
    let _ = writeln!(
        out,
        "| Total | | {:.1} | {:.1} | | {:.2} | {:.2} | {:.2} | | |",
        totals.embedded_t, totals.payable_t, totals.gross_cost, totals.deduction, totals.net_cost,
    );
    let _ = writeln!(out);
}

fn render_scenarios(out: &mut String, scenarios: &[ScenarioResult]) {
    let _ = writeln!(out, "# Scenario comparison");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Scenario | Net cost (total) | Gross cost (total) |");
    let _ = writeln!(out, "| --- | --- | --- |");
    for scenario in scenarios {
        let _ = writeln!(
            out,
            "| {} | {:.2} | {:.2} |",
            scenario.label,
            scenario.projection.totals.net_cost,
            scenario.projection.totals.gross_cost,
        );
    }
    let _ = writeln!(out);
}
