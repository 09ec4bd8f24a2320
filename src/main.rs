//! cbamcalc - emission accounting and carbon-border cost projection CLI.

mod report;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cbamcalc_core::allocation::calculate_pcf;
use cbamcalc_core::emissions::calculate_total_emissions;
use cbamcalc_core::projection::calculate_projection;
use cbamcalc_core::projection::scenario::compare_cert_price_scenarios;
use cbamcalc_core::reference::{PriceLevel, ReferenceTables, load_overrides};
use cbamcalc_core::storage::{AuditSnapshot, load_dataset, write_snapshot};

fn print_usage() {
    eprintln!("Usage: cbamcalc [OPTIONS] <DATASET>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <DATASET>                 Installation dataset to calculate (.json)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --tables <FILE>       Merge reference-table overrides from a TOML file");
    eprintln!("  -s, --scenario <LEVEL>    Certificate price scenario: low, mid or high");
    eprintln!("  --compare                 Compare the three certificate price scenarios");
    eprintln!("  -o, --output <FILE>       Also write a JSON audit snapshot");
    eprintln!("  -q, --quiet               Suppress the report");
    eprintln!("  -h, --help                Print help");
}

struct Args {
    dataset: PathBuf,
    tables_file: Option<PathBuf>,
    scenario: Option<PriceLevel>,
    compare: bool,
    output: Option<PathBuf>,
    quiet: bool,
}

fn parse_level(value: &str) -> Option<PriceLevel> {
    match value.to_ascii_lowercase().as_str() {
        "low" => Some(PriceLevel::Low),
        "mid" => Some(PriceLevel::Mid),
        "high" => Some(PriceLevel::High),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut dataset: Option<PathBuf> = None;
    let mut tables_file: Option<PathBuf> = None;
    let mut scenario: Option<PriceLevel> = None;
    let mut compare = false;
    let mut output: Option<PathBuf> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-t" | "--tables" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --tables requires a file path");
                    std::process::exit(1);
                }
                tables_file = Some(PathBuf::from(&args[i]));
            }
            "-s" | "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --scenario requires a value");
                    std::process::exit(1);
                }
                scenario = match parse_level(&args[i]) {
                    Some(level) => Some(level),
                    None => {
                        eprintln!(
                            "Error: unknown scenario '{}', expected low, mid or high",
                            args[i]
                        );
                        std::process::exit(1);
                    }
                };
            }
            "--compare" => {
                compare = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                output = Some(PathBuf::from(&args[i]));
            }
            "-q" | "--quiet" => {
                quiet = true;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if dataset.is_none() {
                    dataset = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let Some(dataset) = dataset else {
        eprintln!("Error: no dataset given");
        print_usage();
        std::process::exit(1);
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let parsed = Args {
        dataset,
        tables_file,
        scenario,
        compare,
        output,
        quiet,
    };
    if let Err(e) = run(&parsed) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut tables = ReferenceTables::default();
    if let Some(path) = &args.tables_file {
        let overrides = load_overrides(path)
            .with_context(|| format!("loading reference tables from {}", path.display()))?;
        overrides.apply(&mut tables);
    }

    let dataset = load_dataset(&args.dataset)
        .with_context(|| format!("loading dataset from {}", args.dataset.display()))?;
    tracing::debug!(
        fuel = dataset.activity.fuel.len(),
        electricity = dataset.activity.electricity.len(),
        blocks = dataset.activity.blocks.len(),
        products = dataset.products.len(),
        "dataset loaded"
    );

    // Surface formula problems before calculating; broken blocks still
    // evaluate to zero downstream, so these are warnings, not errors.
    for block in &dataset.activity.blocks {
        let keys: Vec<&str> = block.parameters.iter().map(|p| p.name.as_str()).collect();
        let validation = cbamcalc_engine::validate_formula(&block.formula, &keys);
        if !validation.unknown_variables.is_empty() {
            eprintln!(
                "Warning: block '{}' references unknown parameters: {}",
                block.id,
                validation.unknown_variables.join(", ")
            );
        } else if let Some(error) = &validation.error {
            eprintln!("Warning: block '{}' formula is invalid: {}", block.id, error);
        }
    }

    let emissions = calculate_total_emissions(&dataset.activity, &tables);
    let footprints = calculate_pcf(&emissions, &dataset.products, &dataset.allocation);

    let mut projection = None;
    let mut scenarios = Vec::new();
    if let Some(settings) = &dataset.projection {
        match footprints
            .iter()
            .find(|f| f.product_id == settings.product_id)
        {
            Some(footprint) => {
                let mut config = settings.to_config(footprint);
                if let Some(level) = args.scenario {
                    config.cert_price_level = level;
                }
                if args.compare {
                    scenarios = compare_cert_price_scenarios(&config, &tables);
                }
                projection = Some(calculate_projection(&config, &tables));
            }
            None => {
                eprintln!(
                    "Warning: projection product '{}' not found in dataset, skipping projection",
                    settings.product_id
                );
            }
        }
    }

    if !args.quiet {
        let rendered =
            report::render_report(&emissions, &footprints, projection.as_ref(), &scenarios);
        print!("{}", rendered);
    }

    if let Some(path) = &args.output {
        let snapshot = AuditSnapshot {
            generated_at: chrono::Utc::now(),
            emissions,
            footprints,
            projection,
            scenarios,
        };
        write_snapshot(path, &snapshot)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        eprintln!("Snapshot written to {}", path.display());
    }

    Ok(())
}
