//! Integration tests for the report CLI

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

const DATASET: &str = r#"{
    "activity": {
        "fuel": [{
            "period": "2026-01",
            "processRef": "furnace-1",
            "fuelType": "natural_gas",
            "quantity": 500.0
        }],
        "electricity": [{
            "period": "2026-01",
            "processRef": "grid",
            "mwh": 14500.0,
            "emissionFactor": 0.328
        }]
    },
    "products": [
        {"id": "p1", "name": "ingot", "quantity": 1000.0}
    ],
    "projection": {
        "productId": "p1",
        "basis": "DEFAULT",
        "scope": "DIRECT_ONLY",
        "certPriceLevel": "MID",
        "importedQuantity": 110000.0,
        "cnCode": "76011000",
        "sector": "aluminium"
    }
}"#;

fn write_dataset(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "cbamcalc_test_{}_{}.json",
        tag,
        std::process::id()
    ));
    fs::write(&path, DATASET).unwrap();
    path
}

#[test]
fn test_report_contains_emission_summary() {
    let dataset = write_dataset("summary");
    let (stdout, _, code) = run_command(&[dataset.to_str().unwrap()]);
    fs::remove_file(&dataset).ok();

    assert_eq!(code, 0);
    // 500 t natural gas at 48 GJ/t and 56100 kg CO2/TJ.
    assert!(stdout.contains("| CO2 (t) | 1346.4 |"));
    // 14500 MWh at 0.328 tCO2e/MWh.
    assert!(stdout.contains("| Indirect CO2e (t) | 4756.0 |"));
    assert!(stdout.contains("# Product footprints"));
}

#[test]
fn test_report_contains_projection_rows() {
    let dataset = write_dataset("projection");
    let (stdout, _, code) = run_command(&[dataset.to_str().unwrap()]);
    fs::remove_file(&dataset).ok();

    assert_eq!(code, 0);
    assert!(stdout.contains("# Cost projection 2026-2034"));
    // DEFAULT basis: 1.60 default intensity with 10% markup in 2026,
    // 110000 t imported, 2.5% payable, 93 EUR certificate.
    assert!(stdout.contains("| 2026 | 1.7600 | 193600.0 | 4840.0 | 93.00 | 450120.00 |"));
    // All nine years are present.
    for year in 2026..=2034 {
        assert!(stdout.contains(&format!("| {} |", year)), "missing {}", year);
    }
}

#[test]
fn test_compare_flag_adds_scenario_table() {
    let dataset = write_dataset("compare");
    let (stdout, _, code) = run_command(&["--compare", dataset.to_str().unwrap()]);
    fs::remove_file(&dataset).ok();

    assert_eq!(code, 0);
    assert!(stdout.contains("# Scenario comparison"));
    assert!(stdout.contains("Low certificate price"));
    assert!(stdout.contains("High certificate price"));
}

#[test]
fn test_output_flag_writes_snapshot() {
    let dataset = write_dataset("snapshot");
    let snapshot_path = std::env::temp_dir().join(format!(
        "cbamcalc_test_snapshot_out_{}.json",
        std::process::id()
    ));

    let (_, stderr, code) = run_command(&[
        "-q",
        "-o",
        snapshot_path.to_str().unwrap(),
        dataset.to_str().unwrap(),
    ]);
    fs::remove_file(&dataset).ok();

    assert_eq!(code, 0);
    assert!(stderr.contains("Snapshot written to"));

    let content = fs::read_to_string(&snapshot_path).unwrap();
    fs::remove_file(&snapshot_path).ok();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(parsed.get("generated_at").is_some());
    assert!(parsed.get("emissions").is_some());
    assert_eq!(parsed["footprints"].as_array().unwrap().len(), 1);
}

#[test]
fn test_scenario_flag_overrides_price_level() {
    let dataset = write_dataset("scenario");
    let (stdout_mid, _, _) = run_command(&[dataset.to_str().unwrap()]);
    let (stdout_high, _, code) = run_command(&["-s", "high", dataset.to_str().unwrap()]);
    fs::remove_file(&dataset).ok();

    assert_eq!(code, 0);
    // 2026 HIGH certificate price is 120.
    assert!(stdout_high.contains("| 120.00 |"));
    assert_ne!(stdout_mid, stdout_high);
}

#[test]
fn test_missing_dataset_exits_nonzero() {
    let (_, stderr, code) = run_command(&["/nonexistent/cbamcalc_dataset.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error"));
}
