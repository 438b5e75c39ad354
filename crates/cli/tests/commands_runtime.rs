use std::env;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

use freightscope_cli::commands::{analyze, transit, zone};
use serde_json::Value;

#[test]
fn analyze_emits_report_json_for_valid_records() {
    with_env(&[], || {
        let input = records_file(
            r#"[
                {"state": "California", "weight": 0.99, "cost": 10, "date": "2025-01-10"},
                {"state": "California", "weight": 1.0, "cost": 20, "date": "2025-03-20"},
                {"state": "CA", "weight": 2.0, "cost": 30, "shippingMethod": "SPD Ground"},
                {"state": "Texas", "weight": 6.0, "cost": 0, "country": "MX"}
            ]"#,
        );

        let result = analyze::run(input.path(), None, None);
        assert_eq!(result.exit_code, 0, "expected successful analyze run: {}", result.output);

        let report = parse_payload(&result.output);
        assert_eq!(report["totalShipments"], 4);
        assert_eq!(report["avgCost"], 15.0);
        assert_eq!(report["analysisMonths"], 3);
        assert_eq!(report["domesticVsInternational"]["domestic"]["percentage"], "75.0");

        let state_names: Vec<&str> = report["states"]
            .as_array()
            .expect("states array")
            .iter()
            .map(|state| state["name"].as_str().expect("state name"))
            .collect();
        assert!(state_names.contains(&"California"));
        assert!(state_names.contains(&"CA"), "exact-string grouping must keep CA separate");

        let buckets = report["weightDistribution"].as_array().expect("weight buckets");
        assert_eq!(buckets[1]["label"], "0.5-0.99 lbs");
        assert_eq!(buckets[1]["count"], 1);
        assert_eq!(buckets[2]["count"], 2);

        let recommended: Vec<&Value> = report["warehouseComparison"]
            .as_array()
            .expect("warehouse comparison")
            .iter()
            .filter(|result| result["recommended"] == true)
            .collect();
        assert_eq!(recommended.len(), 1);
        assert!(recommended[0]["savings"].is_number());
        assert!(recommended[0]["savingsPercent"].is_string());
    });
}

#[test]
fn analyze_rejects_empty_record_set() {
    with_env(&[], || {
        let input = records_file("[]");

        let result = analyze::run(input.path(), None, None);
        assert_eq!(result.exit_code, 5, "empty batch is a caller-side failure");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "analyze");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "empty_shipment_set");
    });
}

#[test]
fn analyze_reports_missing_input_as_io_failure() {
    with_env(&[], || {
        let result =
            analyze::run(std::path::Path::new("definitely-missing-records.json"), None, None);
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "io");
    });
}

#[test]
fn analyze_reports_malformed_json_as_serialization_failure() {
    with_env(&[], || {
        let input = records_file("{\"not\": \"an array\"}");

        let result = analyze::run(input.path(), None, None);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "serialization");
    });
}

#[test]
fn analyze_writes_report_file_when_output_is_given() {
    with_env(&[], || {
        let input = records_file(r#"[{"state": "OH", "weight": 1.0, "cost": 12.5}]"#);
        let output_dir = tempfile::tempdir().expect("temp dir");
        let output_path = output_dir.path().join("report.json");

        let result = analyze::run(input.path(), Some(&output_path), None);
        assert_eq!(result.exit_code, 0, "expected success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");

        let written = std::fs::read_to_string(&output_path).expect("report file");
        let report = parse_payload(&written);
        assert_eq!(report["totalShipments"], 1);
    });
}

#[test]
fn analyze_derives_zones_from_configured_origin() {
    with_env(&[("FREIGHTSCOPE_ORIGIN_ZIP", "10001")], || {
        let input = records_file(
            r#"[{"state": "CA", "weight": 1.0, "cost": 5, "zone": 0, "zipCode": "90001"}]"#,
        );

        let result = analyze::run(input.path(), None, None);
        assert_eq!(result.exit_code, 0, "expected success: {}", result.output);

        let report = parse_payload(&result.output);
        assert_eq!(report["zoneDistribution"][0]["zone"], 8);
    });
}

#[test]
fn zone_matches_known_cross_country_pair() {
    let payload = parse_payload(&zone::run("10001", "90001"));
    assert_eq!(payload["fromState"], "NY");
    assert_eq!(payload["toState"], "CA");
    assert_eq!(payload["zone"], 8);
}

#[test]
fn zone_falls_back_to_default_for_unknown_zip() {
    let payload = parse_payload(&zone::run("00000", "90001"));
    assert_eq!(payload["fromState"], Value::Null);
    assert_eq!(payload["zone"], 5);
}

#[test]
fn transit_estimates_follow_method_rules() {
    let payload = parse_payload(&transit::run("Priority Overnight", 8));
    assert_eq!(payload["days"], 1);

    let payload = parse_payload(&transit::run("SPD Ground", 3));
    assert_eq!(payload["days"], 3);
}

fn records_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp records file");
    file.write_all(contents.as_bytes()).expect("write records");
    file
}

fn parse_payload(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|error| panic!("invalid JSON payload: {error}\n{raw}"))
}

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(Mutex::default)
}

fn with_env(vars: &[(&str, &str)], run: impl FnOnce()) {
    let _guard = env_lock().lock().expect("env lock");

    let saved: Vec<(String, Option<String>)> =
        vars.iter().map(|(key, _)| ((*key).to_string(), env::var(key).ok())).collect();
    for (key, value) in vars {
        env::set_var(key, value);
    }

    run();

    for (key, previous) in saved {
        match previous {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
}
