use std::fs;
use std::path::Path;

use freightscope_core::analytics::{DeterministicReportEngine, ReportEngine};
use freightscope_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use freightscope_core::domain::shipment::ShipmentRecord;
use freightscope_core::errors::ApplicationError;
use tracing::info;

use super::CommandResult;

const COMMAND: &str = "analyze";

pub fn run(input: &Path, output: Option<&Path>, origin_zip: Option<String>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides { origin_zip, ..Default::default() },
        ..Default::default()
    }) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure(COMMAND, "configuration", error.to_string(), 2),
    };

    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(error) => {
            let error = ApplicationError::Io(format!("could not read `{}`: {error}", input.display()));
            return CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 3);
        }
    };

    let records: Vec<ShipmentRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(error) => {
            let error = ApplicationError::Serialization(format!(
                "`{}` is not a JSON array of shipment records: {error}",
                input.display()
            ));
            return CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 4);
        }
    };

    info!(record_count = records.len(), input = %input.display(), "building shipment report");

    let mut engine =
        DeterministicReportEngine::new().with_top_states(config.analytics.top_states);
    if let Some(origin) = config.analytics.origin_zip {
        engine = engine.with_origin_zip(origin);
    }

    let report = match engine.build_report(&records) {
        Ok(report) => report,
        Err(error) => {
            let error = ApplicationError::from(error);
            return CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 5);
        }
    };

    let report_json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(error) => {
            let error = ApplicationError::Serialization(error.to_string());
            return CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 4);
        }
    };

    info!(
        total_shipments = report.total_shipments,
        analysis_months = report.analysis_months,
        "shipment report assembled"
    );

    match output {
        Some(path) => match fs::write(path, &report_json) {
            Ok(()) => CommandResult::success(
                COMMAND,
                format!(
                    "analyzed {} shipments; report written to `{}`",
                    report.total_shipments,
                    path.display()
                ),
            ),
            Err(error) => {
                let error =
                    ApplicationError::Io(format!("could not write `{}`: {error}", path.display()));
                CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 3)
            }
        },
        None => CommandResult::raw(report_json),
    }
}
