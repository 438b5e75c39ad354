pub mod aggregate;
pub mod catalog;
pub mod geo;
pub mod simulator;
pub mod transit;

use thiserror::Error;

use crate::domain::report::Report;
use crate::domain::shipment::{ShipmentRecord, DEFAULT_ZONE};
use crate::domain::warehouse::{WarehouseOption, WarehouseResult};
use crate::errors::{ApplicationError, DomainError};

use self::aggregate::{aggregate_shipments, ShipmentTotals};
use self::catalog::{default_catalog, CatalogError};
use self::geo::GeoResolver;
use self::simulator::simulate_warehouses;
use self::transit::{DeterministicTransitEstimator, TransitEstimator};

/// Default cap on state summaries in a report.
pub const DEFAULT_TOP_STATES: usize = 7;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReportBuildError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<ReportBuildError> for ApplicationError {
    fn from(value: ReportBuildError) -> Self {
        match value {
            ReportBuildError::Domain(domain) => Self::Domain(domain),
            ReportBuildError::Catalog(catalog) => Self::Configuration(catalog.to_string()),
        }
    }
}

pub trait ReportEngine: Send + Sync {
    fn build_report(&self, records: &[ShipmentRecord]) -> Result<Report, ReportBuildError>;
}

/// The default engine: repair, aggregate, simulate, assemble. Synchronous and
/// side-effect-free; the same input and catalog always produce the same
/// report.
pub struct DeterministicReportEngine<T = DeterministicTransitEstimator> {
    geo: GeoResolver,
    transit: T,
    catalog: Vec<WarehouseOption>,
    top_states: usize,
    origin_zip: Option<String>,
}

impl Default for DeterministicReportEngine {
    fn default() -> Self {
        Self::with_components(GeoResolver::new(), DeterministicTransitEstimator, default_catalog())
    }
}

impl DeterministicReportEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: TransitEstimator> DeterministicReportEngine<T> {
    pub fn with_components(geo: GeoResolver, transit: T, catalog: Vec<WarehouseOption>) -> Self {
        Self { geo, transit, catalog, top_states: DEFAULT_TOP_STATES, origin_zip: None }
    }

    /// Origin used to derive a zone for records that arrive without one.
    pub fn with_origin_zip(mut self, zip: impl Into<String>) -> Self {
        self.origin_zip = Some(zip.into());
        self
    }

    pub fn with_top_states(mut self, limit: usize) -> Self {
        self.top_states = limit;
        self
    }

    /// Fill the documented fallbacks before aggregation: unknown zones become
    /// zone 5 (or derive from zips when an origin is configured), blank
    /// states resolve through the zip table, and a zero transit time is
    /// re-estimated from the method label.
    fn repair(&self, records: &[ShipmentRecord]) -> Vec<ShipmentRecord> {
        records
            .iter()
            .map(|record| {
                let mut repaired = record.clone();

                if repaired.state.trim().is_empty() {
                    if let Some(resolved) =
                        repaired.zip_code.as_deref().and_then(|zip| self.geo.resolve(zip))
                    {
                        repaired.state = resolved.name.to_string();
                    }
                }

                if !(1..=8).contains(&repaired.zone) {
                    repaired.zone = match (&self.origin_zip, &repaired.zip_code) {
                        (Some(origin), Some(dest)) => self.geo.zone(origin, dest),
                        _ => DEFAULT_ZONE,
                    };
                }

                if repaired.transit_time == 0 {
                    repaired.transit_time =
                        self.transit.estimate(&repaired.shipping_method, repaired.zone);
                }

                repaired
            })
            .collect()
    }
}

impl<T: TransitEstimator> ReportEngine for DeterministicReportEngine<T> {
    fn build_report(&self, records: &[ShipmentRecord]) -> Result<Report, ReportBuildError> {
        let repaired = self.repair(records);
        let totals = aggregate_shipments(&repaired, self.top_states)?;
        let comparison =
            simulate_warehouses(totals.total_shipments, totals.total_cost, &self.catalog)?;
        Ok(assemble_report(totals, comparison))
    }
}

/// Pure composition of the aggregate statistics and the warehouse comparison
/// into the final immutable snapshot. No further computation happens here.
pub fn assemble_report(
    totals: ShipmentTotals,
    warehouse_comparison: Vec<WarehouseResult>,
) -> Report {
    Report {
        total_shipments: totals.total_shipments,
        total_weight: totals.total_weight,
        total_cost: totals.total_cost,
        avg_weight: totals.avg_weight,
        avg_cost: totals.avg_cost,
        analysis_months: totals.analysis_months,
        date_range: totals.date_range,
        domestic_vs_international: totals.domestic_vs_international,
        states: totals.states,
        warehouse_comparison,
        shipping_methods: totals.shipping_methods,
        weight_distribution: totals.weight_distribution,
        zone_distribution: totals.zone_distribution,
    }
}
