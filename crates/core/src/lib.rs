pub mod analytics;
pub mod config;
pub mod domain;
pub mod errors;
pub mod store;

pub use analytics::aggregate::{aggregate_shipments, ShipmentTotals};
pub use analytics::geo::{GeoResolver, ResolvedState};
pub use analytics::simulator::simulate_warehouses;
pub use analytics::transit::{DeterministicTransitEstimator, TransitEstimator};
pub use analytics::{DeterministicReportEngine, ReportBuildError, ReportEngine};
pub use domain::report::{AverageCost, Report};
pub use domain::shipment::ShipmentRecord;
pub use domain::warehouse::{WarehouseOption, WarehouseResult};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use store::{OwnerId, ReportId, ReportStore, StoredReport};
