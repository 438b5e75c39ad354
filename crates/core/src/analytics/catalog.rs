use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::warehouse::WarehouseOption;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("warehouse catalog is empty")]
    EmptyCatalog,
    #[error("warehouse catalog has no recommended option")]
    NoRecommendedOption,
    #[error("warehouse catalog has {count} recommended options, expected exactly one")]
    MultipleRecommendedOptions { count: usize },
    #[error("warehouse option `{name}` has a negative cost multiplier")]
    NegativeMultiplier { name: String },
}

impl CatalogError {
    pub fn user_safe_message(&self) -> String {
        match self {
            Self::EmptyCatalog => "No warehouse configurations are available to compare.".to_string(),
            Self::NoRecommendedOption => {
                "The warehouse catalog must flag one recommended configuration.".to_string()
            }
            Self::MultipleRecommendedOptions { count } => {
                format!("The warehouse catalog flags {count} recommended configurations; only one is allowed.")
            }
            Self::NegativeMultiplier { name } => {
                format!("Warehouse configuration '{name}' has an invalid cost multiplier.")
            }
        }
    }
}

/// The catalog is pre-ranked business configuration: the simulator evaluates
/// it as-is and never searches for an optimum. Exactly one entry carries the
/// recommended flag.
pub fn validate_catalog(options: &[WarehouseOption]) -> Result<(), CatalogError> {
    if options.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    if let Some(option) = options.iter().find(|option| option.cost_multiplier < Decimal::ZERO) {
        return Err(CatalogError::NegativeMultiplier { name: option.name.clone() });
    }

    match options.iter().filter(|option| option.recommended).count() {
        0 => Err(CatalogError::NoRecommendedOption),
        1 => Ok(()),
        count => Err(CatalogError::MultipleRecommendedOptions { count }),
    }
}

fn option(
    name: &str,
    cost_multiplier: Decimal,
    avg_zone: f64,
    transit_time: f64,
    recommended: bool,
) -> WarehouseOption {
    WarehouseOption { name: name.to_string(), cost_multiplier, avg_zone, transit_time, recommended }
}

/// Built-in candidate networks. Multipliers and zone/transit profiles are
/// heuristic business constants; the consolidated three-site network is the
/// pre-ranked recommendation.
pub fn default_catalog() -> Vec<WarehouseOption> {
    vec![
        option("Single Warehouse - Los Angeles, CA", Decimal::ONE, 5.8, 4.2, false),
        option("Single Warehouse - Dallas, TX", Decimal::new(96, 2), 4.9, 3.8, false),
        option("Single Warehouse - Chicago, IL", Decimal::new(94, 2), 4.6, 3.6, false),
        option("Single Warehouse - Atlanta, GA", Decimal::new(95, 2), 4.8, 3.7, false),
        option("Dual Network - Los Angeles + Harrisburg", Decimal::new(87, 2), 3.9, 3.1, false),
        option("Triple Network - LA + Dallas + Harrisburg", Decimal::new(82, 2), 3.2, 2.6, true),
    ]
}
