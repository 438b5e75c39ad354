use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named fulfillment-network candidate: a single site or a consolidated
/// multi-site strategy. The cost multiplier is relative to the current spend;
/// zone and transit profiles are static characterization, not computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseOption {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_multiplier: Decimal,
    pub avg_zone: f64,
    pub transit_time: f64,
    pub recommended: bool,
}

/// A catalog option evaluated against the baseline spend. Savings fields are
/// populated only for the recommended entry; every entry assumes the full
/// shipment volume moves to that network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseResult {
    #[serde(flatten)]
    pub option: WarehouseOption,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub savings: Option<Decimal>,
    pub savings_percent: Option<String>,
    pub shipments: u64,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{WarehouseOption, WarehouseResult};

    #[test]
    fn result_serializes_option_fields_inline() {
        let result = WarehouseResult {
            option: WarehouseOption {
                name: "Dual Coast".to_string(),
                cost_multiplier: Decimal::new(87, 2),
                avg_zone: 3.9,
                transit_time: 3.1,
                recommended: true,
            },
            cost: Decimal::from(870),
            savings: Some(Decimal::from(130)),
            savings_percent: Some("13.0".to_string()),
            shipments: 42,
        };

        let value = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(value["name"], "Dual Coast");
        assert_eq!(value["costMultiplier"], serde_json::json!(0.87));
        assert_eq!(value["savingsPercent"], "13.0");
        assert_eq!(value["shipments"], 42);
    }
}
