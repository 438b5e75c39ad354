use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::warehouse::WarehouseResult;

/// Literal sentinel emitted when the batch carries no cost data at all.
pub const NOT_AVAILABLE: &str = "Not available";

/// Average cost over a record set: a number, or the explicit sentinel when
/// total cost is zero. Kept as a tagged union so no caller mistakes "unknown"
/// for a free shipment.
#[derive(Clone, Debug, PartialEq)]
pub enum AverageCost {
    Amount(Decimal),
    Unavailable,
}

impl AverageCost {
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(value) => Some(*value),
            Self::Unavailable => None,
        }
    }
}

impl Serialize for AverageCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(value) => rust_decimal::serde::float::serialize(value, serializer),
            Self::Unavailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for AverageCost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Decimal::try_from(value)
                .map(AverageCost::Amount)
                .map_err(|_| D::Error::custom(format!("average cost out of range: {value}"))),
            Raw::Text(text) if text == NOT_AVAILABLE => Ok(AverageCost::Unavailable),
            Raw::Text(text) => {
                Err(D::Error::custom(format!("expected a number or `{NOT_AVAILABLE}`, got `{text}`")))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub name: String,
    pub code: String,
    pub volume: u64,
    pub percentage: u32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_cost: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub method: String,
    pub count: u64,
    pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBucket {
    pub label: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneShare {
    pub zone: u8,
    pub count: u64,
    pub percentage: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    pub count: u64,
    pub percentage: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticSplit {
    pub domestic: SplitShare,
    pub international: SplitShare,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// The immutable analytics snapshot for one batch of shipment records.
/// Serialized with camelCase names: this is the interchange contract the
/// dashboard and PDF collaborators read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_shipments: u64,
    pub total_weight: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub avg_weight: f64,
    pub avg_cost: AverageCost,
    pub analysis_months: u32,
    pub date_range: DateRange,
    pub domestic_vs_international: DomesticSplit,
    pub states: Vec<StateSummary>,
    pub warehouse_comparison: Vec<WarehouseResult>,
    pub shipping_methods: Vec<MethodSummary>,
    pub weight_distribution: Vec<WeightBucket>,
    pub zone_distribution: Vec<ZoneShare>,
}

impl Report {
    /// The single pre-ranked catalog entry flagged as the actionable
    /// suggestion. Located by linear search; the assembler does not index it.
    pub fn recommended_warehouse(&self) -> Option<&WarehouseResult> {
        self.warehouse_comparison.iter().find(|result| result.option.recommended)
    }
}

/// Format a ratio as a percentage string with one decimal place.
pub(crate) fn percent_string(part: f64, whole: f64) -> String {
    if whole == 0.0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part / whole * 100.0)
}

/// Round a decimal to `dp` places, halves away from zero.
pub(crate) fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Round a float to two decimal places, halves away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a decimal with exactly one fractional digit.
pub(crate) fn one_decimal_string(value: Decimal) -> String {
    format!("{:.1}", value.to_f64().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{percent_string, round_money, AverageCost, NOT_AVAILABLE};

    #[test]
    fn average_cost_serializes_as_number_or_sentinel() {
        let amount = serde_json::to_value(AverageCost::Amount(Decimal::new(1550, 2)))
            .expect("serialize amount");
        assert_eq!(amount, serde_json::json!(15.5));

        let unavailable =
            serde_json::to_value(AverageCost::Unavailable).expect("serialize sentinel");
        assert_eq!(unavailable, serde_json::json!(NOT_AVAILABLE));
    }

    #[test]
    fn average_cost_round_trips_both_variants() {
        let amount: AverageCost = serde_json::from_value(serde_json::json!(15.5)).expect("number");
        assert_eq!(amount, AverageCost::Amount(Decimal::try_from(15.5).expect("decimal")));

        let unavailable: AverageCost =
            serde_json::from_value(serde_json::json!(NOT_AVAILABLE)).expect("sentinel");
        assert_eq!(unavailable, AverageCost::Unavailable);
    }

    #[test]
    fn average_cost_rejects_other_strings() {
        let result: Result<AverageCost, _> = serde_json::from_value(serde_json::json!("free"));
        assert!(result.is_err());
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(125, 2), 1), Decimal::new(13, 1));
        assert_eq!(round_money(Decimal::new(145, 1), 0), Decimal::from(15));
    }

    #[test]
    fn percent_string_keeps_one_decimal() {
        assert_eq!(percent_string(1.0, 3.0), "33.3");
        assert_eq!(percent_string(2.0, 4.0), "50.0");
        assert_eq!(percent_string(0.0, 0.0), "0.0");
    }
}
