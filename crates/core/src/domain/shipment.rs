use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized row of shipment data. The upstream parsing layer owns
/// column-name guessing and numeric coercion; by the time a record reaches
/// the engine every field is either present or carries its documented
/// default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub state: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(default = "default_shipping_method")]
    pub shipping_method: String,
    #[serde(default = "default_zone")]
    pub zone: u8,
    #[serde(default = "default_transit_time")]
    pub transit_time: u32,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

pub const DEFAULT_ZONE: u8 = 5;
pub const DEFAULT_TRANSIT_DAYS: u32 = 4;

fn default_shipping_method() -> String {
    "Standard".to_string()
}

fn default_zone() -> u8 {
    DEFAULT_ZONE
}

fn default_transit_time() -> u32 {
    DEFAULT_TRANSIT_DAYS
}

fn default_country() -> String {
    "US".to_string()
}

impl ShipmentRecord {
    /// Domestic means US or an absent country; everything else counts as
    /// international.
    pub fn is_domestic(&self) -> bool {
        let country = self.country.trim();
        country.is_empty() || country == "US"
    }
}
