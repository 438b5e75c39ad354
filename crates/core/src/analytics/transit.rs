use crate::domain::shipment::DEFAULT_TRANSIT_DAYS;

pub trait TransitEstimator: Send + Sync {
    fn estimate(&self, method: &str, zone: u8) -> u32;
}

#[derive(Default)]
pub struct DeterministicTransitEstimator;

impl TransitEstimator for DeterministicTransitEstimator {
    fn estimate(&self, method: &str, zone: u8) -> u32 {
        estimate_transit_days(method, zone)
    }
}

/// Map a shipping-method label and zone to expected transit days. Matching is
/// case-insensitive on substrings, and rule order is significant: labels like
/// "SPD Express" carry several keywords and the first rule wins.
pub fn estimate_transit_days(method: &str, zone: u8) -> u32 {
    let method = method.to_ascii_uppercase();

    if method.contains("SPD") || method.contains("GROUND") {
        return match zone {
            0..=2 => 2,
            3..=4 => 3,
            5..=6 => 4,
            _ => 5,
        };
    }
    if method.contains("EXPRESS") || method.contains("2-DAY") {
        return 2;
    }
    if method.contains("OVERNIGHT") || method.contains("NEXT DAY") {
        return 1;
    }

    DEFAULT_TRANSIT_DAYS
}
