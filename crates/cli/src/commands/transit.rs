use freightscope_core::analytics::transit::estimate_transit_days;

pub fn run(method: &str, zone: u8) -> String {
    serde_json::json!({
        "command": "transit",
        "method": method,
        "zone": zone,
        "days": estimate_transit_days(method, zone),
    })
    .to_string()
}
