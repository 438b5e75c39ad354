use freightscope_core::analytics::geo::GeoResolver;

pub fn run(from: &str, to: &str) -> String {
    let geo = GeoResolver::new();
    let zone = geo.zone(from, to);

    let origin = geo.resolve(from);
    let destination = geo.resolve(to);

    serde_json::json!({
        "command": "zone",
        "from": from,
        "fromState": origin.map(|state| state.code),
        "to": to,
        "toState": destination.map(|state| state.code),
        "zone": zone,
    })
    .to_string()
}
