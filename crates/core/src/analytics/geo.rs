use crate::domain::shipment::DEFAULT_ZONE;

const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Distance assumed when either state is missing from the anchor table.
/// Approximate output beats blocking the pipeline on one odd code.
const DEFAULT_DISTANCE_MILES: f64 = 1500.0;

/// Zone assigned to the same-state case; carrier charts never go below 2 for
/// zip-to-zip moves.
const SAME_STATE_ZONE: u8 = 2;

#[derive(Clone, Copy, Debug)]
pub struct ZipRange {
    pub min: u32,
    pub max: u32,
    pub name: &'static str,
    pub code: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct StateAnchor {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedState {
    pub name: &'static str,
    pub code: &'static str,
}

const fn range(min: u32, max: u32, name: &'static str, code: &'static str) -> ZipRange {
    ZipRange { min, max, name, code }
}

/// USPS-style zip intervals, ascending, covering the full US zip space
/// including DC, Puerto Rico, and the Virgin Islands. Oklahoma is split
/// around the 733xx block, which belongs to Austin, TX.
static ZIP_RANGES: &[ZipRange] = &[
    range(501, 544, "New York", "NY"),
    range(601, 988, "Puerto Rico", "PR"),
    range(801, 851, "Virgin Islands", "VI"),
    range(1001, 2791, "Massachusetts", "MA"),
    range(2801, 2940, "Rhode Island", "RI"),
    range(3031, 3897, "New Hampshire", "NH"),
    range(3901, 4992, "Maine", "ME"),
    range(5001, 5907, "Vermont", "VT"),
    range(6001, 6928, "Connecticut", "CT"),
    range(7001, 8989, "New Jersey", "NJ"),
    range(10001, 14975, "New York", "NY"),
    range(15001, 19640, "Pennsylvania", "PA"),
    range(19701, 19980, "Delaware", "DE"),
    range(20001, 20599, "District of Columbia", "DC"),
    range(20601, 21930, "Maryland", "MD"),
    range(22001, 24658, "Virginia", "VA"),
    range(24701, 26886, "West Virginia", "WV"),
    range(27006, 28909, "North Carolina", "NC"),
    range(29001, 29948, "South Carolina", "SC"),
    range(30001, 31999, "Georgia", "GA"),
    range(32004, 34997, "Florida", "FL"),
    range(35004, 36925, "Alabama", "AL"),
    range(37010, 38589, "Tennessee", "TN"),
    range(38601, 39776, "Mississippi", "MS"),
    range(39901, 39901, "Georgia", "GA"),
    range(40003, 42788, "Kentucky", "KY"),
    range(43001, 45999, "Ohio", "OH"),
    range(46001, 47997, "Indiana", "IN"),
    range(48001, 49971, "Michigan", "MI"),
    range(50001, 52809, "Iowa", "IA"),
    range(53001, 54990, "Wisconsin", "WI"),
    range(55001, 56763, "Minnesota", "MN"),
    range(57001, 57799, "South Dakota", "SD"),
    range(58001, 58856, "North Dakota", "ND"),
    range(59001, 59937, "Montana", "MT"),
    range(60001, 62999, "Illinois", "IL"),
    range(63001, 65899, "Missouri", "MO"),
    range(66002, 67954, "Kansas", "KS"),
    range(68001, 69367, "Nebraska", "NE"),
    range(70001, 71497, "Louisiana", "LA"),
    range(71601, 72959, "Arkansas", "AR"),
    range(73001, 73199, "Oklahoma", "OK"),
    range(73301, 73344, "Texas", "TX"),
    range(73401, 74966, "Oklahoma", "OK"),
    range(75001, 79999, "Texas", "TX"),
    range(80001, 81658, "Colorado", "CO"),
    range(82001, 83128, "Wyoming", "WY"),
    range(83201, 83876, "Idaho", "ID"),
    range(84001, 84784, "Utah", "UT"),
    range(85001, 86556, "Arizona", "AZ"),
    range(87001, 88441, "New Mexico", "NM"),
    range(88510, 88589, "Texas", "TX"),
    range(88901, 89883, "Nevada", "NV"),
    range(90001, 96162, "California", "CA"),
    range(96701, 96898, "Hawaii", "HI"),
    range(97001, 97920, "Oregon", "OR"),
    range(98001, 99403, "Washington", "WA"),
    range(99501, 99950, "Alaska", "AK"),
];

const fn anchor(code: &'static str, lat: f64, lon: f64) -> StateAnchor {
    StateAnchor { code, lat, lon }
}

/// Representative anchor point per state: the dominant parcel metro, not the
/// geographic centroid.
static STATE_ANCHORS: &[StateAnchor] = &[
    anchor("AL", 33.5207, -86.8025),
    anchor("AK", 61.2181, -149.9003),
    anchor("AZ", 33.4484, -112.0740),
    anchor("AR", 34.7465, -92.2896),
    anchor("CA", 37.7749, -122.4194),
    anchor("CO", 39.7392, -104.9903),
    anchor("CT", 41.7658, -72.6734),
    anchor("DE", 39.7391, -75.5398),
    anchor("DC", 38.9072, -77.0369),
    anchor("FL", 28.5383, -81.3792),
    anchor("GA", 33.7490, -84.3880),
    anchor("HI", 21.3069, -157.8583),
    anchor("ID", 43.6150, -116.2023),
    anchor("IL", 41.8781, -87.6298),
    anchor("IN", 39.7684, -86.1581),
    anchor("IA", 41.5868, -93.6250),
    anchor("KS", 37.6872, -97.3301),
    anchor("KY", 38.2527, -85.7585),
    anchor("LA", 29.9511, -90.0715),
    anchor("ME", 43.6591, -70.2568),
    anchor("MD", 39.2904, -76.6122),
    anchor("MA", 42.3601, -71.0589),
    anchor("MI", 42.3314, -83.0458),
    anchor("MN", 44.9778, -93.2650),
    anchor("MS", 32.2988, -90.1848),
    anchor("MO", 39.0997, -94.5786),
    anchor("MT", 45.7833, -108.5007),
    anchor("NE", 41.2565, -95.9345),
    anchor("NV", 36.1699, -115.1398),
    anchor("NH", 42.9956, -71.4548),
    anchor("NJ", 40.7357, -74.1724),
    anchor("NM", 35.0844, -106.6504),
    anchor("NY", 40.7128, -74.0060),
    anchor("NC", 35.2271, -80.8431),
    anchor("ND", 46.8772, -96.7898),
    anchor("OH", 39.9612, -82.9988),
    anchor("OK", 35.4676, -97.5164),
    anchor("OR", 45.5152, -122.6784),
    anchor("PA", 39.9526, -75.1652),
    anchor("PR", 18.4655, -66.1057),
    anchor("RI", 41.8240, -71.4128),
    anchor("SC", 34.0007, -81.0348),
    anchor("SD", 43.5446, -96.7311),
    anchor("TN", 35.1495, -90.0490),
    anchor("TX", 32.7767, -96.7970),
    anchor("UT", 40.7608, -111.8910),
    anchor("VT", 44.4759, -73.2121),
    anchor("VA", 37.5407, -77.4360),
    anchor("VI", 18.3419, -64.9307),
    anchor("WA", 47.6062, -122.3321),
    anchor("WV", 38.3498, -81.6326),
    anchor("WI", 43.0389, -87.9065),
    anchor("WY", 41.1400, -104.8202),
];

/// Resolves postal codes to states and estimates inter-state distance and
/// shipping zone. The tables are read-only; one resolver can be shared
/// across threads freely.
#[derive(Clone, Copy, Debug)]
pub struct GeoResolver {
    ranges: &'static [ZipRange],
    anchors: &'static [StateAnchor],
}

impl Default for GeoResolver {
    fn default() -> Self {
        Self { ranges: ZIP_RANGES, anchors: STATE_ANCHORS }
    }
}

impl GeoResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute tables, used by tests that need deterministic geography.
    pub fn with_tables(ranges: &'static [ZipRange], anchors: &'static [StateAnchor]) -> Self {
        Self { ranges, anchors }
    }

    /// Resolve a postal code to its state. `None` means unknown; callers fall
    /// back to the default zone rather than failing.
    pub fn resolve(&self, zip: &str) -> Option<ResolvedState> {
        let value = normalize_zip(zip)?;
        self.ranges
            .iter()
            .find(|range| value >= range.min && value <= range.max)
            .map(|range| ResolvedState { name: range.name, code: range.code })
    }

    /// Great-circle miles between two state anchors. Unknown codes degrade to
    /// a fixed mid-continent distance instead of erroring.
    pub fn distance(&self, code_a: &str, code_b: &str) -> f64 {
        let (Some(a), Some(b)) = (self.anchor_for(code_a), self.anchor_for(code_b)) else {
            return DEFAULT_DISTANCE_MILES;
        };
        haversine_miles(a.lat, a.lon, b.lat, b.lon)
    }

    /// Carrier-style zone between two zips. An approximation of published
    /// zone charts: same state is always zone 2, everything else buckets on
    /// anchor distance.
    pub fn zone(&self, origin_zip: &str, dest_zip: &str) -> u8 {
        let (Some(origin), Some(dest)) = (self.resolve(origin_zip), self.resolve(dest_zip)) else {
            return DEFAULT_ZONE;
        };

        if origin.code == dest.code {
            return SAME_STATE_ZONE;
        }

        match self.distance(origin.code, dest.code) {
            d if d < 500.0 => 3,
            d if d < 1000.0 => 4,
            d if d < 1500.0 => 5,
            d if d < 2000.0 => 6,
            d if d < 2500.0 => 7,
            _ => 8,
        }
    }

    fn anchor_for(&self, code: &str) -> Option<&StateAnchor> {
        self.anchors.iter().find(|anchor| anchor.code == code)
    }
}

/// Cut any +4 suffix, trim, and read the base as a number; numeric parsing
/// makes left-padding to five digits implicit ("601" and "00601" are the same
/// interval key).
fn normalize_zip(raw: &str) -> Option<u32> {
    let base = raw.split('-').next().unwrap_or_default().trim();
    if base.is_empty() || base.len() > 5 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    base.parse().ok()
}

fn haversine_miles(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::{GeoResolver, StateAnchor, ZipRange};

    #[test]
    fn resolves_known_zips_to_states() {
        let geo = GeoResolver::new();

        assert_eq!(geo.resolve("10001").expect("nyc").code, "NY");
        assert_eq!(geo.resolve("90001").expect("la").code, "CA");
        assert_eq!(geo.resolve("20500").expect("dc").code, "DC");
        assert_eq!(geo.resolve("00601").expect("pr").code, "PR");
        assert_eq!(geo.resolve("00801").expect("vi").code, "VI");
    }

    #[test]
    fn normalization_handles_suffixes_padding_and_whitespace() {
        let geo = GeoResolver::new();

        assert_eq!(geo.resolve("90001-1234").expect("plus four").code, "CA");
        assert_eq!(geo.resolve(" 601 ").expect("short pr zip").code, "PR");
        assert!(geo.resolve("").is_none());
        assert!(geo.resolve("ABCDE").is_none());
        assert!(geo.resolve("123456").is_none());
    }

    #[test]
    fn zip_outside_all_intervals_is_unknown() {
        assert!(GeoResolver::new().resolve("00000").is_none());
    }

    #[test]
    fn austin_block_resolves_to_texas_not_oklahoma() {
        let geo = GeoResolver::new();
        assert_eq!(geo.resolve("73301").expect("austin").code, "TX");
        assert_eq!(geo.resolve("73102").expect("okc").code, "OK");
        assert_eq!(geo.resolve("74101").expect("tulsa").code, "OK");
    }

    #[test]
    fn distance_degrades_to_default_for_unknown_codes() {
        let geo = GeoResolver::new();
        assert_eq!(geo.distance("NY", "ZZ"), 1500.0);
        assert_eq!(geo.distance("ZZ", "YY"), 1500.0);
    }

    #[test]
    fn coast_to_coast_distance_exceeds_top_zone_threshold() {
        let distance = GeoResolver::new().distance("NY", "CA");
        assert!(distance > 2500.0, "NY->CA anchor distance was {distance}");
    }

    #[test]
    fn same_zip_is_always_zone_two() {
        let geo = GeoResolver::new();
        assert_eq!(geo.zone("10001", "10001"), 2);
        assert_eq!(geo.zone("90001", "96150"), 2);
    }

    #[test]
    fn zone_buckets_follow_distance_thresholds() {
        let geo = GeoResolver::new();

        // NYC anchor against progressively farther metros.
        assert_eq!(geo.zone("10001", "21201"), 3); // Baltimore, well under 500
        assert_eq!(geo.zone("10001", "60601"), 4); // Chicago, ~710
        assert_eq!(geo.zone("10001", "75201"), 5); // Dallas, ~1370
        assert_eq!(geo.zone("10001", "80202"), 6); // Denver, ~1620
        assert_eq!(geo.zone("10001", "85001"), 7); // Phoenix, ~2140
        assert_eq!(geo.zone("10001", "90001"), 8); // Bay Area anchor, >2500
    }

    #[test]
    fn unresolved_zip_falls_back_to_default_zone() {
        let geo = GeoResolver::new();
        assert_eq!(geo.zone("00000", "90001"), 5);
        assert_eq!(geo.zone("10001", ""), 5);
    }

    #[test]
    fn substituted_tables_drive_resolution() {
        static RANGES: &[ZipRange] =
            &[ZipRange { min: 1, max: 99999, name: "Testland", code: "TL" }];
        static ANCHORS: &[StateAnchor] = &[StateAnchor { code: "TL", lat: 0.0, lon: 0.0 }];

        let geo = GeoResolver::with_tables(RANGES, ANCHORS);
        assert_eq!(geo.resolve("42424").expect("testland").code, "TL");
        assert_eq!(geo.zone("00001", "99999"), 2);
    }
}
