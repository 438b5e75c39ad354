use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::report::{
    percent_string, round2, round_money, AverageCost, DateRange, DomesticSplit, MethodSummary,
    SplitShare, StateSummary, WeightBucket, ZoneShare,
};
use crate::domain::shipment::{ShipmentRecord, DEFAULT_ZONE};
use crate::errors::DomainError;

/// Aggregated statistics over one batch of shipment records; everything the
/// final report carries except the warehouse comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentTotals {
    pub total_shipments: u64,
    pub total_weight: f64,
    pub total_cost: Decimal,
    pub avg_weight: f64,
    pub avg_cost: AverageCost,
    pub analysis_months: u32,
    pub date_range: DateRange,
    pub domestic_vs_international: DomesticSplit,
    pub states: Vec<StateSummary>,
    pub shipping_methods: Vec<MethodSummary>,
    pub weight_distribution: Vec<WeightBucket>,
    pub zone_distribution: Vec<ZoneShare>,
}

static WEIGHT_BUCKET_LABELS: [&str; 4] = ["0-0.5 lbs", "0.5-0.99 lbs", "1-5 lbs", "5+ lbs"];

/// Full-state-name lookup for summaries whose group key is not already a
/// two-letter code.
static STATE_CODES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virgin Islands", "VI"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Compute every distribution and date statistic for a batch. The only fatal
/// condition is an empty batch; per-record noise (bad dates, odd zones)
/// degrades to documented fallbacks.
pub fn aggregate_shipments(
    records: &[ShipmentRecord],
    top_states: usize,
) -> Result<ShipmentTotals, DomainError> {
    if records.is_empty() {
        return Err(DomainError::EmptyShipmentSet);
    }

    let total_shipments = records.len() as u64;
    let total_f64 = records.len() as f64;
    let total_weight: f64 = records.iter().map(|record| record.weight).sum();
    let total_cost: Decimal = records.iter().map(|record| record.cost).sum();

    let avg_weight = round2(total_weight / total_f64);
    let avg_cost = if total_cost > Decimal::ZERO {
        AverageCost::Amount(round_money(total_cost / Decimal::from(total_shipments), 2))
    } else {
        AverageCost::Unavailable
    };

    let domestic = records.iter().filter(|record| record.is_domestic()).count() as u64;
    let international = total_shipments - domestic;
    let domestic_vs_international = DomesticSplit {
        domestic: SplitShare {
            count: domestic,
            percentage: percent_string(domestic as f64, total_f64),
        },
        international: SplitShare {
            count: international,
            percentage: percent_string(international as f64, total_f64),
        },
    };

    let (date_range, analysis_months) = date_statistics(records);

    Ok(ShipmentTotals {
        total_shipments,
        total_weight,
        total_cost,
        avg_weight,
        avg_cost,
        analysis_months,
        date_range,
        domestic_vs_international,
        states: state_summaries(records, total_f64, top_states),
        shipping_methods: method_summaries(records, total_f64),
        weight_distribution: weight_distribution(records),
        zone_distribution: zone_distribution(records, total_f64),
    })
}

#[derive(Default)]
struct StateAccumulator {
    volume: u64,
    cost_total: Decimal,
}

/// Grouping is by trimmed exact string, case-sensitive: "CA" and "California"
/// are distinct groups unless the source data is already normalized.
/// Per-group percentages round independently and need not sum to 100.
fn state_summaries(
    records: &[ShipmentRecord],
    total: f64,
    top_states: usize,
) -> Vec<StateSummary> {
    let mut groups: BTreeMap<String, StateAccumulator> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.state.trim().to_string()).or_default();
        entry.volume += 1;
        entry.cost_total += record.cost;
    }

    let mut summaries: Vec<StateSummary> = groups
        .into_iter()
        .map(|(name, accumulator)| {
            let avg_cost = (accumulator.cost_total > Decimal::ZERO)
                .then(|| round_money(accumulator.cost_total / Decimal::from(accumulator.volume), 2));
            StateSummary {
                code: state_code_for(&name),
                percentage: integer_percentage(accumulator.volume, total),
                volume: accumulator.volume,
                avg_cost,
                name,
            }
        })
        .collect();

    // Stable sort on top of the BTreeMap's name order keeps ties
    // alphabetical.
    summaries.sort_by(|left, right| right.volume.cmp(&left.volume));
    summaries.truncate(top_states);
    summaries
}

fn state_code_for(name: &str) -> String {
    if name.len() == 2 {
        return name.to_ascii_uppercase();
    }
    if let Some((_, code)) =
        STATE_CODES.iter().find(|(full, _)| full.eq_ignore_ascii_case(name))
    {
        return (*code).to_string();
    }
    // Heuristic stand-in, not a real postal code.
    name.chars().take(2).collect::<String>().to_ascii_uppercase()
}

fn method_summaries(records: &[ShipmentRecord], total: f64) -> Vec<MethodSummary> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.shipping_method.as_str()).or_default() += 1;
    }

    let mut summaries: Vec<MethodSummary> = groups
        .into_iter()
        .map(|(method, count)| MethodSummary {
            method: method.to_string(),
            count,
            percentage: integer_percentage(count, total),
        })
        .collect();
    summaries.sort_by(|left, right| right.count.cmp(&left.count));
    summaries
}

/// Fixed bucket index for a weight, or `None` for the inherited boundary gap
/// between 0.99 and 1.
fn weight_bucket_index(weight: f64) -> Option<usize> {
    match weight {
        w if w < 0.5 => Some(0),
        w if w <= 0.99 => Some(1),
        w if w < 1.0 => None,
        w if w < 5.0 => Some(2),
        _ => Some(3),
    }
}

fn weight_distribution(records: &[ShipmentRecord]) -> Vec<WeightBucket> {
    let mut counts = [0u64; 4];
    for record in records {
        if let Some(index) = weight_bucket_index(record.weight) {
            counts[index] += 1;
        }
    }

    WEIGHT_BUCKET_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| WeightBucket { label: (*label).to_string(), count })
        .collect()
}

fn zone_distribution(records: &[ShipmentRecord], total: f64) -> Vec<ZoneShare> {
    let mut groups: BTreeMap<u8, u64> = BTreeMap::new();
    for record in records {
        let zone = if (1..=8).contains(&record.zone) { record.zone } else { DEFAULT_ZONE };
        *groups.entry(zone).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(zone, count)| ZoneShare {
            zone,
            count,
            percentage: percent_string(count as f64, total),
        })
        .collect()
}

fn date_statistics(records: &[ShipmentRecord]) -> (DateRange, u32) {
    let mut parsed: Vec<NaiveDate> = records
        .iter()
        .filter_map(|record| record.date.as_deref())
        .filter_map(parse_record_date)
        .collect();
    parsed.sort_unstable();

    let (start, end) = match (parsed.first(), parsed.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            let today = Utc::now().date_naive();
            (today, today)
        }
    };

    let day_diff = (end - start).num_days();
    let analysis_months = if day_diff > 30 { ((day_diff + 29) / 30) as u32 } else { 1 };

    let range = DateRange {
        start: start.format("%Y-%m-%d").to_string(),
        end: end.format("%Y-%m-%d").to_string(),
    };
    (range, analysis_months)
}

/// Accepts plain ISO dates and RFC 3339 timestamps; anything else is
/// excluded from range math without failing the batch.
fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|timestamp| timestamp.date_naive())
}

fn integer_percentage(count: u64, total: f64) -> u32 {
    (count as f64 / total * 100.0).round() as u32
}
