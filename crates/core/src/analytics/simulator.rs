use rust_decimal::Decimal;

use crate::analytics::catalog::{validate_catalog, CatalogError};
use crate::domain::report::{one_decimal_string, round_money};
use crate::domain::warehouse::{WarehouseOption, WarehouseResult};

/// Project the full shipment volume onto each candidate network. The model is
/// deliberately simple: every candidate absorbs the entire volume, cost is
/// the baseline spend scaled by the candidate's multiplier, and savings are
/// reported only against the pre-ranked recommendation.
pub fn simulate_warehouses(
    shipment_count: u64,
    baseline_cost: Decimal,
    catalog: &[WarehouseOption],
) -> Result<Vec<WarehouseResult>, CatalogError> {
    validate_catalog(catalog)?;

    let results = catalog
        .iter()
        .map(|option| {
            let cost = round_money(baseline_cost * option.cost_multiplier, 0);
            let (savings, savings_percent) = if option.recommended {
                let saved = round_money(baseline_cost - cost, 0);
                let percent = if baseline_cost > Decimal::ZERO {
                    one_decimal_string((baseline_cost - cost) / baseline_cost * Decimal::ONE_HUNDRED)
                } else {
                    "0.0".to_string()
                };
                (Some(saved), Some(percent))
            } else {
                (None, None)
            };

            WarehouseResult {
                option: option.clone(),
                cost,
                savings,
                savings_percent,
                shipments: shipment_count,
            }
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::analytics::catalog::{default_catalog, CatalogError};
    use crate::domain::warehouse::WarehouseOption;

    use super::simulate_warehouses;

    fn catalog_fixture() -> Vec<WarehouseOption> {
        vec![
            WarehouseOption {
                name: "Stay Put".to_string(),
                cost_multiplier: Decimal::ONE,
                avg_zone: 5.5,
                transit_time: 4.0,
                recommended: false,
            },
            WarehouseOption {
                name: "Consolidate".to_string(),
                cost_multiplier: Decimal::new(80, 2),
                avg_zone: 3.0,
                transit_time: 2.5,
                recommended: true,
            },
        ]
    }

    #[test]
    fn only_the_recommended_entry_reports_savings() {
        let results = simulate_warehouses(25, Decimal::from(1000), &catalog_fixture())
            .expect("simulate");

        assert_eq!(results.len(), 2);

        let baseline = &results[0];
        assert_eq!(baseline.cost, Decimal::from(1000));
        assert_eq!(baseline.savings, None);
        assert_eq!(baseline.savings_percent, None);

        let recommended = &results[1];
        assert!(recommended.option.recommended);
        assert_eq!(recommended.cost, Decimal::from(800));
        assert_eq!(recommended.savings, Some(Decimal::from(200)));
        assert_eq!(recommended.savings_percent.as_deref(), Some("20.0"));
    }

    #[test]
    fn every_result_carries_the_full_shipment_count() {
        let results = simulate_warehouses(123, Decimal::from(500), &default_catalog())
            .expect("simulate");
        assert!(results.iter().all(|result| result.shipments == 123));
    }

    #[test]
    fn costs_round_to_whole_dollars() {
        let catalog = vec![WarehouseOption {
            name: "Only".to_string(),
            cost_multiplier: Decimal::new(85, 2),
            avg_zone: 4.0,
            transit_time: 3.0,
            recommended: true,
        }];

        let results =
            simulate_warehouses(3, Decimal::new(10_05, 2), &catalog).expect("simulate");
        // 10.05 * 0.85 = 8.5425 -> 9 after half-away-from-zero rounding.
        assert_eq!(results[0].cost, Decimal::from(9));
        assert_eq!(results[0].savings, Some(Decimal::from(1)));
    }

    #[test]
    fn zero_baseline_reports_zero_savings_without_dividing() {
        let results =
            simulate_warehouses(4, Decimal::ZERO, &catalog_fixture()).expect("simulate");
        let recommended =
            results.iter().find(|result| result.option.recommended).expect("recommended");
        assert_eq!(recommended.cost, Decimal::ZERO);
        assert_eq!(recommended.savings, Some(Decimal::ZERO));
        assert_eq!(recommended.savings_percent.as_deref(), Some("0.0"));
    }

    #[test]
    fn invalid_catalog_is_rejected_before_any_math() {
        let error = simulate_warehouses(4, Decimal::from(100), &[]).expect_err("must reject");
        assert_eq!(error, CatalogError::EmptyCatalog);
    }
}
