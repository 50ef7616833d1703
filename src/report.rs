//! Report generators over a finished [`MonthlyAggregate`].
//!
//! All five are read-only derivations; each returns a freshly built
//! map keyed by month, in the aggregate's month order. Within a month,
//! ties are broken by the first SKU in insertion order (the scan uses
//! strictly-greater comparison), which keeps every report
//! deterministic for a given input file.

use crate::aggregate::MonthlyAggregate;
use crate::money::Money;
use indexmap::IndexMap;
use serde::Serialize;

/// The best-selling SKU of a month, by cumulative quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularItem {
    /// Item identifier.
    pub sku: String,

    /// Units sold across the month.
    pub quantity: u32,
}

/// The top revenue-generating SKU of a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueItem {
    /// Item identifier.
    pub sku: String,

    /// Revenue across the month.
    pub revenue: Money,
}

/// Order-size statistics for a month's best-selling SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSizeStats {
    /// Item identifier.
    pub sku: String,

    /// Smallest single-order quantity.
    pub min: u32,

    /// Largest single-order quantity.
    pub max: u32,

    /// Average units per order.
    pub avg: f64,
}

/// Sums revenue across every SKU in every month.
pub fn total_sales(aggregate: &MonthlyAggregate) -> Money {
    let mut total = Money::ZERO;
    for skus in aggregate.months().values() {
        for stats in skus.values() {
            total += stats.revenue;
        }
    }
    total
}

/// Sums revenue per month.
pub fn monthly_totals(aggregate: &MonthlyAggregate) -> IndexMap<String, Money> {
    let mut totals = IndexMap::new();
    for (month, skus) in aggregate.months() {
        let mut month_total = Money::ZERO;
        for stats in skus.values() {
            month_total += stats.revenue;
        }
        totals.insert(month.clone(), month_total);
    }
    totals
}

/// Picks each month's best-selling SKU by cumulative quantity.
pub fn most_popular_items(aggregate: &MonthlyAggregate) -> IndexMap<String, PopularItem> {
    let mut popular = IndexMap::new();
    for (month, skus) in aggregate.months() {
        let mut best: Option<(&String, u32)> = None;
        for (sku, stats) in skus {
            if best.map_or(true, |(_, qty)| stats.quantity > qty) {
                best = Some((sku, stats.quantity));
            }
        }
        if let Some((sku, quantity)) = best {
            popular.insert(
                month.clone(),
                PopularItem {
                    sku: sku.clone(),
                    quantity,
                },
            );
        }
    }
    popular
}

/// Picks each month's top SKU by cumulative revenue.
pub fn top_revenue_items(aggregate: &MonthlyAggregate) -> IndexMap<String, RevenueItem> {
    let mut top = IndexMap::new();
    for (month, skus) in aggregate.months() {
        let mut best: Option<(&String, Money)> = None;
        for (sku, stats) in skus {
            if best.map_or(true, |(_, revenue)| stats.revenue > revenue) {
                best = Some((sku, stats.revenue));
            }
        }
        if let Some((sku, revenue)) = best {
            top.insert(
                month.clone(),
                RevenueItem {
                    sku: sku.clone(),
                    revenue,
                },
            );
        }
    }
    top
}

/// Re-keys each month's popular item by its order-size statistics.
///
/// # Panics
///
/// Panics if a month or SKU named by `popular` is missing from the
/// aggregate. Both maps derive from the same aggregate, so a miss is a
/// programming error upstream, not recoverable input trouble.
pub fn popular_item_details(
    aggregate: &MonthlyAggregate,
    popular: &IndexMap<String, PopularItem>,
) -> IndexMap<String, OrderSizeStats> {
    let mut details = IndexMap::new();
    for (month, item) in popular {
        // Safety: `popular` was derived from this same aggregate
        let skus = aggregate
            .get(month)
            .expect("popular-item month exists in aggregate");
        let stats = skus
            .get(&item.sku)
            .expect("popular SKU exists under its month");

        details.insert(
            month.clone(),
            OrderSizeStats {
                sku: item.sku.clone(),
                min: stats.min_order_qty,
                max: stats.max_order_qty,
                avg: stats.avg_order_qty(),
            },
        );
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SalesRecord;
    use csv::StringRecord;

    fn record(date: &str, sku: &str, qty: &str, total: &str) -> SalesRecord {
        SalesRecord::from_row(&StringRecord::from(vec![date, sku, "10", qty, total])).unwrap()
    }

    fn two_month_sample() -> MonthlyAggregate {
        MonthlyAggregate::fold(vec![
            record("2023-01-05", "ABC", "2", "20"),
            record("2023-01-20", "ABC", "3", "30"),
            record("2023-02-01", "XYZ", "10", "50"),
        ])
    }

    #[test]
    fn test_total_sales() {
        assert_eq!(total_sales(&two_month_sample()).to_string(), "100.00");
    }

    #[test]
    fn test_total_sales_of_empty_aggregate_is_zero() {
        assert!(total_sales(&MonthlyAggregate::new()).is_zero());
    }

    #[test]
    fn test_monthly_totals() {
        let totals = monthly_totals(&two_month_sample());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["January"].to_string(), "50.00");
        assert_eq!(totals["February"].to_string(), "50.00");
    }

    #[test]
    fn test_total_sales_equals_sum_of_monthly_totals() {
        let aggregate = two_month_sample();
        let mut from_months = Money::ZERO;
        for total in monthly_totals(&aggregate).values() {
            from_months += *total;
        }
        assert_eq!(total_sales(&aggregate), from_months);
    }

    #[test]
    fn test_most_popular_items() {
        let popular = most_popular_items(&two_month_sample());

        assert_eq!(
            popular["January"],
            PopularItem {
                sku: "ABC".to_string(),
                quantity: 5,
            }
        );
        assert_eq!(
            popular["February"],
            PopularItem {
                sku: "XYZ".to_string(),
                quantity: 10,
            }
        );
    }

    #[test]
    fn test_popular_tie_goes_to_first_inserted_sku() {
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-01-05", "FIRST", "4", "10"),
            record("2023-01-06", "SECOND", "4", "99"),
        ]);

        let popular = most_popular_items(&aggregate);
        assert_eq!(popular["January"].sku, "FIRST");
    }

    #[test]
    fn test_top_revenue_items_compare_revenue_not_quantity() {
        // LOWVOL sells fewer units but earns more; it must win.
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-01-05", "BULK", "100", "100"),
            record("2023-01-06", "LOWVOL", "2", "500"),
        ]);

        let top = top_revenue_items(&aggregate);
        assert_eq!(
            top["January"],
            RevenueItem {
                sku: "LOWVOL".to_string(),
                revenue: "500.00".parse().unwrap(),
            }
        );
    }

    #[test]
    fn test_revenue_tie_goes_to_first_inserted_sku() {
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-01-05", "FIRST", "1", "50"),
            record("2023-01-06", "SECOND", "9", "50"),
        ]);

        let top = top_revenue_items(&aggregate);
        assert_eq!(top["January"].sku, "FIRST");
    }

    #[test]
    fn test_popular_item_details() {
        let aggregate = two_month_sample();
        let popular = most_popular_items(&aggregate);
        let details = popular_item_details(&aggregate, &popular);

        assert_eq!(
            details["January"],
            OrderSizeStats {
                sku: "ABC".to_string(),
                min: 2,
                max: 3,
                avg: 2.5,
            }
        );
        assert_eq!(
            details["February"],
            OrderSizeStats {
                sku: "XYZ".to_string(),
                min: 10,
                max: 10,
                avg: 10.0,
            }
        );
    }

    #[test]
    #[should_panic(expected = "popular-item month exists in aggregate")]
    fn test_details_panic_on_mismatched_maps() {
        let mut popular = IndexMap::new();
        popular.insert(
            "January".to_string(),
            PopularItem {
                sku: "ABC".to_string(),
                quantity: 1,
            },
        );
        popular_item_details(&MonthlyAggregate::new(), &popular);
    }
}
