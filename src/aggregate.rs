//! Two-level month → SKU → statistics aggregate and its fold.
//!
//! Both levels are insertion-ordered maps. Iteration order carries no
//! meaning for totals, but it is the documented tie-break order for
//! the report generators, so it must be deterministic.

use crate::record::SalesRecord;
use crate::stats::SkuStats;
use indexmap::IndexMap;

/// SKU → running statistics within one month.
pub type SkuMap = IndexMap<String, SkuStats>;

/// The finished aggregate: month name → SKU → statistics.
///
/// Built once by folding records in input order, then read by the
/// report generators. Nothing downstream mutates it.
#[derive(Debug, Clone, Default)]
pub struct MonthlyAggregate {
    months: IndexMap<String, SkuMap>,
}

impl MonthlyAggregate {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a whole sequence of records into a fresh aggregate.
    pub fn fold<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SalesRecord>,
    {
        let mut aggregate = MonthlyAggregate::new();
        for record in records {
            aggregate.add(&record);
        }
        aggregate
    }

    /// Folds one record into the aggregate.
    ///
    /// The first record for a (month, SKU) pair seeds the statistics;
    /// later records accumulate. Records with an unparseable date land
    /// in the `"Invalid Date"` bucket rather than being dropped.
    pub fn add(&mut self, record: &SalesRecord) {
        let skus = self.months.entry(record.month_key()).or_default();
        match skus.get_mut(&record.sku) {
            Some(stats) => stats.update(record),
            None => {
                skus.insert(record.sku.clone(), SkuStats::seed(record));
            }
        }
    }

    /// Month name → SKU map, in first-seen month order.
    pub fn months(&self) -> &IndexMap<String, SkuMap> {
        &self.months
    }

    /// Looks up one month's SKU map.
    pub fn get(&self, month: &str) -> Option<&SkuMap> {
        self.months.get(month)
    }

    /// Returns `true` if no record has been folded in.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::INVALID_DATE_BUCKET;
    use csv::StringRecord;

    fn record(date: &str, sku: &str, qty: &str, total: &str) -> SalesRecord {
        SalesRecord::from_row(&StringRecord::from(vec![date, sku, "10", qty, total])).unwrap()
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate = MonthlyAggregate::new();
        assert!(aggregate.is_empty());
        assert!(aggregate.get("January").is_none());
    }

    #[test]
    fn test_fold_groups_by_month_and_sku() {
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-01-05", "ABC", "2", "20"),
            record("2023-01-20", "ABC", "3", "30"),
            record("2023-02-01", "XYZ", "10", "50"),
        ]);

        let january = aggregate.get("January").unwrap();
        let abc = january.get("ABC").unwrap();
        assert_eq!(abc.quantity, 5);
        assert_eq!(abc.revenue.to_string(), "50.00");
        assert_eq!(abc.orders, 2);

        let february = aggregate.get("February").unwrap();
        let xyz = february.get("XYZ").unwrap();
        assert_eq!(xyz.quantity, 10);
        assert_eq!(xyz.revenue.to_string(), "50.00");
        assert_eq!(xyz.orders, 1);
    }

    #[test]
    fn test_months_preserve_first_seen_order() {
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-03-01", "A", "1", "1"),
            record("2023-01-01", "B", "1", "1"),
            record("2023-03-15", "C", "1", "1"),
        ]);

        let months: Vec<&String> = aggregate.months().keys().collect();
        assert_eq!(months, ["March", "January"]);
    }

    #[test]
    fn test_same_sku_in_two_months_tracked_separately() {
        let aggregate = MonthlyAggregate::fold(vec![
            record("2023-01-05", "ABC", "2", "20"),
            record("2023-02-05", "ABC", "9", "90"),
        ]);

        assert_eq!(aggregate.get("January").unwrap()["ABC"].quantity, 2);
        assert_eq!(aggregate.get("February").unwrap()["ABC"].quantity, 9);
    }

    #[test]
    fn test_invalid_date_goes_to_explicit_bucket() {
        let aggregate = MonthlyAggregate::fold(vec![record("garbage", "ABC", "2", "20")]);

        let bucket = aggregate.get(INVALID_DATE_BUCKET).unwrap();
        assert_eq!(bucket["ABC"].quantity, 2);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let rows = vec![
            record("2023-01-05", "ABC", "2", "20"),
            record("2023-01-20", "ABC", "3", "30"),
            record("2023-01-25", "XYZ", "1", "5"),
            record("2023-02-01", "XYZ", "10", "50"),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = MonthlyAggregate::fold(rows);
        let backward = MonthlyAggregate::fold(reversed);

        for (month, skus) in forward.months() {
            let other = backward.get(month).unwrap();
            for (sku, stats) in skus {
                let other_stats = other.get(sku).unwrap();
                assert_eq!(stats.quantity, other_stats.quantity);
                assert_eq!(stats.revenue, other_stats.revenue);
                assert_eq!(stats.orders, other_stats.orders);
                assert_eq!(stats.min_order_qty, other_stats.min_order_qty);
                assert_eq!(stats.max_order_qty, other_stats.max_order_qty);
            }
        }
    }
}
