//! Per-(month, SKU) running statistics.
//!
//! The average order quantity is derived at read time from the
//! cumulative quantity and order count, never stored.

use crate::money::Money;
use crate::record::SalesRecord;
use serde::Serialize;

/// Running statistics for one SKU within one month.
///
/// # Invariants
///
/// - `min_order_qty <= max_order_qty` after every update
/// - `orders >= 1` for any stats that exist in an aggregate
/// - the average always equals `quantity / orders` at the moment of
///   read, because it is computed by [`SkuStats::avg_order_qty`]
///   rather than tracked independently
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuStats {
    /// Units sold across all orders.
    pub quantity: u32,

    /// Revenue across all orders.
    pub revenue: Money,

    /// Number of orders folded in.
    pub orders: u32,

    /// Smallest single-order quantity seen.
    pub min_order_qty: u32,

    /// Largest single-order quantity seen.
    pub max_order_qty: u32,
}

impl SkuStats {
    /// Seeds statistics from the first record for a (month, SKU) pair.
    pub fn seed(record: &SalesRecord) -> Self {
        SkuStats {
            quantity: record.quantity,
            revenue: record.total_price,
            orders: 1,
            min_order_qty: record.quantity,
            max_order_qty: record.quantity,
        }
    }

    /// Folds one more order into the running statistics.
    pub fn update(&mut self, record: &SalesRecord) {
        self.quantity += record.quantity;
        self.revenue += record.total_price;
        self.orders += 1;
        self.min_order_qty = self.min_order_qty.min(record.quantity);
        self.max_order_qty = self.max_order_qty.max(record.quantity);
    }

    /// Average units per order, derived at read time.
    pub fn avg_order_qty(&self) -> f64 {
        f64::from(self.quantity) / f64::from(self.orders)
    }
}
