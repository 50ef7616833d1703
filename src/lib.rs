//! # Sales Metrics
//!
//! Folds a CSV sales-transaction log into per-month, per-SKU summaries
//! and derives business reports from them: total revenue, monthly
//! revenue, each month's best seller and top earner, and order-size
//! statistics for the best seller.
//!
//! ## Design Principles
//!
//! - **Fixed-point revenue**: amounts use 2 decimal places via `rust_decimal`
//! - **One-way data flow**: lines → records → aggregate → reports,
//!   nothing mutates upstream state
//! - **Absorbed row errors**: bad rows are counted and reported, never fatal
//! - **Deterministic output**: insertion-ordered maps fix the tie-break
//!   and display order
//!
//! ## Example
//!
//! ```no_run
//! use sales_metrics::SalesPipeline;
//! use std::io::Cursor;
//!
//! let csv = "Date,SKU,Unit_Price,Quantity,Total_Price\n2023-01-05,ABC,10,2,20\n";
//! let mut pipeline = SalesPipeline::new();
//! pipeline.ingest_csv(Cursor::new(csv)).unwrap();
//! pipeline.write_report(std::io::stdout()).unwrap();
//! ```

pub mod aggregate;
pub mod error;
pub mod money;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;

pub use aggregate::{MonthlyAggregate, SkuMap};
pub use error::{EngineError, Result};
pub use money::Money;
pub use pipeline::{DroppedRow, IngestSummary, SalesPipeline};
pub use record::{RowRejection, SalesRecord};
pub use report::{OrderSizeStats, PopularItem, RevenueItem};
pub use stats::SkuStats;
