//! Ingest-and-report pipeline.
//!
//! Reads a sales CSV in one pass, folds every valid row into a
//! [`MonthlyAggregate`], then derives and renders the five reports.
//! Row-level trouble is absorbed here and surfaced in the returned
//! [`IngestSummary`]; only source-level failures abort a run.

use crate::aggregate::MonthlyAggregate;
use crate::error::Result;
use crate::record::{RowRejection, SalesRecord};
use crate::report::{
    monthly_totals, most_popular_items, popular_item_details, top_revenue_items, total_sales,
};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// One input row that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-indexed row number in the source file, counting the header.
    pub row: usize,

    /// Why the row was dropped.
    pub reason: RowRejection,
}

/// Outcome of one ingest run.
///
/// Returned so callers and tests can observe drops without capturing
/// log output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Rows folded into the aggregate.
    pub ingested: usize,

    /// Rows dropped, with their row numbers and reasons.
    pub dropped: Vec<DroppedRow>,
}

/// The sales reporting pipeline.
///
/// Owns the aggregate while it is being built; reports are derived
/// from the finished state. Input order never changes totals, minima,
/// maxima, or averages, only the insertion order used for tie-breaks
/// and display grouping.
#[derive(Debug, Default)]
pub struct SalesPipeline {
    aggregate: MonthlyAggregate,
}

impl SalesPipeline {
    /// Creates a pipeline with an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests sales rows from a CSV reader.
    ///
    /// Row 0 is treated as a header and discarded unconditionally,
    /// regardless of content. Each remaining row either becomes a
    /// record and is folded in, or is dropped with a reason; a bad row
    /// never stops the rows after it. Drops are logged at warn level
    /// and collected into the summary.
    pub fn ingest_csv<R: Read>(&mut self, reader: R) -> Result<IngestSummary> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut summary = IngestSummary::default();

        for (row_idx, result) in csv_reader.records().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let rejection = match result {
                Ok(row) => match SalesRecord::from_row(&row) {
                    Ok(record) => {
                        self.aggregate.add(&record);
                        summary.ingested += 1;
                        debug!(
                            "Row {}: {} x{} into {}",
                            row_num,
                            record.sku,
                            record.quantity,
                            record.month_key()
                        );
                        continue;
                    }
                    Err(rejection) => rejection,
                },
                // An I/O failure mid-read is a source failure, not a bad
                // row: abort with no partial report.
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => RowRejection::Unreadable(e.to_string()),
            };

            warn!("Row {}: dropped: {}", row_num, rejection);
            summary.dropped.push(DroppedRow {
                row: row_num,
                reason: rejection,
            });
        }

        Ok(summary)
    }

    /// The aggregate built so far.
    pub fn aggregate(&self) -> &MonthlyAggregate {
        &self.aggregate
    }

    /// Derives all five reports and renders them to the sink.
    pub fn write_report<W: Write>(&self, mut writer: W) -> Result<()> {
        let totals = monthly_totals(&self.aggregate);
        let popular = most_popular_items(&self.aggregate);
        let top_revenue = top_revenue_items(&self.aggregate);
        let details = popular_item_details(&self.aggregate, &popular);

        let width = self
            .aggregate
            .months()
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0);

        writeln!(writer, "Total sales: {}", total_sales(&self.aggregate))?;

        writeln!(writer, "\nRevenue by month")?;
        for (month, total) in &totals {
            writeln!(writer, "  {month:width$}  {total}")?;
        }

        writeln!(writer, "\nBest seller by month")?;
        for (month, item) in &popular {
            writeln!(writer, "  {month:width$}  {} ({} units)", item.sku, item.quantity)?;
        }

        writeln!(writer, "\nTop earner by month")?;
        for (month, item) in &top_revenue {
            writeln!(writer, "  {month:width$}  {} ({})", item.sku, item.revenue)?;
        }

        writeln!(writer, "\nBest seller order sizes")?;
        for (month, stats) in &details {
            writeln!(
                writer,
                "  {month:width$}  {} min {} max {} avg {:.2}",
                stats.sku, stats.min, stats.max, stats.avg
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
