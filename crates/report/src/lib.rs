//! Sales report assembly: data sources, configuration and the glue that feeds
//! them into the aggregator.

pub mod config;
pub mod source;

pub use config::ReportConfig;
pub use source::{InMemorySource, JsonSnapshotSource, SalesDataSource, Snapshot, SourceError};

use marquee_analytics::{SalesAggregator, SalesReport};

/// Load both snapshots from `source` and aggregate them as configured.
pub fn build_report(
    source: &dyn SalesDataSource,
    config: &ReportConfig,
) -> Result<SalesReport, SourceError> {
    let events = source.events()?;
    let tickets = source.tickets()?;
    tracing::info!(
        events = events.len(),
        tickets = tickets.len(),
        range = ?config.range,
        "aggregating sales"
    );

    let aggregator = SalesAggregator::new(config.utc_offset);
    let report = aggregator.report(&tickets, &events, config.range.as_ref());
    if report.is_empty() {
        tracing::warn!(range = ?config.range, "no ticket sales in the selected window");
    }
    Ok(report)
}
