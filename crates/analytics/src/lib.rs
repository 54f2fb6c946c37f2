//! Sales analytics aggregation.
//!
//! Pure, synchronous computations over snapshots of tickets and events: range
//! filtering, summary totals, a day/month revenue series and a per-event
//! breakdown. Nothing here performs IO or keeps state between calls.

pub mod aggregator;
pub mod breakdown;
pub mod range;
pub mod report;
pub mod series;
pub mod totals;

pub use aggregator::SalesAggregator;
pub use breakdown::EventSales;
pub use range::DateRange;
pub use report::SalesReport;
pub use series::{Granularity, SeriesBucket};
pub use totals::SalesTotals;
