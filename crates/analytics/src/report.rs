//! Combined analytics view for one date window.

use serde::{Deserialize, Serialize};

use crate::breakdown::EventSales;
use crate::range::DateRange;
use crate::series::{Granularity, SeriesBucket};
use crate::totals::SalesTotals;

/// Everything an analytics dashboard renders: KPI totals, the revenue chart
/// series and the per-event table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub range: Option<DateRange>,
    pub granularity: Granularity,
    pub totals: SalesTotals,
    pub series: Vec<SeriesBucket>,
    pub breakdown: Vec<EventSales>,
    /// Tickets in the window whose event is not in the catalog snapshot.
    pub unresolved_tickets: u64,
}

impl SalesReport {
    pub fn is_empty(&self) -> bool {
        self.totals.total_tickets_sold == 0
    }
}
