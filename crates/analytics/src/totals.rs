//! Summary totals (KPI cards).

use serde::{Deserialize, Serialize};

use marquee_core::{Money, ValueObject};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTotals {
    /// Every ticket in the input, including ones whose event is unknown.
    pub total_tickets_sold: u64,
    /// Sum of current prices of resolved events.
    pub total_revenue: Money,
}

impl ValueObject for SalesTotals {}
