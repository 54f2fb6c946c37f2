//! Per-event sales rows.

use serde::{Deserialize, Serialize};

use marquee_core::{EventId, Money, ValueObject};

/// Sales of one event within the aggregated window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSales {
    pub event_id: EventId,
    pub title: String,
    pub tickets_sold: u64,
    /// `tickets_sold` times the event's current price.
    pub revenue: Money,
}

impl ValueObject for EventSales {}
