//! Time-bucketed revenue series.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use marquee_core::{EventId, Money};

/// Ranges spanning fewer calendar days than this are charted per day.
pub const DAILY_SPAN_LIMIT_DAYS: i64 = 365;

/// Width of one series bucket.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Pick the bucket width for a range spanning `span_days` calendar days.
    ///
    /// An unbounded range (`None`) is a long-horizon view and buckets by month.
    pub fn for_span(span_days: Option<i64>) -> Self {
        match span_days {
            Some(days) if days < DAILY_SPAN_LIMIT_DAYS => Granularity::Day,
            _ => Granularity::Month,
        }
    }

    /// First calendar day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Short chart label for the bucket starting on `start`.
    pub fn label(self, start: NaiveDate) -> String {
        match self {
            Granularity::Day => start.format("%b %d").to_string(),
            Granularity::Month => start.format("%b %Y").to_string(),
        }
    }
}

/// One point of the revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBucket {
    pub starts_on: NaiveDate,
    pub label: String,
    pub revenue: Money,
    pub tickets_sold: u64,
    /// Number of different events with at least one sale in the bucket.
    pub distinct_events_with_sales: u64,
}

#[derive(Debug, Default)]
struct BucketAccumulator {
    revenue: Money,
    tickets_sold: u64,
    events: HashSet<EventId>,
}

/// Accumulates resolved sales into calendar buckets, emitted in chronological order.
#[derive(Debug)]
pub(crate) struct SeriesBuilder {
    granularity: Granularity,
    buckets: BTreeMap<NaiveDate, BucketAccumulator>,
}

impl SeriesBuilder {
    pub(crate) fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            buckets: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, local_date: NaiveDate, event_id: EventId, price: Money) {
        let start = self.granularity.bucket_start(local_date);
        let bucket = self.buckets.entry(start).or_default();
        bucket.revenue = bucket.revenue.saturating_add(price);
        bucket.tickets_sold += 1;
        bucket.events.insert(event_id);
    }

    pub(crate) fn finish(self) -> Vec<SeriesBucket> {
        let granularity = self.granularity;
        self.buckets
            .into_iter()
            .map(|(starts_on, acc)| SeriesBucket {
                starts_on,
                label: granularity.label(starts_on),
                revenue: acc.revenue,
                tickets_sold: acc.tickets_sold,
                distinct_events_with_sales: acc.events.len() as u64,
            })
            .collect()
    }
}
