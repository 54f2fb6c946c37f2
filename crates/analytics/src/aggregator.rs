//! The sales aggregator.
//!
//! Revenue is always computed from each event's *current* price, not from a
//! price captured at purchase time. Tickets whose event is missing from the
//! supplied collection are excluded from revenue, the series and the breakdown.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use chrono::{TimeZone, Utc};

use marquee_catalog::Event;
use marquee_core::{EventId, index_by_id};
use marquee_tickets::Ticket;

use crate::breakdown::EventSales;
use crate::range::DateRange;
use crate::report::SalesReport;
use crate::series::{Granularity, SeriesBucket, SeriesBuilder};
use crate::totals::SalesTotals;

/// Event lookup by id, first record wins.
type EventIndex<'a> = HashMap<EventId, &'a Event>;

/// Computes sales analytics over ticket and event snapshots.
///
/// Calendar days (range ends, series buckets) are evaluated in `Tz`.
/// Inputs are only read; every call is independent of the previous ones.
#[derive(Debug, Clone)]
pub struct SalesAggregator<Tz: TimeZone = Utc> {
    tz: Tz,
}

impl SalesAggregator<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl Default for SalesAggregator<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

impl<Tz: TimeZone> SalesAggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Tickets purchased within `range`, in input order.
    ///
    /// An absent range, or one without `from`, keeps every ticket.
    pub fn filter_by_range<'a>(
        &self,
        tickets: &'a [Ticket],
        range: Option<&DateRange>,
    ) -> Vec<&'a Ticket> {
        let Some((from, to)) = range.and_then(|r| r.bounds(&self.tz)) else {
            return tickets.iter().collect();
        };

        tickets
            .iter()
            .filter(|ticket| {
                let at = ticket.purchased_at();
                from <= at && at <= to
            })
            .collect()
    }

    pub fn compute_totals<T>(
        &self,
        tickets: impl IntoIterator<Item = T>,
        events: &[Event],
    ) -> SalesTotals
    where
        T: Borrow<Ticket>,
    {
        totals_with(tickets, &index_by_id(events))
    }

    /// Bucket width used for `range`.
    pub fn granularity_for(&self, range: Option<&DateRange>) -> Granularity {
        Granularity::for_span(range.and_then(|r| r.span_days(&self.tz)))
    }

    /// Revenue per day or month, oldest bucket first.
    ///
    /// `range` only selects the granularity; filtering is done by
    /// [`filter_by_range`](Self::filter_by_range).
    pub fn compute_time_series<T>(
        &self,
        tickets: impl IntoIterator<Item = T>,
        events: &[Event],
        range: Option<&DateRange>,
    ) -> Vec<SeriesBucket>
    where
        T: Borrow<Ticket>,
    {
        self.series_with(tickets, &index_by_id(events), self.granularity_for(range))
    }

    pub(crate) fn series_with<T>(
        &self,
        tickets: impl IntoIterator<Item = T>,
        index: &EventIndex<'_>,
        granularity: Granularity,
    ) -> Vec<SeriesBucket>
    where
        T: Borrow<Ticket>,
    {
        let mut builder = SeriesBuilder::new(granularity);

        for ticket in tickets {
            let ticket: &Ticket = ticket.borrow();
            let Some(event) = index.get(&ticket.event_id()) else {
                continue;
            };
            let local_date = ticket.purchased_at().with_timezone(&self.tz).date_naive();
            builder.record(local_date, event.id_typed(), event.price());
        }

        builder.finish()
    }

    /// Events with at least one sale, highest revenue first.
    ///
    /// Equal revenues keep the order of `events`. When `events` repeats an id,
    /// only its first occurrence is reported.
    pub fn compute_event_breakdown<T>(
        &self,
        tickets: impl IntoIterator<Item = T>,
        events: &[Event],
    ) -> Vec<EventSales>
    where
        T: Borrow<Ticket>,
    {
        let mut sold: HashMap<EventId, u64> = HashMap::new();
        for ticket in tickets {
            let ticket: &Ticket = ticket.borrow();
            *sold.entry(ticket.event_id()).or_default() += 1;
        }

        let mut seen: HashSet<EventId> = HashSet::with_capacity(events.len());
        let mut rows: Vec<EventSales> = events
            .iter()
            .filter(|event| seen.insert(event.id_typed()))
            .filter_map(|event| {
                let tickets_sold = sold.get(&event.id_typed()).copied().unwrap_or(0);
                (tickets_sold > 0).then(|| EventSales {
                    event_id: event.id_typed(),
                    title: event.title().to_string(),
                    tickets_sold,
                    revenue: event.price().times(tickets_sold),
                })
            })
            .collect();

        // Stable: ties keep catalog order.
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        rows
    }

    /// Filter once, then compute totals, series and breakdown for the window.
    pub fn report(
        &self,
        tickets: &[Ticket],
        events: &[Event],
        range: Option<&DateRange>,
    ) -> SalesReport {
        let filtered = self.filter_by_range(tickets, range);

        let index = index_by_id(events);
        let unresolved_tickets = filtered
            .iter()
            .filter(|ticket| !index.contains_key(&ticket.event_id()))
            .count() as u64;
        if unresolved_tickets > 0 {
            tracing::warn!(
                unresolved_tickets,
                "tickets reference events missing from the catalog snapshot; excluded from revenue"
            );
        }

        let granularity = self.granularity_for(range);
        let totals = totals_with(filtered.iter().copied(), &index);
        let series = self.series_with(filtered.iter().copied(), &index, granularity);
        let breakdown = self.compute_event_breakdown(filtered.iter().copied(), events);

        tracing::debug!(
            tickets_in = tickets.len(),
            tickets_in_range = filtered.len(),
            events = events.len(),
            buckets = series.len(),
            ?granularity,
            revenue = %totals.total_revenue,
            "sales report computed"
        );

        SalesReport {
            range: range.copied(),
            granularity,
            totals,
            series,
            breakdown,
            unresolved_tickets,
        }
    }
}

pub(crate) fn totals_with<T>(
    tickets: impl IntoIterator<Item = T>,
    index: &EventIndex<'_>,
) -> SalesTotals
where
    T: Borrow<Ticket>,
{
    let mut totals = SalesTotals::default();

    for ticket in tickets {
        let ticket: &Ticket = ticket.borrow();
        totals.total_tickets_sold += 1;
        if let Some(event) = index.get(&ticket.event_id()) {
            totals.total_revenue = totals.total_revenue.saturating_add(event.price());
        }
    }

    totals
}
