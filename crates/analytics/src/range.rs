//! Purchase-date ranges.

use chrono::{DateTime, Duration, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use marquee_core::ValueObject;

/// Inclusive purchase-date window.
///
/// A range without `from` means "all time". `to` is inclusive through the end
/// of its calendar day; without `to` the window covers the calendar day of
/// `from` only.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Single-day range starting at `from`.
    pub fn starting(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn all_time() -> Self {
        Self::default()
    }

    /// True when the range does not filter anything.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none()
    }

    /// Effective inclusive bounds, with the upper bound pushed to the last
    /// millisecond of its calendar day in `tz`.
    pub fn bounds<Tz: TimeZone>(&self, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let from = self.from?;
        let last_day = self.to.unwrap_or(from);
        Some((from, end_of_day(last_day, tz)))
    }

    /// Number of calendar days between `from` and `to` in `tz`.
    ///
    /// `None` when the range is unbounded. Negative for inverted ranges.
    pub fn span_days<Tz: TimeZone>(&self, tz: &Tz) -> Option<i64> {
        let from = self.from?;
        let to = self.to.unwrap_or(from);
        let from_day = from.with_timezone(tz).date_naive();
        let to_day = to.with_timezone(tz).date_naive();
        Some((to_day - from_day).num_days())
    }
}

impl ValueObject for DateRange {}

fn end_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(tz);
    let day = local.date_naive();

    if let Some(end) = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|last| tz.from_local_datetime(&last).latest())
    {
        return end.with_timezone(&Utc);
    }

    // 23:59:59.999 falls in a DST gap: the day ends where the next one starts.
    if let Some(next_start) = start_of_next_day(day, tz) {
        return next_start - Duration::milliseconds(1);
    }

    // Both ends skipped: keep the offset in effect at `instant` for the whole day.
    let fixed = local.offset().fix();
    day.and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|last| fixed.from_local_datetime(&last).single())
        .map(|end| end.with_timezone(&Utc))
        .unwrap_or(instant)
}

fn start_of_next_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = day.succ_opt()?.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn upper_bound_extends_to_end_of_day() {
        let range = DateRange::between(utc(2024, 1, 1, 0, 0), utc(2024, 1, 31, 0, 0));
        let (from, to) = range.bounds(&Utc).unwrap();
        assert_eq!(from, utc(2024, 1, 1, 0, 0));
        assert_eq!(
            to,
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()
                + chrono::Duration::milliseconds(999)
        );
    }

    #[test]
    fn missing_to_covers_the_from_day() {
        let range = DateRange::starting(utc(2024, 3, 10, 0, 0));
        let (_, to) = range.bounds(&Utc).unwrap();
        assert_eq!(to.date_naive(), utc(2024, 3, 10, 0, 0).date_naive());
        assert_eq!(range.span_days(&Utc), Some(0));
    }

    #[test]
    fn missing_from_is_unbounded() {
        let range = DateRange {
            from: None,
            to: Some(utc(2024, 1, 31, 0, 0)),
        };
        assert!(range.is_unbounded());
        assert_eq!(range.bounds(&Utc), None);
        assert_eq!(range.span_days(&Utc), None);
    }

    #[test]
    fn end_of_day_follows_the_zone() {
        // 2024-01-31 20:00 UTC is already 2024-02-01 in UTC+05:00.
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let range = DateRange::starting(utc(2024, 1, 31, 20, 0));
        let (_, to) = range.bounds(&tz).unwrap();
        assert_eq!(to, utc(2024, 2, 1, 18, 59) + chrono::Duration::milliseconds(59_999));
    }

    /// UTC-01:00 until 2024-03-10T00:00Z, UTC+00:00 afterwards, so local
    /// 2024-03-09 23:00..24:00 never happens.
    #[derive(Debug, Clone, Copy)]
    struct SkipsLateEvening;

    impl SkipsLateEvening {
        fn switch() -> chrono::NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }

        fn before() -> FixedOffset {
            FixedOffset::west_opt(3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }
    }

    impl TimeZone for SkipsLateEvening {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SkipsLateEvening
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(
            &self,
            local: &chrono::NaiveDateTime,
        ) -> LocalResult<FixedOffset> {
            let gap_start = Self::switch() - Duration::hours(1);
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local >= Self::switch() {
                LocalResult::Single(Self::after())
            } else {
                LocalResult::None
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &chrono::NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn end_of_day_inside_a_dst_gap_keeps_the_evening() {
        // Local 2024-03-09 11:00; local 23:59:59.999 does not exist that day.
        let range = DateRange::starting(utc(2024, 3, 9, 12, 0));
        let (_, to) = range.bounds(&SkipsLateEvening).unwrap();

        // Next local day starts at 2024-03-10T00:00Z.
        assert_eq!(to, utc(2024, 3, 9, 23, 59) + Duration::milliseconds(59_999));

        // A purchase late in the (shortened) local evening is still inside.
        assert!(utc(2024, 3, 9, 21, 30) <= to);
    }

    #[test]
    fn span_counts_calendar_days() {
        let range = DateRange::between(utc(2024, 1, 1, 23, 0), utc(2024, 1, 2, 1, 0));
        assert_eq!(range.span_days(&Utc), Some(1));

        let inverted = DateRange::between(utc(2024, 1, 5, 0, 0), utc(2024, 1, 1, 0, 0));
        assert_eq!(inverted.span_days(&Utc), Some(-4));
    }
}
