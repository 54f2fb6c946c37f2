//! Report configuration from environment variables.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

use marquee_analytics::DateRange;

pub const SNAPSHOT_ENV: &str = "MARQUEE_SNAPSHOT";
pub const FROM_ENV: &str = "MARQUEE_FROM";
pub const TO_ENV: &str = "MARQUEE_TO";
pub const UTC_OFFSET_ENV: &str = "MARQUEE_UTC_OFFSET_MINUTES";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// JSON snapshot to read; `None` uses the built-in demo catalog.
    pub snapshot: Option<PathBuf>,
    /// Purchase-date window; `None` reports all time.
    pub range: Option<DateRange>,
    /// Zone in which calendar days are evaluated.
    pub utc_offset: FixedOffset,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            range: None,
            utc_offset: utc(),
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let utc_offset = lookup(UTC_OFFSET_ENV)
            .map(|raw| parse_offset(&raw))
            .unwrap_or_else(utc);

        let snapshot = lookup(SNAPSHOT_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let range = parse_range(
            lookup(FROM_ENV).as_deref(),
            lookup(TO_ENV).as_deref(),
            &utc_offset,
        );

        Self {
            snapshot,
            range,
            utc_offset,
        }
    }

    /// A snapshot path given on the command line wins over the environment.
    pub fn with_snapshot_arg(mut self, arg: Option<String>) -> Self {
        if let Some(path) = arg.filter(|p| !p.trim().is_empty()) {
            self.snapshot = Some(PathBuf::from(path));
        }
        self
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(raw: &str) -> FixedOffset {
    let offset = raw
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(60))
        .and_then(FixedOffset::east_opt);

    offset.unwrap_or_else(|| {
        tracing::warn!(value = raw, "{UTC_OFFSET_ENV} is not a valid offset in minutes; using UTC");
        utc()
    })
}

/// Midnight of a `YYYY-MM-DD` date in `tz`.
fn parse_day(raw: &str, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Any malformed bound disables filtering altogether.
fn parse_range(from: Option<&str>, to: Option<&str>, tz: &FixedOffset) -> Option<DateRange> {
    let from = from.filter(|raw| !raw.trim().is_empty());
    let to = to.filter(|raw| !raw.trim().is_empty());

    let parsed_from = match from {
        Some(raw) => match parse_day(raw, tz) {
            Some(dt) => Some(dt),
            None => {
                tracing::warn!(value = raw, "{FROM_ENV} is not a YYYY-MM-DD date; reporting all time");
                return None;
            }
        },
        None => None,
    };
    let parsed_to = match to {
        Some(raw) => match parse_day(raw, tz) {
            Some(dt) => Some(dt),
            None => {
                tracing::warn!(value = raw, "{TO_ENV} is not a YYYY-MM-DD date; reporting all time");
                return None;
            }
        },
        None => None,
    };

    let from = parsed_from?;
    Some(DateRange {
        from: Some(from),
        to: parsed_to,
    })
}
