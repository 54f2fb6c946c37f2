//! Ticket and event snapshot providers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use marquee_catalog::{Event, EventKind, EventStatus};
use marquee_core::{DomainError, EventId, Money, TicketId, UserId};
use marquee_tickets::Ticket;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Supplies read-only snapshots of the catalog and of sold tickets.
pub trait SalesDataSource: Send + Sync {
    fn events(&self) -> Result<Vec<Event>, SourceError>;
    fn tickets(&self) -> Result<Vec<Ticket>, SourceError>;
}

impl<S> SalesDataSource for Arc<S>
where
    S: SalesDataSource + ?Sized,
{
    fn events(&self) -> Result<Vec<Event>, SourceError> {
        (**self).events()
    }

    fn tickets(&self) -> Result<Vec<Ticket>, SourceError> {
        (**self).tickets()
    }
}

/// On-disk snapshot layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

/// In-memory source for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: Snapshot,
}

impl InMemorySource {
    pub fn new(events: Vec<Event>, tickets: Vec<Ticket>) -> Self {
        Self {
            snapshot: Snapshot { events, tickets },
        }
    }

    /// Small marketplace catalog with a quarter of ticket sales.
    pub fn demo() -> Result<Self, SourceError> {
        let events = vec![
            Event::new(EventId::from_u128(1), "Neon Skyline Live", Money::from_cents(4500))?
                .with_artist("Neon Skyline"),
            Event::new(EventId::from_u128(2), "Midnight Jazz Session", Money::from_cents(2500))?
                .with_artist("The Blue Notes")
                .with_status(EventStatus::Past),
            Event::new(EventId::from_u128(3), "The Last Orbit", Money::from_cents(1299))?
                .with_kind(EventKind::Movie),
            Event::new(EventId::from_u128(4), "Acoustic Sundays", Money::from_cents(1800))?
                .with_artist("Mara Quinn"),
        ];

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).single().ok_or_else(|| {
            DomainError::validation("demo start date is not representable")
        })?;
        let tickets = (0..60u32)
            .map(|i| {
                let event = EventId::from_u128(u128::from(i % 7 % 4) + 1);
                let purchased_at = start + Duration::hours(i64::from(i) * 37);
                Ticket::new(
                    TicketId::from_u128(u128::from(i) + 1),
                    UserId::from_u128(u128::from(i % 9) + 1),
                    event,
                    purchased_at,
                )
            })
            .collect();

        Ok(Self::new(events, tickets))
    }
}

impl SalesDataSource for InMemorySource {
    fn events(&self) -> Result<Vec<Event>, SourceError> {
        Ok(self.snapshot.events.clone())
    }

    fn tickets(&self) -> Result<Vec<Ticket>, SourceError> {
        Ok(self.snapshot.tickets.clone())
    }
}

/// Snapshot read once from a JSON file (`{ "events": [...], "tickets": [...] }`).
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonSnapshotSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            events = snapshot.events.len(),
            tickets = snapshot.tickets.len(),
            "snapshot loaded"
        );
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SalesDataSource for JsonSnapshotSource {
    fn events(&self) -> Result<Vec<Event>, SourceError> {
        Ok(self.snapshot.events.clone())
    }

    fn tickets(&self) -> Result<Vec<Ticket>, SourceError> {
        Ok(self.snapshot.tickets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_tickets_all_resolve() {
        let source = InMemorySource::demo().unwrap();
        let events = source.events().unwrap();
        let tickets = source.tickets().unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(tickets.len(), 60);
        assert!(
            tickets
                .iter()
                .all(|t| events.iter().any(|e| e.id_typed() == t.event_id()))
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonSnapshotSource::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn shared_source_delegates() {
        let source: Arc<dyn SalesDataSource> = Arc::new(InMemorySource::default());
        assert!(source.events().unwrap().is_empty());
        assert!(source.tickets().unwrap().is_empty());
    }
}
