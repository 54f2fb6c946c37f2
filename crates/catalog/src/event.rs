use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marquee_core::{DomainError, DomainResult, Entity, EventId, Money};

/// What is being sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    LiveEvent,
    Movie,
}

/// Schedule lifecycle of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Live,
    Past,
}

/// Admin moderation state, orthogonal to the schedule status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A schedulable live performance or movie with a ticket price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    id: EventId,
    title: String,
    artist: Option<String>,
    kind: EventKind,
    /// Current ticket price in the smallest currency unit.
    price: Money,
    starts_at: Option<DateTime<Utc>>,
    status: EventStatus,
    approval: ApprovalStatus,
}

/// Wire shape of an event; validated through [`Event::new`] on the way in.
#[derive(Debug, Clone, Deserialize)]
struct EventRecord {
    id: EventId,
    title: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    kind: EventKind,
    price: Money,
    #[serde(default)]
    starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status: EventStatus,
    #[serde(default)]
    approval: ApprovalStatus,
}

impl TryFrom<EventRecord> for Event {
    type Error = DomainError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let mut event = Event::new(record.id, record.title, record.price)?
            .with_kind(record.kind)
            .with_status(record.status);
        event.artist = record.artist;
        event.starts_at = record.starts_at;
        event.approval = record.approval;
        Ok(event)
    }
}

impl Event {
    /// Create a pending, upcoming live event.
    pub fn new(id: EventId, title: impl Into<String>, price: Money) -> DomainResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }

        Ok(Self {
            id,
            title,
            artist: None,
            kind: EventKind::default(),
            price,
            starts_at: None,
            status: EventStatus::default(),
            approval: ApprovalStatus::default(),
        })
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id_typed(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn approval(&self) -> ApprovalStatus {
        self.approval
    }

    /// Tickets can be bought only for approved events that have not finished.
    pub fn is_on_sale(&self) -> bool {
        self.approval == ApprovalStatus::Approved && self.status != EventStatus::Past
    }

    pub fn approve(&mut self) -> DomainResult<()> {
        self.ensure_pending()?;
        self.approval = ApprovalStatus::Approved;
        Ok(())
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        self.ensure_pending()?;
        self.approval = ApprovalStatus::Rejected;
        Ok(())
    }

    fn ensure_pending(&self) -> DomainResult<()> {
        match self.approval {
            ApprovalStatus::Pending => Ok(()),
            other => Err(DomainError::invariant(format!(
                "only pending events can be moderated (current: {other:?})"
            ))),
        }
    }
}

impl Entity for Event {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> Event {
        Event::new(EventId::new(), "Midnight Sessions", Money::from_units(15)).unwrap()
    }

    #[test]
    fn new_event_is_pending_and_upcoming() {
        let event = test_event();
        assert_eq!(event.approval(), ApprovalStatus::Pending);
        assert_eq!(event.status(), EventStatus::Upcoming);
        assert_eq!(event.kind(), EventKind::LiveEvent);
        assert!(!event.is_on_sale());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = Event::new(EventId::new(), "   ", Money::ZERO).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("title") => {}
            _ => panic!("Expected Validation error for blank title"),
        }
    }

    #[test]
    fn title_is_trimmed() {
        let event = Event::new(EventId::new(), "  Dune  ", Money::ZERO).unwrap();
        assert_eq!(event.title(), "Dune");
    }

    #[test]
    fn approved_event_goes_on_sale_until_past() {
        let mut event = test_event();
        event.approve().unwrap();
        assert!(event.is_on_sale());

        let event = event.with_status(EventStatus::Past);
        assert!(!event.is_on_sale());
    }

    #[test]
    fn moderation_only_from_pending() {
        let mut event = test_event();
        event.reject().unwrap();
        assert_eq!(event.approval(), ApprovalStatus::Rejected);

        let err = event.approve().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("only pending events") => {}
            _ => panic!("Expected InvariantViolation when approving a rejected event"),
        }
        assert_eq!(event.approval(), ApprovalStatus::Rejected);
    }

    #[test]
    fn deserializes_with_display_defaults() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Jazz Night",
            "price": 1500
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id_typed(), EventId::from_u128(1));
        assert_eq!(event.price(), Money::from_units(15));
        assert_eq!(event.approval(), ApprovalStatus::Pending);
        assert_eq!(event.artist(), None);
    }

    #[test]
    fn deserializing_blank_title_is_rejected() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "   ",
            "price": 100
        }"#;
        let err = serde_json::from_str::<Event>(json).unwrap_err();
        assert!(err.to_string().contains("title must not be empty"));
    }

    #[test]
    fn deserializing_trims_title_and_keeps_moderation_state() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000002",
            "title": "  Dune  ",
            "artist": "Denis",
            "kind": "movie",
            "price": 1299,
            "status": "live",
            "approval": "approved"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title(), "Dune");
        assert_eq!(event.artist(), Some("Denis"));
        assert_eq!(event.kind(), EventKind::Movie);
        assert_eq!(event.status(), EventStatus::Live);
        assert_eq!(event.approval(), ApprovalStatus::Approved);
        assert!(event.is_on_sale());
    }

    #[test]
    fn serialized_event_reads_back() {
        let mut event = test_event().with_artist("Nightowls").with_kind(EventKind::Movie);
        event.approve().unwrap();

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: exactly one moderation decision is accepted.
            #[test]
            fn moderation_is_single_shot(approve_first in any::<bool>(), approve_second in any::<bool>()) {
                let mut event = test_event();
                let first = if approve_first { event.approve() } else { event.reject() };
                prop_assert!(first.is_ok());
                let decided = event.approval();

                let second = if approve_second { event.approve() } else { event.reject() };
                prop_assert!(second.is_err());
                prop_assert_eq!(event.approval(), decided);
            }
        }
    }
}
