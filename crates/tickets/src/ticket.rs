use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marquee_catalog::Event;
use marquee_core::{DomainError, DomainResult, Entity, EventId, TicketId, UserId};

/// One purchased admission to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    user_id: UserId,
    event_id: EventId,
    purchased_at: DateTime<Utc>,
}

impl Ticket {
    /// Rebuild a ticket record as supplied by a data source.
    pub fn new(
        id: TicketId,
        user_id: UserId,
        event_id: EventId,
        purchased_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            event_id,
            purchased_at,
        }
    }

    /// Issue a ticket for `event` to `user_id`.
    ///
    /// The event must be approved and not yet past.
    pub fn purchase(user_id: UserId, event: &Event, at: DateTime<Utc>) -> DomainResult<Self> {
        if !event.is_on_sale() {
            return Err(DomainError::invariant(format!(
                "event {} is not on sale (approval: {:?}, status: {:?})",
                event.id_typed(),
                event.approval(),
                event.status()
            )));
        }

        let ticket = Self::new(TicketId::new(), user_id, event.id_typed(), at);
        tracing::debug!(
            ticket_id = %ticket.id,
            event_id = %ticket.event_id,
            user_id = %user_id,
            "ticket issued"
        );
        Ok(ticket)
    }

    pub fn id_typed(&self) -> TicketId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use marquee_catalog::EventStatus;
    use marquee_core::Money;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 19, 30, 0).unwrap()
    }

    fn approved_event() -> Event {
        let mut event = Event::new(EventId::new(), "Open Air", Money::from_units(10)).unwrap();
        event.approve().unwrap();
        event
    }

    #[test]
    fn purchase_references_event_and_user() {
        let event = approved_event();
        let user_id = UserId::new();

        let ticket = Ticket::purchase(user_id, &event, test_time()).unwrap();
        assert_eq!(ticket.event_id(), event.id_typed());
        assert_eq!(ticket.user_id(), user_id);
        assert_eq!(ticket.purchased_at(), test_time());
    }

    #[test]
    fn cannot_buy_pending_event() {
        let event = Event::new(EventId::new(), "Open Air", Money::from_units(10)).unwrap();

        let err = Ticket::purchase(UserId::new(), &event, test_time()).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("not on sale") => {}
            _ => panic!("Expected InvariantViolation for pending event"),
        }
    }

    #[test]
    fn cannot_buy_past_event() {
        let event = approved_event().with_status(EventStatus::Past);
        assert!(Ticket::purchase(UserId::new(), &event, test_time()).is_err());
    }

    #[test]
    fn each_purchase_gets_its_own_id() {
        let event = approved_event();
        let user_id = UserId::new();
        let a = Ticket::purchase(user_id, &event, test_time()).unwrap();
        let b = Ticket::purchase(user_id, &event, test_time()).unwrap();
        assert_ne!(a.id_typed(), b.id_typed());
    }

    #[test]
    fn deserializes_snapshot_record() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000010",
            "user_id": "00000000-0000-0000-0000-000000000020",
            "event_id": "00000000-0000-0000-0000-000000000001",
            "purchased_at": "2024-01-02T19:30:00Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id_typed(), TicketId::from_u128(0x10));
        assert_eq!(ticket.event_id(), EventId::from_u128(1));
        assert_eq!(ticket.purchased_at(), test_time());
    }
}
