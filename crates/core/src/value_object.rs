//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity**. Two value objects
//! with the same values are considered equal (`Money`, date ranges, report rows).

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Money::from_cents(100)` equals any other 100 cents)
/// - **Entity**: has identity (two tickets with the same `TicketId` are the same ticket)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
