//! Tickets domain module.
//!
//! A ticket is one user's purchased admission to one catalog event. Records are
//! immutable once issued; payment is handled elsewhere.

pub mod ticket;

pub use ticket::Ticket;
