//! Event catalog domain module.
//!
//! Live performances and movies offered on the marketplace, with their
//! schedule status and admin approval state. Pure domain logic (no IO).

pub mod event;

pub use event::{ApprovalStatus, Event, EventKind, EventStatus};
