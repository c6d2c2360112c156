//! Domain types and pure logic for the time bank.
//!
//! Everything here is storage-agnostic: id and timestamp aliases, the shared
//! error type, the hour-settlement policy, the typed notification event
//! union, role constants, and the injectable rate limiter consumed by the
//! request layer.

pub mod error;
pub mod events;
pub mod ledger;
pub mod rate_limit;
pub mod roles;
pub mod types;
