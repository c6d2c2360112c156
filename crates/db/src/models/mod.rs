//! Row models and plain data-transfer structs, one module per entity.

pub mod ledger;
pub mod member;
pub mod notification;
pub mod offer;
pub mod report;
pub mod request;
pub mod session;
