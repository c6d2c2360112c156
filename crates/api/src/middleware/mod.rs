//! Request middleware: authentication extractors, role gates, rate limiting.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
