//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&mut SqliteConnection` as the first argument, so every method can
//! run inside a caller-owned transaction. The service layer owns the
//! transaction boundary.

pub mod balance_repo;
pub mod ledger_repo;
pub mod member_repo;
pub mod notification_pref_repo;
pub mod notification_repo;
pub mod offer_repo;
pub mod report_repo;
pub mod request_repo;
pub mod role_repo;
pub mod session_repo;

pub use balance_repo::BalanceRepo;
pub use ledger_repo::LedgerRepo;
pub use member_repo::MemberRepo;
pub use notification_pref_repo::NotificationPrefRepo;
pub use notification_repo::NotificationRepo;
pub use offer_repo::OfferRepo;
pub use report_repo::ReportRepo;
pub use request_repo::RequestRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
