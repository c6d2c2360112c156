/// All primary keys are UUID text (hyphenated, lowercase).
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id (UUIDv7, so ids sort roughly by creation time).
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7().to_string()
}
