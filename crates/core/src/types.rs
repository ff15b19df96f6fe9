/// Reference-table primary keys (metals, purities, tones, diamond attributes).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
