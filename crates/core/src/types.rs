/// Row ids and group-configuration ids are SQLite INTEGERs.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
