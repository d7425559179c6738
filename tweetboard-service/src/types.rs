use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A tweet as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tweet {
    pub id: String,
    pub author: String,
    pub message: String,
    /// Naive UTC timestamp, e.g. `2024-05-01T12:30:00.123456`.
    pub created_at: NaiveDateTime,
    pub likes: u8,
}

/// Body of `POST /api/tweets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TweetRequest {
    pub author: String,
    pub message: String,
}
