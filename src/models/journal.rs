use serde::{Deserialize, Serialize};

/// A free-form journal entry. Not part of any aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub title: String,
    pub content: String,
    pub date: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalInput {
    pub account_id: String,
    pub title: String,
    pub content: String,
    pub date: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJournalInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<i64>,
}
