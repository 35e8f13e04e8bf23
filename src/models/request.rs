use crate::models::CheckId;
use chrono::{DateTime, Utc};

/// One submitted text. Lives for the duration of a single check.
#[derive(Clone, Debug)]
pub struct CheckRequest {
    pub id: CheckId,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl CheckRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: CheckId::new(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}
