// Task record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated entry in the task list
///
/// All three fields are fixed at creation; there is no edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
        }
    }

    /// True when both title and date carry a value
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.date.is_empty()
    }
}

/// Strict `YYYY-MM-DD` check: zero-padded fields and a real calendar date
pub fn is_ymd(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    digits_ok && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}
