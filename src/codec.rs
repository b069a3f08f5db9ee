// Serialized task collection (the value stored under the storage slot)

use crate::task::Task;
use eyre::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Serialize the whole collection as a JSON array
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize task collection")
}

/// Parse a stored collection, dropping anything unusable
///
/// Never fails: malformed JSON or a non-array value decode to an empty list,
/// and individual records without a non-empty `title` and `date` are skipped.
/// A record with no usable id comes back with an empty `id`; the store assigns one.
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = ?e, "Stored task collection is not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let Value::Array(items) = value else {
        warn!("Stored task collection is not an array, starting empty");
        return Vec::new();
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut tasks = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let task = Task::new(str_field(item, "id"), str_field(item, "title"), str_field(item, "date"));
        if !task.is_complete() {
            warn!(index, "Skipping stored record without title/date");
            continue;
        }

        if !task.id.is_empty() && !seen.insert(task.id.clone()) {
            warn!(index, id = task.id.as_str(), "Skipping stored record with duplicate id");
            continue;
        }

        tasks.push(task);
    }

    debug!(total = items.len(), kept = tasks.len(), "Decoded stored task collection");
    tasks
}

// Non-string values count as missing
fn str_field<'a>(item: &'a Value, field: &str) -> &'a str {
    item.get(field).and_then(Value::as_str).unwrap_or_default()
}
