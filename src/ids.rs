// Task id generation

use uuid::Uuid;

/// Source of fresh task ids
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// UUIDv7 ids: a millisecond timestamp followed by random bits
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Predictable ids (`<prefix>-1`, `<prefix>-2`, ...)
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
