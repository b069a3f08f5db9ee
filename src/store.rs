// Task store: in-memory collection with best-effort persistence

use crate::codec;
use crate::ids::{IdGenerator, UuidV7Ids};
use crate::storage::KeyValueStorage;
use crate::task::Task;
use eyre::Result;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage slot holding the serialized collection
pub const STORAGE_KEY: &str = "todo_items_v1";

/// Rejected input to [`TaskStore::add`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task title is empty")]
    MissingTitle,

    #[error("task date is empty")]
    MissingDate,
}

/// Owns the task collection and mirrors it to a storage slot
///
/// The in-memory collection is authoritative for the session. Every mutation
/// writes the full collection back; a failed write is logged and remembered
/// (see [`TaskStore::persistence_warning`]) but never fails the mutation.
pub struct TaskStore {
    storage: Box<dyn KeyValueStorage>,
    ids: Box<dyn IdGenerator>,
    // Newest insertion first
    tasks: Vec<Task>,
    persistence_warning: Option<String>,
}

impl TaskStore {
    /// Create an empty store over the given storage. Call [`TaskStore::load`] to read it.
    pub fn new(storage: Box<dyn KeyValueStorage>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            storage,
            ids,
            tasks: Vec::new(),
            persistence_warning: None,
        }
    }

    /// Create a store with UUIDv7 ids and load it
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let mut store = Self::new(storage, Box::new(UuidV7Ids));
        store.load();
        store
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Replace the in-memory collection with what storage holds
    ///
    /// Absent, unreadable, or malformed data yields an empty collection.
    pub fn load(&mut self) {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored task collection, starting empty");
                self.tasks = Vec::new();
                return;
            }
            Err(e) => {
                warn!(error = ?e, "Storage unavailable on load, starting empty");
                self.tasks = Vec::new();
                return;
            }
        };

        let mut tasks = codec::decode_tasks(&raw);
        let mut live: HashSet<String> = tasks.iter().map(|t| t.id.clone()).filter(|id| !id.is_empty()).collect();
        let mut assigned = 0usize;

        for task in tasks.iter_mut().filter(|t| t.id.is_empty()) {
            task.id = Self::fresh_id(self.ids.as_mut(), &live);
            live.insert(task.id.clone());
            assigned += 1;
        }

        info!(count = tasks.len(), assigned, "Loaded task collection");
        self.tasks = tasks;

        // Ids handed out here must survive the next load
        if assigned > 0 {
            self.persist_best_effort();
        }
    }

    /// Add a task at the front of the collection and persist
    ///
    /// The title is checked before the date. The title is stored trimmed, the
    /// date exactly as given.
    pub fn add(&mut self, title: &str, date: &str) -> Result<Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }

        let live: HashSet<String> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let id = Self::fresh_id(self.ids.as_mut(), &live);
        let task = Task::new(id, title, date);

        self.tasks.insert(0, task.clone());
        debug!(id = task.id.as_str(), date = task.date.as_str(), "Added task");
        self.persist_best_effort();

        Ok(task)
    }

    /// Remove the task with this id, if any, and persist
    ///
    /// Returns whether a task was removed. The collection is written either way.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;

        debug!(id, removed, "Remove task");
        self.persist_best_effort();

        removed
    }

    /// Copy of the collection, newest insertion first
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Message from the most recent failed write, cleared by the next successful one
    pub fn persistence_warning(&self) -> Option<&str> {
        self.persistence_warning.as_deref()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the full collection to storage
    pub fn persist(&mut self) -> Result<()> {
        let raw = codec::encode_tasks(&self.tasks)?;
        self.storage.set(STORAGE_KEY, &raw)?;
        Ok(())
    }

    // Mutations never fail on storage errors; the session keeps running on memory.
    fn persist_best_effort(&mut self) {
        match self.persist() {
            Ok(()) => self.persistence_warning = None,
            Err(e) => {
                warn!(error = ?e, count = self.tasks.len(), "Failed to persist task collection, continuing in memory");
                self.persistence_warning = Some(format!("{:#}", e));
            }
        }
    }

    fn fresh_id(ids: &mut dyn IdGenerator, live: &HashSet<String>) -> String {
        loop {
            let id = ids.next_id();
            if !live.contains(&id) {
                return id;
            }
            debug!(id = id.as_str(), "Generated id collides with a live task, drawing again");
        }
    }
}
