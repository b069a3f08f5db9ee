// Composed application state handed to the presentation layer

use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::storage::KeyValueStorage;
use crate::store::{TaskStore, ValidationError};
use crate::task::Task;
use crate::view::{ViewMode, ViewSelector};
use tracing::debug;

/// Task store, view selector and date source for one session
pub struct TodoApp {
    store: TaskStore,
    selector: ViewSelector,
    clock: Box<dyn Clock>,
}

impl TodoApp {
    /// Build the session state and load the stored collection
    pub fn open(storage: Box<dyn KeyValueStorage>, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        let mut store = TaskStore::new(storage, ids);
        store.load();
        Self {
            store,
            selector: ViewSelector::new(),
            clock,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn add(&mut self, title: &str, date: &str) -> Result<Task, ValidationError> {
        self.store.add(title, date)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.store.snapshot()
    }

    pub fn mode(&self) -> &ViewMode {
        self.selector.mode()
    }

    pub fn select_view(&mut self, mode: impl Into<ViewMode>) {
        self.selector.select_mode(mode);
        debug!(mode = %self.selector.mode(), "Selected view");
    }

    pub fn clear_view(&mut self) {
        self.selector.clear();
    }

    pub fn today(&self) -> String {
        self.clock.today()
    }

    /// Tasks for the current view, computed against today's date
    pub fn visible(&self) -> Vec<Task> {
        let today = self.clock.today();
        self.selector.derive(&self.store.snapshot(), &today)
    }
}
