// TodoStore - Dated task list with view selection and best-effort persistence

pub mod app;
pub mod clock;
pub mod codec;
pub mod config;
pub mod ids;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use app::TodoApp;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Backend, Config};
pub use ids::{IdGenerator, SequentialIds, UuidV7Ids};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, SqliteStorage};
pub use store::{STORAGE_KEY, TaskStore, ValidationError};
pub use task::{Task, is_ymd};
pub use view::{ViewMode, ViewSelector, derive};
