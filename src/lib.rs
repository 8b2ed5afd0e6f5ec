//! State-management core of a to-do list: an ordered task list and a dark-mode flag,
//! each written through to a durable key-value store on every change.
//!
//! A presentation layer opens a [`Session`], calls the [`TaskStore`] and
//! [`PreferenceStore`] operations in response to user actions, and re-reads
//! [`Session::snapshot`] to redraw.
mod config;
mod error;
mod logging;
mod models;
mod persistence;
mod preference;
mod state;
mod storage;
mod task_store;

pub use config::{AppConfig, ENV_DATA_DIR};
pub use error::{
    IndexOutOfRange, PersistenceError, PersistenceErrorKind, SessionError, StorageError,
    TaskError, ValidationError,
};
#[cfg(feature = "logging")]
pub use logging::init_logging;
pub use logging::{log_spec, ENV_LOG_SPEC, LOG_DIR_NAME};
pub use models::{Task, TaskFields};
pub use persistence::{PersistenceGateway, DARK_MODE_KEY, TASKS_KEY};
pub use preference::PreferenceStore;
pub use state::{Session, StateSnapshot};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use task_store::{TaskIndex, TaskStore};
