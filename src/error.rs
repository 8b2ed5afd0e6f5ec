use thiserror::Error;

/// Input rejected before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task text must not be empty")]
    EmptyText,
}

/// An index that does not address a task in the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task index {index} out of range (list has {len} tasks)")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("quota exceeded writing '{key}': needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}

#[derive(Debug, Error)]
pub enum PersistenceErrorKind {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable read or write that did not happen.
#[derive(Debug, Error)]
#[error("storage failure on '{key}': {source}")]
pub struct PersistenceError {
    pub key: &'static str,
    #[source]
    pub source: PersistenceErrorKind,
}

impl PersistenceError {
    pub fn new(key: &'static str, source: impl Into<PersistenceErrorKind>) -> Self {
        Self {
            key,
            source: source.into(),
        }
    }
}

/// Everything a [`crate::TaskStore`] operation can fail with.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Why a session could not be opened.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot prepare data directory: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
