use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{PersistenceError, SessionError};
use crate::models::Task;
use crate::persistence::PersistenceGateway;
use crate::preference::PreferenceStore;
use crate::storage::FileStore;
use crate::task_store::TaskStore;

/// Everything the presentation layer needs to redraw after a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub tasks: Vec<Task>,
    pub dark_mode: bool,
}

/// The task list and display preference of one session, sharing one gateway.
pub struct Session {
    tasks: TaskStore,
    preference: PreferenceStore,
    gateway: PersistenceGateway,
}

impl Session {
    /// Rehydrates both stores from whatever the gateway has persisted.
    pub fn open(gateway: PersistenceGateway) -> Result<Self, PersistenceError> {
        let tasks = TaskStore::load(gateway.clone())?;
        let preference = PreferenceStore::load(gateway.clone());
        log::info!(
            "session opened tasks={} dark_mode={}",
            tasks.len(),
            preference.get()
        );
        Ok(Self {
            tasks,
            preference,
            gateway,
        })
    }

    /// Opens a session backed by files in the configured data directory.
    pub fn open_in(config: &AppConfig) -> Result<Self, SessionError> {
        let store = FileStore::new(config.data_dir().to_path_buf());
        store.ensure_dirs()?;
        Ok(Self::open(PersistenceGateway::new(store))?)
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore {
        &mut self.tasks
    }

    pub fn preference(&self) -> &PreferenceStore {
        &self.preference
    }

    pub fn preference_mut(&mut self) -> &mut PreferenceStore {
        &mut self.preference
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            tasks: self.tasks.list().to_vec(),
            dark_mode: self.preference.get(),
        }
    }

    /// Rewrites both keys from the in-memory state.
    pub fn save_all(&self) -> Result<(), PersistenceError> {
        self.gateway.save(self.tasks.list(), self.preference.get())
    }
}
