use std::sync::Arc;

use crate::error::PersistenceError;
use crate::models::Task;
use crate::storage::KeyValueStore;

pub const TASKS_KEY: &str = "tasks";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Maps the task list and the dark-mode flag onto two keys of a [`KeyValueStore`].
///
/// Cloning is cheap and every clone writes to the same store, so the task and preference
/// stores can each hold one.
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, tasks: &[Task], dark_mode: bool) -> Result<(), PersistenceError> {
        self.save_tasks(tasks)?;
        self.save_preference(dark_mode)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let json =
            serde_json::to_string(tasks).map_err(|err| PersistenceError::new(TASKS_KEY, err))?;
        self.store.set(TASKS_KEY, &json).map_err(|err| {
            log::error!("saving tasks failed count={} err={err}", tasks.len());
            PersistenceError::new(TASKS_KEY, err)
        })
    }

    pub fn save_preference(&self, dark_mode: bool) -> Result<(), PersistenceError> {
        let value = if dark_mode { "true" } else { "false" };
        self.store.set(DARK_MODE_KEY, value).map_err(|err| {
            log::error!("saving dark mode failed value={value} err={err}");
            PersistenceError::new(DARK_MODE_KEY, err)
        })
    }

    /// Absent or corrupt data loads as an empty list. A failed read is an error, so a
    /// caller never starts empty on top of tasks it merely could not read.
    pub fn load_tasks(&self) -> Result<Vec<Task>, PersistenceError> {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => {
                log::error!("reading tasks failed: {err}");
                return Err(PersistenceError::new(TASKS_KEY, err));
            }
        };
        match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
            Ok(tasks) => Ok(tasks.unwrap_or_default()),
            Err(err) => {
                log::warn!("stored tasks are corrupt, starting empty: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Only the literal `"true"` turns dark mode on.
    pub fn load_preference(&self) -> bool {
        match self.store.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => {
                if raw != "true" && raw != "false" {
                    log::warn!("unexpected dark mode value {raw:?}, using false");
                }
                raw == "true"
            }
            Ok(None) => false,
            Err(err) => {
                log::warn!("reading dark mode failed, using false: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskFields;
    use crate::storage::{FileStore, MemoryStore};

    fn make_task(text: &str, completed: bool) -> Task {
        let mut task = Task::new(TaskFields::new(text, Some("2024-05-01"), "medium", "Home"))
            .expect("valid task");
        task.completed = completed;
        task
    }

    #[test]
    fn empty_store_loads_defaults() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        assert!(gateway.load_tasks().unwrap().is_empty());
        assert!(!gateway.load_preference());
    }

    #[test]
    fn save_then_load_on_fresh_store_instance_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![make_task("a", false), make_task("b", true)];

        let gateway = PersistenceGateway::new(FileStore::new(dir.path().to_path_buf()));
        gateway.save(&tasks, true).unwrap();

        let fresh = PersistenceGateway::new(FileStore::new(dir.path().to_path_buf()));
        assert_eq!(fresh.load_tasks().unwrap(), tasks);
        assert!(fresh.load_preference());

        gateway.save(&[], false).unwrap();
        let fresh = PersistenceGateway::new(FileStore::new(dir.path().to_path_buf()));
        assert!(fresh.load_tasks().unwrap().is_empty());
        assert!(!fresh.load_preference());
    }

    #[test]
    fn stored_layout_matches_the_two_keys() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let gateway = PersistenceGateway::from_shared(store.clone());
        gateway.save(&[make_task("a", true)], true).unwrap();

        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        let raw = store.get(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
              "text": "a",
              "due": "2024-05-01",
              "priority": "medium",
              "category": "Home",
              "completed": true
            }])
        );
    }

    #[test]
    fn corrupt_or_null_tasks_load_as_empty() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let gateway = PersistenceGateway::from_shared(store.clone());

        for raw in ["not json", "{\"text\":\"x\"}", "[{\"due\":\"\"}]", "null", ""] {
            store.set(TASKS_KEY, raw).unwrap();
            assert!(gateway.load_tasks().unwrap().is_empty(), "raw={raw:?}");
        }
    }

    #[test]
    fn unreadable_tasks_are_an_error_and_leave_the_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        let gateway = PersistenceGateway::new(FileStore::new(dir.path().to_path_buf()));
        gateway.save_tasks(&[make_task("a", false)]).unwrap();
        let saved = std::fs::read(store.path_for(TASKS_KEY)).unwrap();

        // Park the data and put a directory in its place so the read fails.
        let path = store.path_for(TASKS_KEY);
        let parked = dir.path().join("parked.json");
        std::fs::rename(&path, &parked).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = gateway.load_tasks().unwrap_err();
        assert_eq!(err.key, TASKS_KEY);
        assert!(matches!(err.source, crate::error::PersistenceErrorKind::Storage(_)));

        std::fs::remove_dir(&path).unwrap();
        std::fs::rename(&parked, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), saved);
        assert_eq!(gateway.load_tasks().unwrap(), vec![make_task("a", false)]);
    }

    #[test]
    fn dark_mode_reads_true_only_for_the_literal() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let gateway = PersistenceGateway::from_shared(store.clone());

        for (raw, expected) in [
            ("true", true),
            ("false", false),
            ("TRUE", false),
            ("1", false),
            ("", false),
        ] {
            store.set(DARK_MODE_KEY, raw).unwrap();
            assert_eq!(gateway.load_preference(), expected, "raw={raw:?}");
        }
    }

    #[test]
    fn write_failures_surface_as_persistence_errors() {
        let gateway = PersistenceGateway::new(MemoryStore::with_quota(10));
        let err = gateway.save_tasks(&[make_task("too long", false)]).unwrap_err();
        assert_eq!(err.key, TASKS_KEY);

        // "darkMode" + "false" fits in 13 bytes but not in 10.
        let err = gateway.save_preference(false).unwrap_err();
        assert_eq!(err.key, DARK_MODE_KEY);

        // An empty list fits, so `save` gets as far as the preference key.
        let err = gateway.save(&[], false).unwrap_err();
        assert_eq!(err.key, DARK_MODE_KEY);
    }
}
