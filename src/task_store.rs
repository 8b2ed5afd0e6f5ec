use crate::error::{IndexOutOfRange, PersistenceError, TaskError};
use crate::models::{Task, TaskFields};
use crate::persistence::PersistenceGateway;

/// Index of a task in the list at the time of the call.
///
/// Deleting shifts every later task down by one, so indices must be re-read from
/// [`TaskStore::list`] after each mutation.
pub type TaskIndex = usize;

/// The ordered task list of a session.
///
/// Every mutation is written through to the gateway before it returns. If that write
/// fails, the in-memory change is undone and the [`PersistenceError`] is returned, so
/// the list always matches the last successful write.
pub struct TaskStore {
    tasks: Vec<Task>,
    gateway: PersistenceGateway,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>, gateway: PersistenceGateway) -> Self {
        Self { tasks, gateway }
    }

    /// Rehydrates the list persisted by a previous session. Fails rather than starting
    /// empty when the stored list cannot be read, since the next write would replace it.
    pub fn load(gateway: PersistenceGateway) -> Result<Self, PersistenceError> {
        let tasks = gateway.load_tasks()?;
        log::info!("task list loaded count={}", tasks.len());
        Ok(Self::new(tasks, gateway))
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: TaskIndex) -> Result<&Task, IndexOutOfRange> {
        let len = self.tasks.len();
        self.tasks.get(index).ok_or(IndexOutOfRange { index, len })
    }

    /// Appends a new incomplete task and returns its index.
    pub fn create(&mut self, fields: TaskFields<'_>) -> Result<TaskIndex, TaskError> {
        let task = Task::new(fields)?;
        let index = self.tasks.len();
        self.tasks.push(task);
        if let Err(error) = self.persist() {
            self.tasks.pop();
            return Err(error.into());
        }
        log::debug!("task created index={index} count={}", self.tasks.len());
        Ok(index)
    }

    /// Replaces text, due date, priority and category. The completed flag is kept.
    pub fn update(&mut self, index: TaskIndex, fields: TaskFields<'_>) -> Result<(), TaskError> {
        let task = self.task_mut(index)?;
        let previous = task.clone();
        task.apply(fields)?;
        if let Err(error) = self.persist() {
            self.tasks[index] = previous;
            return Err(error.into());
        }
        log::debug!("task updated index={index}");
        Ok(())
    }

    /// Flips the completed flag and returns the new value.
    pub fn toggle_complete(&mut self, index: TaskIndex) -> Result<bool, TaskError> {
        let task = self.task_mut(index)?;
        task.completed = !task.completed;
        let completed = task.completed;
        if let Err(error) = self.persist() {
            self.tasks[index].completed = !completed;
            return Err(error.into());
        }
        log::debug!("task toggled index={index} completed={completed}");
        Ok(completed)
    }

    /// Removes the task at `index` unconditionally; confirming is up to the caller.
    pub fn delete(&mut self, index: TaskIndex) -> Result<Task, TaskError> {
        self.get(index)?;
        let task = self.tasks.remove(index);
        if let Err(error) = self.persist() {
            self.tasks.insert(index, task);
            return Err(error.into());
        }
        log::debug!("task deleted index={index} count={}", self.tasks.len());
        Ok(task)
    }

    fn task_mut(&mut self, index: TaskIndex) -> Result<&mut Task, IndexOutOfRange> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or(IndexOutOfRange { index, len })
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        self.gateway.save_tasks(&self.tasks)
    }
}
