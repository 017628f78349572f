//! The task board controller.
//!
//! One [`TaskBoard`] owns the task list, the metadata table and the mode
//! flag. It routes every mutation either to the remote [`TaskApi`]
//! (connected) or to local state only (demo), and writes metadata and the
//! demo list through a [`KeyValueStore`].
//!
//! State lives in a `RefCell` so a single-threaded UI can share the board
//! behind an `Rc` and drive several operations at once. No borrow is held
//! across an `await`: each operation reads what it needs, awaits the
//! request, then applies the response.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::api::TaskApi;
use crate::filter::{self, BoardEntry, Filters};
use crate::stats::{self, Stats};
use crate::storage::{self, DEMO_TASKS_KEY, KeyValueStore, META_KEY};
use crate::task::{MetaTable, NewTask, Priority, Task, TaskId, TaskMeta};

/// Id the local counter continues from after seeding demo data.
pub const DEMO_NEXT_ID: TaskId = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Initial load has not resolved yet.
    #[default]
    Unknown,
    Connected,
    Demo,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Unknown => "unknown",
            Mode::Connected => "connected",
            Mode::Demo => "demo",
        }
    }

    pub fn is_demo(self) -> bool {
        self == Mode::Demo
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Nothing to do: blank title, unknown id, same value.
    Unchanged,
    /// The remote request failed. State is untouched and the error has
    /// already been logged.
    Failed(String),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardOptions {
    /// On a failed load, restore a stored demo list instead of seeding.
    pub resume_demo: bool,
}

/// The three example tasks shown when the API cannot be reached.
pub fn demo_seed() -> (Vec<Task>, MetaTable) {
    let mut review = Task::new(2, "Review pull requests");
    review.completed = true;

    let tasks = vec![
        Task::new(1, "Complete project documentation"),
        review,
        Task::new(3, "Prepare presentation slides"),
    ];
    let meta = [
        (1, TaskMeta::new(Priority::High, "Work")),
        (2, TaskMeta::new(Priority::Medium, "Development")),
        (3, TaskMeta::new(Priority::High, "Work")),
    ]
    .into_iter()
    .collect();

    (tasks, meta)
}

struct BoardState<S> {
    store: S,
    mode: Mode,
    tasks: Vec<Task>,
    meta: MetaTable,
    next_id: TaskId,
}

impl<S: KeyValueStore> BoardState<S> {
    fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn persist_meta(&mut self) {
        if let Err(err) = storage::save_json(&mut self.store, META_KEY, &self.meta) {
            warn!(error = %format!("{err:#}"), "failed persisting task metadata");
        }
    }

    fn persist_demo_tasks(&mut self) {
        if !self.mode.is_demo() {
            return;
        }
        if let Err(err) = storage::save_json(&mut self.store, DEMO_TASKS_KEY, &self.tasks) {
            warn!(error = %format!("{err:#}"), "failed persisting demo tasks");
        }
    }

    fn prepend(&mut self, task: Task, meta: TaskMeta) {
        self.meta.insert(task.id, meta);
        self.tasks.insert(0, task);
        self.persist_meta();
        self.persist_demo_tasks();
    }

    fn replace(&mut self, id: TaskId, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        *slot = task;
        self.persist_demo_tasks();
        true
    }

    fn remove(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
        if self.meta.remove(id).is_some() {
            self.persist_meta();
        }
        self.persist_demo_tasks();
    }
}

pub struct TaskBoard<A, S> {
    api: A,
    options: BoardOptions,
    state: RefCell<BoardState<S>>,
}

impl<A, S> TaskBoard<A, S>
where
    A: TaskApi,
    S: KeyValueStore,
{
    pub fn new(api: A, store: S) -> Self {
        Self::with_options(api, store, BoardOptions::default())
    }

    pub fn with_options(api: A, store: S, options: BoardOptions) -> Self {
        Self {
            api,
            options,
            state: RefCell::new(BoardState {
                store,
                mode: Mode::Unknown,
                tasks: Vec::new(),
                meta: MetaTable::new(),
                next_id: 1,
            }),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn meta(&self) -> MetaTable {
        self.state.borrow().meta.clone()
    }

    pub fn entry(&self, id: TaskId) -> Option<BoardEntry> {
        let state = self.state.borrow();
        state.find(id).map(|task| BoardEntry {
            task: task.clone(),
            meta: state.meta.join(id),
        })
    }

    pub fn view(&self, filters: &Filters) -> Vec<BoardEntry> {
        let state = self.state.borrow();
        filter::filter_tasks(&state.tasks, &state.meta, filters)
    }

    pub fn stats(&self) -> Stats {
        let state = self.state.borrow();
        stats::stats(&state.tasks, &state.meta)
    }

    pub fn categories(&self) -> Vec<String> {
        stats::categories(&self.state.borrow().meta)
    }

    /// Restores metadata, then fetches the task list once. Falls back to
    /// demo mode when the fetch fails. Later calls return the decided mode
    /// without contacting the API.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Mode {
        {
            let mut state = self.state.borrow_mut();
            if state.mode != Mode::Unknown {
                debug!(mode = %state.mode, "board already loaded");
                return state.mode;
            }
            let state = &mut *state;
            if let Some(meta) = storage::load_json::<MetaTable, _>(&state.store, META_KEY) {
                debug!(entries = meta.len(), "restored task metadata");
                state.meta = meta;
            }
        }

        let fetched = self.api.list().await;

        let mut state = self.state.borrow_mut();
        if state.mode != Mode::Unknown {
            debug!(mode = %state.mode, "concurrent load already decided the mode");
            return state.mode;
        }

        match fetched {
            Ok(tasks) => {
                info!(count = tasks.len(), "connected to task API");
                state.tasks = tasks;
                state.mode = Mode::Connected;
                if let Err(err) = state.store.remove(DEMO_TASKS_KEY) {
                    warn!(error = %format!("{err:#}"), "failed discarding stale demo tasks");
                }
            }
            Err(err) => {
                warn!(
                    error = %format!("{err:#}"),
                    "task API not available; switching to demo mode"
                );
                let resumed = if self.options.resume_demo {
                    storage::load_json::<Vec<Task>, _>(&state.store, DEMO_TASKS_KEY)
                } else {
                    None
                };

                match resumed {
                    Some(tasks) => {
                        info!(count = tasks.len(), "resumed stored demo tasks");
                        state.next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
                        state.tasks = tasks;
                    }
                    None => {
                        let (tasks, meta) = demo_seed();
                        state.tasks = tasks;
                        state.meta = meta;
                        state.next_id = DEMO_NEXT_ID;
                        state.persist_meta();
                    }
                }
                state.mode = Mode::Demo;
                state.persist_demo_tasks();
            }
        }

        state.mode
    }

    #[tracing::instrument(skip(self, title, category), fields(title_len = title.len()))]
    pub async fn add(&self, title: &str, priority: Priority, category: &str) -> Outcome {
        if title.trim().is_empty() {
            debug!("ignoring add with blank title");
            return Outcome::Unchanged;
        }
        let meta = TaskMeta::new(priority, category.trim());

        if self.mode().is_demo() {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.prepend(Task::new(id, title), meta);
            info!(id, "added demo task");
            return Outcome::Applied;
        }

        match self.api.create(&NewTask::titled(title)).await {
            Ok(task) => {
                let id = task.id;
                self.state.borrow_mut().prepend(task, meta);
                info!(id, "created task");
                Outcome::Applied
            }
            Err(err) => failed("create", None, err),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, id: TaskId) -> Outcome {
        let (mode, next) = {
            let state = self.state.borrow();
            (state.mode, state.find(id).map(Task::toggled))
        };
        let Some(next) = next else {
            debug!("toggle on unknown task");
            return Outcome::Unchanged;
        };

        if mode.is_demo() {
            self.state.borrow_mut().replace(id, next);
            return Outcome::Applied;
        }

        match self.api.update(&next).await {
            Ok(updated) => {
                if !self.state.borrow_mut().replace(id, updated) {
                    debug!("task vanished while the update was in flight");
                }
                Outcome::Applied
            }
            Err(err) => failed("update", Some(id), err),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> Outcome {
        let (mode, known) = {
            let state = self.state.borrow();
            (state.mode, state.find(id).is_some())
        };
        if !known {
            debug!("delete on unknown task");
            return Outcome::Unchanged;
        }

        if !mode.is_demo()
            && let Err(err) = self.api.delete(id).await
        {
            return failed("delete", Some(id), err);
        }

        self.state.borrow_mut().remove(id);
        info!("deleted task");
        Outcome::Applied
    }

    /// Local metadata change only; the server never sees priorities.
    #[tracing::instrument(skip(self))]
    pub fn set_priority(&self, id: TaskId, priority: Priority) -> Outcome {
        let mut state = self.state.borrow_mut();
        if state.find(id).is_none() {
            debug!("priority change on unknown task");
            return Outcome::Unchanged;
        }

        let mut meta = state.meta.join(id);
        if state.meta.contains(id) && meta.priority == priority {
            return Outcome::Unchanged;
        }
        meta.priority = priority;
        state.meta.insert(id, meta);
        state.persist_meta();
        Outcome::Applied
    }
}

fn failed(operation: &'static str, id: Option<TaskId>, err: anyhow::Error) -> Outcome {
    let message = format!("{err:#}");
    error!(operation, id = ?id, error = %message, "task API request failed; state unchanged");
    Outcome::Failed(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_has_meta_for_every_task() {
        let (tasks, meta) = demo_seed();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(tasks.iter().all(|t| meta.contains(t.id)));
        assert!(tasks.iter().all(|t| t.id < DEMO_NEXT_ID));
        assert_eq!(tasks.iter().filter(|t| t.completed).count(), 1);
    }
}
