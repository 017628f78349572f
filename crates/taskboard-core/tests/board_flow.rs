use std::cell::{Cell, RefCell};

use anyhow::bail;
use taskboard_core::board::DEMO_NEXT_ID;
use taskboard_core::storage::{DEMO_TASKS_KEY, META_KEY};
use taskboard_core::{
    BoardOptions, Filters, KeyValueStore, MemoryStore, MetaTable, Mode, NewTask, Outcome,
    Priority, StatusFilter, Task, TaskApi, TaskBoard, TaskId, TaskMeta,
};

/// In-process stand-in for the REST API.
#[derive(Default)]
struct FakeApi {
    offline: Cell<bool>,
    fail_writes: Cell<bool>,
    records: RefCell<Vec<Task>>,
    next_id: Cell<TaskId>,
    calls: RefCell<Vec<String>>,
}

impl FakeApi {
    fn online(records: Vec<Task>) -> Self {
        let next_id = records.iter().map(|t| t.id).max().unwrap_or(0) + 100;
        let api = Self::default();
        *api.records.borrow_mut() = records;
        api.next_id.set(next_id);
        api
    }

    fn offline() -> Self {
        let api = Self::default();
        api.offline.set(true);
        api
    }

    fn record(&self, call: &str) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(call.to_string());
        if self.offline.get() {
            bail!("connection refused");
        }
        Ok(())
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TaskApi for FakeApi {
    async fn list(&self) -> anyhow::Result<Vec<Task>> {
        self.record("list")?;
        Ok(self.records.borrow().clone())
    }

    async fn create(&self, draft: &NewTask) -> anyhow::Result<Task> {
        self.record("create")?;
        if self.fail_writes.get() {
            bail!("HTTP 500");
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut task = Task::new(id, draft.title.clone());
        task.completed = draft.completed;
        self.records.borrow_mut().push(task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> anyhow::Result<Task> {
        self.record("update")?;
        if self.fail_writes.get() {
            bail!("HTTP 500");
        }
        // The server stamps records it touches.
        let mut stored = task.clone();
        stored
            .extra
            .insert("updated_at".to_string(), serde_json::json!("2026-10-16"));
        Ok(stored)
    }

    async fn delete(&self, id: TaskId) -> anyhow::Result<()> {
        self.record("delete")?;
        if self.fail_writes.get() {
            bail!("HTTP 404");
        }
        self.records.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

fn server_tasks() -> Vec<Task> {
    let mut shipped = Task::new(11, "Ship report");
    shipped.completed = true;
    vec![Task::new(10, "Buy milk"), shipped]
}

#[tokio::test]
async fn offline_load_seeds_demo_tasks() {
    let api = FakeApi::offline();
    let store = MemoryStore::new();
    let board = TaskBoard::new(&api, store.clone());

    assert_eq!(board.mode(), Mode::Unknown);
    assert_eq!(board.load().await, Mode::Demo);

    let tasks = board.tasks();
    assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(tasks[0].title, "Complete project documentation");
    assert!(tasks[1].completed);

    let meta = board.meta();
    assert_eq!(meta.join(1), TaskMeta::new(Priority::High, "Work"));
    assert_eq!(meta.join(2), TaskMeta::new(Priority::Medium, "Development"));
    assert_eq!(meta.join(3), TaskMeta::new(Priority::High, "Work"));

    assert!(store.get(DEMO_TASKS_KEY).unwrap().is_some());
    assert!(store.get(META_KEY).unwrap().is_some());
}

#[tokio::test]
async fn load_is_one_shot() {
    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, MemoryStore::new());

    board.load().await;
    api.offline.set(false);
    assert_eq!(board.load().await, Mode::Demo);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn demo_add_prepends_with_local_ids() {
    let api = FakeApi::offline();
    let store = MemoryStore::new();
    let board = TaskBoard::new(&api, store.clone());
    board.load().await;

    let outcome = board.add("Water plants", Priority::Low, "Home").await;
    assert_eq!(outcome, Outcome::Applied);
    board.add("Call bank", Priority::High, "").await;

    let tasks = board.tasks();
    assert_eq!(tasks.len(), 5);
    assert_eq!(tasks[0].id, DEMO_NEXT_ID + 1);
    assert_eq!(tasks[1].id, DEMO_NEXT_ID);
    assert_eq!(tasks[1].title, "Water plants");
    assert!(!tasks[1].completed);
    assert_eq!(board.meta().join(DEMO_NEXT_ID), TaskMeta::new(Priority::Low, "Home"));

    // Only the initial list call reached the API.
    assert_eq!(api.call_count(), 1);

    let stored: Vec<Task> =
        serde_json::from_str(&store.get(DEMO_TASKS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored, tasks);
}

#[tokio::test]
async fn blank_titles_are_ignored() {
    let api = FakeApi::online(vec![]);
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    for title in ["", "   ", "\t\n"] {
        assert_eq!(board.add(title, Priority::High, "x").await, Outcome::Unchanged);
    }
    assert!(board.tasks().is_empty());
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn toggling_twice_restores_completion() {
    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    let before = board.entry(1).unwrap().task.completed;
    board.toggle(1).await;
    assert_ne!(board.entry(1).unwrap().task.completed, before);
    board.toggle(1).await;
    assert_eq!(board.entry(1).unwrap().task.completed, before);

    assert_eq!(board.toggle(999).await, Outcome::Unchanged);
}

#[tokio::test]
async fn demo_delete_drops_task_and_meta() {
    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    assert_eq!(board.delete(3).await, Outcome::Applied);

    assert!(board.entry(3).is_none());
    assert!(!board.meta().contains(3));
    assert!(board.view(&Filters::default()).iter().all(|e| e.task.id != 3));
    let stats = board.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.high_priority, 1);

    assert_eq!(board.delete(3).await, Outcome::Unchanged);
}

#[tokio::test]
async fn connected_load_adopts_server_list_and_drops_demo_list() {
    let api = FakeApi::online(server_tasks());
    let mut store = MemoryStore::new();
    store.set(DEMO_TASKS_KEY, "[]").unwrap();

    let board = TaskBoard::new(&api, store.clone());
    assert_eq!(board.load().await, Mode::Connected);
    assert_eq!(board.tasks(), server_tasks());
    assert_eq!(store.get(DEMO_TASKS_KEY).unwrap(), None);
}

#[tokio::test]
async fn metadata_survives_sessions() {
    let api = FakeApi::online(server_tasks());
    let store = MemoryStore::new();

    {
        let board = TaskBoard::new(&api, store.clone());
        board.load().await;
        board.set_priority(10, Priority::High);
    }

    let board = TaskBoard::new(&api, store);
    board.load().await;
    assert_eq!(board.meta().join(10).priority, Priority::High);
    assert_eq!(board.stats().high_priority, 1);
}

#[tokio::test]
async fn connected_add_uses_server_id() {
    let api = FakeApi::online(server_tasks());
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    assert_eq!(board.add("Book flights", Priority::High, "Travel").await, Outcome::Applied);

    let first = &board.tasks()[0];
    assert_eq!(first.id, 111);
    assert_eq!(first.title, "Book flights");
    assert!(!first.completed);
    assert_eq!(board.meta().join(111), TaskMeta::new(Priority::High, "Travel"));
    assert_eq!(board.categories(), ["Travel"]);
}

#[tokio::test]
async fn connected_failures_leave_state_unchanged() {
    let api = FakeApi::online(server_tasks());
    let store = MemoryStore::new();
    let board = TaskBoard::new(&api, store.clone());
    board.load().await;
    board.set_priority(10, Priority::Low);
    let tasks_before = board.tasks();
    let meta_before = board.meta();

    api.fail_writes.set(true);

    assert!(matches!(board.add("Lost", Priority::High, "x").await, Outcome::Failed(_)));
    assert!(matches!(board.toggle(10).await, Outcome::Failed(_)));
    let Outcome::Failed(message) = board.delete(11).await else {
        panic!("delete should fail");
    };
    assert!(message.contains("404"));

    assert_eq!(board.tasks(), tasks_before);
    assert_eq!(board.meta(), meta_before);
    assert_eq!(board.mode(), Mode::Connected);
    assert_eq!(store.get(DEMO_TASKS_KEY).unwrap(), None);
}

#[tokio::test]
async fn connected_toggle_adopts_server_record() {
    let api = FakeApi::online(server_tasks());
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    assert_eq!(board.toggle(10).await, Outcome::Applied);

    let task = board.entry(10).unwrap().task;
    assert!(task.completed);
    assert_eq!(task.extra.get("updated_at"), Some(&serde_json::json!("2026-10-16")));
}

#[tokio::test]
async fn connected_delete_removes_after_success() {
    let api = FakeApi::online(server_tasks());
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;
    board.set_priority(11, Priority::High);

    assert_eq!(board.delete(11).await, Outcome::Applied);
    assert!(board.entry(11).is_none());
    assert!(!board.meta().contains(11));
    assert!(api.records.borrow().iter().all(|t| t.id != 11));
}

#[tokio::test]
async fn priority_change_is_local_and_keeps_category() {
    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;
    let calls = api.call_count();

    assert_eq!(board.set_priority(2, Priority::Low), Outcome::Applied);
    assert_eq!(board.meta().join(2), TaskMeta::new(Priority::Low, "Development"));
    assert_eq!(board.set_priority(2, Priority::Low), Outcome::Unchanged);
    assert_eq!(board.set_priority(42, Priority::High), Outcome::Unchanged);
    assert!(!board.meta().contains(42));
    assert_eq!(api.call_count(), calls);
}

#[tokio::test]
async fn resume_restores_stored_demo_list() {
    let mut store = MemoryStore::new();
    let mut stored = vec![Task::new(7, "Kept offline"), Task::new(2, "Older")];
    stored[1].completed = true;
    store
        .set(DEMO_TASKS_KEY, &serde_json::to_string(&stored).unwrap())
        .unwrap();
    let meta: MetaTable = [(7, TaskMeta::new(Priority::Low, "Garden"))].into_iter().collect();
    store.set(META_KEY, &serde_json::to_string(&meta).unwrap()).unwrap();

    let api = FakeApi::offline();
    let board = TaskBoard::with_options(&api, store, BoardOptions { resume_demo: true });
    assert_eq!(board.load().await, Mode::Demo);
    assert_eq!(board.tasks(), stored);
    assert_eq!(board.meta(), meta);

    board.add("Next", Priority::Medium, "").await;
    assert_eq!(board.tasks()[0].id, 8);
}

#[tokio::test]
async fn without_resume_failed_load_reseeds() {
    let mut store = MemoryStore::new();
    store
        .set(DEMO_TASKS_KEY, &serde_json::to_string(&[Task::new(9, "old")]).unwrap())
        .unwrap();

    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, store);
    board.load().await;
    assert_eq!(board.tasks().len(), 3);
    assert!(board.entry(9).is_none());
}

#[tokio::test]
async fn view_applies_filters_over_board_state() {
    let api = FakeApi::offline();
    let board = TaskBoard::new(&api, MemoryStore::new());
    board.load().await;

    let completed = board.view(&Filters {
        status: StatusFilter::Completed,
        ..Filters::default()
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].task.id, 2);

    let work = board.view(&Filters {
        search: "WORK".to_string(),
        ..Filters::default()
    });
    assert_eq!(work.iter().map(|e| e.task.id).collect::<Vec<_>>(), [1, 3]);
}
