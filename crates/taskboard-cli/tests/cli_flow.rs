use anyhow::bail;
use taskboard_cli::cli::Command;
use taskboard_cli::commands::dispatch;
use taskboard_cli::datastore::FileStore;
use taskboard_cli::render::Renderer;
use taskboard_core::storage::{DEMO_TASKS_KEY, META_KEY};
use taskboard_core::{
    BoardOptions, KeyValueStore, NewTask, Priority, PriorityFilter, StatusFilter, Task, TaskApi,
    TaskBoard, TaskId,
};
use tempfile::tempdir;

struct Unreachable;

impl TaskApi for Unreachable {
    async fn list(&self) -> anyhow::Result<Vec<Task>> {
        bail!("connection refused")
    }

    async fn create(&self, _draft: &NewTask) -> anyhow::Result<Task> {
        bail!("connection refused")
    }

    async fn update(&self, _task: &Task) -> anyhow::Result<Task> {
        bail!("connection refused")
    }

    async fn delete(&self, _id: TaskId) -> anyhow::Result<()> {
        bail!("connection refused")
    }
}

/// Answers the initial list, then rejects every write.
struct ReadOnly;

impl TaskApi for ReadOnly {
    async fn list(&self) -> anyhow::Result<Vec<Task>> {
        Ok(vec![Task::new(40, "Server task")])
    }

    async fn create(&self, _draft: &NewTask) -> anyhow::Result<Task> {
        bail!("POST returned HTTP 503")
    }

    async fn update(&self, _task: &Task) -> anyhow::Result<Task> {
        bail!("PUT returned HTTP 503")
    }

    async fn delete(&self, _id: TaskId) -> anyhow::Result<()> {
        bail!("DELETE returned HTTP 503")
    }
}

async fn run<A: TaskApi>(
    board: &TaskBoard<A, FileStore>,
    command: Command,
) -> anyhow::Result<String> {
    let mut out = Vec::new();
    dispatch(board, &Renderer::plain(), command, &mut out).await?;
    Ok(String::from_utf8(out).expect("utf8 output"))
}

#[tokio::test]
async fn demo_session_lists_seed_tasks() {
    let dir = tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open store");
    let board = TaskBoard::new(Unreachable, store.clone());

    let text = run(&board, Command::default()).await.unwrap();
    assert!(text.starts_with("demo mode"));
    assert!(text.contains("Complete project documentation"));
    assert!(text.contains("Review pull requests"));

    assert!(store.get(DEMO_TASKS_KEY).unwrap().is_some());
    assert!(dir.path().join("taskMeta.json").exists());
}

#[tokio::test]
async fn demo_edits_persist_when_resuming() {
    let dir = tempdir().expect("tempdir");
    let options = BoardOptions { resume_demo: true };

    {
        let store = FileStore::open(dir.path()).unwrap();
        let board = TaskBoard::with_options(Unreachable, store, options);
        let text = run(
            &board,
            Command::Add {
                title: vec!["Water".to_string(), "plants".to_string()],
                priority: Priority::Low,
                category: "Home".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(text, "added task 4\n");
    }

    let store = FileStore::open(dir.path()).unwrap();
    let board = TaskBoard::with_options(Unreachable, store, options);
    let text = run(
        &board,
        Command::List {
            search: "home".to_string(),
            status: StatusFilter::Active,
            priority: PriorityFilter::Only(Priority::Low),
        },
    )
    .await
    .unwrap();
    assert!(text.contains("Water plants"));
    assert!(!text.contains("Review pull requests"));

    let text = run(&board, Command::Categories).await.unwrap();
    assert_eq!(text, "Development\nHome\nWork\n");
}

#[tokio::test]
async fn stats_report_seed_numbers() {
    let dir = tempdir().unwrap();
    let board = TaskBoard::new(Unreachable, FileStore::open(dir.path()).unwrap());

    let text = run(&board, Command::Stats).await.unwrap();
    assert!(text.contains("completion rate  33%"));
    assert!(text.contains("high priority    2"));
    assert!(text.contains("total            3"));
}

#[tokio::test]
async fn unknown_ids_change_nothing() {
    let dir = tempdir().unwrap();
    let board = TaskBoard::new(Unreachable, FileStore::open(dir.path()).unwrap());

    let text = run(&board, Command::Toggle { id: 77 }).await.unwrap();
    assert_eq!(text, "nothing changed\n");
    let text = run(&board, Command::Delete { id: 77 }).await.unwrap();
    assert_eq!(text, "nothing changed\n");
}

#[tokio::test]
async fn connected_write_failure_is_reported() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let board = TaskBoard::new(ReadOnly, store.clone());

    let err = run(&board, Command::Toggle { id: 40 }).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 503"));
    assert!(!board.entry(40).unwrap().task.completed);

    // Priority never goes over the wire, so it still works.
    let text = run(
        &board,
        Command::Priority {
            id: 40,
            priority: Priority::High,
        },
    )
    .await
    .unwrap();
    assert_eq!(text, "task 40 is now high priority\n");
    assert!(store.get(META_KEY).unwrap().unwrap().contains("\"40\""));
}
