use std::io::Write;

use anyhow::bail;
use taskboard_core::{Filters, KeyValueStore, Outcome, TaskApi, TaskBoard};
use tracing::{debug, info, instrument};

use crate::cli::Command;
use crate::render::Renderer;

/// Loads the board, then runs one command against it.
#[instrument(skip(board, renderer, out))]
pub async fn dispatch<A, S, W>(
    board: &TaskBoard<A, S>,
    renderer: &Renderer,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()>
where
    A: TaskApi,
    S: KeyValueStore,
    W: Write,
{
    let mode = board.load().await;
    info!(%mode, "board loaded");

    match command {
        Command::List {
            search,
            status,
            priority,
        } => {
            let filters = Filters {
                search,
                status,
                priority,
            };
            let entries = board.view(&filters);
            debug!(visible = entries.len(), "rendering task list");
            renderer.print_mode(out, mode)?;
            renderer.print_board(out, &entries, &filters)?;
        }
        Command::Add {
            title,
            priority,
            category,
        } => {
            let title = title.join(" ");
            let outcome = board.add(&title, priority, &category).await;
            report(out, outcome, || match board.tasks().first() {
                Some(task) => format!("added task {}", task.id),
                None => "added task".to_string(),
            })?;
        }
        Command::Toggle { id } => {
            let outcome = board.toggle(id).await;
            report(out, outcome, || match board.entry(id) {
                Some(entry) if entry.task.completed => format!("completed task {id}"),
                Some(_) => format!("reopened task {id}"),
                None => format!("toggled task {id}"),
            })?;
        }
        Command::Delete { id } => {
            let outcome = board.delete(id).await;
            report(out, outcome, || format!("deleted task {id}"))?;
        }
        Command::Priority { id, priority } => {
            let outcome = board.set_priority(id, priority);
            report(out, outcome, || format!("task {id} is now {priority} priority"))?;
        }
        Command::Stats => {
            renderer.print_mode(out, mode)?;
            renderer.print_stats(out, &board.stats())?;
        }
        Command::Categories => {
            renderer.print_categories(out, &board.categories())?;
        }
    }

    Ok(())
}

fn report<W, F>(out: &mut W, outcome: Outcome, applied: F) -> anyhow::Result<()>
where
    W: Write,
    F: FnOnce() -> String,
{
    match outcome {
        Outcome::Applied => writeln!(out, "{}", applied())?,
        Outcome::Unchanged => writeln!(out, "nothing changed")?,
        Outcome::Failed(message) => bail!("task API request failed: {message}"),
    }
    Ok(())
}
