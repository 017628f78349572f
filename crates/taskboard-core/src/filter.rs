use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::task::{MetaTable, Priority, Task, TaskMeta};

/// A task joined with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub task: Task,
    pub meta: TaskMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(anyhow!(
                "unknown status filter '{other}' (expected all, active or completed)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityFilter::All => "all",
            PriorityFilter::Only(priority) => priority.as_str(),
        }
    }

    pub fn matches(self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => wanted == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>().map(PriorityFilter::Only)
    }
}

/// Search text plus the two select filters. All three must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl Filters {
    /// True when any predicate can hide a task.
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty()
            || self.status != StatusFilter::All
            || self.priority != PriorityFilter::All
    }

    pub fn matches(&self, task: &Task, meta: &TaskMeta) -> bool {
        matches_search(&self.search.to_lowercase(), task, meta)
            && self.priority.matches(meta.priority)
            && self.status.matches(task)
    }
}

fn matches_search(needle: &str, task: &Task, meta: &TaskMeta) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(needle) || meta.category.to_lowercase().contains(needle)
}

/// Visible entries for the current filters, in list order.
#[tracing::instrument(level = "trace", skip(tasks, meta))]
pub fn filter_tasks(tasks: &[Task], meta: &MetaTable, filters: &Filters) -> Vec<BoardEntry> {
    let needle = filters.search.to_lowercase();

    tasks
        .iter()
        .filter_map(|task| {
            let meta = meta.join(task.id);
            let visible = matches_search(&needle, task, &meta)
                && filters.priority.matches(meta.priority)
                && filters.status.matches(task);
            visible.then(|| BoardEntry {
                task: task.clone(),
                meta,
            })
        })
        .collect()
}

pub fn empty_state_message(filters: &Filters) -> &'static str {
    if filters.is_narrowed() {
        "No tasks match your filters"
    } else {
        "No tasks yet. Add one to get started!"
    }
}
