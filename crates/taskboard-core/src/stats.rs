use std::collections::BTreeSet;

use crate::task::{MetaTable, Priority, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Percentage in `0..=100`.
    pub completion_rate: u32,
    /// High priority tasks that are not completed yet.
    pub high_priority: usize,
}

pub fn stats(tasks: &[Task], meta: &MetaTable) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    // An absent entry is never high, so `get` rather than `join`.
    let high_priority = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter(|t| meta.get(t.id).is_some_and(|m| m.priority == Priority::High))
        .count();

    Stats {
        total,
        completed,
        active: total - completed,
        completion_rate: completion_rate(completed, total),
        high_priority,
    }
}

/// `completed / total` as a whole percentage, halves rounded up.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((completed * 200 + total) / (total * 2)) as u32
}

/// Distinct non-empty categories across every metadata entry, sorted.
pub fn categories(meta: &MetaTable) -> Vec<String> {
    meta.values()
        .map(|m| m.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
