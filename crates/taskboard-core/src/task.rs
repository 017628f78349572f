use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

pub type TaskId = u64;

/// A task record as the REST API
/// stores it.
///
/// Fields the server adds beyond
/// `id`, `title` and `completed`
/// are kept in `extra` and sent
/// back unchanged on update.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Task {
  pub id:        TaskId,
  #[serde(default)]
  pub title:     String,
  #[serde(default)]
  pub completed: bool,
  #[serde(flatten)]
  pub extra:
    BTreeMap<String, serde_json::Value>
}

impl Task {
  pub fn new(
    id: TaskId,
    title: impl Into<String>
  ) -> Self {
    Self {
      id,
      title: title.into(),
      completed: false,
      extra: BTreeMap::new()
    }
  }

  pub fn toggled(&self) -> Self {
    let mut next = self.clone();
    next.completed = !next.completed;
    next
  }
}

/// Body of a create request.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct NewTask {
  pub title:     String,
  pub completed: bool
}

impl NewTask {
  pub fn titled(
    title: impl Into<String>
  ) -> Self {
    Self {
      title:     title.into(),
      completed: false
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  #[default]
  Medium,
  Low
}

impl Priority {
  pub const ALL: [Priority; 3] = [
    Priority::High,
    Priority::Medium,
    Priority::Low
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Priority::High => "high",
      | Priority::Medium => "medium",
      | Priority::Low => "low"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Priority::High => "High",
      | Priority::Medium => "Medium",
      | Priority::Low => "Low"
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      | Priority::High => "🔥",
      | Priority::Medium => "⚡",
      | Priority::Low => "🕐"
    }
  }

  /// Badge colour as a CSS hex value.
  pub fn color(self) -> &'static str {
    match self {
      | Priority::High => "#ef4444",
      | Priority::Medium => "#f59e0b",
      | Priority::Low => "#10b981"
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Priority {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "high" | "h" => Ok(Priority::High),
      | "medium" | "m" => {
        Ok(Priority::Medium)
      }
      | "low" | "l" => Ok(Priority::Low),
      | other => Err(anyhow!(
        "unknown priority '{other}' \
         (expected high, medium or \
         low)"
      ))
    }
  }
}

// Stored metadata may carry values
// this client never wrote.
fn lenient_priority<'de, D>(
  deserializer: D
) -> Result<Priority, D::Error>
where
  D: serde::Deserializer<'de>
{
  let raw =
    Option::<serde_json::Value>::deserialize(
      deserializer
    )?;
  Ok(
    raw
      .as_ref()
      .and_then(serde_json::Value::as_str)
      .and_then(|value| value.parse().ok())
      .unwrap_or_default()
  )
}

/// Client-only annotations for one
/// task. Never sent to the server.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskMeta {
  #[serde(
    default,
    deserialize_with = "lenient_priority"
  )]
  pub priority: Priority,
  #[serde(default)]
  pub category: String
}

impl TaskMeta {
  pub fn new(
    priority: Priority,
    category: impl Into<String>
  ) -> Self {
    Self {
      priority,
      category: category.into()
    }
  }
}

/// Metadata keyed by task id. Joined
/// with the task list at read time.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct MetaTable(
  BTreeMap<TaskId, TaskMeta>
);

impl MetaTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Metadata for `id`, falling back
  /// to medium priority and no
  /// category when the entry is
  /// missing.
  pub fn join(
    &self,
    id: TaskId
  ) -> TaskMeta {
    self
      .0
      .get(&id)
      .cloned()
      .unwrap_or_default()
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&TaskMeta> {
    self.0.get(&id)
  }

  pub fn insert(
    &mut self,
    id: TaskId,
    meta: TaskMeta
  ) -> Option<TaskMeta> {
    self.0.insert(id, meta)
  }

  pub fn remove(
    &mut self,
    id: TaskId
  ) -> Option<TaskMeta> {
    self.0.remove(&id)
  }

  pub fn contains(
    &self,
    id: TaskId
  ) -> bool {
    self.0.contains_key(&id)
  }

  pub fn values(
    &self
  ) -> impl Iterator<Item = &TaskMeta>
  {
    self.0.values()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(TaskId, TaskMeta)>
  for MetaTable
{
  fn from_iter<
    I: IntoIterator<
      Item = (TaskId, TaskMeta)
    >
  >(
    iter: I
  ) -> Self {
    Self(iter.into_iter().collect())
  }
}
