pub mod api;
pub mod board;
pub mod filter;
pub mod stats;
pub mod storage;
pub mod task;

pub use api::{
  Endpoints,
  TaskApi
};
pub use board::{
  BoardOptions,
  Mode,
  Outcome,
  TaskBoard
};
pub use filter::{
  BoardEntry,
  Filters,
  PriorityFilter,
  StatusFilter
};
pub use stats::Stats;
pub use storage::{
  KeyValueStore,
  MemoryStore
};
pub use task::{
  MetaTable,
  NewTask,
  Priority,
  Task,
  TaskId,
  TaskMeta
};
