mod new_task_form;
mod stats_panel;
mod task_filters;
mod task_list;
mod task_list_row;

pub use new_task_form::NewTaskForm;
pub use stats_panel::StatsPanel;
pub use task_filters::TaskFilters;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
