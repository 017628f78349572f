use taskboard_core::{
  BoardEntry,
  Priority,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub entries:       Vec<BoardEntry>,
  pub empty_message: String,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_priority:
    Callback<(TaskId, Priority)>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.entries.is_empty() {
    return html! {
        <div class="panel list">
            <div class="empty">{ props.empty_message.clone() }</div>
        </div>
    };
  }

  html! {
      <div class="panel list">
          <div class="header">{ "Tasks" }</div>
          {
              for props.entries.iter().cloned().map(|entry| html! {
                  <TaskListRow
                      key={entry.task.id}
                      entry={entry.clone()}
                      on_toggle={props.on_toggle.clone()}
                      on_delete={props.on_delete.clone()}
                      on_priority={props.on_priority.clone()}
                  />
              })
          }
      </div>
  }
}
