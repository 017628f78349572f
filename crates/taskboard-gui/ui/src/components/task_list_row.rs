use taskboard_core::{
  BoardEntry,
  Priority,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub entry:       BoardEntry,
  pub on_toggle:   Callback<TaskId>,
  pub on_delete:   Callback<TaskId>,
  pub on_priority:
    Callback<(TaskId, Priority)>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let task = &props.entry.task;
  let meta = &props.entry.meta;
  let id = task.id;

  let class = if task.completed {
    "row done"
  } else {
    "row"
  };

  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();
  let on_priority_change = {
    let on_priority =
      props.on_priority.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let Some(select) =
          e.target_dyn_into::<
            web_sys::HtmlSelectElement
          >()
        else {
          tracing::warn!(
            id,
            "priority change event had \
             non-select target"
          );
          return;
        };
        match select
          .value()
          .parse::<Priority>()
        {
          | Ok(priority) => {
            on_priority
              .emit((id, priority));
          }
          | Err(error) => {
            tracing::warn!(
              id,
              error = %error,
              "ignoring unknown priority"
            );
          }
        }
      }
    )
  };

  html! {
      <div class={class}>
          <button
              class={if task.completed { "selector on" } else { "selector" }}
              onclick={move |_: yew::MouseEvent| on_toggle.emit(id)}
          >
              { if task.completed { "✓" } else { "" } }
          </button>
          <div>
              <div class="task-title">{ &task.title }</div>
              <div style="margin-top:4px;display:flex;gap:6px;flex-wrap:wrap;">
                  <span
                      class="badge priority"
                      style={priority_badge_style(meta.priority)}
                  >
                      { format!("{} {}", meta.priority.icon(), meta.priority.label()) }
                  </span>
                  {
                      if meta.category.is_empty() {
                          html! {}
                      } else {
                          html! { <span class="badge">{ &meta.category }</span> }
                      }
                  }
              </div>
          </div>
          <select
              class="tag-select"
              value={meta.priority.as_str()}
              onchange={on_priority_change}
          >
              {
                  for Priority::ALL.iter().map(|priority| html! {
                      <option
                          value={priority.as_str()}
                          selected={*priority == meta.priority}
                      >
                          { priority.label() }
                      </option>
                  })
              }
          </select>
          <button
              class="btn danger"
              onclick={move |_: yew::MouseEvent| on_delete.emit(id)}
          >
              { "Delete" }
          </button>
      </div>
  }
}

pub fn priority_badge_style(
  priority: Priority
) -> String {
  format!(
    "--priority-color:{};",
    priority.color()
  )
}
