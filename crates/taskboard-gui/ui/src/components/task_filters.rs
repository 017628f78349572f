use taskboard_core::{
  Priority,
  PriorityFilter,
  StatusFilter
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFiltersProps {
  pub search:             String,
  pub status:             StatusFilter,
  pub priority:           PriorityFilter,
  pub on_search_input:
    Callback<web_sys::InputEvent>,
  pub on_status_change:
    Callback<web_sys::Event>,
  pub on_priority_change:
    Callback<web_sys::Event>
}

#[function_component(TaskFilters)]
pub fn task_filters(
  props: &TaskFiltersProps
) -> Html {
  let status_options = [
    StatusFilter::All,
    StatusFilter::Active,
    StatusFilter::Completed
  ];
  let priority_options =
    std::iter::once(PriorityFilter::All)
      .chain(
        Priority::ALL
          .iter()
          .copied()
          .map(PriorityFilter::Only)
      );

  html! {
      <div class="panel filters">
          <input
              value={props.search.clone()}
              placeholder="Search tasks"
              oninput={props.on_search_input.clone()}
          />
          <select
              class="tag-select"
              value={props.status.as_str()}
              onchange={props.on_status_change.clone()}
          >
              {
                  for status_options.into_iter().map(|status| html! {
                      <option
                          value={status.as_str()}
                          selected={status == props.status}
                      >
                          { status_label(status) }
                      </option>
                  })
              }
          </select>
          <select
              class="tag-select"
              value={props.priority.as_str()}
              onchange={props.on_priority_change.clone()}
          >
              {
                  for priority_options.map(|priority| html! {
                      <option
                          value={priority.as_str()}
                          selected={priority == props.priority}
                      >
                          { priority_label(priority) }
                      </option>
                  })
              }
          </select>
      </div>
  }
}

fn status_label(
  status: StatusFilter
) -> &'static str {
  match status {
    | StatusFilter::All => "All Tasks",
    | StatusFilter::Active => "Active",
    | StatusFilter::Completed => {
      "Completed"
    }
  }
}

fn priority_label(
  priority: PriorityFilter
) -> &'static str {
  match priority {
    | PriorityFilter::All => {
      "All Priorities"
    }
    | PriorityFilter::Only(priority) => {
      priority.label()
    }
  }
}
