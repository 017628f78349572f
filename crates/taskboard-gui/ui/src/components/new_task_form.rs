use taskboard_core::Priority;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NewTaskFormProps {
  pub title:              String,
  pub priority:           Priority,
  pub category:           String,
  pub categories:         Vec<String>,
  pub on_title_input:
    Callback<web_sys::InputEvent>,
  pub on_priority_change:
    Callback<web_sys::Event>,
  pub on_category_input:
    Callback<web_sys::InputEvent>,
  pub on_submit:          Callback<()>
}

#[function_component(NewTaskForm)]
pub fn new_task_form(
  props: &NewTaskFormProps
) -> Html {
  let on_keydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };
  let on_click = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |_: web_sys::MouseEvent| {
        on_submit.emit(());
      }
    )
  };

  html! {
      <div class="panel new-task">
          <div class="header">{ "Add Task" }</div>
          <div class="details">
              <input
                  value={props.title.clone()}
                  placeholder="What needs to be done?"
                  oninput={props.on_title_input.clone()}
                  onkeydown={on_keydown}
              />
              <select
                  class="tag-select"
                  value={props.priority.as_str()}
                  onchange={props.on_priority_change.clone()}
              >
                  {
                      for Priority::ALL.iter().map(|priority| html! {
                          <option
                              value={priority.as_str()}
                              selected={*priority == props.priority}
                          >
                              { format!("{} {}", priority.icon(), priority.label()) }
                          </option>
                      })
                  }
              </select>
              <input
                  value={props.category.clone()}
                  placeholder="Category"
                  list="category-options"
                  oninput={props.on_category_input.clone()}
              />
              <datalist id="category-options">
                  {
                      for props.categories.iter().map(|category| html! {
                          <option value={category.clone()} />
                      })
                  }
              </datalist>
              <button class="btn" onclick={on_click}>{ "Add" }</button>
          </div>
      </div>
  }
}
