use std::rc::Rc;

use taskboard_core::filter::empty_state_message;
use taskboard_core::{
  Filters,
  Mode,
  Outcome,
  Priority,
  PriorityFilter,
  StatusFilter,
  TaskBoard,
  TaskId
};
use yew::{
  Callback,
  Html,
  TargetCast,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use crate::api::FetchApi;
use crate::components::{
  NewTaskForm,
  StatsPanel,
  TaskFilters,
  TaskList
};
use crate::storage::BrowserStorage;

type Board =
  TaskBoard<FetchApi, BrowserStorage>;

fn bump(tick: &UseStateHandle<u64>) {
  tick.set((**tick).saturating_add(1));
}

/// Failures are logged by the board
/// and leave the draft as typed.
fn clears_draft(outcome: &Outcome) -> bool {
  matches!(outcome, Outcome::Applied)
}

fn select_value(
  e: &web_sys::Event,
  what: &str
) -> Option<String> {
  match e.target_dyn_into::<
    web_sys::HtmlSelectElement
  >() {
    | Some(select) => {
      Some(select.value())
    }
    | None => {
      tracing::warn!(
        filter = what,
        "select event had non-select \
         target"
      );
      None
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let board: Rc<Board> =
    use_memo((), |_| {
      TaskBoard::new(
        FetchApi::same_origin(),
        BrowserStorage::open()
      )
    });
  let refresh_tick =
    use_state(|| 0_u64);

  let search = use_state(String::new);
  let status_filter =
    use_state(StatusFilter::default);
  let priority_filter =
    use_state(PriorityFilter::default);

  let draft_title =
    use_state(String::new);
  let draft_priority =
    use_state(Priority::default);
  let draft_category =
    use_state(String::new);

  {
    let board = board.clone();
    let refresh_tick =
      refresh_tick.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          let mode = board.load().await;
          tracing::info!(
            mode = %mode,
            "task board ready"
          );
          bump(&refresh_tick);
        }
      );
      || ()
    });
  }

  let on_add = {
    let board = board.clone();
    let refresh_tick =
      refresh_tick.clone();
    let draft_title = draft_title.clone();
    let draft_priority =
      draft_priority.clone();
    let draft_category =
      draft_category.clone();
    Callback::from(move |()| {
      let board = board.clone();
      let refresh_tick =
        refresh_tick.clone();
      let draft_title =
        draft_title.clone();
      let draft_category =
        draft_category.clone();
      let title = (*draft_title).clone();
      let category =
        (*draft_category).clone();
      let priority = *draft_priority;

      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = board
            .add(&title, priority, &category)
            .await;
          if clears_draft(&outcome) {
            draft_title.set(String::new());
            draft_category
              .set(String::new());
          }
          bump(&refresh_tick);
        }
      );
    })
  };

  let on_toggle = {
    let board = board.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |id: TaskId| {
      let board = board.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if board.toggle(id).await.is_applied()
          {
            bump(&refresh_tick);
          }
        }
      );
    })
  };

  let on_delete = {
    let board = board.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |id: TaskId| {
      let board = board.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if board.delete(id).await.is_applied()
          {
            bump(&refresh_tick);
          }
        }
      );
    })
  };

  let on_priority = {
    let board = board.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(
      move |(id, priority): (
        TaskId,
        Priority
      )| {
        if board
          .set_priority(id, priority)
          .is_applied()
        {
          bump(&refresh_tick);
        }
      }
    )
  };

  let on_title_input = {
    let draft_title = draft_title.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft_title.set(input.value());
      }
    )
  };

  let on_draft_priority_change = {
    let draft_priority =
      draft_priority.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let Some(value) =
          select_value(&e, "draft priority")
        else {
          return;
        };
        match value.parse::<Priority>() {
          | Ok(priority) => {
            draft_priority.set(priority)
          }
          | Err(error) => {
            tracing::warn!(
              error = %error,
              "ignoring draft priority"
            )
          }
        }
      }
    )
  };

  let on_category_input = {
    let draft_category =
      draft_category.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft_category.set(input.value());
      }
    )
  };

  let on_search_input = {
    let search = search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        search.set(input.value());
      }
    )
  };

  let on_status_change = {
    let status_filter =
      status_filter.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let Some(value) =
          select_value(&e, "status")
        else {
          return;
        };
        match value.parse() {
          | Ok(status) => {
            status_filter.set(status)
          }
          | Err(error) => {
            tracing::warn!(
              error = %error,
              "ignoring status filter"
            )
          }
        }
      }
    )
  };

  let on_priority_filter_change = {
    let priority_filter =
      priority_filter.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let Some(value) =
          select_value(&e, "priority")
        else {
          return;
        };
        match value.parse() {
          | Ok(priority) => {
            priority_filter.set(priority)
          }
          | Err(error) => {
            tracing::warn!(
              error = %error,
              "ignoring priority filter"
            )
          }
        }
      }
    )
  };

  let filters = Filters {
    search:   (*search).clone(),
    status:   *status_filter,
    priority: *priority_filter
  };
  let mode = board.mode();
  let entries = board.view(&filters);
  let stats = board.stats();
  let categories = board.categories();

  html! {
      <div class="app">
          <div class="header">
              <h1>{ "Task Board" }</h1>
          </div>
          {
              if mode.is_demo() {
                  html! {
                      <div class="banner demo">
                          { "Demo mode: the task API is unreachable, so changes are kept in this browser only." }
                      </div>
                  }
              } else {
                  html! {}
              }
          }
          <StatsPanel stats={stats} />
          <NewTaskForm
              title={(*draft_title).clone()}
              priority={*draft_priority}
              category={(*draft_category).clone()}
              categories={categories}
              on_title_input={on_title_input}
              on_priority_change={on_draft_priority_change}
              on_category_input={on_category_input}
              on_submit={on_add}
          />
          <TaskFilters
              search={(*search).clone()}
              status={*status_filter}
              priority={*priority_filter}
              on_search_input={on_search_input}
              on_status_change={on_status_change}
              on_priority_change={on_priority_filter_change}
          />
          {
              if mode == Mode::Unknown {
                  html! { <div class="panel list"><div class="empty">{ "Loading tasks..." }</div></div> }
              } else {
                  html! {
                      <TaskList
                          entries={entries}
                          empty_message={empty_state_message(&filters)}
                          on_toggle={on_toggle}
                          on_delete={on_delete}
                          on_priority={on_priority}
                      />
                  }
              }
          }
      </div>
  }
}
