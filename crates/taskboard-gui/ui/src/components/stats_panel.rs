use taskboard_core::Stats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats: Stats
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let stats = props.stats;

  let card = |label: &str, value: String| {
    html! {
        <div class="stat-card">
            <div class="stat-value">{ value }</div>
            <div class="stat-label">{ label.to_string() }</div>
        </div>
    }
  };

  html! {
      <div class="panel stats">
          { card("Completion Rate", format!("{}%", stats.completion_rate)) }
          { card("Completed", stats.completed.to_string()) }
          { card("Active", stats.active.to_string()) }
          { card("High Priority", stats.high_priority.to_string()) }
      </div>
  }
}
