use super::legend::LegendRow;
use crate::state::SelectionMode;
use crate::state::renderer::palette;
use crate::state::surface::Rgb;
use yew::prelude::*;

fn css(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub selection_mode: SelectionMode,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    let hint = match props.selection_mode {
        SelectionMode::Start => "Click an open cell to place the start",
        SelectionMode::Goal => "Click an open cell to place the goal",
    };
    html! {<div class="legend-panel" style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:170px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        <div style="font-size:11px; color:#8b949e; margin-bottom:6px;">{ hint }</div>
        <LegendRow color={css(palette::WALL)} label="Wall" />
        <LegendRow color={css(palette::SPACE)} label="Open" />
        <LegendRow color={css(palette::VISITED)} label="Visited" />
        <LegendRow color={css(palette::PATH)} label="Path" />
        <LegendRow color={css(palette::START)} label="Start" highlight={props.selection_mode == SelectionMode::Start} />
        <LegendRow color={css(palette::GOAL)} label="Goal" highlight={props.selection_mode == SelectionMode::Goal} />
    </div>}
}
