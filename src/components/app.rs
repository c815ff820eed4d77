use super::{controls_panel::ControlsPanel, grid_canvas::GridCanvas, legend_panel::LegendPanel, stats_panel::StatsPanel};
use crate::config::Settings;
use crate::hooks::use_playback;
use crate::model::{AppAction, AppState, Point};
use crate::state::pointer::select;
use crate::state::{Selection, SelectionMode};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(AppState::default);
    let initial = use_memo((), |_| Settings::load());
    let dims = {
        let initial = initial.clone();
        use_state(move || (initial.maze_width, initial.maze_height))
    };
    let selection_mode = use_state(SelectionMode::default);

    // Apply persisted settings once
    {
        let state = state.clone();
        let initial = initial.clone();
        use_effect_with((), move |_| {
            state.dispatch(AppAction::ApplySettings((*initial).clone()));
            || ()
        });
    }
    // Persist settings changes
    {
        let version = state.version;
        let (maze_width, maze_height) = *dims;
        let deps = (state.animation_speed_ms, state.algorithm, maze_width, maze_height);
        use_effect_with(deps, move |(animation_speed_ms, algorithm, maze_width, maze_height)| {
            // Nothing to save until the stored settings have been applied.
            if version > 0 {
                Settings {
                    animation_speed_ms: *animation_speed_ms,
                    algorithm: *algorithm,
                    maze_width: *maze_width,
                    maze_height: *maze_height,
                }
                .save();
            }
            || ()
        });
    }
    // Missing endpoints are asked for first
    {
        let selection_mode = selection_mode.clone();
        use_effect_with((state.start, state.goal), move |(start, goal)| {
            let next = selection_mode.settle(*start, *goal);
            if next != *selection_mode {
                selection_mode.set(next);
            }
            || ()
        });
    }

    let playback = use_playback(
        state.visited_order.clone(),
        state.path.len(),
        state.run_id,
        state.animation_speed_ms,
    );

    let on_select_cell = {
        let state = state.clone();
        let selection_mode = selection_mode.clone();
        Callback::from(move |p: Point| {
            let (selection, next) = select(*selection_mode, state.goal.is_some(), p);
            tracing::debug!(?selection, "cell selected");
            match selection {
                Selection::Start(p) => state.dispatch(AppAction::SetStart(Some(p))),
                Selection::Goal(p) => state.dispatch(AppAction::SetGoal(Some(p))),
            }
            selection_mode.set(next);
        })
    };
    let on_selection_mode = {
        let selection_mode = selection_mode.clone();
        Callback::from(move |mode: SelectionMode| selection_mode.set(mode))
    };
    let on_dimensions = {
        let dims = dims.clone();
        Callback::from(move |d: (u32, u32)| dims.set(d))
    };
    let (maze_width, maze_height) = *dims;

    html! {<div style="display:flex; flex-direction:column; width:100vw; height:100vh; background:#0d1117; color:#c9d1d9; font-family:system-ui, sans-serif;">
        <header id="top-bar" style="padding:12px 16px; border-bottom:1px solid #30363d;">
            <div style="font-size:20px; font-weight:700; color:#58a6ff;">{"Pathfinder & Maze Visualizer"}</div>
            <div style="font-size:12px; color:#8b949e;">{"Generate perfect mazes and compare BFS, DFS, and A* exploration."}</div>
        </header>
        <main style="flex:1; min-height:0; display:flex; gap:12px; padding:12px;">
            <aside style="width:320px; flex-shrink:0; display:flex; flex-direction:column; gap:12px; overflow-y:auto;">
                <ControlsPanel
                    state={state.clone()}
                    selection_mode={*selection_mode}
                    on_selection_mode={on_selection_mode}
                    maze_width={maze_width}
                    maze_height={maze_height}
                    on_dimensions={on_dimensions}
                    is_animating={playback.is_animating}
                    on_skip={playback.skip.clone()}
                />
                <StatsPanel results={state.results.clone()} />
                <LegendPanel selection_mode={*selection_mode} />
            </aside>
            <div style="flex:1; min-width:0; min-height:0;">
                <GridCanvas
                    grid={state.maze.clone()}
                    visited_order={state.visited_order.clone()}
                    visited_count={playback.visited_count}
                    path={state.path.clone()}
                    show_path={playback.show_path}
                    start={state.start}
                    goal={state.goal}
                    on_select_cell={on_select_cell}
                />
            </div>
        </main>
    </div>}
}
