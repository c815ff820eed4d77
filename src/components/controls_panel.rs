use web_sys::{AbortController, HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::config::{MAX_DIMENSION, MIN_DIMENSION, SPEED_SLIDER_MAX_MS, SPEED_SLIDER_MIN_MS, clamp_dimension};
use crate::model::{AppAction, AppState, Algorithm, GenerateMazeRequest, Point, SimulateRequest};
use crate::state::{RunGate, SelectionMode};

#[derive(Clone, PartialEq)]
enum Notice {
    Error(String),
    Success(String),
}

/// Why a run cannot start, if it cannot.
pub fn run_blocker(state: &AppState) -> Option<&'static str> {
    match (&state.maze, state.start, state.goal) {
        (None, _, _) => Some("Generate a maze first"),
        (Some(_), Some(s), Some(g)) if s == g => Some("Start and goal must be different cells"),
        (Some(_), Some(_), Some(_)) => None,
        _ => Some("Please select start and goal cells"),
    }
}

/// Empty means random; anything else must be an integer.
pub fn parse_seed(raw: &str) -> Result<Option<i64>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|_| "Seed must be a valid number")
}

fn describe(p: Option<Point>) -> String {
    match p {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => "--".to_string(),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub state: UseReducerHandle<AppState>,
    pub selection_mode: SelectionMode,
    pub on_selection_mode: Callback<SelectionMode>,
    pub maze_width: u32,
    pub maze_height: u32,
    pub on_dimensions: Callback<(u32, u32)>,
    #[prop_or(false)]
    pub is_animating: bool,
    #[prop_or_default]
    pub on_skip: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let seed = use_state(String::new);
    let generating = use_state(|| false);
    let running = use_state(|| false);
    let notice = use_state(|| None::<Notice>);
    let gate = use_mut_ref(RunGate::default);
    let abort = use_mut_ref(|| None::<AbortController>);

    // Unmount: drop whatever run is still in flight.
    {
        let gate = gate.clone();
        let abort = abort.clone();
        use_effect_with((), move |_| {
            move || {
                gate.borrow_mut().cancel();
                if let Some(c) = abort.borrow_mut().take() {
                    c.abort();
                }
            }
        });
    }

    let on_width = {
        let cb = props.on_dimensions.clone();
        let height = props.maze_height;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let width = clamp_dimension(input.value().parse::<i64>().unwrap_or(MIN_DIMENSION as i64));
            input.set_value(&width.to_string());
            cb.emit((width, height));
        })
    };
    let on_height = {
        let cb = props.on_dimensions.clone();
        let width = props.maze_width;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let height = clamp_dimension(input.value().parse::<i64>().unwrap_or(MIN_DIMENSION as i64));
            input.set_value(&height.to_string());
            cb.emit((width, height));
        })
    };
    let on_seed = {
        let seed = seed.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            seed.set(input.value());
        })
    };
    let on_algorithm = {
        let state = props.state.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(a) = Algorithm::from_key(&select.value()) {
                state.dispatch(AppAction::SetAlgorithm(a));
            }
        })
    };
    let on_speed = {
        let state = props.state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(ms) = input.value().parse::<u32>() {
                state.dispatch(AppAction::SetAnimationSpeed(ms));
            }
        })
    };

    let on_generate = {
        let state = props.state.clone();
        let seed = seed.clone();
        let generating = generating.clone();
        let running = running.clone();
        let notice = notice.clone();
        let gate = gate.clone();
        let abort = abort.clone();
        let (width, height) = (props.maze_width, props.maze_height);
        Callback::from(move |_| {
            if *generating {
                return;
            }
            let seed = match parse_seed(&seed) {
                Ok(s) => s,
                Err(msg) => {
                    notice.set(Some(Notice::Error(msg.to_string())));
                    return;
                }
            };
            // A run for the old maze is meaningless once a new one arrives.
            gate.borrow_mut().cancel();
            if let Some(c) = abort.borrow_mut().take() {
                c.abort();
            }
            running.set(false);
            notice.set(None);
            generating.set(true);
            let state = state.clone();
            let generating = generating.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let req = GenerateMazeRequest { width, height, seed };
                match api::generate_maze(&req).await {
                    Ok(maze) => {
                        tracing::info!(width = maze.width, height = maze.height, "maze generated");
                        state.dispatch(AppAction::SetMaze(maze));
                        notice.set(Some(Notice::Success("Maze generated successfully".into())));
                    }
                    Err(e) => notice.set(Some(Notice::Error(e.to_string()))),
                }
                generating.set(false);
            });
        })
    };

    let on_run = {
        let state = props.state.clone();
        let running = running.clone();
        let notice = notice.clone();
        let gate = gate.clone();
        let abort = abort.clone();
        Callback::from(move |_| {
            if let Some(msg) = run_blocker(&state) {
                notice.set(Some(Notice::Error(msg.to_string())));
                return;
            }
            let (Some(grid), Some(start), Some(goal)) = (state.maze.clone(), state.start, state.goal) else {
                return;
            };
            let algorithm = state.algorithm;
            let ticket = gate.borrow_mut().begin();
            if let Some(c) = abort.borrow_mut().take() {
                c.abort();
            }
            let controller = AbortController::new().ok();
            let signal = controller.as_ref().map(|c| c.signal());
            *abort.borrow_mut() = controller;

            state.dispatch(AppAction::ResetSimulation);
            notice.set(None);
            running.set(true);
            let state = state.clone();
            let running = running.clone();
            let notice = notice.clone();
            let gate = gate.clone();
            spawn_local(async move {
                let req = SimulateRequest {
                    algorithm,
                    grid: &grid,
                    start,
                    goal,
                };
                let result = api::simulate(&req, signal.as_ref()).await;
                if !gate.borrow_mut().finish(ticket) {
                    tracing::debug!("stale run result dropped");
                    return;
                }
                running.set(false);
                match result {
                    Ok(resp) => {
                        let msg = if resp.found {
                            "Pathfinding complete"
                        } else {
                            "No path found for the selected maze"
                        };
                        tracing::info!(
                            algorithm = algorithm.key(),
                            found = resp.found,
                            visited = resp.visited_order.len(),
                            "run finished"
                        );
                        state.dispatch(AppAction::SetSimulationResult { algorithm, result: resp });
                        notice.set(Some(Notice::Success(msg.into())));
                    }
                    Err(ApiError::Aborted) => {}
                    Err(e) => notice.set(Some(Notice::Error(e.to_string()))),
                }
            });
        })
    };

    let mode_button = |mode: SelectionMode, label: &'static str, accent: &'static str| {
        let cb = props.on_selection_mode.clone();
        let active = props.selection_mode == mode;
        let style = if active {
            format!("border:1px solid {accent}; color:{accent}; background:#1c2128;")
        } else {
            "border:1px solid #30363d; color:#c9d1d9; background:#161b22;".to_string()
        };
        html! { <button type="button" style={style} onclick={Callback::from(move |_| cb.emit(mode))}>{ label }</button> }
    };

    let state = &props.state;
    let notice_view = match &*notice {
        Some(Notice::Error(msg)) => html! {
            <div class="notice error" style="font-size:12px; background:#2d1517; border:1px solid #f85149; color:#ffa198; padding:4px 6px; border-radius:6px;">{ msg.clone() }</div>
        },
        Some(Notice::Success(msg)) => html! {
            <div class="notice success" style="font-size:12px; background:#12261e; border:1px solid #2ea043; color:#7ee787; padding:4px 6px; border-radius:6px;">{ msg.clone() }</div>
        },
        None => html! {},
    };
    let skip_button = if props.is_animating {
        let cb = props.on_skip.clone();
        html! { <button type="button" onclick={Callback::from(move |_| cb.emit(()))}>{"Skip Animation"}</button> }
    } else {
        html! {}
    };
    let label_style = "display:flex; flex-direction:column; gap:4px; font-size:12px;";

    html! {<section class="controls-panel" style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:12px; display:flex; flex-direction:column; gap:10px; min-width:240px;">
        <div style="font-weight:600;">{"Maze Controls"}</div>
        <label style={label_style}>{"Width (cells)"}
            <input type="number" min={MIN_DIMENSION.to_string()} max={MAX_DIMENSION.to_string()} value={props.maze_width.to_string()} onchange={on_width} />
        </label>
        <label style={label_style}>{"Height (cells)"}
            <input type="number" min={MIN_DIMENSION.to_string()} max={MAX_DIMENSION.to_string()} value={props.maze_height.to_string()} onchange={on_height} />
        </label>
        <label style={label_style}>{"Seed (optional)"}
            <input type="text" placeholder="Random each time" value={(*seed).clone()} oninput={on_seed} />
        </label>
        <label style={label_style}>{"Algorithm"}
            <select onchange={on_algorithm}>
                { for Algorithm::ALL.iter().map(|a| html! {
                    <option value={a.key()} selected={*a == state.algorithm}>{ a.label() }</option>
                }) }
            </select>
        </label>
        <label style={label_style}>{ format!("Animation Speed ({} ms)", state.animation_speed_ms) }
            <input type="range" min={SPEED_SLIDER_MIN_MS.to_string()} max={SPEED_SLIDER_MAX_MS.to_string()} step="5" value={state.animation_speed_ms.to_string()} oninput={on_speed} />
        </label>
        <div style="display:flex; gap:6px; align-items:center;">
            { mode_button(SelectionMode::Start, "Set Start", "#22c55e") }
            { mode_button(SelectionMode::Goal, "Set Goal", "#ef4444") }
        </div>
        <div style="font-size:11px; opacity:0.7;">{ format!("Start: {} | Goal: {}", describe(state.start), describe(state.goal)) }</div>
        <button type="button" onclick={on_generate} disabled={*generating}>
            { if *generating { "Generating…" } else { "Generate Maze" } }
        </button>
        <button type="button" onclick={on_run} disabled={state.maze.is_none()}>
            { if *running { "Running…" } else { "Run Pathfinding" } }
        </button>
        { skip_button }
        { notice_view }
    </section>}
}
