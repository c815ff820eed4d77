mod api;
mod components;
mod config;
mod hooks;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    util::init_logging(config::debug_logging_enabled());
    tracing::info!(api = config::api_base_url(), "maze visualizer starting");
    yew::Renderer::<App>::new().render();
}
