pub mod app;
pub mod controls_panel;
pub mod grid_canvas;
pub mod legend;
pub mod legend_panel;
pub mod stats_panel;
