pub mod control_panel;
pub mod download;
pub mod graph_canvas;
pub mod input_panel;
pub mod notice;
pub mod stats_panel;
pub mod status_panel;
