//! Reusable widgets.

pub mod graph_canvas;
