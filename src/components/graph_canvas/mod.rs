//! Canvas widget for the energy-district graph.
//!
//! `generate` builds the node/edge set once, `state` holds the view and
//! selection and folds [`GraphEvent`]s into it, `scene` turns a state snapshot
//! into a display list and `render` replays that list onto a 2D canvas.

mod component;
mod generate;
mod panel;
mod render;
mod scene;
mod state;
mod types;

pub use component::GraphCanvas;
pub use generate::{GenerationConfig, NodeCounts, generate, generate_random, generate_seeded};
pub use render::{PaintError, context_2d, paint};
pub use scene::{DrawCommand, Scene, build_scene};
pub use state::{
	CanvasState, DragState, GraphEvent, LayerVisibility, MAX_ZOOM, MIN_ZOOM, Selection,
	ViewTransform,
};
pub use types::{
	BuildingCategory, Edge, EdgeType, GraphData, GraphSummary, Layer, Measurement, Node,
	NodeDetails, NodeType, Point, Shape,
};
