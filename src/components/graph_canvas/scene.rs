//! Display list for one frame, built from a [`CanvasState`] snapshot.
//!
//! Everything here is in screen pixels. The painter replays the commands in
//! order, so edges come before nodes and a highlight ring before its shape.

use super::state::CanvasState;
use super::types::{Point, Shape};

/// Opacity of every edge stroke.
pub const EDGE_ALPHA: f64 = 0.6;
/// Stroke of the selection/hover ring.
pub const RING_COLOR: &str = "#1f2937";
/// Ring line width.
pub const RING_WIDTH: f64 = 3.0;
/// Space between a node's extent and its ring.
pub const RING_GAP: f64 = 5.0;
/// Node outline stroke.
pub const OUTLINE_COLOR: &str = "#ffffff";
/// Node outline width.
pub const OUTLINE_WIDTH: f64 = 1.0;
/// Label text fill.
pub const LABEL_COLOR: &str = "#1f2937";
/// Unselected nodes get a label only above this on-screen size.
pub const LABEL_MIN_SIZE: f64 = 10.0;
/// Smallest label font, in pixels.
pub const LABEL_MIN_FONT_PX: f64 = 10.0;
/// Gap between a node's bottom edge and its label baseline.
pub const LABEL_OFFSET: f64 = 15.0;

/// One paint operation, in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Wipe the whole canvas.
	Clear {
		/// Canvas width.
		width: f64,
		/// Canvas height.
		height: f64,
	},
	/// Straight line between two node centers.
	Edge {
		/// Id of the graph edge.
		id: String,
		/// Source center.
		from: Point,
		/// Target center.
		to: Point,
		/// Stroke color.
		color: String,
		/// Line width, already scaled by zoom.
		width: f64,
		/// Dash segments; empty is solid.
		dash: &'static [f64],
		/// Stroke opacity.
		alpha: f64,
	},
	/// Highlight circle around a selected or hovered node.
	Ring {
		/// Node center.
		center: Point,
		/// Ring radius.
		radius: f64,
	},
	/// Filled, outlined node shape.
	Node {
		/// Id of the graph node.
		id: String,
		/// Outline to draw.
		shape: Shape,
		/// Screen center.
		center: Point,
		/// Half-extent, already scaled by zoom.
		size: f64,
		/// Fill color.
		fill: &'static str,
	},
	/// Centered node label.
	Label {
		/// Label text.
		text: String,
		/// Baseline anchor.
		at: Point,
		/// Font size in pixels.
		font_px: f64,
	},
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// Commands in paint order.
	pub commands: Vec<DrawCommand>,
}

impl Scene {
	/// Ids of drawn nodes, in paint order.
	pub fn node_ids(&self) -> impl Iterator<Item = &str> {
		self.commands.iter().filter_map(|c| match c {
			DrawCommand::Node { id, .. } => Some(id.as_str()),
			_ => None,
		})
	}

	/// Ids of drawn edges, in paint order.
	pub fn edge_ids(&self) -> impl Iterator<Item = &str> {
		self.commands.iter().filter_map(|c| match c {
			DrawCommand::Edge { id, .. } => Some(id.as_str()),
			_ => None,
		})
	}
}

/// Full redraw of the current state; no diffing against previous frames.
pub fn build_scene(state: &CanvasState, width: f64, height: f64) -> Scene {
	let (graph, view, layers) = (&state.graph, &state.view, &state.layers);
	let mut commands = vec![DrawCommand::Clear { width, height }];

	for edge in graph.edges() {
		let Some((source, target)) = graph.endpoints(edge) else {
			continue;
		};
		if !layers.shows(source) || !layers.shows(target) {
			continue;
		}
		commands.push(DrawCommand::Edge {
			id: edge.id.clone(),
			from: view.to_screen(source.position),
			to: view.to_screen(target.position),
			color: edge.color.clone(),
			width: edge.weight * view.zoom,
			dash: edge.kind.dash(),
			alpha: EDGE_ALPHA,
		});
	}

	for (idx, node) in graph.nodes().iter().enumerate() {
		if !layers.shows(node) {
			continue;
		}
		let center = view.to_screen(node.position);
		let size = node.size * view.zoom;
		if state.selection.is_highlighted(idx) {
			commands.push(DrawCommand::Ring {
				center,
				radius: size + RING_GAP,
			});
		}
		commands.push(DrawCommand::Node {
			id: node.id.clone(),
			shape: node.node_type().shape(),
			center,
			size,
			fill: node.color(),
		});
		if size > LABEL_MIN_SIZE || state.selection.selected == Some(idx) {
			commands.push(DrawCommand::Label {
				text: node.label.clone(),
				at: Point::new(center.x, center.y + size + LABEL_OFFSET),
				font_px: LABEL_MIN_FONT_PX.max(size / 2.0),
			});
		}
	}

	Scene { commands }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::generate::generate_seeded;
	use crate::components::graph_canvas::state::GraphEvent;
	use crate::components::graph_canvas::types::tests::{building, sensor};
	use crate::components::graph_canvas::types::{Edge, EdgeType, GraphData, Layer, NodeType};

	fn small() -> CanvasState {
		let mut b = building("building-0", 100.0, 100.0);
		b.size = 8.0;
		let mut s = sensor("sensor-0", 150.0, 100.0);
		s.size = 6.0;
		let edges = vec![
			Edge::new(&s, &b, EdgeType::Data, 0.5, "#a855f7"),
			Edge {
				id: "sensor-0-missing".into(),
				source: "sensor-0".into(),
				target: "missing".into(),
				kind: EdgeType::Electrical,
				weight: 1.0,
				color: "#64748b".into(),
			},
		];
		CanvasState::new(GraphData::new(vec![b, s], edges))
	}

	#[test]
	fn clears_then_edges_then_nodes() {
		let scene = build_scene(&small(), 800.0, 600.0);
		assert_eq!(
			scene.commands[0],
			DrawCommand::Clear {
				width: 800.0,
				height: 600.0
			}
		);
		let last_edge = scene
			.commands
			.iter()
			.rposition(|c| matches!(c, DrawCommand::Edge { .. }))
			.unwrap();
		let first_node = scene
			.commands
			.iter()
			.position(|c| matches!(c, DrawCommand::Node { .. }))
			.unwrap();
		assert!(last_edge < first_node);
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let scene = build_scene(&small(), 800.0, 600.0);
		assert_eq!(scene.edge_ids().collect::<Vec<_>>(), vec!["sensor-0-building-0"]);
	}

	#[test]
	fn edges_use_view_transform_and_type_dash() {
		let mut state = small();
		state.view.zoom = 2.0;
		state.view.pan = Point::new(10.0, -20.0);
		let scene = build_scene(&state, 800.0, 600.0);
		let edge = scene
			.commands
			.iter()
			.find(|c| matches!(c, DrawCommand::Edge { .. }))
			.unwrap();
		let DrawCommand::Edge {
			from,
			to,
			width,
			dash,
			alpha,
			..
		} = edge
		else {
			unreachable!()
		};
		assert_eq!(*from, Point::new(320.0, 160.0));
		assert_eq!(*to, Point::new(220.0, 160.0));
		assert_eq!(*width, 1.0);
		assert_eq!(*dash, EdgeType::Data.dash());
		assert_eq!(*alpha, EDGE_ALPHA);
	}

	#[test]
	fn hiding_a_layer_drops_nodes_and_touching_edges() {
		let state = CanvasState::new(generate_seeded(
			800.0,
			600.0,
			"2026-03-01T09:30:00.000Z",
			11,
		));
		let full = build_scene(&state, 800.0, 600.0);

		let hidden = state.clone().reduce(GraphEvent::ToggleLayer(Layer::Buildings));
		let scene = build_scene(&hidden, 800.0, 600.0);
		for id in scene.node_ids() {
			let node = &hidden.graph.nodes()[hidden.graph.find(id).unwrap()];
			assert_ne!(node.node_type(), NodeType::Building);
		}
		for id in scene.edge_ids() {
			let edge = hidden.graph.edges().iter().find(|e| e.id == id).unwrap();
			let (source, target) = hidden.graph.endpoints(edge).unwrap();
			assert_ne!(source.node_type(), NodeType::Building);
			assert_ne!(target.node_type(), NodeType::Building);
		}
		assert_eq!(scene.node_ids().count(), 60);

		let restored = hidden.reduce(GraphEvent::ToggleLayer(Layer::Buildings));
		assert_eq!(build_scene(&restored, 800.0, 600.0), full);
	}

	#[test]
	fn ring_precedes_highlighted_shape() {
		let state = small()
			.reduce(GraphEvent::Select(Some(0)))
			.reduce(GraphEvent::PointerMove(Point::new(150.0, 100.0)));
		let scene = build_scene(&state, 800.0, 600.0);
		let rings: Vec<usize> = scene
			.commands
			.iter()
			.enumerate()
			.filter(|(_, c)| matches!(c, DrawCommand::Ring { .. }))
			.map(|(i, _)| i)
			.collect();
		assert_eq!(rings.len(), 2);
		for i in rings {
			assert!(matches!(scene.commands[i + 1], DrawCommand::Node { .. }));
		}
		assert!(scene.commands.contains(&DrawCommand::Ring {
			center: Point::new(100.0, 100.0),
			radius: 13.0,
		}));
	}

	#[test]
	fn labels_for_large_or_selected_nodes() {
		let scene = build_scene(&small(), 800.0, 600.0);
		assert!(!scene
			.commands
			.iter()
			.any(|c| matches!(c, DrawCommand::Label { .. })));

		let mut zoomed = small();
		zoomed.view.zoom = 1.5;
		let scene = build_scene(&zoomed, 800.0, 600.0);
		let labels: Vec<&DrawCommand> = scene
			.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Label { .. }))
			.collect();
		assert_eq!(labels.len(), 1);
		assert_eq!(
			labels[0],
			&DrawCommand::Label {
				text: "Building building-0".into(),
				at: Point::new(150.0, 150.0 + 12.0 + LABEL_OFFSET),
				font_px: 10.0,
			}
		);

		let selected = small().reduce(GraphEvent::Select(Some(1)));
		let scene = build_scene(&selected, 800.0, 600.0);
		assert!(scene.commands.contains(&DrawCommand::Label {
			text: "Sensor sensor-0".into(),
			at: Point::new(150.0, 100.0 + 6.0 + LABEL_OFFSET),
			font_px: 10.0,
		}));
	}

	#[test]
	fn label_font_floors_then_scales_with_size() {
		let font_of = |state: &CanvasState, text: &str| {
			build_scene(state, 800.0, 600.0)
				.commands
				.into_iter()
				.find_map(|c| match c {
					DrawCommand::Label { text: t, font_px, .. } if t == text => Some(font_px),
					_ => None,
				})
		};

		let selected = small().reduce(GraphEvent::Select(Some(1)));
		assert_eq!(font_of(&selected, "Sensor sensor-0"), Some(LABEL_MIN_FONT_PX));

		let mut zoomed = small();
		zoomed.view.zoom = 3.0;
		assert_eq!(font_of(&zoomed, "Building building-0"), Some(12.0));
		assert_eq!(font_of(&zoomed, "Sensor sensor-0"), Some(LABEL_MIN_FONT_PX.max(9.0)));
	}
}
