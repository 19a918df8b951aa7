use std::sync::Arc;

use log::debug;

use super::types::{GraphData, Layer, Node, Point};

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom factor for a wheel step away from the user.
pub const WHEEL_OUT: f64 = 0.9;
/// Zoom factor for a wheel step toward the user.
pub const WHEEL_IN: f64 = 1.1;
/// Zoom factor of the zoom-out button.
pub const BUTTON_OUT: f64 = 0.8;
/// Zoom factor of the zoom-in button.
pub const BUTTON_IN: f64 = 1.25;

/// `screen = (virtual + pan) * zoom`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Scale factor, kept in `[MIN_ZOOM, MAX_ZOOM]`.
	pub zoom: f64,
	/// Offset in virtual units, applied before scaling.
	pub pan: Point,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan: Point::ORIGIN,
		}
	}
}

impl ViewTransform {
	/// Virtual coordinates to screen pixels.
	pub fn to_screen(&self, p: Point) -> Point {
		Point::new((p.x + self.pan.x) * self.zoom, (p.y + self.pan.y) * self.zoom)
	}

	/// Screen pixels to virtual coordinates; inverse of [`ViewTransform::to_screen`].
	pub fn to_virtual(&self, p: Point) -> Point {
		Point::new(p.x / self.zoom - self.pan.x, p.y / self.zoom - self.pan.y)
	}

	/// Multiply the zoom and clamp it.
	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
	}

	/// Shift by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.pan.x += dx / self.zoom;
		self.pan.y += dy / self.zoom;
	}
}

/// Background pan gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
	/// A pan is in progress.
	pub active: bool,
	/// Last pointer position seen during the drag, in screen pixels.
	pub last: Point,
}

/// Node indices into [`GraphData::nodes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	/// Node shown in the detail panel.
	pub selected: Option<usize>,
	/// Node under the pointer.
	pub hovered: Option<usize>,
}

impl Selection {
	/// Whether `idx` gets the highlight ring.
	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.selected == Some(idx) || self.hovered == Some(idx)
	}
}

/// Per-layer show/hide flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerVisibility {
	/// [`Layer::Buildings`]
	pub buildings: bool,
	/// [`Layer::Grid`]
	pub grid: bool,
	/// [`Layer::Sensors`]
	pub sensors: bool,
	/// [`Layer::Renewables`]
	pub renewables: bool,
	/// [`Layer::Storage`]
	pub storage: bool,
	/// [`Layer::Mobility`]
	pub mobility: bool,
}

impl Default for LayerVisibility {
	fn default() -> Self {
		Self {
			buildings: true,
			grid: true,
			sensors: true,
			renewables: true,
			storage: true,
			mobility: true,
		}
	}
}

impl LayerVisibility {
	fn flag_mut(&mut self, layer: Layer) -> &mut bool {
		match layer {
			Layer::Buildings => &mut self.buildings,
			Layer::Grid => &mut self.grid,
			Layer::Sensors => &mut self.sensors,
			Layer::Renewables => &mut self.renewables,
			Layer::Storage => &mut self.storage,
			Layer::Mobility => &mut self.mobility,
		}
	}

	/// Current flag for `layer`.
	pub fn is_visible(&self, layer: Layer) -> bool {
		match layer {
			Layer::Buildings => self.buildings,
			Layer::Grid => self.grid,
			Layer::Sensors => self.sensors,
			Layer::Renewables => self.renewables,
			Layer::Storage => self.storage,
			Layer::Mobility => self.mobility,
		}
	}

	/// Flip the flag for `layer`.
	pub fn toggle(&mut self, layer: Layer) {
		let flag = self.flag_mut(layer);
		*flag = !*flag;
	}

	/// Whether `node` is drawn.
	pub fn shows(&self, node: &Node) -> bool {
		self.is_visible(node.layer())
	}
}

/// Input the canvas reacts to. Pointer positions are canvas-relative pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// Selects the node under the pointer, or starts a pan.
	PointerDown(Point),
	/// Pans while dragging, otherwise updates the hover.
	PointerMove(Point),
	/// Ends a pan.
	PointerUp,
	/// Ends a pan and clears the hover.
	PointerLeave,
	/// Wheel step; positive `delta_y` zooms out.
	Wheel {
		/// Vertical scroll delta reported by the browser.
		delta_y: f64,
	},
	/// Zoom-in button.
	ZoomIn,
	/// Zoom-out button.
	ZoomOut,
	/// Back to zoom 1 and no pan.
	ResetView,
	/// Show or hide one layer.
	ToggleLayer(Layer),
	/// Replace the search term.
	Search(String),
	/// Select a node by index, or clear the selection.
	Select(Option<usize>),
}

/// Everything a paint depends on. Graph data is shared and never mutated.
#[derive(Clone, Debug)]
pub struct CanvasState {
	/// Generated once per mount.
	pub graph: Arc<GraphData>,
	/// Pan and zoom.
	pub view: ViewTransform,
	/// Background pan gesture.
	pub drag: DragState,
	/// Selected and hovered nodes.
	pub selection: Selection,
	/// Layer flags.
	pub layers: LayerVisibility,
	/// Current search term.
	pub search: String,
}

impl CanvasState {
	/// Default view, nothing selected, every layer visible.
	pub fn new(graph: GraphData) -> Self {
		Self {
			graph: Arc::new(graph),
			view: ViewTransform::default(),
			drag: DragState::default(),
			selection: Selection::default(),
			layers: LayerVisibility::default(),
			search: String::new(),
		}
	}

	/// Pure transition: consume a state and an event, return the next state.
	pub fn reduce(mut self, event: GraphEvent) -> Self {
		self.apply(event);
		self
	}

	/// In-place form of [`CanvasState::reduce`].
	pub fn apply(&mut self, event: GraphEvent) {
		match event {
			GraphEvent::PointerDown(p) => match self.node_at(p) {
				Some(idx) => self.select(Some(idx)),
				None => {
					self.drag = DragState {
						active: true,
						last: p,
					};
				}
			},
			GraphEvent::PointerMove(p) => {
				if self.drag.active {
					let (dx, dy) = (p.x - self.drag.last.x, p.y - self.drag.last.y);
					self.view.pan_by(dx, dy);
					self.drag.last = p;
				} else {
					self.selection.hovered = self.node_at(p);
				}
			}
			GraphEvent::PointerUp => self.drag.active = false,
			GraphEvent::PointerLeave => {
				self.drag.active = false;
				self.selection.hovered = None;
			}
			GraphEvent::Wheel { delta_y } => {
				self.view
					.zoom_by(if delta_y > 0.0 { WHEEL_OUT } else { WHEEL_IN });
			}
			GraphEvent::ZoomIn => self.view.zoom_by(BUTTON_IN),
			GraphEvent::ZoomOut => self.view.zoom_by(BUTTON_OUT),
			GraphEvent::ResetView => self.view = ViewTransform::default(),
			GraphEvent::ToggleLayer(layer) => self.layers.toggle(layer),
			GraphEvent::Search(term) => self.search = term,
			GraphEvent::Select(idx) => self.select(idx),
		}
	}

	fn select(&mut self, idx: Option<usize>) {
		let idx = idx.filter(|&i| i < self.graph.nodes().len());
		if self.selection.selected != idx {
			debug!(
				"Selected node {:?}",
				idx.and_then(|i| self.graph.node(i)).map(|n| &n.id)
			);
		}
		self.selection.selected = idx;
	}

	/// First node, in generation order, whose virtual extent contains the
	/// screen point. Layer visibility does not affect picking.
	pub fn node_at(&self, screen: Point) -> Option<usize> {
		let p = self.view.to_virtual(screen);
		self.graph
			.nodes()
			.iter()
			.position(|node| node.position.distance(p) <= node.size)
	}

	/// The node shown in the detail panel.
	pub fn selected_node(&self) -> Option<&Node> {
		self.selection.selected.and_then(|i| self.graph.node(i))
	}

	/// Indices matching the current search term.
	pub fn search_results(&self) -> Vec<usize> {
		self.graph.search(&self.search)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::types::tests::{building, sensor};

	const EPS: f64 = 1e-9;

	fn state() -> CanvasState {
		CanvasState::new(GraphData::new(
			vec![
				building("building-0", 100.0, 100.0),
				sensor("sensor-0", 300.0, 200.0),
			],
			Vec::new(),
		))
	}

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
	}

	#[test]
	fn forward_and_inverse_round_trip() {
		let views = [
			ViewTransform::default(),
			ViewTransform {
				zoom: 0.1,
				pan: Point::new(-40.0, 12.5),
			},
			ViewTransform {
				zoom: 2.7,
				pan: Point::new(300.0, -80.0),
			},
		];
		for view in views {
			for p in [Point::new(0.0, 0.0), Point::new(123.4, -56.7), Point::new(800.0, 600.0)] {
				assert!(close(view.to_virtual(view.to_screen(p)), p));
				assert!(close(view.to_screen(view.to_virtual(p)), p));
			}
		}
	}

	#[test]
	fn zoom_stays_clamped() {
		let mut s = state();
		for _ in 0..50 {
			s.apply(GraphEvent::Wheel { delta_y: -1.0 });
			assert!(s.view.zoom <= MAX_ZOOM);
		}
		assert_eq!(s.view.zoom, MAX_ZOOM);
		for _ in 0..20 {
			s.apply(GraphEvent::ZoomIn);
		}
		assert_eq!(s.view.zoom, MAX_ZOOM);
		for _ in 0..80 {
			s.apply(GraphEvent::Wheel { delta_y: 3.0 });
			s.apply(GraphEvent::ZoomOut);
			assert!(s.view.zoom >= MIN_ZOOM);
		}
		assert_eq!(s.view.zoom, MIN_ZOOM);
	}

	#[test]
	fn node_center_hits_at_any_zoom() {
		let mut s = state();
		s.view.pan = Point::new(25.0, -10.0);
		for zoom in [0.1, 0.5, 1.0, 2.0, 3.0] {
			s.view.zoom = zoom;
			let center = s.view.to_screen(Point::new(300.0, 200.0));
			assert_eq!(s.node_at(center), Some(1));
		}
	}

	#[test]
	fn hit_radius_is_virtual_size() {
		let mut s = state();
		s.view.zoom = 2.0;
		let edge = s.view.to_screen(Point::new(110.0, 100.0));
		let outside = s.view.to_screen(Point::new(110.5, 100.0));
		assert_eq!(s.node_at(edge), Some(0));
		assert_eq!(s.node_at(outside), None);
	}

	#[test]
	fn hidden_layers_are_still_hit() {
		let s = state().reduce(GraphEvent::ToggleLayer(Layer::Buildings));
		let center = Point::new(100.0, 100.0);
		assert_eq!(s.node_at(center), Some(0));

		let s = s.reduce(GraphEvent::PointerDown(center));
		assert_eq!(s.selection.selected, Some(0));
		assert!(!s.drag.active);
	}

	#[test]
	fn overlapping_nodes_pick_first_regardless_of_layers() {
		let mut covered = sensor("sensor-0", 100.0, 100.0);
		covered.size = 6.0;
		let s = CanvasState::new(GraphData::new(
			vec![building("building-0", 100.0, 100.0), covered],
			Vec::new(),
		))
		.reduce(GraphEvent::ToggleLayer(Layer::Buildings));
		assert_eq!(s.node_at(Point::new(101.0, 101.0)), Some(0));
	}

	#[test]
	fn pointer_down_on_node_selects_without_drag() {
		let s = state().reduce(GraphEvent::PointerDown(Point::new(102.0, 99.0)));
		assert_eq!(s.selection.selected, Some(0));
		assert!(!s.drag.active);
	}

	#[test]
	fn drag_pans_incrementally() {
		let s = state()
			.reduce(GraphEvent::ZoomIn)
			.reduce(GraphEvent::PointerDown(Point::new(500.0, 500.0)));
		assert!(s.drag.active);
		assert_eq!(s.selection.selected, None);

		let s = s
			.reduce(GraphEvent::PointerMove(Point::new(510.0, 505.0)))
			.reduce(GraphEvent::PointerMove(Point::new(535.0, 520.0)));
		assert!(close(s.view.pan, Point::new(35.0 / 1.25, 20.0 / 1.25)));
		assert_eq!(s.drag.last, Point::new(535.0, 520.0));

		let s = s.reduce(GraphEvent::PointerUp);
		assert!(!s.drag.active);
		let pan = s.view.pan;
		let s = s.reduce(GraphEvent::PointerMove(Point::new(0.0, 0.0)));
		assert_eq!(s.view.pan, pan);
	}

	#[test]
	fn dragged_content_follows_pointer() {
		let s = state()
			.reduce(GraphEvent::ZoomOut)
			.reduce(GraphEvent::PointerDown(Point::new(10.0, 10.0)))
			.reduce(GraphEvent::PointerMove(Point::new(60.0, 30.0)));
		let before = ViewTransform {
			zoom: s.view.zoom,
			pan: Point::ORIGIN,
		}
		.to_screen(Point::new(100.0, 100.0));
		let after = s.view.to_screen(Point::new(100.0, 100.0));
		assert!(close(after, Point::new(before.x + 50.0, before.y + 20.0)));
	}

	#[test]
	fn hover_tracks_pointer_without_selecting() {
		let s = state().reduce(GraphEvent::PointerMove(Point::new(300.0, 200.0)));
		assert_eq!(s.selection.hovered, Some(1));
		assert_eq!(s.selection.selected, None);
		let s = s.reduce(GraphEvent::PointerLeave);
		assert_eq!(s.selection.hovered, None);
	}

	#[test]
	fn reset_view_keeps_selection() {
		let s = state()
			.reduce(GraphEvent::Select(Some(1)))
			.reduce(GraphEvent::Wheel { delta_y: -1.0 })
			.reduce(GraphEvent::PointerDown(Point::new(700.0, 700.0)))
			.reduce(GraphEvent::PointerMove(Point::new(640.0, 720.0)))
			.reduce(GraphEvent::PointerUp)
			.reduce(GraphEvent::ResetView);
		assert_eq!(s.view, ViewTransform::default());
		assert_eq!(s.selection.selected, Some(1));
	}

	#[test]
	fn layer_toggle_flips_one_flag() {
		let s = state().reduce(GraphEvent::ToggleLayer(Layer::Storage));
		assert!(!s.layers.storage);
		assert!(s.layers.grid);
		let s = s.reduce(GraphEvent::ToggleLayer(Layer::Storage));
		assert_eq!(s.layers, LayerVisibility::default());
	}

	#[test]
	fn select_out_of_range_clears() {
		let s = state()
			.reduce(GraphEvent::Select(Some(0)))
			.reduce(GraphEvent::Select(Some(42)));
		assert_eq!(s.selection.selected, None);
	}

	#[test]
	fn search_results_follow_term() {
		let s = state().reduce(GraphEvent::Search("sensor".into()));
		assert_eq!(s.search_results(), vec![1]);
		let s = s.reduce(GraphEvent::Search("zzz".into()));
		assert!(s.search_results().is_empty());
	}
}
