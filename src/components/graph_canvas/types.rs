use std::collections::HashMap;

/// A position in virtual (graph) coordinates or screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// `(0, 0)`
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Entity categories of the district graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
	/// Residential, commercial or industrial building.
	Building,
	/// Substation transformer feeding buildings.
	Transformer,
	/// Distribution feeder.
	Feeder,
	/// Metering or environmental sensor.
	Sensor,
	/// Rooftop solar array.
	Pv,
	/// Battery storage.
	Battery,
	/// Electric vehicle charger.
	EvCharger,
}

impl NodeType {
	/// Machine tag, also matched by search.
	pub fn tag(self) -> &'static str {
		match self {
			NodeType::Building => "building",
			NodeType::Transformer => "transformer",
			NodeType::Feeder => "feeder",
			NodeType::Sensor => "sensor",
			NodeType::Pv => "pv",
			NodeType::Battery => "battery",
			NodeType::EvCharger => "ev_charger",
		}
	}

	/// Human readable name for panels and the legend.
	pub fn label(self) -> &'static str {
		match self {
			NodeType::Building => "Building",
			NodeType::Transformer => "Transformer",
			NodeType::Feeder => "Feeder",
			NodeType::Sensor => "Sensor",
			NodeType::Pv => "Solar PV",
			NodeType::Battery => "Battery",
			NodeType::EvCharger => "EV Charger",
		}
	}

	/// Outline drawn on the canvas.
	pub fn shape(self) -> Shape {
		match self {
			NodeType::Building => Shape::Square,
			NodeType::Transformer => Shape::Diamond,
			NodeType::Pv => Shape::Triangle,
			NodeType::Battery => Shape::Hexagon,
			NodeType::Feeder | NodeType::Sensor | NodeType::EvCharger => Shape::Circle,
		}
	}

	/// Layer that toggles this type.
	pub fn layer(self) -> Layer {
		match self {
			NodeType::Building => Layer::Buildings,
			NodeType::Transformer | NodeType::Feeder => Layer::Grid,
			NodeType::Sensor => Layer::Sensors,
			NodeType::Pv => Layer::Renewables,
			NodeType::Battery => Layer::Storage,
			NodeType::EvCharger => Layer::Mobility,
		}
	}

	/// Fill color, CSS hex.
	pub fn color(self) -> &'static str {
		match self {
			NodeType::Building => "#3b82f6",
			NodeType::Transformer => "#ef4444",
			NodeType::Feeder => "#64748b",
			NodeType::Sensor => "#8b5cf6",
			NodeType::Pv => "#eab308",
			NodeType::Battery => "#10b981",
			NodeType::EvCharger => "#f97316",
		}
	}
}

/// Drawn outline of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	/// Axis aligned, side `size`.
	Square,
	/// Rhombus with vertices `size` from the center.
	Diamond,
	/// Apex up.
	Triangle,
	/// Regular hexagon of radius `size`.
	Hexagon,
	/// Radius `size`.
	Circle,
}

/// Visibility group a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
	/// Buildings.
	Buildings,
	/// Transformers and feeders.
	Grid,
	/// Sensors.
	Sensors,
	/// Solar PV.
	Renewables,
	/// Batteries.
	Storage,
	/// EV chargers.
	Mobility,
}

impl Layer {
	/// Control bar order.
	pub const ALL: [Layer; 6] = [
		Layer::Buildings,
		Layer::Grid,
		Layer::Sensors,
		Layer::Renewables,
		Layer::Storage,
		Layer::Mobility,
	];

	/// Toggle button text.
	pub fn label(self) -> &'static str {
		match self {
			Layer::Buildings => "Buildings",
			Layer::Grid => "Grid",
			Layer::Sensors => "Sensors",
			Layer::Renewables => "Renewables",
			Layer::Storage => "Storage",
			Layer::Mobility => "Mobility",
		}
	}
}

/// Relationship kinds between nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeType {
	/// Transformer supplies a building.
	Electrical,
	/// Sensor reports about a building.
	Data,
	/// Proximity relation; never generated, still drawable.
	Spatial,
	/// Building owns an asset.
	Ownership,
}

impl EdgeType {
	/// Lowercase name used in panels and the legend.
	pub fn tag(self) -> &'static str {
		match self {
			EdgeType::Electrical => "electrical",
			EdgeType::Data => "data",
			EdgeType::Spatial => "spatial",
			EdgeType::Ownership => "ownership",
		}
	}

	/// Canvas line dash segments; empty means solid.
	pub fn dash(self) -> &'static [f64] {
		match self {
			EdgeType::Data => &[5.0, 5.0],
			EdgeType::Ownership => &[10.0, 5.0, 2.0, 5.0],
			EdgeType::Electrical | EdgeType::Spatial => &[],
		}
	}
}

/// Building use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildingCategory {
	/// Housing.
	Residential,
	/// Offices and retail.
	Commercial,
	/// Production sites.
	Industrial,
}

/// Quantity a sensor reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measurement {
	/// Degrees Celsius.
	Temperature,
	/// Kilowatts.
	Power,
	/// Volts.
	Voltage,
	/// Amperes.
	Current,
}

/// Descriptive, type specific attributes. Never used for layout.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeDetails {
	/// [`NodeType::Building`]
	Building {
		/// Building use.
		category: BuildingCategory,
		/// Annual demand.
		demand_kwh: u32,
		/// Construction year.
		year: u32,
		/// Floor area.
		area_m2: u32,
	},
	/// [`NodeType::Transformer`]
	Transformer {
		/// Rated capacity.
		capacity_kva: f64,
		/// Current load as a share of capacity.
		load_pct: u32,
		/// Voltage level, e.g. `"11kV/400V"`.
		voltage: &'static str,
	},
	/// [`NodeType::Feeder`]
	Feeder {
		/// Voltage level.
		voltage: &'static str,
	},
	/// [`NodeType::Sensor`]
	Sensor {
		/// Reported quantity.
		measurement: Measurement,
		/// Whether the sensor is online.
		active: bool,
		/// ISO 8601 time of the last reading. Synthetic graphs stamp every
		/// sensor with the generation time.
		last_reading: String,
	},
	/// [`NodeType::Pv`]
	Pv {
		/// Peak capacity.
		capacity_kw: f64,
		/// Current output as a share of capacity.
		generation_pct: u32,
		/// Panel efficiency.
		efficiency_pct: u32,
	},
	/// [`NodeType::Battery`]
	Battery {
		/// Usable capacity.
		capacity_kwh: f64,
		/// State of charge.
		soc_pct: u32,
		/// Charge cycles so far.
		cycles: u32,
	},
	/// [`NodeType::EvCharger`]
	EvCharger {
		/// Charging power.
		power_kw: f64,
		/// Free for a new session.
		available: bool,
		/// Charging sessions today.
		sessions: u32,
	},
}

impl NodeDetails {
	/// Type implied by the variant.
	pub fn node_type(&self) -> NodeType {
		match self {
			NodeDetails::Building { .. } => NodeType::Building,
			NodeDetails::Transformer { .. } => NodeType::Transformer,
			NodeDetails::Feeder { .. } => NodeType::Feeder,
			NodeDetails::Sensor { .. } => NodeType::Sensor,
			NodeDetails::Pv { .. } => NodeType::Pv,
			NodeDetails::Battery { .. } => NodeType::Battery,
			NodeDetails::EvCharger { .. } => NodeType::EvCharger,
		}
	}

	/// Label/value pairs for the detail panel.
	pub fn rows(&self) -> Vec<(&'static str, String)> {
		match self {
			NodeDetails::Building {
				category,
				demand_kwh,
				year,
				area_m2,
			} => vec![
				("Category", format!("{category:?}")),
				("Demand", format!("{demand_kwh} kWh")),
				("Year", year.to_string()),
				("Area", format!("{area_m2} m²")),
			],
			NodeDetails::Transformer {
				capacity_kva,
				load_pct,
				voltage,
			} => vec![
				("Capacity", format!("{capacity_kva:.1} kVA")),
				("Load", format!("{load_pct}%")),
				("Voltage", voltage.to_string()),
			],
			NodeDetails::Feeder { voltage } => vec![("Voltage", voltage.to_string())],
			NodeDetails::Sensor {
				measurement,
				active,
				last_reading,
			} => vec![
				("Measurement", format!("{measurement:?}")),
				("Status", String::from(if *active { "Active" } else { "Offline" })),
				("Last reading", last_reading.clone()),
			],
			NodeDetails::Pv {
				capacity_kw,
				generation_pct,
				efficiency_pct,
			} => vec![
				("Capacity", format!("{capacity_kw:.1} kW")),
				("Generation", format!("{generation_pct}%")),
				("Efficiency", format!("{efficiency_pct}%")),
			],
			NodeDetails::Battery {
				capacity_kwh,
				soc_pct,
				cycles,
			} => vec![
				("Capacity", format!("{capacity_kwh:.1} kWh")),
				("State of charge", format!("{soc_pct}%")),
				("Cycles", cycles.to_string()),
			],
			NodeDetails::EvCharger {
				power_kw,
				available,
				sessions,
			} => vec![
				("Power", format!("{power_kw:.1} kW")),
				("Status", String::from(if *available { "Available" } else { "In Use" })),
				("Sessions", sessions.to_string()),
			],
		}
	}
}

/// A graph entity with a fixed virtual position.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique within a graph, e.g. `building-3`.
	pub id: String,
	/// Display name, matched by search.
	pub label: String,
	/// Virtual coordinates.
	pub position: Point,
	/// Half-extent in virtual units, used for drawing and hit testing.
	pub size: f64,
	/// Type specific attributes; the variant determines the node type.
	pub details: NodeDetails,
}

impl Node {
	/// See [`NodeDetails::node_type`].
	pub fn node_type(&self) -> NodeType {
		self.details.node_type()
	}

	/// Fill color of the node type.
	pub fn color(&self) -> &'static str {
		self.node_type().color()
	}

	/// Layer of the node type.
	pub fn layer(&self) -> Layer {
		self.node_type().layer()
	}
}

/// Directed relation between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// `<source>-<target>`
	pub id: String,
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Relationship kind; selects the dash pattern.
	pub kind: EdgeType,
	/// Stroke width in screen pixels before zoom.
	pub weight: f64,
	/// Stroke color, CSS hex.
	pub color: String,
}

impl Edge {
	/// Edge from `source` to `target`, id derived from both.
	pub fn new(source: &Node, target: &Node, kind: EdgeType, weight: f64, color: &str) -> Self {
		Self {
			id: format!("{}-{}", source.id, target.id),
			source: source.id.clone(),
			target: target.id.clone(),
			kind,
			weight,
			color: color.to_string(),
		}
	}
}

/// Immutable node/edge set with an id lookup.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
}

impl GraphData {
	/// Later nodes with a duplicate id are unreachable through [`GraphData::find`].
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			index.entry(node.id.clone()).or_insert(i);
		}
		Self {
			nodes,
			edges,
			index,
		}
	}

	/// Nodes in generation order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in generation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node by index.
	pub fn node(&self, idx: usize) -> Option<&Node> {
		self.nodes.get(idx)
	}

	/// Index of the node with `id`.
	pub fn find(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Resolves both endpoints of an edge, `None` if either is missing.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		let source = self.find(&edge.source).and_then(|i| self.node(i))?;
		let target = self.find(&edge.target).and_then(|i| self.node(i))?;
		Some((source, target))
	}

	/// Edges touching `idx` paired with the node on the other end.
	pub fn connections(&self, idx: usize) -> Vec<(&Edge, &Node)> {
		let Some(node) = self.node(idx) else {
			return Vec::new();
		};
		self.edges
			.iter()
			.filter_map(|edge| {
				let other = if edge.source == node.id {
					&edge.target
				} else if edge.target == node.id {
					&edge.source
				} else {
					return None;
				};
				self.find(other)
					.and_then(|i| self.node(i))
					.map(|other| (edge, other))
			})
			.collect()
	}

	/// Case-insensitive substring match against label and type tag.
	pub fn search(&self, query: &str) -> Vec<usize> {
		let query = query.to_lowercase();
		self.nodes
			.iter()
			.enumerate()
			.filter(|(_, node)| {
				node.label.to_lowercase().contains(&query)
					|| node.node_type().tag().contains(&query)
			})
			.map(|(i, _)| i)
			.collect()
	}

	/// Counts for the legend.
	pub fn summary(&self) -> GraphSummary {
		let mut summary = GraphSummary {
			nodes: self.nodes.len(),
			edges: self.edges.len(),
			..GraphSummary::default()
		};
		for node in &self.nodes {
			*summary.by_node_type.entry(node.node_type()).or_default() += 1;
		}
		for edge in &self.edges {
			*summary.by_edge_type.entry(edge.kind).or_default() += 1;
		}
		summary
	}
}

/// Node and edge totals, overall and per type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSummary {
	/// Total nodes.
	pub nodes: usize,
	/// Total edges.
	pub edges: usize,
	/// Nodes per type; absent types are zero.
	pub by_node_type: HashMap<NodeType, usize>,
	/// Edges per kind; absent kinds are zero.
	pub by_edge_type: HashMap<EdgeType, usize>,
}

impl GraphSummary {
	/// Nodes of `node_type`.
	pub fn count(&self, node_type: NodeType) -> usize {
		self.by_node_type.get(&node_type).copied().unwrap_or(0)
	}

	/// Edges of `kind`.
	pub fn edge_count(&self, kind: EdgeType) -> usize {
		self.by_edge_type.get(&kind).copied().unwrap_or(0)
	}
}
