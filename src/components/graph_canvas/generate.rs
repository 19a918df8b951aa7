use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{
	BuildingCategory, Edge, EdgeType, GraphData, Measurement, Node, NodeDetails, NodeType, Point,
};

const BUILDING_CATEGORIES: [BuildingCategory; 3] = [
	BuildingCategory::Residential,
	BuildingCategory::Commercial,
	BuildingCategory::Industrial,
];

const MEASUREMENTS: [Measurement; 4] = [
	Measurement::Temperature,
	Measurement::Power,
	Measurement::Voltage,
	Measurement::Current,
];

/// How many nodes of each generated type to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeCounts {
	/// [`NodeType::Building`]
	pub buildings: usize,
	/// [`NodeType::Transformer`]
	pub transformers: usize,
	/// [`NodeType::Sensor`]
	pub sensors: usize,
	/// [`NodeType::Pv`]
	pub pv: usize,
	/// [`NodeType::Battery`]
	pub batteries: usize,
	/// [`NodeType::EvCharger`]
	pub ev_chargers: usize,
}

impl Default for NodeCounts {
	fn default() -> Self {
		Self {
			buildings: 50,
			transformers: 5,
			sensors: 20,
			pv: 15,
			batteries: 8,
			ev_chargers: 12,
		}
	}
}

impl NodeCounts {
	/// Sum over all types.
	pub fn total(&self) -> usize {
		self.buildings + self.transformers + self.sensors + self.pv + self.batteries + self.ev_chargers
	}
}

/// Generator knobs; the defaults describe the stock district.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
	/// Nodes per type.
	pub counts: NodeCounts,
	/// Distance kept from every canvas border when placing nodes.
	pub margin: f64,
	/// Sensors attach to a random building strictly closer than this.
	pub sensor_radius: f64,
	/// PV and batteries attach to the first building strictly closer than this.
	pub ownership_radius: f64,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			counts: NodeCounts::default(),
			margin: 50.0,
			sensor_radius: 100.0,
			ownership_radius: 80.0,
		}
	}
}

/// Generate a district graph using ambient randomness.
pub fn generate_random(width: f64, height: f64, generated_at: &str) -> GraphData {
	generate(
		&GenerationConfig::default(),
		width,
		height,
		generated_at,
		&mut rand::thread_rng(),
	)
}

/// Generate a reproducible district graph.
pub fn generate_seeded(width: f64, height: f64, generated_at: &str, seed: u64) -> GraphData {
	generate(
		&GenerationConfig::default(),
		width,
		height,
		generated_at,
		&mut StdRng::seed_from_u64(seed),
	)
}

/// Place nodes uniformly inside the canvas (minus margin) and connect them.
///
/// Edge rules run after every node exists, in order: each building to its
/// nearest transformer, each sensor to a random building in range, each PV or
/// battery to the first building in range. Missing neighbours yield no edge.
///
/// `generated_at` is an ISO 8601 timestamp recorded as every sensor's last
/// reading.
pub fn generate<R: Rng + ?Sized>(
	config: &GenerationConfig,
	width: f64,
	height: f64,
	generated_at: &str,
	rng: &mut R,
) -> GraphData {
	let mut nodes = Vec::with_capacity(config.counts.total());
	let place = |rng: &mut R| {
		let margin = config.margin;
		Point::new(
			rng.r#gen::<f64>() * (width - 2.0 * margin) + margin,
			rng.r#gen::<f64>() * (height - 2.0 * margin) + margin,
		)
	};

	for i in 0..config.counts.buildings {
		let position = place(rng);
		nodes.push(Node {
			id: format!("building-{i}"),
			label: format!("Building {}", i + 1),
			position,
			size: 8.0 + rng.r#gen::<f64>() * 12.0,
			details: NodeDetails::Building {
				category: BUILDING_CATEGORIES[rng.gen_range(0..BUILDING_CATEGORIES.len())],
				demand_kwh: 50 + rng.gen_range(0..=200),
				year: 1960 + rng.gen_range(0..60),
				area_m2: 100 + rng.gen_range(0..=500),
			},
		});
	}
	for i in 0..config.counts.transformers {
		let position = place(rng);
		nodes.push(Node {
			id: format!("transformer-{i}"),
			label: format!("Transformer T-{}", i + 1),
			position,
			size: 15.0,
			details: NodeDetails::Transformer {
				capacity_kva: 200.0 + rng.r#gen::<f64>() * 600.0,
				load_pct: 40 + rng.gen_range(0..=50),
				voltage: "11kV/400V",
			},
		});
	}
	for i in 0..config.counts.sensors {
		let position = place(rng);
		nodes.push(Node {
			id: format!("sensor-{i}"),
			label: format!("Sensor S-{}", i + 1),
			position,
			size: 6.0,
			details: NodeDetails::Sensor {
				measurement: MEASUREMENTS[rng.gen_range(0..MEASUREMENTS.len())],
				active: rng.gen_bool(0.9),
				last_reading: generated_at.to_string(),
			},
		});
	}
	for i in 0..config.counts.pv {
		let position = place(rng);
		nodes.push(Node {
			id: format!("pv-{i}"),
			label: format!("PV System {}", i + 1),
			position,
			size: 10.0,
			details: NodeDetails::Pv {
				capacity_kw: 5.0 + rng.r#gen::<f64>() * 20.0,
				generation_pct: rng.gen_range(0..=100),
				efficiency_pct: 85 + rng.gen_range(0..=10),
			},
		});
	}
	for i in 0..config.counts.batteries {
		let position = place(rng);
		nodes.push(Node {
			id: format!("battery-{i}"),
			label: format!("Battery {}", i + 1),
			position,
			size: 12.0,
			details: NodeDetails::Battery {
				capacity_kwh: 50.0 + rng.r#gen::<f64>() * 200.0,
				soc_pct: 20 + rng.gen_range(0..=60),
				cycles: 100 + rng.gen_range(0..=500),
			},
		});
	}
	for i in 0..config.counts.ev_chargers {
		let position = place(rng);
		nodes.push(Node {
			id: format!("ev-{i}"),
			label: format!("EV Charger {}", i + 1),
			position,
			size: 8.0,
			details: NodeDetails::EvCharger {
				power_kw: 7.0 + rng.r#gen::<f64>() * 43.0,
				available: rng.gen_bool(0.7),
				sessions: rng.gen_range(0..=50),
			},
		});
	}

	let edges = connect(config, &nodes, rng);
	info!(
		"Generated district graph: {} nodes, {} edges",
		nodes.len(),
		edges.len()
	);
	GraphData::new(nodes, edges)
}

fn of_type(nodes: &[Node], node_type: NodeType) -> Vec<&Node> {
	nodes.iter().filter(|n| n.node_type() == node_type).collect()
}

fn within<'a>(buildings: &[&'a Node], from: &Node, radius: f64) -> Vec<&'a Node> {
	buildings
		.iter()
		.copied()
		.filter(|b| from.position.distance(b.position) < radius)
		.collect()
}

fn connect<R: Rng + ?Sized>(config: &GenerationConfig, nodes: &[Node], rng: &mut R) -> Vec<Edge> {
	let buildings = of_type(nodes, NodeType::Building);
	let transformers = of_type(nodes, NodeType::Transformer);
	let mut edges = Vec::new();

	for building in &buildings {
		let mut nearest: Option<(&Node, f64)> = None;
		for &transformer in &transformers {
			let d = building.position.distance(transformer.position);
			if nearest.is_none_or(|(_, best)| d < best) {
				nearest = Some((transformer, d));
			}
		}
		if let Some((transformer, _)) = nearest {
			edges.push(Edge::new(building, transformer, EdgeType::Electrical, 1.0, "#64748b"));
		}
	}

	for sensor in of_type(nodes, NodeType::Sensor) {
		if let Some(building) = within(&buildings, sensor, config.sensor_radius).choose(rng) {
			edges.push(Edge::new(sensor, building, EdgeType::Data, 0.5, "#a855f7"));
		}
	}

	for asset in nodes
		.iter()
		.filter(|n| matches!(n.node_type(), NodeType::Pv | NodeType::Battery))
	{
		if let Some(building) = within(&buildings, asset, config.ownership_radius).first() {
			edges.push(Edge::new(asset, building, EdgeType::Ownership, 0.8, asset.color()));
		}
	}

	edges
}
