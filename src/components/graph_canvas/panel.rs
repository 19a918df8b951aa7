use leptos::prelude::*;

use super::state::{CanvasState, GraphEvent};
use super::types::{EdgeType, GraphSummary, NodeType, Shape};

const MAX_SEARCH_RESULTS: usize = 10;

const LEGEND_TYPES: [NodeType; 6] = [
	NodeType::Building,
	NodeType::Transformer,
	NodeType::Sensor,
	NodeType::Pv,
	NodeType::Battery,
	NodeType::EvCharger,
];

/// Side panel mirroring the selected node, plus search results.
#[component]
pub fn NodePanel(
	/// Shared canvas state; search results dispatch selections into it.
	state: RwSignal<CanvasState>,
) -> impl IntoView {
	let selected = Memo::new(move |_| state.with(|s| s.selection.selected));
	let search = Memo::new(move |_| state.with(|s| s.search.clone()));
	let graph = state.with_untracked(|s| s.graph.clone());

	let details = move || {
		let Some((idx, node)) = selected
			.get()
			.and_then(|idx| graph.node(idx).map(|node| (idx, node)))
		else {
			return view! {
				<div class="node-placeholder">
					<p>"Click on a node to view details"</p>
					<p class="hint">"Use mouse wheel to zoom, drag to pan"</p>
				</div>
			}
			.into_any();
		};

		let rows = node
			.details
			.rows()
			.into_iter()
			.map(|(key, value)| {
				view! {
					<div class="detail-row">
						<span class="detail-key">{format!("{key}:")}</span>
						<span class="detail-value">{value}</span>
					</div>
				}
			})
			.collect_view();
		let connections = graph
			.connections(idx)
			.into_iter()
			.map(|(edge, other)| {
				let (label, kind) = (other.label.clone(), edge.kind.tag());
				view! {
					<li class="connection">
						<div class="connection-label">{label}</div>
						<div class="connection-kind">{format!("{kind} connection")}</div>
					</li>
				}
			})
			.collect_view();

		view! {
			<div class="node-details">
				<h5>{node.label.clone()}</h5>
				<p class="node-type">{node.node_type().label()}</p>
				<div class="detail-rows">{rows}</div>
				<h6>"Connected Nodes"</h6>
				<ul class="connections">{connections}</ul>
			</div>
		}
		.into_any()
	};

	let results = move || {
		let term = search.get();
		if term.is_empty() {
			return None;
		}
		let matches = state.with_untracked(|s| s.search_results());
		let total = matches.len();
		let items = state.with_untracked(|s| {
			matches
				.into_iter()
				.take(MAX_SEARCH_RESULTS)
				.filter_map(|idx| {
					let node = s.graph.node(idx)?;
					Some((idx, node.label.clone(), node.node_type().label()))
				})
				.collect::<Vec<_>>()
		});
		let items = items
			.into_iter()
			.map(|(idx, label, kind)| {
				view! {
					<button
						class="search-result"
						on:click=move |_| state.update(|s| s.apply(GraphEvent::Select(Some(idx))))
					>
						<div class="search-result-label">{label}</div>
						<div class="search-result-kind">{kind}</div>
					</button>
				}
			})
			.collect_view();

		Some(view! {
			<div class="search-results">
				<h6>{format!("Search Results ({total})")}</h6>
				{items}
			</div>
		})
	};

	view! {
		<aside class="node-panel">
			<h4>"Node Details"</h4>
			{details}
			{results}
		</aside>
	}
}

fn swatch_style(shape: Shape) -> (&'static str, &'static str) {
	match shape {
		Shape::Circle => ("50%", "none"),
		Shape::Diamond => ("0", "rotate(45deg)"),
		Shape::Square | Shape::Triangle | Shape::Hexagon => ("0", "none"),
	}
}

fn line_style(kind: EdgeType) -> &'static str {
	match kind {
		EdgeType::Data => "dashed",
		EdgeType::Ownership => "dotted",
		EdgeType::Electrical | EdgeType::Spatial => "solid",
	}
}

/// Node and connection types with their counts in the current graph.
#[component]
pub fn GraphLegend(
	/// Counts of the generated graph.
	summary: GraphSummary,
) -> impl IntoView {
	let nodes = LEGEND_TYPES
		.into_iter()
		.map(|node_type| {
			let (radius, transform) = swatch_style(node_type.shape());
			let text = format!("{} ({})", node_type.label(), summary.count(node_type));
			view! {
				<div class="legend-item">
					<div
						class="legend-swatch"
						style:background-color=node_type.color()
						style:border-radius=radius
						style:transform=transform
					></div>
					<span>{text}</span>
				</div>
			}
		})
		.collect_view();

	let connections = [
		(EdgeType::Electrical, "#64748b"),
		(EdgeType::Data, "#a855f7"),
		(EdgeType::Ownership, "#10b981"),
	]
	.into_iter()
	.map(|(kind, color)| {
		let text = format!("{} ({})", kind.tag(), summary.edge_count(kind));
		view! {
			<div class="legend-item">
				<div
					class="legend-line"
					style:border-top=format!("2px {} {color}", line_style(kind))
				></div>
				<span>{text}</span>
			</div>
		}
	})
	.collect_view();

	view! {
		<div class="graph-legend">
			<h5>"Legend"</h5>
			<div class="legend-grid">{nodes}</div>
			<h6>{format!("Connection Types ({} total)", summary.edges)}</h6>
			<div class="legend-grid">{connections}</div>
		</div>
	}
}
