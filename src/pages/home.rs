use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::graph_canvas::GraphCanvas;

/// District graph page. `?seed=<u64>` pins the generated graph.
#[component]
pub fn Home() -> impl IntoView {
	let seed = use_query_map()
		.with_untracked(|query| query.get("seed").and_then(|s| s.parse::<u64>().ok()));

	view! {
		<div class="graph-page">
			<header class="graph-header">
				<h1>"District Knowledge Graph"</h1>
				<p class="subtitle">
					"Click a node for details. Scroll to zoom. Drag the background to pan."
				</p>
			</header>
			<GraphCanvas width=800.0 height=600.0 seed=seed />
		</div>
	}
}
