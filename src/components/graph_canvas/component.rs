use leptos::prelude::*;
use log::warn;
use web_sys::{MouseEvent, WheelEvent};

use super::generate::{generate_random, generate_seeded};
use super::panel::{GraphLegend, NodePanel};
use super::render;
use super::scene::build_scene;
use super::state::{CanvasState, GraphEvent};
use super::types::{Layer, Point};

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive district graph: canvas, control bar, detail panel and legend.
///
/// The graph is generated once per mount. Pass `seed` for a reproducible graph.
#[component]
pub fn GraphCanvas(
	/// Canvas width in pixels.
	#[prop(default = 800.0)]
	width: f64,
	/// Canvas height in pixels.
	#[prop(default = 600.0)]
	height: f64,
	/// Fixed RNG seed.
	#[prop(default = None)]
	seed: Option<u64>,
) -> impl IntoView {
	let generated_at = String::from(js_sys::Date::new_0().to_iso_string());
	let graph = match seed {
		Some(seed) => generate_seeded(width, height, &generated_at, seed),
		None => generate_random(width, height, &generated_at),
	};
	let summary = graph.summary();
	let state = RwSignal::new(CanvasState::new(graph));
	let dispatch = move |event: GraphEvent| state.update(|s| s.apply(event));
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	// Repaints on every state change; the canvas may not be mounted yet.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let scene = state.with(|s| build_scene(s, width, height));
		if let Err(err) = render::paint(&canvas, &scene) {
			warn!("Skipping graph frame: {err}");
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(p) = pointer_position(canvas_ref, &ev) {
			dispatch(GraphEvent::PointerDown(p));
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = pointer_position(canvas_ref, &ev) {
			dispatch(GraphEvent::PointerMove(p));
		}
	};
	let on_mouseup = move |_: MouseEvent| dispatch(GraphEvent::PointerUp);
	let on_mouseleave = move |_: MouseEvent| dispatch(GraphEvent::PointerLeave);
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		dispatch(GraphEvent::Wheel {
			delta_y: ev.delta_y(),
		});
	};

	let dragging = Memo::new(move |_| state.with(|s| s.drag.active));
	let zoom_pct = Memo::new(move |_| state.with(|s| (s.view.zoom * 100.0).round() as i64));

	let layer_toggles = Layer::ALL
		.into_iter()
		.map(move |layer| {
			let visible = Memo::new(move |_| state.with(|s| s.layers.is_visible(layer)));
			view! {
				<button
					class="layer-toggle"
					class:active=move || visible.get()
					on:click=move |_| dispatch(GraphEvent::ToggleLayer(layer))
				>
					{move || if visible.get() { "◉ " } else { "○ " }}
					{layer.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-canvas">
			<div class="graph-controls">
				<div class="graph-controls-left">
					<input
						type="text"
						class="graph-search"
						placeholder="Search nodes..."
						prop:value=move || state.with(|s| s.search.clone())
						on:input=move |ev| dispatch(GraphEvent::Search(event_target_value(&ev)))
					/>
					<div class="graph-layers">
						<span class="graph-layers-title">"Layers:"</span>
						{layer_toggles}
					</div>
				</div>
				<div class="graph-zoom">
					<button title="Zoom out" on:click=move |_| dispatch(GraphEvent::ZoomOut)>
						"−"
					</button>
					<span class="graph-zoom-level">{move || format!("{}%", zoom_pct.get())}</span>
					<button title="Zoom in" on:click=move |_| dispatch(GraphEvent::ZoomIn)>
						"+"
					</button>
					<button title="Reset view" on:click=move |_| dispatch(GraphEvent::ResetView)>
						"⟲"
					</button>
				</div>
			</div>

			<div class="graph-body">
				<canvas
					node_ref=canvas_ref
					class="graph-surface"
					width=width.to_string()
					height=height.to_string()
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style:cursor=move || if dragging.get() { "grabbing" } else { "grab" }
				/>
				<NodePanel state=state />
			</div>

			<GraphLegend summary=summary />
		</div>
	}
}
