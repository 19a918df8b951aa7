//! Interactive energy-district graph explorer (Leptos CSR).

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// `rand` on wasm32 needs the `js` backend enabled.
use getrandom as _;
#[cfg(test)]
use wasm_bindgen_test as _;

// Modules
pub mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Browser entry point: logging, then mount [`App`] on `<body>`.
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
	init_logging();
	leptos::mount::mount_to_body(App);
}

/// An app router which renders the district graph and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="District Graph Explorer" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
