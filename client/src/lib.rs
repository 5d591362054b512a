//! # client
//!
//! Leptos + WASM frontend for albumranker.
//!
//! This crate contains pages, the drag-and-drop `AlbumTable` component, the
//! headless reorder model and clipboard exporter it is built on, application
//! state, and REST helpers for the server API.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
