//! # client
//!
//! Leptos + WASM frontend for Surfer. Supplies the browser side of the
//! `session` crate: `fetch` transport, `localStorage` credential slot and
//! router-aware navigation, plus the route guard component and pages.
//!
//! Browser-only code is gated behind the `csr` feature.

pub mod app;
pub mod components;
pub mod pages;
pub mod platform;
pub mod state;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("client: console logger unavailable: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
