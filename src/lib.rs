//! Celestia - "coming soon" landing page
//!
//! A server-rendered Leptos page with a countdown to launch, light/dark
//! theming, decorative particle and pointer effects and a simulated email
//! signup, hydrated into an interactive experience in the browser.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
