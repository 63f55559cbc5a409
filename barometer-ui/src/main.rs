//! Barometer Dashboard
//!
//! Industry sentiment dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Six-month sentiment trend across the four tracked industries
//! - Per-industry factor breakdown with radar chart and detail list
//! - Ships with a built-in sample dataset; refreshes from the API when
//!   one is reachable
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the Barometer API via HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod data;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
