//! State Management
//!
//! Global dashboard state built on Leptos signals.

pub mod global;

pub use global::{provide_dashboard_state, DashboardState};
