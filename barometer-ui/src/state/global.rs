//! Global Dashboard State
//!
//! Reactive state management using Leptos signals. Initialized with the
//! built-in sample tables so the dashboard renders fully before (or
//! without) an API round-trip.

use leptos::*;
use std::collections::HashMap;

use crate::data::{self, FactorWeight, SeriesRecord, DEFAULT_INDUSTRY};

/// Global dashboard state provided to all components
#[derive(Clone)]
pub struct DashboardState {
    /// Currently selected industry name
    pub selected_industry: RwSignal<String>,
    /// Monthly sentiment series, chronological
    pub series: RwSignal<Vec<SeriesRecord>>,
    /// Factor breakdown per industry name
    pub details: RwSignal<HashMap<String, Vec<FactorWeight>>>,
    /// Whether a live API backs the current tables
    pub live_data: RwSignal<bool>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        selected_industry: create_rw_signal(DEFAULT_INDUSTRY.to_string()),
        series: create_rw_signal(data::sample_series()),
        details: create_rw_signal(data::sample_details()),
        live_data: create_rw_signal(false),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

impl DashboardState {
    /// Switch the selected industry
    ///
    /// Any name is accepted; downstream lookups for names outside the
    /// enumerated set derive empty data rather than faulting.
    pub fn select_industry(&self, name: &str) {
        self.selected_industry.set(name.to_string());
    }

    /// Factor list for the current selection, in table order
    pub fn radar_data(&self) -> Vec<FactorWeight> {
        let details = self.details.get();
        data::radar_data(&details, &self.selected_industry.get())
    }

    /// Latest score for an industry from the last series record
    pub fn latest_score(&self, name: &str) -> Option<f64> {
        data::latest_score(&self.series.get(), name)
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
