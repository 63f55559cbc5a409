//! Industry Card Component
//!
//! Selector card showing an industry's icon, name, and latest score.
//! Clicking the card selects the industry.

use leptos::*;

use crate::data::{format_score, IndustryConfig};
use crate::state::DashboardState;

/// Industry selector card component
#[component]
pub fn IndustryCard(
    /// Display config for this card's industry
    config: IndustryConfig,
) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let state_for_selected = state.clone();
    let is_selected = create_memo(move |_| {
        state_for_selected.selected_industry.get() == config.name
    });

    // Most recent month's score, scaled x100 at one decimal place
    let state_for_score = state.clone();
    let score_text = create_memo(move |_| {
        state_for_score
            .latest_score(config.name)
            .map(format_score)
            .unwrap_or_else(|| "—".to_string())
    });

    let on_click = move |_| {
        state.select_industry(config.name);
    };

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "w-full flex items-center p-4 rounded-xl border transition-all duration-200";
                if is_selected.get() {
                    format!("{} bg-slate-800 border-blue-500/50 shadow-lg shadow-blue-500/10", base)
                } else {
                    format!("{} bg-slate-900/30 border-slate-800 hover:border-slate-700", base)
                }
            }
        >
            <div
                class="p-3 rounded-lg mr-4 text-2xl"
                style=format!("background-color: {}20", config.color)
            >
                {config.icon}
            </div>
            <div class="text-left">
                <div class="text-sm text-slate-400 font-medium">{config.name} "行业"</div>
                <div class="text-lg font-bold">"景气得分: " {move || score_text.get()}</div>
            </div>
        </button>
    }
}
