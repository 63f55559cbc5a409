//! Dashboard Page
//!
//! The single dashboard view: sentiment trend, industry selector cards,
//! and the factor drill-down for the selected industry.

use leptos::*;

use crate::api;
use crate::components::{FactorList, IndustryCard, RadarChart, TrendChart};
use crate::data::INDUSTRIES;
use crate::state::DashboardState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    // Try to refresh the built-in tables from the API on mount. A failed
    // round-trip keeps the sample data on screen.
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_series().await {
                Ok(records) if !records.is_empty() => {
                    state.series.set(records);
                    state.live_data.set(true);
                }
                Ok(_) => {
                    web_sys::console::warn_1(&"API returned an empty series".into());
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("Sentiment fetch failed, using built-in data: {}", e).into(),
                    );
                }
            }

            if state.live_data.get() {
                match api::fetch_details().await {
                    Ok(details) if !details.is_empty() => {
                        state.details.set(details);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        state.show_error(&format!("因子数据加载失败: {}", e));
                    }
                }
            }

            state.loading.set(false);
        });
    });

    let state_for_title = state.clone();

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
            // Main trend chart
            <div class="lg:col-span-2 bg-slate-900/50 border border-slate-800 rounded-xl p-6 backdrop-blur-sm">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">"各行业景气度趋势"</h2>
                    {move || {
                        if state.loading.get() {
                            view! {
                                <span class="text-sm text-slate-400">"加载中..."</span>
                            }
                            .into_view()
                        } else {
                            view! {}.into_view()
                        }
                    }}
                </div>
                <TrendChart />
            </div>

            // Industry selector cards
            <div class="space-y-4">
                {INDUSTRIES
                    .iter()
                    .map(|&config| view! { <IndustryCard config=config /> })
                    .collect::<Vec<_>>()}
            </div>

            // Drill-down: radar chart and factor detail
            <div class="lg:col-span-3 bg-slate-900/50 border border-slate-800 rounded-xl p-6 backdrop-blur-sm">
                <div class="mb-8">
                    <h2 class="text-xl font-semibold">
                        {move || state_for_title.selected_industry.get()} " - 因子贡献下钻"
                    </h2>
                    <p class="text-sm text-slate-400 mt-1">"分析组成行业景气度的核心因子权重"</p>
                </div>
                <div class="flex flex-col md:flex-row items-center justify-around gap-8">
                    <div class="w-full md:w-1/2">
                        <RadarChart />
                    </div>
                    <div class="w-full md:w-1/3">
                        <FactorList />
                    </div>
                </div>
            </div>
        </div>
    }
}
