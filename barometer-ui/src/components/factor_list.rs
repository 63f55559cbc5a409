//! Factor Detail List Component
//!
//! Per-factor rows for the selected industry: name, a bar proportional to
//! the weight, and the weight as an integer percentage.

use leptos::*;

use crate::data::{bar_width, format_weight_percent, industry_color};
use crate::state::DashboardState;

/// Factor detail list component
#[component]
pub fn FactorList() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="w-full space-y-4">
            <h3 class="text-lg font-medium border-b border-slate-800 pb-2">"因子明细"</h3>
            {move || {
                let color = industry_color(&state.selected_industry.get());
                let factors = state.radar_data();

                if factors.is_empty() {
                    return view! {
                        <p class="text-slate-400 text-sm py-2">"暂无因子数据"</p>
                    }
                    .into_view();
                }

                factors
                    .into_iter()
                    .map(|factor| {
                        view! {
                            <div class="flex justify-between items-center py-2">
                                <span class="text-slate-400">{factor.name.clone()}</span>
                                <div class="flex items-center gap-3">
                                    <div class="w-32 h-2 bg-slate-800 rounded-full overflow-hidden">
                                        <div
                                            class="h-full rounded-full"
                                            style=format!(
                                                "width: {}; background-color: {}",
                                                bar_width(factor.value),
                                                color
                                            )
                                        />
                                    </div>
                                    <span class="font-mono text-sm w-8 text-right">
                                        {format_weight_percent(factor.value)}
                                    </span>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
