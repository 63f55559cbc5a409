//! App Root Component
//!
//! Single-view application shell with the global state provider, header,
//! and error banner.

use leptos::*;

use crate::pages::Dashboard;
use crate::state::{provide_dashboard_state, DashboardState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide dashboard state to all components
    provide_dashboard_state();

    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let state_for_footer = state.clone();

    view! {
        <div class="min-h-screen bg-slate-950 text-slate-50 p-8">
            <header class="mb-10">
                <h1 class="text-3xl font-bold bg-clip-text text-transparent bg-gradient-to-r from-blue-400 to-emerald-400">
                    "行业景气度计算引擎与展示"
                </h1>
                <p class="text-slate-400 mt-2">"基于 Rust 高性能计算引擎与交互式前端"</p>
            </header>

            <main>
                <Dashboard />
            </main>

            // Data source indicator
            <footer class="mt-10 text-sm text-slate-500">
                {move || {
                    if state_for_footer.live_data.get() {
                        "数据来源: Barometer API"
                    } else {
                        "数据来源: 内置示例数据"
                    }
                }}
            </footer>

            // Error banner
            {move || {
                state.error.get().map(|message| {
                    view! {
                        <div class="fixed bottom-4 right-4 bg-red-900/90 border border-red-700 rounded-lg px-4 py-3 text-sm">
                            {message}
                        </div>
                    }
                })
            }}
        </div>
    }
}
