//! Trend Chart Component
//!
//! Multi-line sentiment chart using HTML5 Canvas. One line per industry in
//! its configured color. The vertical axis is pinned to [-1, 1] no matter
//! what the data holds.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::data::{SeriesRecord, INDUSTRIES, SCORE_MAX, SCORE_MIN};
use crate::state::DashboardState;

/// Sentiment trend chart component
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the series changes
    create_effect(move |_| {
        let series = state.series.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_trend(&canvas, &series);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {INDUSTRIES
                    .iter()
                    .map(|config| {
                        view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="w-3 h-3 rounded-full"
                                    style=format!("background-color: {}", config.color)
                                />
                                <span class="text-sm text-slate-300">{config.name}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// Draw the trend chart on canvas
fn draw_trend(canvas: &HtmlCanvasElement, series: &[SeriesRecord]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#0f172a".into()); // slate-950
    ctx.fill_rect(0.0, 0.0, width, height);

    // Fixed score domain: [-1, 1] regardless of data
    let y_min = SCORE_MIN;
    let y_max = SCORE_MAX;
    let to_y = |score: f64| margin_top + ((y_max - score) / (y_max - y_min)) * chart_height;

    // Horizontal grid lines at -1, -0.5, 0, 0.5, 1
    ctx.set_stroke_style(&"#334155".into()); // slate-700
    ctx.set_line_width(1.0);

    for i in 0..=4 {
        let value = y_max - (i as f64 / 4.0) * (y_max - y_min);
        let y = to_y(value);

        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#94a3b8".into()); // slate-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 8.0, y + 4.0);
    }

    if series.is_empty() {
        ctx.set_fill_style(&"#64748b".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("暂无数据", width / 2.0 - 32.0, height / 2.0);
        return;
    }

    let step = if series.len() > 1 {
        chart_width / (series.len() - 1) as f64
    } else {
        0.0
    };
    let to_x = |i: usize| margin_left + i as f64 * step;

    // One line per industry
    for config in INDUSTRIES {
        ctx.set_stroke_style(&config.color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();

        let mut started = false;
        for (i, record) in series.iter().enumerate() {
            let Some(score) = record.scores.get(config.name) else {
                continue;
            };
            let (x, y) = (to_x(i), to_y(*score));

            if started {
                ctx.line_to(x, y);
            } else {
                ctx.move_to(x, y);
                started = true;
            }
        }
        ctx.stroke();

        // Point markers
        ctx.set_fill_style(&config.color.into());
        for (i, record) in series.iter().enumerate() {
            if let Some(score) = record.scores.get(config.name) {
                ctx.begin_path();
                let _ = ctx.arc(to_x(i), to_y(*score), 3.0, 0.0, std::f64::consts::PI * 2.0);
                ctx.fill();
            }
        }
    }

    // Month labels
    ctx.set_fill_style(&"#94a3b8".into());
    ctx.set_font("12px sans-serif");
    for (i, record) in series.iter().enumerate() {
        let _ = ctx.fill_text(&record.date, to_x(i) - 24.0, height - 12.0);
    }
}
