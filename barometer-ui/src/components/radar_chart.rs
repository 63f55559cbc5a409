//! Radar Chart Component
//!
//! Factor-weight radar for the selected industry using HTML5 Canvas.
//! The radial domain is pinned to [0, 1]; the polygon is filled with the
//! selected industry's color.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::data::{industry_color, FactorWeight};
use crate::state::DashboardState;

/// Factor radar chart component
#[component]
pub fn RadarChart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the selection or the detail table changes
    create_effect(move |_| {
        let factors = state.radar_data();
        let color = industry_color(&state.selected_industry.get());

        if let Some(canvas) = canvas_ref.get() {
            draw_radar(&canvas, &factors, color);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="400"
            height="350"
            class="w-full max-w-md mx-auto"
        />
    }
}

/// Draw the radar chart on canvas
fn draw_radar(canvas: &HtmlCanvasElement, factors: &[FactorWeight], color: &str) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = (width.min(height) / 2.0) - 50.0;

    // Clear canvas
    ctx.set_fill_style(&"#0f172a".into()); // slate-950
    ctx.fill_rect(0.0, 0.0, width, height);

    if factors.is_empty() {
        ctx.set_fill_style(&"#64748b".into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("暂无因子数据", cx - 42.0, cy);
        return;
    }

    let n = factors.len();
    // First axis points straight up; the rest follow clockwise
    let angle_of = |i: usize| -PI / 2.0 + (i as f64 / n as f64) * 2.0 * PI;
    // Weight domain is [0, 1]
    let point_at = |i: usize, value: f64| {
        let angle = angle_of(i);
        let r = radius * value.clamp(0.0, 1.0);
        (cx + r * angle.cos(), cy + r * angle.sin())
    };

    // Grid rings at 0.25, 0.5, 0.75, 1.0
    ctx.set_stroke_style(&"#334155".into()); // slate-700
    ctx.set_line_width(1.0);
    for ring in 1..=4 {
        let level = ring as f64 / 4.0;
        ctx.begin_path();
        for i in 0..=n {
            let (x, y) = point_at(i % n, level);
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
    }

    // Spokes and axis labels
    ctx.set_fill_style(&"#94a3b8".into()); // slate-400
    ctx.set_font("12px sans-serif");
    for (i, factor) in factors.iter().enumerate() {
        let (x, y) = point_at(i, 1.0);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        ctx.line_to(x, y);
        ctx.stroke();

        let (lx, ly) = point_at(i, 1.15);
        let _ = ctx.fill_text(&factor.name, lx - 32.0, ly + 4.0);
    }

    // Value polygon
    ctx.set_stroke_style(&color.into());
    ctx.set_fill_style(&color.into());
    ctx.set_line_width(2.0);
    ctx.set_global_alpha(0.5);
    ctx.begin_path();
    for (i, factor) in factors.iter().enumerate() {
        let (x, y) = point_at(i, factor.value);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
    ctx.fill();
    ctx.set_global_alpha(1.0);
    ctx.stroke();

    // Vertex markers
    for (i, factor) in factors.iter().enumerate() {
        let (x, y) = point_at(i, factor.value);
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, PI * 2.0);
        ctx.fill();
    }
}
