//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod factor_list;
pub mod industry_card;
pub mod radar_chart;
pub mod trend_chart;

pub use factor_list::FactorList;
pub use industry_card::IndustryCard;
pub use radar_chart::RadarChart;
pub use trend_chart::TrendChart;
