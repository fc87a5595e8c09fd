// Presentation layer - HTTP surface consumed by the chart front end
pub mod app_state;
pub mod handlers;
pub mod trend_view;
