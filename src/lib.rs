//! chart-motion: geometry engine for animated mobile charts.
//!
//! The crate computes everything a drawing surface needs to render line,
//! bar, pie and scatter charts: scales, smoothed curves, morphs between
//! datasets, axis ticks and scrub resolution. Rasterization and the
//! animation clock stay with the host; geometry is handed over as a
//! [`render::RenderFrame`] of a small primitive set.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    BarChartConfig, ChartController, ChartLayout, ChartLayoutEngine, LineChartConfig,
    PieChartConfig, ScatterChartConfig,
};
pub use error::{ChartError, ChartResult};
