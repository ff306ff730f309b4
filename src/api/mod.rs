//! Chart-level API: configuration records, per-kind layouts and the
//! controller that drives one chart instance.

mod bar_layout;
mod chart_config;
mod chart_controller;
mod decorations;
mod formatters;
mod layout_engine;
mod line_layout;
mod padding_resolver;
mod pie_layout;
mod scatter_layout;

pub use bar_layout::{BarGeometry, BarLayout};
pub use chart_config::{
    AxisOptions, BarChartConfig, LineChartConfig, MarkerOptions, PieChartConfig,
    ScatterChartConfig, ScrubOptions, TitleOptions, TooltipOptions,
};
pub use chart_controller::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartController, ChartSnapshot, DataUpdate,
};
pub use formatters::{CategoryFormatter, PointFormatter, ValueFormatter, format_compact_number};
pub use layout_engine::{ChartLayout, ChartLayoutEngine};
pub use line_layout::{LineGeometry, LineLayout};
pub use padding_resolver::{
    Padding, PaddingRequest, PaddingTuning, resolve_padding, resolve_plot_area,
};
pub use pie_layout::{PieGeometry, PieLayout};
pub use scatter_layout::{ScatterDot, ScatterGeometry, ScatterLayout};
