use serde::{Deserialize, Serialize};

use crate::animation::{AnimationTuning, Easing};
use crate::core::{ScrubMode, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{CategoryFormatter, PaddingTuning, PointFormatter, ValueFormatter};

/// Axis lines, tick labels and grid shared by cartesian charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_x_labels: bool,
    pub show_y_labels: bool,
    pub show_grid: bool,
    pub axis_color: String,
    pub label_color: String,
    pub grid_color: String,
    pub label_size: f64,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            show_x_axis: true,
            show_y_axis: true,
            show_x_labels: true,
            show_y_labels: true,
            show_grid: true,
            axis_color: "rgba(255, 255, 255, 0.3)".to_owned(),
            label_color: "rgba(255, 255, 255, 0.6)".to_owned(),
            grid_color: "rgba(255, 255, 255, 0.1)".to_owned(),
            label_size: 10.0,
            x_tick_count: 5,
            y_tick_count: 5,
        }
    }
}

impl AxisOptions {
    /// Everything hidden; only the series itself is drawn.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show_x_axis: false,
            show_y_axis: false,
            show_x_labels: false,
            show_y_labels: false,
            show_grid: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> ChartResult<()> {
        for color in [&self.axis_color, &self.label_color, &self.grid_color] {
            Color::parse(color)?;
        }
        validate_font_size("axis label size", self.label_size)?;
        if self.show_x_labels && self.x_tick_count == 0 {
            return Err(ChartError::InvalidConfig(
                "x tick count must be >= 1 when x labels are shown".to_owned(),
            ));
        }
        if self.show_y_labels && self.y_tick_count == 0 {
            return Err(ChartError::InvalidConfig(
                "y tick count must be >= 1 when y labels are shown".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleOptions {
    pub title: Option<String>,
    pub title_color: String,
    pub title_size: f64,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub axis_title_color: String,
    pub axis_title_size: f64,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            title: None,
            title_color: "#ffffff".to_owned(),
            title_size: 16.0,
            x_axis_title: None,
            y_axis_title: None,
            axis_title_color: "rgba(255, 255, 255, 0.7)".to_owned(),
            axis_title_size: 12.0,
        }
    }
}

impl TitleOptions {
    fn validate(&self) -> ChartResult<()> {
        Color::parse(&self.title_color)?;
        Color::parse(&self.axis_title_color)?;
        validate_font_size("title size", self.title_size)?;
        validate_font_size("axis title size", self.axis_title_size)
    }
}

/// Tooltip drawn next to the scrub indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub show: bool,
    pub background_color: String,
    pub text_color: String,
    pub font_size: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            show: true,
            background_color: "rgba(0, 0, 0, 0.8)".to_owned(),
            text_color: "#ffffff".to_owned(),
            font_size: 12.0,
        }
    }
}

impl TooltipOptions {
    fn validate(&self) -> ChartResult<()> {
        Color::parse(&self.background_color)?;
        Color::parse(&self.text_color)?;
        validate_font_size("tooltip font size", self.font_size)
    }
}

/// Opt-in pointer scrubbing. Disabled charts ignore pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubOptions {
    pub enabled: bool,
    pub mode: ScrubMode,
    pub show_indicator: bool,
    pub indicator_radius: f64,
}

impl Default for ScrubOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: ScrubMode::NearestPoint,
            show_indicator: true,
            indicator_radius: 6.0,
        }
    }
}

impl ScrubOptions {
    fn validate(self) -> ChartResult<()> {
        validate_non_negative("indicator radius", self.indicator_radius)
    }
}

/// Data-point circles on a line chart. `color: None` reuses the line color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerOptions {
    pub show: bool,
    pub radius: f64,
    pub color: Option<String>,
    pub border_color: String,
    pub border_width: f64,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            show: false,
            radius: 4.0,
            color: None,
            border_color: "#ffffff".to_owned(),
            border_width: 2.0,
        }
    }
}

impl MarkerOptions {
    fn validate(&self) -> ChartResult<()> {
        if let Some(color) = &self.color {
            Color::parse(color)?;
        }
        Color::parse(&self.border_color)?;
        validate_non_negative("marker radius", self.radius)?;
        validate_non_negative("marker border width", self.border_width)
    }
}

/// Line graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_series_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// `0` draws straight segments, `1` the full centripetal Catmull-Rom.
    #[serde(default = "default_tension")]
    pub tension: f64,
    #[serde(default = "default_true")]
    pub gradient: bool,
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default)]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub axes: AxisOptions,
    #[serde(default)]
    pub titles: TitleOptions,
    #[serde(default)]
    pub markers: MarkerOptions,
    #[serde(default)]
    pub tooltip: TooltipOptions,
    #[serde(default)]
    pub scrub: ScrubOptions,
    #[serde(default)]
    pub padding: PaddingTuning,
    #[serde(skip)]
    pub x_formatter: ValueFormatter,
    #[serde(skip)]
    pub y_formatter: ValueFormatter,
    #[serde(skip)]
    pub tooltip_formatter: PointFormatter,
}

impl LineChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            color: default_series_color(),
            stroke_width: default_stroke_width(),
            tension: default_tension(),
            gradient: true,
            fill_opacity: default_fill_opacity(),
            animate: true,
            animation: AnimationTuning::default(),
            axes: AxisOptions::default(),
            titles: TitleOptions::default(),
            markers: MarkerOptions::default(),
            tooltip: TooltipOptions::default(),
            scrub: ScrubOptions::default(),
            padding: PaddingTuning::default(),
            x_formatter: ValueFormatter::default(),
            y_formatter: ValueFormatter::default(),
            tooltip_formatter: PointFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn with_scrubbing(mut self, mode: ScrubMode) -> Self {
        self.scrub.enabled = true;
        self.scrub.mode = mode;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.titles.x_axis_title = Some(x.into());
        self.titles.y_axis_title = Some(y.into());
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxisOptions) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: MarkerOptions) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_x_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.x_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_y_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.y_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_tooltip_formatter(mut self, formatter: PointFormatter) -> Self {
        self.tooltip_formatter = formatter;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        Color::parse(&self.color)?;
        validate_positive("stroke width", self.stroke_width)?;
        validate_unit("tension", self.tension)?;
        validate_unit("fill opacity", self.fill_opacity)?;
        validate_animation(self.animation)?;
        self.axes.validate()?;
        self.titles.validate()?;
        self.markers.validate()?;
        self.tooltip.validate()?;
        self.scrub.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input)
    }
}

/// Bar chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub viewport: Viewport,
    /// Cycled per bar unless a point carries its own color.
    #[serde(default = "default_bar_palette")]
    pub colors: Vec<String>,
    #[serde(default = "default_padding_inner")]
    pub padding_inner: f64,
    #[serde(default = "default_padding_outer")]
    pub padding_outer: f64,
    #[serde(default = "default_true")]
    pub rounded_top: bool,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    #[serde(default = "default_true")]
    pub gradient: bool,
    #[serde(default = "default_bar_gradient_end")]
    pub gradient_end_color: String,
    #[serde(default)]
    pub show_values: bool,
    #[serde(default = "default_value_label_color")]
    pub value_label_color: String,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default = "default_short_animation")]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub axes: AxisOptions,
    #[serde(default)]
    pub titles: TitleOptions,
    #[serde(default)]
    pub tooltip: TooltipOptions,
    #[serde(default)]
    pub scrub: ScrubOptions,
    #[serde(default)]
    pub padding: PaddingTuning,
    #[serde(skip)]
    pub x_formatter: CategoryFormatter,
    #[serde(skip)]
    pub y_formatter: ValueFormatter,
    #[serde(skip)]
    pub value_formatter: ValueFormatter,
    #[serde(skip)]
    pub tooltip_formatter: PointFormatter,
}

impl BarChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            colors: default_bar_palette(),
            padding_inner: default_padding_inner(),
            padding_outer: default_padding_outer(),
            rounded_top: true,
            corner_radius: default_corner_radius(),
            gradient: true,
            gradient_end_color: default_bar_gradient_end(),
            show_values: false,
            value_label_color: default_value_label_color(),
            animate: true,
            animation: default_short_animation(),
            axes: AxisOptions::default(),
            titles: TitleOptions::default(),
            tooltip: TooltipOptions::default(),
            scrub: ScrubOptions::default(),
            padding: PaddingTuning::default(),
            x_formatter: CategoryFormatter::default(),
            y_formatter: ValueFormatter::default(),
            value_formatter: ValueFormatter::default(),
            tooltip_formatter: PointFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner;
        self.padding_outer = outer;
        self
    }

    #[must_use]
    pub fn with_show_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn with_scrubbing(mut self, enabled: bool) -> Self {
        self.scrub.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxisOptions) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn with_x_formatter(mut self, formatter: CategoryFormatter) -> Self {
        self.x_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_y_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.y_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.value_formatter = formatter;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        if self.colors.is_empty() {
            return Err(ChartError::InvalidConfig(
                "bar palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.colors {
            Color::parse(color)?;
        }
        Color::parse(&self.gradient_end_color)?;
        Color::parse(&self.value_label_color)?;
        validate_unit("band padding inner", self.padding_inner)?;
        validate_non_negative("band padding outer", self.padding_outer)?;
        validate_non_negative("corner radius", self.corner_radius)?;
        validate_animation(self.animation)?;
        self.axes.validate()?;
        self.titles.validate()?;
        self.tooltip.validate()?;
        self.scrub.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input)
    }
}

/// Pie and donut configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieChartConfig {
    pub viewport: Viewport,
    /// `0` draws a pie, anything larger a donut.
    #[serde(default)]
    pub inner_radius: f64,
    #[serde(default = "default_pad_angle")]
    pub pad_angle: f64,
    #[serde(default)]
    pub show_labels: bool,
    #[serde(default = "default_value_label_color")]
    pub label_color: String,
    #[serde(default = "default_pie_label_size")]
    pub label_size: f64,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default)]
    pub animation: AnimationTuning,
    #[serde(skip)]
    pub value_formatter: ValueFormatter,
}

impl PieChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            inner_radius: 0.0,
            pad_angle: default_pad_angle(),
            show_labels: false,
            label_color: default_value_label_color(),
            label_size: default_pie_label_size(),
            animate: true,
            animation: AnimationTuning::default(),
            value_formatter: ValueFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    #[must_use]
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        validate_non_negative("inner radius", self.inner_radius)?;
        validate_non_negative("pad angle", self.pad_angle)?;
        Color::parse(&self.label_color)?;
        validate_font_size("pie label size", self.label_size)?;
        validate_animation(self.animation)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input)
    }
}

/// Scatter plot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterChartConfig {
    pub viewport: Viewport,
    /// Dot radius in pixels.
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    #[serde(default = "default_series_color")]
    pub point_color: String,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default = "default_pop_animation")]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub axes: AxisOptions,
    #[serde(default)]
    pub titles: TitleOptions,
    #[serde(default)]
    pub tooltip: TooltipOptions,
    #[serde(default)]
    pub scrub: ScrubOptions,
    #[serde(default)]
    pub padding: PaddingTuning,
    #[serde(skip)]
    pub x_formatter: ValueFormatter,
    #[serde(skip)]
    pub y_formatter: ValueFormatter,
    #[serde(skip)]
    pub tooltip_formatter: PointFormatter,
}

impl ScatterChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            point_size: default_point_size(),
            point_color: default_series_color(),
            animate: true,
            animation: default_pop_animation(),
            axes: AxisOptions::default(),
            titles: TitleOptions::default(),
            tooltip: TooltipOptions::default(),
            scrub: ScrubOptions::default(),
            padding: PaddingTuning::default(),
            x_formatter: ValueFormatter::default(),
            y_formatter: ValueFormatter::default(),
            tooltip_formatter: PointFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    #[must_use]
    pub fn with_point_color(mut self, color: impl Into<String>) -> Self {
        self.point_color = color.into();
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn with_scrubbing(mut self, enabled: bool) -> Self {
        self.scrub.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxisOptions) -> Self {
        self.axes = axes;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        validate_non_negative("point size", self.point_size)?;
        Color::parse(&self.point_color)?;
        validate_animation(self.animation)?;
        self.axes.validate()?;
        self.titles.validate()?;
        self.tooltip.validate()?;
        self.scrub.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input)
    }
}

fn parse_config_json<T: serde::de::DeserializeOwned>(input: &str) -> ChartResult<T> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config json: {e}")))
}

/// Zero-size viewports are accepted and lay out as empty geometry; only
/// non-finite extents are rejected.
fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

fn validate_positive(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )))
    }
}

fn validate_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

fn validate_unit(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{name} must be within [0, 1]"
        )))
    }
}

fn validate_font_size(name: &str, value: f64) -> ChartResult<()> {
    validate_positive(name, value)
}

fn validate_animation(tuning: AnimationTuning) -> ChartResult<()> {
    validate_non_negative("animation duration", tuning.duration_ms)?;
    if let Easing::BackOut { overshoot } = tuning.easing {
        validate_non_negative("back-out overshoot", overshoot)?;
    }
    Ok(())
}

fn default_series_color() -> String {
    "#00d2ff".to_owned()
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_tension() -> f64 {
    1.0
}

fn default_fill_opacity() -> f64 {
    0.2
}

fn default_true() -> bool {
    true
}

fn default_bar_palette() -> Vec<String> {
    vec!["#00d2ff".to_owned(), "#3a7bd5".to_owned()]
}

fn default_padding_inner() -> f64 {
    0.2
}

fn default_padding_outer() -> f64 {
    0.1
}

fn default_corner_radius() -> f64 {
    8.0
}

fn default_bar_gradient_end() -> String {
    "#ffffff50".to_owned()
}

fn default_value_label_color() -> String {
    "#ffffff".to_owned()
}

fn default_pad_angle() -> f64 {
    0.02
}

fn default_pie_label_size() -> f64 {
    12.0
}

fn default_point_size() -> f64 {
    8.0
}

fn default_short_animation() -> AnimationTuning {
    AnimationTuning::new(1_000.0, Easing::ExpOut)
}

fn default_pop_animation() -> AnimationTuning {
    AnimationTuning::new(1_000.0, Easing::BackOut { overshoot: 1.5 })
}

#[cfg(test)]
mod tests {
    use super::{BarChartConfig, LineChartConfig, ScatterChartConfig};
    use crate::animation::Easing;
    use crate::core::Viewport;
    use crate::error::ChartError;

    #[test]
    fn defaults_validate() {
        let viewport = Viewport::new(343.0, 200.0);
        LineChartConfig::new(viewport).validate().expect("line");
        BarChartConfig::new(viewport).validate().expect("bar");
        ScatterChartConfig::new(viewport).validate().expect("scatter");
    }

    #[test]
    fn rejects_bad_color_and_tension() {
        let viewport = Viewport::new(343.0, 200.0);
        let err = LineChartConfig::new(viewport)
            .with_color("not-a-color")
            .validate()
            .expect_err("color");
        assert!(matches!(err, ChartError::InvalidColor(_)));

        let err = LineChartConfig::new(viewport)
            .with_tension(1.5)
            .validate()
            .expect_err("tension");
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }

    #[test]
    fn json_fills_defaults() {
        let config = ScatterChartConfig::from_json_str(
            r#"{"viewport":{"width":300.0,"height":200.0},"point_size":6.0}"#,
        )
        .expect("parse");
        assert_eq!(config.point_size, 6.0);
        assert_eq!(config.point_color, "#00d2ff");
        assert_eq!(config.animation.easing, Easing::BackOut { overshoot: 1.5 });
    }
}
