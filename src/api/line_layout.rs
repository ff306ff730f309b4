use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{AnimationTuning, Morph};
use crate::core::primitives::clamp_progress;
use crate::core::{
    AxisTickPlanner, CurveBuilder, CurveGeometry, DataPoint, LinearScale, PathMeasure, PlotArea,
    Point, ScrubMode, ScrubResolver, ScrubSelection, TickSet, Viewport,
};
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, Color, LinearGradient, Paint, PathPrimitive, RenderFrame};

use super::decorations::CartesianDecor;
use super::{ChartLayout, LineChartConfig};

/// Laid-out line graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGeometry {
    /// `None` when the viewport leaves no room to plot.
    pub plot_area: Option<PlotArea>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub curve: CurveGeometry,
    /// Finite input points, in input order.
    pub points: Vec<DataPoint>,
    pub x_ticks: TickSet,
    pub y_ticks: TickSet,
}

impl LineGeometry {
    #[must_use]
    pub fn empty() -> Self {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 0.0));
        Self {
            plot_area: None,
            x_scale: scale,
            y_scale: scale,
            curve: CurveGeometry::empty(),
            points: Vec::new(),
            x_ticks: TickSet::default(),
            y_ticks: TickSet::default(),
        }
    }
}

/// Only the curve interpolates; scales, ticks and points belong to the
/// target as soon as the morph starts.
impl Morph for LineGeometry {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        let t = clamp_progress(progress);
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return target.clone();
        }
        Self {
            curve: self.curve.morph(&target.curve, t),
            ..target.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineLayout {
    config: LineChartConfig,
    decor: CartesianDecor,
    curve_builder: CurveBuilder,
    line_color: Color,
    marker_color: Color,
    marker_border_color: Color,
}

impl LineLayout {
    pub fn new(config: LineChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let line_color = Color::parse(&config.color)?;
        let marker_color = match &config.markers.color {
            Some(color) => Color::parse(color)?,
            None => line_color,
        };
        Ok(Self {
            decor: CartesianDecor::new(
                &config.axes,
                &config.titles,
                &config.tooltip,
                config.scrub,
                config.padding,
            )?,
            curve_builder: CurveBuilder::new(config.tension),
            marker_border_color: Color::parse(&config.markers.border_color)?,
            line_color,
            marker_color,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }
}

impl ChartLayout for LineLayout {
    type Datum = DataPoint;
    type Geometry = LineGeometry;

    fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    fn animate(&self) -> bool {
        self.config.animate
    }

    fn animation(&self) -> AnimationTuning {
        self.config.animation
    }

    fn scrub_mode(&self) -> Option<ScrubMode> {
        self.config.scrub.enabled.then_some(self.config.scrub.mode)
    }

    fn layout(&self, data: &[DataPoint]) -> LineGeometry {
        let Some(area) = self.decor.plot_area(self.config.viewport) else {
            debug!(points = data.len(), "line layout skipped: no plot area");
            return LineGeometry::empty();
        };

        let points: Vec<DataPoint> = data.iter().filter(|p| p.is_finite()).cloned().collect();
        if points.len() != data.len() {
            warn!(
                dropped = data.len() - points.len(),
                "dropping non-finite line points"
            );
        }

        let x_scale = LinearScale::from_values(points.iter().map(|p| p.x), (area.left, area.right));
        let y_scale = LinearScale::from_values(points.iter().map(|p| p.y), (area.bottom, area.top));
        let vertices: Vec<Point> = points
            .iter()
            .map(|p| Point::new(x_scale.map(p.x), y_scale.map(p.y)))
            .collect();
        let curve = self.curve_builder.build(&vertices, area.bottom);

        let (x_ticks, y_ticks) = if points.is_empty() {
            (TickSet::default(), TickSet::default())
        } else {
            let axes = self.decor.axes();
            (
                AxisTickPlanner::linear(x_scale, axes.x_tick_count, |v| {
                    self.config.x_formatter.format(v).unwrap_or_default()
                }),
                AxisTickPlanner::linear(y_scale, axes.y_tick_count, |v| {
                    self.config.y_formatter.format(v).unwrap_or_default()
                }),
            )
        };

        debug!(
            points = points.len(),
            plot_width = area.width(),
            plot_height = area.height(),
            segments = curve.line.draw_segment_count(),
            "line layout pass"
        );

        LineGeometry {
            plot_area: Some(area),
            x_scale,
            y_scale,
            curve,
            points,
            x_ticks,
            y_ticks,
        }
    }

    fn resolve_scrub(
        &self,
        geometry: &LineGeometry,
        mode: ScrubMode,
        pointer_x: f64,
    ) -> Option<ScrubSelection> {
        let resolver = ScrubResolver::new(&geometry.points, geometry.x_scale, geometry.y_scale);
        match mode {
            ScrubMode::NearestPoint => resolver.resolve(mode, pointer_x),
            ScrubMode::OnCurve => {
                let measure = PathMeasure::new(&geometry.curve.line);
                resolver.with_curve(&measure).resolve(mode, pointer_x)
            }
        }
    }

    fn render_frame(
        &self,
        geometry: &LineGeometry,
        reveal: f64,
        selection: Option<&ScrubSelection>,
    ) -> RenderFrame {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        let Some(area) = geometry.plot_area else {
            return frame;
        };
        let reveal = clamp_progress(reveal);

        self.decor
            .push_grid(&mut frame, area, &geometry.x_ticks, &geometry.y_ticks);
        self.decor.push_axes(&mut frame, area, area.bottom);
        self.decor
            .push_tick_labels(&mut frame, area, &geometry.x_ticks, &geometry.y_ticks);
        self.decor.push_titles(&mut frame, viewport, area);

        let curve = &geometry.curve;
        if self.config.gradient && !curve.fill.is_empty() {
            let gradient = LinearGradient::vertical(
                area.top,
                area.bottom,
                area.left,
                self.line_color,
                Color::TRANSPARENT,
            );
            frame.paths.push(PathPrimitive::fill(
                curve.fill.clone(),
                Paint::Gradient(gradient.faded(self.config.fill_opacity)),
            ));
        }

        let line = if reveal >= 1.0 {
            curve.line.clone()
        } else {
            PathMeasure::new(&curve.line).trim(0.0, reveal)
        };
        if line.draw_segment_count() > 0 {
            frame.paths.push(PathPrimitive::stroke(
                line,
                self.config.stroke_width,
                Paint::Solid(self.line_color),
            ));
        }

        let markers = &self.config.markers;
        if markers.show && reveal > 0.0 {
            for vertex in &curve.vertices {
                frame.circles.push(
                    CirclePrimitive::filled(*vertex, markers.radius, self.marker_color.faded(reveal))
                        .with_border(self.marker_border_color.faded(reveal), markers.border_width),
                );
            }
        }

        if let Some(selection) = selection {
            let tooltip = geometry.points.get(selection.index).and_then(|point| {
                let shown = DataPoint {
                    x: selection.data_value.x,
                    y: selection.data_value.y,
                    ..point.clone()
                };
                self.config.tooltip_formatter.format(&shown)
            });
            self.decor
                .push_selection(&mut frame, viewport, area, selection, self.line_color, tooltip);
        }

        frame
    }
}
