#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{AnimationTuning, Morph, morph_indexed};
use crate::core::primitives::clamp_progress;
use crate::core::{
    AxisTickPlanner, DataPoint, LinearScale, PlotArea, Point, ScrubMode, ScrubResolver,
    ScrubSelection, TickSet, Viewport,
};
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, Color, RenderFrame};

use super::decorations::{CartesianDecor, resolve_item_color};
use super::{ChartLayout, ScatterChartConfig};

/// One projected dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterDot {
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl ScatterDot {
    fn collapsed(self) -> Self {
        Self { radius: 0.0, ..self }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            index: if t < 0.5 { self.index } else { other.index },
            center: self.center.lerp(other.center, t),
            radius: self.radius + (other.radius - self.radius) * t,
            color: self.color.lerp(other.color, t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterGeometry {
    pub plot_area: Option<PlotArea>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub dots: Vec<ScatterDot>,
    /// Finite input points, parallel to `dots`.
    pub points: Vec<DataPoint>,
    pub x_ticks: TickSet,
    pub y_ticks: TickSet,
}

impl ScatterGeometry {
    #[must_use]
    pub fn empty() -> Self {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 0.0));
        Self {
            plot_area: None,
            x_scale: scale,
            y_scale: scale,
            dots: Vec::new(),
            points: Vec::new(),
            x_ticks: TickSet::default(),
            y_ticks: TickSet::default(),
        }
    }
}

/// Dots glide by index; unmatched dots shrink to or grow from zero radius.
impl Morph for ScatterGeometry {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        let t = clamp_progress(progress);
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return target.clone();
        }
        Self {
            dots: morph_indexed(
                &self.dots,
                &target.dots,
                t,
                |d| d.collapsed(),
                |a, b, t| a.lerp(*b, t),
            ),
            ..target.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatterLayout {
    config: ScatterChartConfig,
    decor: CartesianDecor,
    point_color: Color,
}

impl ScatterLayout {
    pub fn new(config: ScatterChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            decor: CartesianDecor::new(
                &config.axes,
                &config.titles,
                &config.tooltip,
                config.scrub,
                config.padding,
            )?,
            point_color: Color::parse(&config.point_color)?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    fn project_dot(
        &self,
        index: usize,
        point: &DataPoint,
        x_scale: LinearScale,
        y_scale: LinearScale,
    ) -> ScatterDot {
        ScatterDot {
            index,
            center: Point::new(x_scale.map(point.x), y_scale.map(point.y)),
            radius: self.config.point_size,
            color: resolve_item_color(point.color.as_deref(), self.point_color, index),
        }
    }

    fn project_dots(
        &self,
        points: &[DataPoint],
        x_scale: LinearScale,
        y_scale: LinearScale,
    ) -> Vec<ScatterDot> {
        #[cfg(feature = "parallel-projection")]
        {
            points
                .par_iter()
                .enumerate()
                .map(|(i, p)| self.project_dot(i, p, x_scale, y_scale))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| self.project_dot(i, p, x_scale, y_scale))
                .collect()
        }
    }
}

impl ChartLayout for ScatterLayout {
    type Datum = DataPoint;
    type Geometry = ScatterGeometry;

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
        self.config.scrub.enabled.then_some(ScrubMode::NearestPoint)
    }

    fn layout(&self, data: &[DataPoint]) -> ScatterGeometry {
        let Some(area) = self.decor.plot_area(self.config.viewport) else {
            debug!(points = data.len(), "scatter layout skipped: no plot area");
            return ScatterGeometry::empty();
        };

        let points: Vec<DataPoint> = data.iter().filter(|p| p.is_finite()).cloned().collect();
        if points.len() != data.len() {
            warn!(
                dropped = data.len() - points.len(),
                "dropping non-finite scatter points"
            );
        }

        let x_scale = LinearScale::from_values(points.iter().map(|p| p.x), (area.left, area.right));
        let y_scale = LinearScale::from_values(points.iter().map(|p| p.y), (area.bottom, area.top));
        let dots = self.project_dots(&points, x_scale, y_scale);

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
            "scatter layout pass"
        );

        ScatterGeometry {
            plot_area: Some(area),
            x_scale,
            y_scale,
            dots,
            points,
            x_ticks,
            y_ticks,
        }
    }

    /// Scatter data has no curve, so every mode snaps to the nearest point.
    fn resolve_scrub(
        &self,
        geometry: &ScatterGeometry,
        _mode: ScrubMode,
        pointer_x: f64,
    ) -> Option<ScrubSelection> {
        ScrubResolver::new(&geometry.points, geometry.x_scale, geometry.y_scale)
            .resolve(ScrubMode::NearestPoint, pointer_x)
    }

    /// Dots pop in: radius follows `reveal` (overshooting with back-out
    /// easing) while opacity follows it clamped to `1`.
    fn render_frame(
        &self,
        geometry: &ScatterGeometry,
        reveal: f64,
        selection: Option<&ScrubSelection>,
    ) -> RenderFrame {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        let Some(area) = geometry.plot_area else {
            return frame;
        };
        let scale = if reveal.is_finite() { reveal.max(0.0) } else { 1.0 };

        self.decor
            .push_grid(&mut frame, area, &geometry.x_ticks, &geometry.y_ticks);
        self.decor.push_axes(&mut frame, area, area.bottom);
        self.decor
            .push_tick_labels(&mut frame, area, &geometry.x_ticks, &geometry.y_ticks);
        self.decor.push_titles(&mut frame, viewport, area);

        if scale > 0.0 {
            for dot in &geometry.dots {
                frame.circles.push(CirclePrimitive::filled(
                    dot.center,
                    dot.radius * scale,
                    dot.color.faded(scale),
                ));
            }
        }

        if let Some(selection) = selection {
            let accent = geometry
                .dots
                .get(selection.index)
                .map_or(self.point_color, |d| d.color);
            let tooltip = geometry
                .points
                .get(selection.index)
                .and_then(|point| self.config.tooltip_formatter.format(point));
            self.decor
                .push_selection(&mut frame, viewport, area, selection, accent, tooltip);
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::ScatterLayout;
    use crate::api::{ChartLayout, ScatterChartConfig};
    use crate::core::{DataPoint, Viewport};

    #[test]
    fn overshooting_reveal_enlarges_dots() {
        let layout =
            ScatterLayout::new(ScatterChartConfig::new(Viewport::new(300.0, 200.0))).expect("layout");
        let geometry = layout.layout(&[DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)]);
        let frame = layout.render_frame(&geometry, 1.1, None);
        assert_eq!(frame.circles.len(), 2);
        assert!((frame.circles[0].radius - 8.8).abs() <= 1e-9);
        assert_eq!(frame.circles[0].fill.alpha, 1.0);
    }
}
