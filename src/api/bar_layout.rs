use serde::Serialize;
use tracing::debug;

use crate::animation::{AnimationTuning, Morph, morph_indexed};
use crate::core::bar_geometry::baseline_y;
use crate::core::primitives::clamp_progress;
use crate::core::{
    AxisTickPlanner, BandScale, BarRect, DataPoint, LinearScale, PlotArea, ScrubMode,
    ScrubSelection, TickSet, Viewport, extent, project_bars, resolve_band,
};
use crate::error::ChartResult;
use crate::render::{Color, LinearGradient, Paint, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::decorations::{CartesianDecor, resolve_item_color};
use super::{BarChartConfig, ChartLayout};

const VALUE_LABEL_GAP: f64 = 4.0;
const VALUE_LABEL_SIZE: f64 = 10.0;

/// Laid-out bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub plot_area: Option<PlotArea>,
    pub x_scale: BandScale,
    pub y_scale: LinearScale,
    pub bars: Vec<BarRect>,
    /// Fill color per bar, parallel to `bars`.
    pub colors: Vec<Color>,
    pub points: Vec<DataPoint>,
    pub x_ticks: TickSet,
    pub y_ticks: TickSet,
}

impl BarGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            plot_area: None,
            x_scale: BandScale::indexed(0, (0.0, 0.0), 0.0, 0.0),
            y_scale: LinearScale::new((0.0, 0.0), (0.0, 0.0)),
            bars: Vec::new(),
            colors: Vec::new(),
            points: Vec::new(),
            x_ticks: TickSet::default(),
            y_ticks: TickSet::default(),
        }
    }
}

/// Bars and their colors interpolate by index; bars without a counterpart
/// grow from or shrink into their baseline.
impl Morph for BarGeometry {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        let t = clamp_progress(progress);
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return target.clone();
        }
        Self {
            bars: self.bars.morph(&target.bars, t),
            colors: morph_indexed(&self.colors, &target.colors, t, |c| *c, |a, b, t| a.lerp(*b, t)),
            ..target.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct BarLayout {
    config: BarChartConfig,
    decor: CartesianDecor,
    palette: Vec<Color>,
    gradient_end: Color,
    value_label_color: Color,
}

impl BarLayout {
    pub fn new(config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let palette = config
            .colors
            .iter()
            .map(|c| Color::parse(c))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self {
            decor: CartesianDecor::new(
                &config.axes,
                &config.titles,
                &config.tooltip,
                config.scrub,
                config.padding,
            )?,
            gradient_end: Color::parse(&config.gradient_end_color)?,
            value_label_color: Color::parse(&config.value_label_color)?,
            palette,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    fn palette_color(&self, index: usize) -> Color {
        // Validation guarantees a non-empty palette.
        self.palette
            .get(index % self.palette.len().max(1))
            .copied()
            .unwrap_or(Color::WHITE)
    }

    fn bar_paint(&self, bar: &BarRect, color: Color, reveal: f64) -> Paint {
        if !self.config.gradient {
            return Paint::Solid(color.faded(reveal));
        }
        // Runs from the value end towards the zero line.
        let value_y = bar.value_y();
        let far_y = if bar.value < 0.0 { bar.y } else { bar.y + bar.height };
        let gradient = LinearGradient::vertical(value_y, far_y, bar.x, color, self.gradient_end);
        Paint::Gradient(gradient.faded(reveal))
    }
}

impl ChartLayout for BarLayout {
    type Datum = DataPoint;
    type Geometry = BarGeometry;

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

    /// Band per point in input order; the value axis spans `[min(0, min),
    /// max(0, max)]` so bars always grow from zero.
    fn layout(&self, data: &[DataPoint]) -> BarGeometry {
        let Some(area) = self.decor.plot_area(self.config.viewport) else {
            debug!(points = data.len(), "bar layout skipped: no plot area");
            return BarGeometry::empty();
        };

        let x_scale = BandScale::indexed(
            data.len(),
            (area.left, area.right),
            self.config.padding_inner,
            self.config.padding_outer,
        );
        let (lo, hi) = extent(data.iter().map(|p| p.y)).unwrap_or((0.0, 0.0));
        let y_scale = LinearScale::new((lo.min(0.0), hi.max(0.0)), (area.bottom, area.top));
        let bars = project_bars(data, &x_scale, y_scale);
        let colors = data
            .iter()
            .enumerate()
            .map(|(i, p)| resolve_item_color(p.color.as_deref(), self.palette_color(i), i))
            .collect();

        let (x_ticks, y_ticks) = if data.is_empty() {
            (TickSet::default(), TickSet::default())
        } else {
            (
                AxisTickPlanner::band(&x_scale, data, |label| self.config.x_formatter.format(label)),
                AxisTickPlanner::linear(y_scale, self.decor.axes().y_tick_count, |v| {
                    self.config.y_formatter.format(v).unwrap_or_default()
                }),
            )
        };

        debug!(
            points = data.len(),
            plot_width = area.width(),
            plot_height = area.height(),
            bandwidth = x_scale.bandwidth(),
            "bar layout pass"
        );

        BarGeometry {
            plot_area: Some(area),
            x_scale,
            y_scale,
            bars,
            colors,
            points: data.to_vec(),
            x_ticks,
            y_ticks,
        }
    }

    /// The band under the pointer selects its bar; `mode` has no effect.
    fn resolve_scrub(
        &self,
        geometry: &BarGeometry,
        _mode: ScrubMode,
        pointer_x: f64,
    ) -> Option<ScrubSelection> {
        resolve_band(&geometry.points, &geometry.x_scale, geometry.y_scale, pointer_x)
    }

    fn render_frame(
        &self,
        geometry: &BarGeometry,
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
            .push_grid(&mut frame, area, &TickSet::default(), &geometry.y_ticks);
        self.decor
            .push_axes(&mut frame, area, baseline_y(geometry.y_scale));
        self.decor
            .push_tick_labels(&mut frame, area, &geometry.x_ticks, &geometry.y_ticks);
        self.decor.push_titles(&mut frame, viewport, area);

        let radius = if self.config.rounded_top {
            self.config.corner_radius
        } else {
            0.0
        };
        for (i, bar) in geometry.bars.iter().enumerate() {
            if bar.height <= 0.0 || bar.width <= 0.0 || reveal <= 0.0 {
                continue;
            }
            let color = geometry
                .colors
                .get(i)
                .copied()
                .unwrap_or_else(|| self.palette_color(i));
            frame.rects.push(
                RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, self.bar_paint(bar, color, reveal))
                    .with_corner_radius(radius),
            );
        }

        if self.config.show_values && reveal > 0.0 {
            for bar in &geometry.bars {
                let Some(text) = self.config.value_formatter.format(bar.value) else {
                    continue;
                };
                let y = if bar.value < 0.0 {
                    bar.value_y() + VALUE_LABEL_GAP
                } else {
                    bar.value_y() - VALUE_LABEL_GAP - VALUE_LABEL_SIZE
                };
                frame.texts.push(TextPrimitive::new(
                    text,
                    bar.center_x(),
                    y,
                    VALUE_LABEL_SIZE,
                    self.value_label_color.faded(reveal),
                    TextHAlign::Center,
                ));
            }
        }

        if let Some(selection) = selection {
            let accent = geometry
                .colors
                .get(selection.index)
                .copied()
                .unwrap_or_else(|| self.palette_color(selection.index));
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
    use super::BarLayout;
    use crate::api::{BarChartConfig, ChartLayout};
    use crate::core::{DataPoint, Viewport};
    use crate::render::Color;

    #[test]
    fn bad_point_color_falls_back_to_palette() {
        let layout = BarLayout::new(BarChartConfig::new(Viewport::new(300.0, 200.0))).expect("layout");
        let geometry = layout.layout(&[
            DataPoint::new(0.0, 10.0).with_color("#ff0000"),
            DataPoint::new(1.0, 20.0).with_color("nope"),
        ]);
        assert_eq!(geometry.colors[0], Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(geometry.colors[1], Color::parse("#3a7bd5").expect("palette"));
    }

    #[test]
    fn zero_reveal_draws_no_bars() {
        let layout = BarLayout::new(BarChartConfig::new(Viewport::new(300.0, 200.0))).expect("layout");
        let geometry = layout.layout(&[DataPoint::new(0.0, 10.0)]);
        assert!(layout.render_frame(&geometry, 0.0, None).rects.is_empty());
        assert_eq!(layout.render_frame(&geometry, 1.0, None).rects.len(), 1);
    }
}
