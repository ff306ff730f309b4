use serde::Serialize;
use tracing::debug;

use crate::animation::{AnimationTuning, Morph, morph_indexed};
use crate::core::primitives::clamp_progress;
use crate::core::{
    ArcSlice, Path, PieDatum, Point, ScrubSelection, Viewport, pie_slices, slice_centroid, slice_path,
};
use crate::error::ChartResult;
use crate::render::{Color, Paint, PathPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::decorations::resolve_item_color;
use super::{ChartLayout, PieChartConfig};

const FALLBACK_SLICE_COLOR: Color = Color::rgb(0.0, 210.0 / 255.0, 1.0);

/// Laid-out pie or donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub slices: Vec<ArcSlice>,
    pub colors: Vec<Color>,
    pub labels: Vec<Option<String>>,
}

impl PieGeometry {
    /// Draw path per slice, in input order.
    #[must_use]
    pub fn slice_paths(&self) -> Vec<Path> {
        self.slices
            .iter()
            .map(|s| slice_path(*s, self.center, self.outer_radius, self.inner_radius))
            .collect()
    }

    /// Label anchor per slice.
    #[must_use]
    pub fn centroids(&self) -> Vec<Point> {
        self.slices
            .iter()
            .map(|s| slice_centroid(*s, self.center, self.outer_radius, self.inner_radius))
            .collect()
    }
}

impl Morph for PieGeometry {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        let t = clamp_progress(progress);
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return target.clone();
        }
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            center: self.center.lerp(target.center, t),
            outer_radius: lerp(self.outer_radius, target.outer_radius),
            inner_radius: lerp(self.inner_radius, target.inner_radius),
            slices: self.slices.morph(&target.slices, t),
            colors: morph_indexed(&self.colors, &target.colors, t, |c| *c, |a, b, t| a.lerp(*b, t)),
            labels: target.labels.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieLayout {
    config: PieChartConfig,
    label_color: Color,
}

impl PieLayout {
    pub fn new(config: PieChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            label_color: Color::parse(&config.label_color)?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }
}

impl ChartLayout for PieLayout {
    type Datum = PieDatum;
    type Geometry = PieGeometry;

    fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    fn animate(&self) -> bool {
        self.config.animate
    }

    fn animation(&self) -> AnimationTuning {
        self.config.animation
    }

    /// Slices follow input order around the circle from twelve o'clock; the
    /// pie fills the smaller viewport dimension.
    fn layout(&self, data: &[PieDatum]) -> PieGeometry {
        let viewport = self.config.viewport;
        let outer_radius = if viewport.is_valid() {
            viewport.width.min(viewport.height) * 0.5
        } else {
            0.0
        };
        let values: Vec<f64> = data.iter().map(|d| d.value).collect();
        let slices = pie_slices(&values, self.config.pad_angle);
        let colors = data
            .iter()
            .enumerate()
            .map(|(i, d)| resolve_item_color(Some(&d.color), FALLBACK_SLICE_COLOR, i))
            .collect();

        debug!(
            slices = slices.len(),
            outer_radius,
            inner_radius = self.config.inner_radius,
            "pie layout pass"
        );

        PieGeometry {
            center: Point::new(viewport.width * 0.5, viewport.height * 0.5),
            outer_radius,
            inner_radius: self.config.inner_radius.min(outer_radius),
            slices,
            colors,
            labels: data.iter().map(|d| d.label.clone()).collect(),
        }
    }

    /// Reveals by sweeping every angle from zero up to its final value.
    fn render_frame(
        &self,
        geometry: &PieGeometry,
        reveal: f64,
        _selection: Option<&ScrubSelection>,
    ) -> RenderFrame {
        let mut frame = RenderFrame::new(self.config.viewport);
        let reveal = clamp_progress(reveal);
        if reveal <= 0.0 || geometry.outer_radius <= 0.0 {
            return frame;
        }

        for (i, slice) in geometry.slices.iter().enumerate() {
            let path = slice_path(
                slice.scaled(reveal),
                geometry.center,
                geometry.outer_radius,
                geometry.inner_radius,
            );
            if path.is_empty() {
                continue;
            }
            let color = geometry.colors.get(i).copied().unwrap_or(FALLBACK_SLICE_COLOR);
            frame.paths.push(PathPrimitive::fill(path, Paint::Solid(color)));
        }

        if self.config.show_labels {
            for (i, slice) in geometry.slices.iter().enumerate() {
                if slice.sweep() <= 0.0 {
                    continue;
                }
                let text = match geometry.labels.get(i).cloned().flatten() {
                    Some(label) => label,
                    None => match self.config.value_formatter.format(slice.value) {
                        Some(text) => text,
                        None => continue,
                    },
                };
                let anchor = slice_centroid(
                    slice.scaled(reveal),
                    geometry.center,
                    geometry.outer_radius,
                    geometry.inner_radius,
                );
                frame.texts.push(TextPrimitive::new(
                    text,
                    anchor.x,
                    anchor.y - self.config.label_size * 0.5,
                    self.config.label_size,
                    self.label_color.faded(reveal),
                    TextHAlign::Center,
                ));
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::PieLayout;
    use crate::api::{ChartLayout, PieChartConfig};
    use crate::core::{PieDatum, Viewport};

    #[test]
    fn half_reveal_sweeps_half_the_circle() {
        let layout = PieLayout::new(PieChartConfig::new(Viewport::new(200.0, 200.0)).with_pad_angle(0.0))
            .expect("layout");
        let geometry = layout.layout(&[PieDatum::new(1.0, "#ff0000"), PieDatum::new(1.0, "#00ff00")]);
        assert_eq!(geometry.slices[1].end_angle, TAU);
        let scaled = geometry.slices[1].scaled(0.5);
        assert!((scaled.end_angle - TAU * 0.5).abs() <= 1e-12);
        assert_eq!(layout.render_frame(&geometry, 0.5, None).paths.len(), 2);
    }

    #[test]
    fn empty_data_renders_nothing() {
        let layout = PieLayout::new(PieChartConfig::new(Viewport::new(200.0, 200.0))).expect("layout");
        let geometry = layout.layout(&[]);
        assert!(layout.render_frame(&geometry, 1.0, None).is_empty());
    }
}
