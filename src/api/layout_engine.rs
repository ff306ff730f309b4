use std::fmt;

use serde::Serialize;

use crate::animation::{AnimationTuning, Morph};
use crate::core::{ScrubMode, ScrubSelection, Viewport};
use crate::error::ChartResult;
use crate::render::RenderFrame;

use super::{
    BarChartConfig, BarLayout, LineChartConfig, LineLayout, PieChartConfig, PieLayout,
    ScatterChartConfig, ScatterLayout,
};

/// One chart kind's pipeline from data to geometry to draw commands.
///
/// `layout` is a pure function of the data and the configuration captured at
/// construction: identical inputs give identical bundles. Degenerate input
/// (no data, a plot area squeezed to nothing) yields an empty bundle rather
/// than an error.
pub trait ChartLayout {
    type Datum: Clone + PartialEq + fmt::Debug;
    type Geometry: Morph + Serialize + fmt::Debug;

    fn viewport(&self) -> Viewport;

    /// Whether the first appearance and data changes animate.
    fn animate(&self) -> bool;

    fn animation(&self) -> AnimationTuning;

    /// `None` when pointer scrubbing is disabled.
    fn scrub_mode(&self) -> Option<ScrubMode> {
        None
    }

    fn layout(&self, data: &[Self::Datum]) -> Self::Geometry;

    /// Resolves a pointer x coordinate against a laid-out bundle.
    fn resolve_scrub(
        &self,
        _geometry: &Self::Geometry,
        _mode: ScrubMode,
        _pointer_x: f64,
    ) -> Option<ScrubSelection> {
        None
    }

    /// Draw commands for `geometry` at entry `reveal` (usually `[0, 1]`,
    /// overshooting easings may exceed `1`).
    fn render_frame(
        &self,
        geometry: &Self::Geometry,
        reveal: f64,
        selection: Option<&ScrubSelection>,
    ) -> RenderFrame;
}

/// Entry point that validates a chart configuration and returns the matching
/// layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartLayoutEngine;

impl ChartLayoutEngine {
    pub fn line(config: LineChartConfig) -> ChartResult<LineLayout> {
        LineLayout::new(config)
    }

    pub fn bar(config: BarChartConfig) -> ChartResult<BarLayout> {
        BarLayout::new(config)
    }

    pub fn pie(config: PieChartConfig) -> ChartResult<PieLayout> {
        PieLayout::new(config)
    }

    pub fn scatter(config: ScatterChartConfig) -> ChartResult<ScatterLayout> {
        ScatterLayout::new(config)
    }
}
