use serde::Serialize;
use tracing::{debug, trace};

use crate::animation::{EntryAnimation, MorphState, ProgressSource, TimedProgress};
use crate::core::{DataPoint, PieDatum, ScrubMode, ScrubSelection, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointerPhase, ScrubController, SelectionCallback};
use crate::render::{RenderFrame, Renderer};

use super::{
    BarChartConfig, BarLayout, ChartLayout, ChartLayoutEngine, LineChartConfig, LineLayout,
    PieChartConfig, PieLayout, ScatterChartConfig, ScatterLayout,
};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Outcome of [`ChartController::set_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataUpdate {
    /// Incoming data equals the current data by value.
    Unchanged,
    /// A morph towards the new geometry started (or restarted).
    Morphing,
    /// Geometry was replaced without animation.
    Replaced,
}

/// Serializable state of one chart instance, for host diffing and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot<G> {
    pub schema_version: u32,
    pub viewport: Viewport,
    pub data_len: usize,
    pub entry_reveal: f64,
    pub morph_progress: f64,
    pub morphing: bool,
    pub selection: Option<ScrubSelection>,
    pub geometry: G,
}

/// One chart instance: data, geometry lifecycle and pointer handling.
///
/// Lifecycle: idle on the current data; a value-different `set_data` starts
/// a morph from whatever is on screen towards the new layout, which runs
/// until morph progress reaches `1`. The entry reveal is a separate one-shot
/// progress started at construction.
///
/// Progress is either pushed (`set_entry_progress`, `set_morph_progress`),
/// pulled from a [`ProgressSource`] (`sample_entry`, `sample_morph`), or
/// derived from frame deltas with the configured duration and easing
/// (`advance`).
pub struct ChartController<C: ChartLayout> {
    layout: C,
    data: Vec<C::Datum>,
    morph: MorphState<C::Geometry>,
    entry: EntryAnimation,
    entry_clock: TimedProgress,
    morph_clock: TimedProgress,
    scrub: ScrubController,
}

impl<C: ChartLayout> std::fmt::Debug for ChartController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartController")
            .field("data_len", &self.data.len())
            .field("morphing", &self.morph.is_morphing())
            .field("morph_progress", &self.morph.progress())
            .field("entry", &self.entry)
            .field("scrub", &self.scrub)
            .finish()
    }
}

impl<C: ChartLayout> ChartController<C> {
    #[must_use]
    pub fn new(layout: C, data: Vec<C::Datum>) -> Self {
        let geometry = layout.layout(&data);
        let tuning = layout.animation();
        let scrub = match layout.scrub_mode() {
            Some(mode) => ScrubController::new(true, mode),
            None => ScrubController::new(false, ScrubMode::default()),
        };
        debug!(
            data_len = data.len(),
            animate = layout.animate(),
            "chart controller created"
        );
        Self {
            entry: EntryAnimation::new(layout.animate()),
            entry_clock: TimedProgress::new(tuning),
            morph_clock: TimedProgress::new(tuning.for_morph()),
            morph: MorphState::new(geometry),
            scrub,
            data,
            layout,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &C {
        &self.layout
    }

    #[must_use]
    pub fn data(&self) -> &[C::Datum] {
        &self.data
    }

    /// Replaces the data. Value-equal data is ignored; otherwise the new
    /// layout becomes the morph target, restarting any morph in flight from
    /// the currently displayed geometry.
    pub fn set_data(&mut self, data: Vec<C::Datum>) -> DataUpdate {
        if data == self.data {
            trace!(data_len = data.len(), "set_data ignored: unchanged");
            return DataUpdate::Unchanged;
        }
        let target = self.layout.layout(&data);
        self.data = data;

        if self.layout.animate() {
            let restarted = self.morph.is_morphing();
            self.morph.retarget(target);
            self.morph_clock.restart();
            debug!(data_len = self.data.len(), restarted, "morph started");
            DataUpdate::Morphing
        } else {
            self.morph.snap_to(target);
            debug!(data_len = self.data.len(), "geometry replaced");
            DataUpdate::Replaced
        }
    }

    /// Swaps the layout (new size, tension, styling) and snaps to its
    /// geometry without animating.
    pub fn set_layout(&mut self, layout: C) {
        self.morph.snap_to(layout.layout(&self.data));
        match layout.scrub_mode() {
            Some(mode) => {
                self.scrub.set_mode(mode);
                self.scrub.set_enabled(true);
            }
            None => self.scrub.set_enabled(false),
        }
        self.layout = layout;
    }

    pub fn set_entry_progress(&mut self, progress: f64) {
        self.entry.set_progress(progress);
    }

    pub fn set_morph_progress(&mut self, progress: f64) {
        self.morph.set_progress(progress);
    }

    pub fn sample_entry(&mut self, source: &mut impl ProgressSource) {
        self.entry.set_progress(source.sample());
    }

    pub fn sample_morph(&mut self, source: &mut impl ProgressSource) {
        self.morph.set_progress(source.sample());
    }

    /// Advances running animations by one frame delta using the configured
    /// duration and easing. Returns whether anything is still animating.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        if self.entry.is_running() {
            self.entry_clock.advance(delta_ms);
            if self.entry_clock.is_finished() {
                self.entry.finish();
            } else {
                self.entry.set_progress(self.entry_clock.sample());
            }
        }
        if self.morph.is_morphing() {
            self.morph_clock.advance(delta_ms);
            self.morph.set_progress(self.morph_clock.sample());
        }
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.entry.is_running() || self.morph.is_morphing()
    }

    #[must_use]
    pub fn entry(&self) -> EntryAnimation {
        self.entry
    }

    #[must_use]
    pub fn morph_progress(&self) -> f64 {
        self.morph.progress()
    }

    #[must_use]
    pub fn is_morphing(&self) -> bool {
        self.morph.is_morphing()
    }

    /// Geometry of the current data, ignoring any morph in flight.
    #[must_use]
    pub fn target_geometry(&self) -> &C::Geometry {
        self.morph.target()
    }

    /// Geometry as it should appear on screen right now.
    #[must_use]
    pub fn displayed_geometry(&self) -> C::Geometry {
        self.morph.displayed()
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let selection = self.scrub.selection();
        self.layout
            .render_frame(&self.displayed_geometry(), self.entry.reveal(), selection.as_ref())
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.frame())
    }

    #[must_use]
    pub fn selection(&self) -> Option<ScrubSelection> {
        self.scrub.selection()
    }

    #[must_use]
    pub fn pointer_phase(&self) -> PointerPhase {
        self.scrub.phase()
    }

    pub fn set_selection_callback(&mut self, callback: SelectionCallback) {
        self.scrub.set_callback(callback);
    }

    pub fn clear_selection_callback(&mut self) {
        self.scrub.clear_callback();
    }

    /// Pointer events resolve against the target geometry so the selection
    /// reflects the newest data even mid-morph.
    pub fn pointer_down(&mut self, x: f64) -> Option<ScrubSelection> {
        let (layout, morph) = (&self.layout, &self.morph);
        self.scrub
            .on_pointer_down(x, |mode, x| layout.resolve_scrub(morph.target(), mode, x))
    }

    pub fn pointer_move(&mut self, x: f64) -> Option<ScrubSelection> {
        let (layout, morph) = (&self.layout, &self.morph);
        self.scrub
            .on_pointer_move(x, |mode, x| layout.resolve_scrub(morph.target(), mode, x))
    }

    pub fn pointer_up(&mut self) {
        self.scrub.on_pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.scrub.on_pointer_cancel();
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot<C::Geometry> {
        ChartSnapshot {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            viewport: self.layout.viewport(),
            data_len: self.data.len(),
            entry_reveal: self.entry.reveal(),
            morph_progress: self.morph.progress(),
            morphing: self.morph.is_morphing(),
            selection: self.scrub.selection(),
            geometry: self.displayed_geometry(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart snapshot: {e}"))
        })
    }
}

impl ChartController<LineLayout> {
    pub fn line(config: LineChartConfig, data: Vec<DataPoint>) -> ChartResult<Self> {
        Ok(Self::new(ChartLayoutEngine::line(config)?, data))
    }
}

impl ChartController<BarLayout> {
    pub fn bar(config: BarChartConfig, data: Vec<DataPoint>) -> ChartResult<Self> {
        Ok(Self::new(ChartLayoutEngine::bar(config)?, data))
    }
}

impl ChartController<PieLayout> {
    pub fn pie(config: PieChartConfig, data: Vec<PieDatum>) -> ChartResult<Self> {
        Ok(Self::new(ChartLayoutEngine::pie(config)?, data))
    }
}

impl ChartController<ScatterLayout> {
    pub fn scatter(config: ScatterChartConfig, data: Vec<DataPoint>) -> ChartResult<Self> {
        Ok(Self::new(ChartLayoutEngine::scatter(config)?, data))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartController, DataUpdate};
    use crate::api::LineChartConfig;
    use crate::core::{DataPoint, Viewport};

    fn series(scale: f64) -> Vec<DataPoint> {
        (0..5)
            .map(|i| DataPoint::new(i as f64, (i as f64 * scale).sin() * 10.0))
            .collect()
    }

    #[test]
    fn equal_data_is_unchanged() {
        let mut chart =
            ChartController::line(LineChartConfig::new(Viewport::new(340.0, 200.0)), series(1.0))
                .expect("chart");
        assert_eq!(chart.set_data(series(1.0)), DataUpdate::Unchanged);
        assert!(!chart.is_morphing());
    }

    #[test]
    fn advance_finishes_entry_and_morph() {
        let mut chart =
            ChartController::line(LineChartConfig::new(Viewport::new(340.0, 200.0)), series(1.0))
                .expect("chart");
        assert_eq!(chart.set_data(series(2.0)), DataUpdate::Morphing);
        assert!(chart.advance(750.0));
        assert!(!chart.advance(750.0));
        assert_eq!(chart.entry().reveal(), 1.0);
        assert_eq!(chart.displayed_geometry(), *chart.target_geometry());
    }

    #[test]
    fn non_animated_chart_replaces_geometry() {
        let config = LineChartConfig::new(Viewport::new(340.0, 200.0)).with_animate(false);
        let mut chart = ChartController::line(config, series(1.0)).expect("chart");
        assert_eq!(chart.entry().reveal(), 1.0);
        assert_eq!(chart.set_data(series(2.0)), DataUpdate::Replaced);
        assert!(!chart.is_animating());
    }
}
