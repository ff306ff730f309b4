use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::path_measure::PathMeasure;
use crate::core::{BandScale, DataPoint, LinearScale, Point};

/// Bisection budget for on-curve resolution.
pub const DEFAULT_BISECTION_ITERATIONS: usize = 20;

/// How a pointer coordinate is resolved against the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrubMode {
    /// Snap to the data point closest in domain x.
    #[default]
    NearestPoint,
    /// Follow the rendered smoothed curve under the pointer.
    OnCurve,
}

/// Resolved scrub position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubSelection {
    /// Position in data units.
    pub data_value: Point,
    /// Position in screen pixels.
    pub screen_position: Point,
    /// Index of the closest input point.
    pub index: usize,
}

/// Maps pointer x-coordinates back into data space.
#[derive(Debug, Clone, Copy)]
pub struct ScrubResolver<'a> {
    points: &'a [DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
    curve: Option<&'a PathMeasure>,
    iterations: usize,
}

impl<'a> ScrubResolver<'a> {
    #[must_use]
    pub fn new(points: &'a [DataPoint], x_scale: LinearScale, y_scale: LinearScale) -> Self {
        Self {
            points,
            x_scale,
            y_scale,
            curve: None,
            iterations: DEFAULT_BISECTION_ITERATIONS,
        }
    }

    /// Enables [`ScrubMode::OnCurve`] against the rendered line.
    #[must_use]
    pub fn with_curve(mut self, curve: &'a PathMeasure) -> Self {
        self.curve = Some(curve);
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Resolves `pointer_x`; pointers outside the plotted range are clamped.
    /// Returns `None` when there is no finite data. `OnCurve` without a curve
    /// falls back to the nearest point.
    #[must_use]
    pub fn resolve(&self, mode: ScrubMode, pointer_x: f64) -> Option<ScrubSelection> {
        match (mode, self.curve) {
            (ScrubMode::OnCurve, Some(curve)) => self
                .on_curve(curve, pointer_x)
                .or_else(|| self.nearest(pointer_x)),
            _ => self.nearest(pointer_x),
        }
    }

    /// Index of the finite point with minimal `|x - domain_x|`; the first
    /// occurrence wins ties.
    #[must_use]
    pub fn nearest_index(&self, domain_x: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .min_by_key(|(_, p)| OrderedFloat((p.x - domain_x).abs()))
            .map(|(i, _)| i)
    }

    fn nearest(&self, pointer_x: f64) -> Option<ScrubSelection> {
        let domain_x = self.x_scale.invert_clamped(pointer_x);
        let index = self.nearest_index(domain_x)?;
        let point = &self.points[index];
        Some(ScrubSelection {
            data_value: Point::new(point.x, point.y),
            screen_position: Point::new(self.x_scale.map(point.x), self.y_scale.map(point.y)),
            index,
        })
    }

    fn on_curve(&self, curve: &PathMeasure, pointer_x: f64) -> Option<ScrubSelection> {
        let first = curve.position_at(0.0)?;
        let last = curve.position_at(curve.length())?;
        let (lo, hi) = (first.x.min(last.x), first.x.max(last.x));
        let target = if pointer_x.is_nan() {
            lo
        } else {
            pointer_x.clamp(lo, hi)
        };

        let screen = curve.point_at_x(target, self.iterations)?;
        let data_value = Point::new(self.x_scale.invert(screen.x), self.y_scale.invert(screen.y));
        if !screen.is_finite() || !data_value.is_finite() {
            return None;
        }
        let index = self.nearest_index(data_value.x)?;
        Some(ScrubSelection {
            data_value,
            screen_position: screen,
            index,
        })
    }
}

/// Resolves a pointer against a categorical x axis: the band under the
/// pointer (clamped to the first/last band) selects its point.
#[must_use]
pub fn resolve_band(
    points: &[DataPoint],
    x_scale: &BandScale,
    y_scale: LinearScale,
    pointer_x: f64,
) -> Option<ScrubSelection> {
    let index = x_scale.index_at(pointer_x)?;
    let point = points.get(index).filter(|p| p.y.is_finite())?;
    let band = x_scale.band_at(index)?;
    Some(ScrubSelection {
        data_value: Point::new(index as f64, point.y),
        screen_position: Point::new(band.center(), y_scale.map(point.y)),
        index,
    })
}
