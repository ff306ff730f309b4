use crate::core::primitives::clamp_progress;
use crate::core::{ArcSlice, BarRect, CurveGeometry, Path, PathMorpher, Point};

/// Geometry that can be interpolated towards another value of its type.
///
/// Implementations must return `self` at `progress == 0` and `target` at
/// `progress == 1`.
pub trait Morph: Clone {
    fn morph(&self, target: &Self, progress: f64) -> Self;
}

impl Morph for Path {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        PathMorpher::interpolate(self, target, progress)
    }
}

impl Morph for CurveGeometry {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        let t = clamp_progress(progress);
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return target.clone();
        }
        Self {
            vertices: morph_vertices(&self.vertices, &target.vertices, t),
            line: self.line.morph(&target.line, t),
            fill: self.fill.morph(&target.fill, t),
        }
    }
}

impl Morph for Vec<BarRect> {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        morph_indexed(self, target, progress, |b| b.collapsed(), |a, b, t| BarRect {
            index: if t < 0.5 { a.index } else { b.index },
            x: lerp(a.x, b.x, t),
            y: lerp(a.y, b.y, t),
            width: lerp(a.width, b.width, t),
            height: lerp(a.height, b.height, t),
            baseline_y: lerp(a.baseline_y, b.baseline_y, t),
            value: lerp(a.value, b.value, t),
        })
    }
}

impl Morph for Vec<ArcSlice> {
    fn morph(&self, target: &Self, progress: f64) -> Self {
        // Slices without a counterpart shrink to nothing at the end of the turn.
        let collapse = |s: &ArcSlice| ArcSlice {
            start_angle: std::f64::consts::TAU,
            end_angle: std::f64::consts::TAU,
            pad_angle: 0.0,
            value: 0.0,
            ..*s
        };
        morph_indexed(self, target, progress, collapse, |a, b, t| ArcSlice {
            index: if t < 0.5 { a.index } else { b.index },
            value: lerp(a.value, b.value, t),
            start_angle: lerp(a.start_angle, b.start_angle, t),
            end_angle: lerp(a.end_angle, b.end_angle, t),
            pad_angle: lerp(a.pad_angle, b.pad_angle, t),
        })
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Index-aligned interpolation of two lists.
///
/// Items present on one side only are paired with `collapse` applied to
/// themselves, so they grow from or shrink into a degenerate copy.
pub fn morph_indexed<T, C, L>(from: &[T], to: &[T], progress: f64, collapse: C, lerp_item: L) -> Vec<T>
where
    T: Clone,
    C: Fn(&T) -> T,
    L: Fn(&T, &T, f64) -> T,
{
    let t = clamp_progress(progress);
    if t <= 0.0 {
        return from.to_vec();
    }
    if t >= 1.0 {
        return to.to_vec();
    }

    let len = from.len().max(to.len());
    (0..len)
        .filter_map(|i| match (from.get(i), to.get(i)) {
            (Some(a), Some(b)) => Some(lerp_item(a, b, t)),
            (Some(a), None) => Some(lerp_item(a, &collapse(a), t)),
            (None, Some(b)) => Some(lerp_item(&collapse(b), b, t)),
            (None, None) => None,
        })
        .collect()
}

/// Interpolates vertex lists of possibly different lengths by resampling the
/// shorter list at fractional indices of the longer one.
#[must_use]
pub fn morph_vertices(from: &[Point], to: &[Point], t: f64) -> Vec<Point> {
    let t = clamp_progress(t);
    if t <= 0.0 {
        return from.to_vec();
    }
    if t >= 1.0 {
        return to.to_vec();
    }
    let n = from.len().max(to.len());
    if n == 0 {
        return Vec::new();
    }

    (0..n)
        .filter_map(|i| {
            let a = sample_fractional(from, i, n).or_else(|| sample_fractional(to, 0, 1))?;
            let b = sample_fractional(to, i, n).or_else(|| sample_fractional(from, 0, 1))?;
            Some(a.lerp(b, t))
        })
        .collect()
}

fn sample_fractional(points: &[Point], i: usize, n: usize) -> Option<Point> {
    match points.len() {
        0 => None,
        1 => Some(points[0]),
        len if len == n => Some(points[i]),
        len => {
            let pos = if n > 1 {
                i as f64 * (len - 1) as f64 / (n - 1) as f64
            } else {
                0.0
            };
            let lower = pos.floor() as usize;
            let upper = (lower + 1).min(len - 1);
            Some(points[lower].lerp(points[upper], pos - lower as f64))
        }
    }
}

/// Previous and current geometry plus the progress between them.
///
/// Retargeting while a morph is in flight captures the currently displayed
/// geometry as the new starting point and restarts at `0`; only the latest
/// target is kept. Reaching `1` drops the previous geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphState<G> {
    previous: Option<G>,
    current: G,
    progress: f64,
}

impl<G: Morph> MorphState<G> {
    #[must_use]
    pub fn new(initial: G) -> Self {
        Self {
            previous: None,
            current: initial,
            progress: 1.0,
        }
    }

    #[must_use]
    pub fn is_morphing(&self) -> bool {
        self.previous.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn target(&self) -> &G {
        &self.current
    }

    #[must_use]
    pub fn previous(&self) -> Option<&G> {
        self.previous.as_ref()
    }

    /// Starts morphing from whatever is displayed now towards `target`.
    pub fn retarget(&mut self, target: G) {
        let displayed = self.displayed();
        self.previous = Some(displayed);
        self.current = target;
        self.progress = 0.0;
    }

    /// Replaces the geometry without animating.
    pub fn snap_to(&mut self, target: G) {
        self.previous = None;
        self.current = target;
        self.progress = 1.0;
    }

    pub fn set_progress(&mut self, progress: f64) {
        let progress = clamp_progress(progress);
        if progress >= 1.0 {
            self.previous = None;
            self.progress = 1.0;
        } else if self.previous.is_some() {
            self.progress = progress;
        }
    }

    #[must_use]
    pub fn displayed(&self) -> G {
        match &self.previous {
            Some(previous) => previous.morph(&self.current, self.progress),
            None => self.current.clone(),
        }
    }
}

/// One-shot reveal progress for a chart's first appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryAnimation {
    progress: f64,
}

impl EntryAnimation {
    /// Starts at `0` when `animate` is set, otherwise fully revealed.
    #[must_use]
    pub fn new(animate: bool) -> Self {
        Self {
            progress: if animate { 0.0 } else { 1.0 },
        }
    }

    #[must_use]
    pub fn is_running(self) -> bool {
        self.progress < 1.0
    }

    /// Reveal amount; easings with overshoot may push it past `1`.
    #[must_use]
    pub fn reveal(self) -> f64 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.max(0.0)
        };
    }

    pub fn finish(&mut self) {
        self.progress = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Morph, MorphState, morph_vertices};
    use crate::core::{Path, Point};

    fn line(y: f64) -> Path {
        Path::builder()
            .move_to(Point::new(0.0, y))
            .line_to(Point::new(100.0, y))
            .build()
    }

    #[test]
    fn completed_morph_drops_previous() {
        let mut state = MorphState::new(line(0.0));
        state.retarget(line(10.0));
        assert!(state.is_morphing());
        state.set_progress(1.0);
        assert!(!state.is_morphing());
        assert_eq!(state.displayed(), line(10.0));
    }

    #[test]
    fn progress_is_ignored_while_idle() {
        let mut state = MorphState::new(line(0.0));
        state.set_progress(0.3);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn vertices_resample_by_fraction() {
        let from = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let to = vec![
            Point::new(0.0, 10.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        let mid = morph_vertices(&from, &to, 0.5);
        assert_eq!(mid.len(), 3);
        assert_eq!(mid[1], Point::new(5.0, 5.0));
    }

    #[test]
    fn path_morph_trait_delegates() {
        let mid = line(0.0).morph(&line(10.0), 0.5);
        assert_eq!(mid, line(5.0));
    }
}
