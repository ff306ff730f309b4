use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Path, PathBuilder, Point};

/// Angular extent of one pie slice.
///
/// Angles are radians measured clockwise from twelve o'clock. `end_angle -
/// start_angle` includes the slice's share of padding; the drawn wedge is
/// inset by `pad_angle / 2` on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSlice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl ArcSlice {
    /// Drawn sweep, excluding padding.
    #[must_use]
    pub fn sweep(self) -> f64 {
        (self.end_angle - self.start_angle - self.pad_angle).max(0.0)
    }

    #[must_use]
    pub fn drawn_start(self) -> f64 {
        self.start_angle + self.pad_angle * 0.5
    }

    #[must_use]
    pub fn drawn_end(self) -> f64 {
        self.drawn_start() + self.sweep()
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.drawn_start() + self.drawn_end()) * 0.5
    }

    /// The slice with every angle scaled by `factor`, used by sweep reveals.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            start_angle: self.start_angle * factor,
            end_angle: self.end_angle * factor,
            pad_angle: self.pad_angle * factor,
            ..self
        }
    }
}

/// Lays slices out in input order (no sorting).
///
/// Every slice reserves `pad_angle` (capped at `2π / n`); the remaining
/// circle is shared proportionally to value, so a slice's drawn sweep is
/// `value / sum * (2π - n * pad)` and the slices cover the full turn.
/// Negative and non-finite values count as zero. A zero sum yields slices
/// with no drawn sweep.
#[must_use]
pub fn pie_slices(values: &[f64], pad_angle: f64) -> Vec<ArcSlice> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let sum: f64 = values.iter().copied().map(clean).sum();
    let pad = if pad_angle.is_finite() {
        pad_angle.max(0.0).min(TAU / n as f64)
    } else {
        0.0
    };
    let k = if sum > 0.0 {
        (TAU - n as f64 * pad) / sum
    } else {
        0.0
    };

    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let value = clean(*raw);
            let start = angle;
            angle += value * k + pad;
            ArcSlice {
                index,
                value,
                start_angle: start,
                end_angle: angle,
                pad_angle: pad,
            }
        })
        .collect()
}

/// Point on a circle of `radius` around `center` at a clockwise-from-top angle.
#[must_use]
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Wedge (or annulus segment when `inner_radius > 0`) path for a slice.
/// Slices without drawn sweep produce an empty path.
#[must_use]
pub fn slice_path(slice: ArcSlice, center: Point, outer_radius: f64, inner_radius: f64) -> Path {
    let (a0, a1) = (slice.drawn_start(), slice.drawn_end());
    let outer = outer_radius.max(0.0);
    let inner = inner_radius.clamp(0.0, outer);
    if slice.sweep() <= 0.0 || outer <= 0.0 {
        return Path::empty();
    }

    let mut builder = Path::builder().move_to(polar(center, outer, a0));
    builder = append_arc(builder, center, outer, a0, a1);
    if inner > 0.0 {
        builder = builder.line_to(polar(center, inner, a1));
        builder = append_arc(builder, center, inner, a1, a0);
    } else {
        builder = builder.line_to(center);
    }
    builder.close().build()
}

/// Label anchor in the middle of the slice's ring segment.
#[must_use]
pub fn slice_centroid(slice: ArcSlice, center: Point, outer_radius: f64, inner_radius: f64) -> Point {
    polar(center, (outer_radius + inner_radius) * 0.5, slice.mid_angle())
}

/// Appends cubic approximations of a circular arc, at most a quarter turn
/// per cubic.
fn append_arc(
    mut builder: PathBuilder,
    center: Point,
    radius: f64,
    from: f64,
    to: f64,
) -> PathBuilder {
    let total = to - from;
    let pieces = (total.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let delta = total / pieces as f64;
    let k = 4.0 / 3.0 * (delta / 4.0).tan();

    let mut angles: SmallVec<[f64; 5]> = SmallVec::new();
    for i in 0..=pieces {
        angles.push(if i == pieces { to } else { from + delta * i as f64 });
    }

    for pair in angles.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let p0 = polar(center, radius, t0);
        let p3 = polar(center, radius, t1);
        // d/dθ of `polar` is (r cos θ, r sin θ).
        let ctrl1 = Point::new(p0.x + k * radius * t0.cos(), p0.y + k * radius * t0.sin());
        let ctrl2 = Point::new(p3.x - k * radius * t1.cos(), p3.y - k * radius * t1.sin());
        builder = builder.cubic_to(ctrl1, ctrl2, p3);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::{pie_slices, polar, slice_path};
    use crate::core::Point;
    use crate::core::path_measure::PathMeasure;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn zero_sum_gives_no_sweep() {
        let slices = pie_slices(&[0.0, 0.0], 0.02);
        assert!(slices.iter().all(|s| s.sweep() == 0.0));
    }

    #[test]
    fn quarter_arc_length_is_close_to_exact() {
        let slices = pie_slices(&[1.0, 3.0], 0.0);
        let center = Point::new(100.0, 100.0);
        let path = slice_path(slices[0], center, 50.0, 0.0);
        let expected = 50.0 * PI / 2.0 + 2.0 * 50.0;
        let measured = PathMeasure::new(&path).length();
        assert!((measured - expected).abs() < 0.05, "{measured} vs {expected}");
        assert!((slices[1].end_angle - TAU).abs() <= 1e-12);
    }

    #[test]
    fn polar_zero_points_up() {
        let p = polar(Point::new(10.0, 10.0), 5.0, 0.0);
        assert!((p.x - 10.0).abs() <= 1e-12);
        assert!((p.y - 5.0).abs() <= 1e-12);
    }
}
