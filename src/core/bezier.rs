use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;

/// Uniform samples per cubic when measuring arc length.
pub const FLATTEN_STEPS: usize = 24;

/// Cubic Bézier segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezier {
    #[must_use]
    pub const fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Straight segment expressed as a cubic with controls at the thirds, so
    /// `t` advances uniformly along it.
    #[must_use]
    pub fn from_line(from: Point, to: Point) -> Self {
        Self::new(
            from,
            from.lerp(to, 1.0 / 3.0),
            from.lerp(to, 2.0 / 3.0),
            to,
        )
    }

    /// Zero-length cubic collapsed onto `at`.
    #[must_use]
    pub const fn point(at: Point) -> Self {
        Self::new(at, at, at, at)
    }

    #[must_use]
    pub fn eval(self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
            a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
        )
    }

    /// De Casteljau split at `t`; both halves trace the original curve.
    #[must_use]
    pub fn split(self, t: f64) -> (Self, Self) {
        let p01 = self.from.lerp(self.ctrl1, t);
        let p12 = self.ctrl1.lerp(self.ctrl2, t);
        let p23 = self.ctrl2.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let mid = p012.lerp(p123, t);
        (
            Self::new(self.from, p01, p012, mid),
            Self::new(mid, p123, p23, self.to),
        )
    }

    /// Portion of the curve between parameters `t0 <= t1`.
    #[must_use]
    pub fn sub_curve(self, t0: f64, t1: f64) -> Self {
        if t0 <= 0.0 {
            return self.split(t1).0;
        }
        let (_, tail) = self.split(t0);
        if t1 >= 1.0 {
            return tail;
        }
        let local = (t1 - t0) / (1.0 - t0);
        tail.split(local).0
    }

    /// Cumulative chord lengths at `FLATTEN_STEPS + 1` uniform parameters.
    #[must_use]
    pub fn length_table(self) -> SmallVec<[f64; FLATTEN_STEPS + 1]> {
        let mut table = SmallVec::new();
        table.push(0.0);
        let mut prev = self.from;
        let mut acc = 0.0;
        for i in 1..=FLATTEN_STEPS {
            let p = self.eval(i as f64 / FLATTEN_STEPS as f64);
            acc += prev.distance(p);
            table.push(acc);
            prev = p;
        }
        table
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_table().last().copied().unwrap_or(0.0)
    }

    /// Parameter at which the flattened arc length reaches `distance`.
    #[must_use]
    pub fn t_at_length(self, distance: f64) -> f64 {
        t_at_length_in_table(&self.length_table(), distance)
    }

    /// Returns `true` when all four points coincide.
    #[must_use]
    pub fn is_point(self) -> bool {
        self.from == self.ctrl1 && self.from == self.ctrl2 && self.from == self.to
    }
}

/// Inverts a cumulative length table produced by
/// [`CubicBezier::length_table`] with linear interpolation between samples.
#[must_use]
pub fn t_at_length_in_table(table: &[f64], distance: f64) -> f64 {
    let total = table.last().copied().unwrap_or(0.0);
    if total <= 0.0 || distance <= 0.0 {
        return 0.0;
    }
    if distance >= total {
        return 1.0;
    }

    let steps = (table.len() - 1) as f64;
    let upper = table.partition_point(|len| *len < distance).max(1);
    let lower = upper - 1;
    let span = table[upper] - table[lower];
    let frac = if span > 0.0 {
        (distance - table[lower]) / span
    } else {
        0.0
    };
    (lower as f64 + frac) / steps
}

#[cfg(test)]
mod tests {
    use super::CubicBezier;
    use crate::core::Point;

    #[test]
    fn line_cubic_length_matches_chord() {
        let line = CubicBezier::from_line(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!((line.length() - 50.0).abs() <= 1e-9);
        assert!((line.t_at_length(25.0) - 0.5).abs() <= 1e-9);
    }

    #[test]
    fn split_halves_meet_on_curve() {
        let curve = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 40.0),
            Point::new(50.0, 40.0),
            Point::new(60.0, 0.0),
        );
        let (head, tail) = curve.split(0.3);
        let on_curve = curve.eval(0.3);
        assert!(head.to.distance(on_curve) <= 1e-9);
        assert_eq!(head.to, tail.from);
        assert_eq!(tail.to, curve.to);
    }

    #[test]
    fn sub_curve_endpoints_follow_parameters() {
        let curve = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 30.0),
            Point::new(30.0, 30.0),
            Point::new(30.0, 0.0),
        );
        let piece = curve.sub_curve(0.25, 0.75);
        assert!(piece.from.distance(curve.eval(0.25)) <= 1e-9);
        assert!(piece.to.distance(curve.eval(0.75)) <= 1e-9);
    }
}
