use serde::{Deserialize, Serialize};

use crate::core::{Path, PathBuilder, Point};

const EPSILON: f64 = 1e-12;

/// Smoothed line through the projected data plus its filled variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveGeometry {
    pub vertices: Vec<Point>,
    pub line: Path,
    /// `line` closed against the baseline, used for gradient fills.
    pub fill: Path,
}

impl CurveGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Builds centripetal Catmull-Rom curves with adjustable tension.
///
/// `tension = 1` yields the full centripetal Catmull-Rom spline
/// (alpha 0.5); `tension = 0` keeps every control point on its chord so the
/// result draws straight segments. Values in between blend the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveBuilder {
    tension: f64,
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self { tension: 1.0 }
    }
}

impl CurveBuilder {
    #[must_use]
    pub fn new(tension: f64) -> Self {
        let tension = if tension.is_finite() {
            tension.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self { tension }
    }

    #[must_use]
    pub fn tension(self) -> f64 {
        self.tension
    }

    /// Builds line and fill paths through `vertices` in input order.
    ///
    /// Non-finite vertices are dropped. Zero vertices give empty paths, one
    /// vertex gives a lone `MoveTo`, two vertices give a single straight
    /// `LineTo` whatever the tension.
    #[must_use]
    pub fn build(self, vertices: &[Point], baseline_y: f64) -> CurveGeometry {
        let vertices: Vec<Point> = vertices.iter().copied().filter(|p| p.is_finite()).collect();
        let line = self.line_path(&vertices);
        let fill = fill_path(&line, &vertices, baseline_y);
        CurveGeometry {
            vertices,
            line,
            fill,
        }
    }

    fn line_path(self, vertices: &[Point]) -> Path {
        match vertices {
            [] => Path::empty(),
            [only] => Path::builder().move_to(*only).build(),
            [first, second] => Path::builder().move_to(*first).line_to(*second).build(),
            _ => {
                let mut builder = Path::builder().move_to(vertices[0]);
                for i in 0..vertices.len() - 1 {
                    let prev = i.checked_sub(1).map(|j| vertices[j]);
                    let next = vertices.get(i + 2).copied();
                    let (ctrl1, ctrl2) =
                        self.segment_controls(prev, vertices[i], vertices[i + 1], next);
                    builder = builder.cubic_to(ctrl1, ctrl2, vertices[i + 1]);
                }
                builder.build()
            }
        }
    }

    /// Control points for the segment `p1 -> p2` given optional neighbours.
    fn segment_controls(
        self,
        p0: Option<Point>,
        p1: Point,
        p2: Point,
        p3: Option<Point>,
    ) -> (Point, Point) {
        let l12_2a = p1.distance(p2);
        let l12_a = l12_2a.sqrt();

        let mut c1 = p1;
        if let Some(p0) = p0 {
            let l01_2a = p0.distance(p1);
            let l01_a = l01_2a.sqrt();
            if l01_a > EPSILON {
                let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
                let n = 3.0 * l01_a * (l01_a + l12_a);
                if n != 0.0 && n.is_finite() {
                    c1 = Point::new(
                        (p1.x * a - p0.x * l12_2a + p2.x * l01_2a) / n,
                        (p1.y * a - p0.y * l12_2a + p2.y * l01_2a) / n,
                    );
                }
            }
        }

        let mut c2 = p2;
        if let Some(p3) = p3 {
            let l23_2a = p2.distance(p3);
            let l23_a = l23_2a.sqrt();
            if l23_a > EPSILON {
                let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
                let m = 3.0 * l23_a * (l23_a + l12_a);
                if m != 0.0 && m.is_finite() {
                    c2 = Point::new(
                        (p2.x * b + p1.x * l23_2a - p3.x * l12_2a) / m,
                        (p2.y * b + p1.y * l23_2a - p3.y * l12_2a) / m,
                    );
                }
            }
        }

        let chord1 = p1.lerp(p2, 1.0 / 3.0);
        let chord2 = p1.lerp(p2, 2.0 / 3.0);
        (
            chord1.lerp(c1, self.tension),
            chord2.lerp(c2, self.tension),
        )
    }
}

fn fill_path(line: &Path, vertices: &[Point], baseline_y: f64) -> Path {
    let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
        return Path::empty();
    };
    if vertices.len() < 2 || !baseline_y.is_finite() {
        return Path::empty();
    }

    PathBuilder::default()
        .extend(line.segments().iter().copied())
        .line_to(Point::new(last.x, baseline_y))
        .line_to(Point::new(first.x, baseline_y))
        .close()
        .build()
}

#[cfg(test)]
mod tests {
    use super::CurveBuilder;
    use crate::core::{PathSegment, Point};

    #[test]
    fn zero_tension_keeps_controls_on_chords() {
        let vertices = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 60.0),
            Point::new(60.0, 0.0),
        ];
        let geometry = CurveBuilder::new(0.0).build(&vertices, 100.0);
        let PathSegment::CubicTo { ctrl1, ctrl2, to } = geometry.line.segments()[1] else {
            panic!("expected cubic");
        };
        assert!((ctrl1.x - 10.0).abs() <= 1e-9 && (ctrl1.y - 20.0).abs() <= 1e-9);
        assert!((ctrl2.x - 20.0).abs() <= 1e-9 && (ctrl2.y - 40.0).abs() <= 1e-9);
        assert_eq!(to, vertices[1]);
    }

    #[test]
    fn endpoint_controls_sit_on_endpoints_at_full_tension() {
        let vertices = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 60.0),
            Point::new(60.0, 0.0),
        ];
        let geometry = CurveBuilder::new(1.0).build(&vertices, 100.0);
        let PathSegment::CubicTo { ctrl1, .. } = geometry.line.segments()[1] else {
            panic!("expected cubic");
        };
        assert_eq!(ctrl1, vertices[0]);
    }

    #[test]
    fn non_finite_tension_falls_back_to_default() {
        assert_eq!(CurveBuilder::new(f64::NAN).tension(), 1.0);
        assert_eq!(CurveBuilder::new(4.0).tension(), 1.0);
    }
}
