use smallvec::SmallVec;

use crate::core::bezier::{CubicBezier, FLATTEN_STEPS, t_at_length_in_table};
use crate::core::{Path, PathBuilder, Point};

#[derive(Debug, Clone)]
struct MeasuredPiece {
    contour: usize,
    cubic: CubicBezier,
    start: f64,
    table: SmallVec<[f64; FLATTEN_STEPS + 1]>,
}

impl MeasuredPiece {
    fn length(&self) -> f64 {
        self.table.last().copied().unwrap_or(0.0)
    }

    fn t_at(&self, distance: f64) -> f64 {
        t_at_length_in_table(&self.table, distance - self.start)
    }
}

/// Arc-length parametrization of a [`Path`].
///
/// Each segment is flattened into a fixed number of chords, so lookups are
/// `O(log n)` in the segment count and allocation-free after construction.
#[derive(Debug, Clone)]
pub struct PathMeasure {
    pieces: Vec<MeasuredPiece>,
    contour_starts: Vec<Point>,
    total: f64,
}

impl PathMeasure {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let contours = path.to_contours();
        let mut pieces = Vec::new();
        let mut contour_starts = Vec::with_capacity(contours.len());
        let mut total = 0.0;

        for (index, contour) in contours.iter().enumerate() {
            contour_starts.push(contour.start);
            for cubic in &contour.cubics {
                let table = cubic.length_table();
                let length = table.last().copied().unwrap_or(0.0);
                pieces.push(MeasuredPiece {
                    contour: index,
                    cubic: *cubic,
                    start: total,
                    table,
                });
                total += length;
            }
        }

        Self {
            pieces,
            contour_starts,
            total,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contour_starts.is_empty()
    }

    fn piece_index_at(&self, distance: f64) -> usize {
        let idx = self
            .pieces
            .partition_point(|piece| piece.start + piece.length() < distance);
        idx.min(self.pieces.len().saturating_sub(1))
    }

    /// Point at `distance` along the path, clamped to `[0, length]`.
    /// `None` for a path without any contour.
    #[must_use]
    pub fn position_at(&self, distance: f64) -> Option<Point> {
        if self.pieces.is_empty() {
            return self.contour_starts.first().copied();
        }
        let distance = if distance.is_nan() {
            0.0
        } else {
            distance.clamp(0.0, self.total)
        };
        let piece = &self.pieces[self.piece_index_at(distance)];
        Some(piece.cubic.eval(piece.t_at(distance)))
    }

    /// Sub-path between two fractions of the total length.
    ///
    /// `trim(0.0, 1.0)` keeps the full geometry; an empty or inverted window
    /// yields an empty path.
    #[must_use]
    pub fn trim(&self, start_fraction: f64, end_fraction: f64) -> Path {
        let start = clamp_unit(start_fraction) * self.total;
        let end = clamp_unit(end_fraction) * self.total;
        if self.pieces.is_empty() || end <= start {
            return Path::empty();
        }

        let mut builder = PathBuilder::default();
        let mut open_contour: Option<usize> = None;
        for piece in &self.pieces {
            let piece_end = piece.start + piece.length();
            if piece_end < start || piece.start > end {
                continue;
            }

            let t0 = if start > piece.start { piece.t_at(start) } else { 0.0 };
            let t1 = if end < piece_end { piece.t_at(end) } else { 1.0 };
            let part = piece.cubic.sub_curve(t0, t1);

            if open_contour != Some(piece.contour) {
                builder = builder.move_to(part.from);
                open_contour = Some(piece.contour);
            }
            builder = builder.cubic_to(part.ctrl1, part.ctrl2, part.to);
        }
        builder.build()
    }

    /// Bisects the length parametrization for the point whose x coordinate
    /// matches `target_x`. Assumes x grows along the path, which holds for
    /// curves built from x-sorted data.
    #[must_use]
    pub fn point_at_x(&self, target_x: f64, iterations: usize) -> Option<Point> {
        let first = self.position_at(0.0)?;
        let last = self.position_at(self.total)?;
        let ascending = last.x >= first.x;

        let mut lo = 0.0;
        let mut hi = self.total;
        for _ in 0..iterations {
            let mid = (lo + hi) * 0.5;
            let p = self.position_at(mid)?;
            let before = if ascending { p.x < target_x } else { p.x > target_x };
            if before {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.position_at((lo + hi) * 0.5)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PathMeasure;
    use crate::core::{Path, Point};

    fn l_shape() -> Path {
        Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(30.0, 0.0))
            .line_to(Point::new(30.0, 40.0))
            .build()
    }

    #[test]
    fn measures_polyline_length() {
        let measure = PathMeasure::new(&l_shape());
        assert!((measure.length() - 70.0).abs() <= 1e-9);
        let p = measure.position_at(45.0).expect("point");
        assert!((p.x - 30.0).abs() <= 1e-9);
        assert!((p.y - 15.0).abs() <= 1e-9);
    }

    #[test]
    fn trim_keeps_leading_fraction() {
        let measure = PathMeasure::new(&l_shape());
        let half = PathMeasure::new(&measure.trim(0.0, 0.5));
        assert!((half.length() - 35.0).abs() <= 1e-6);
    }

    #[test]
    fn empty_path_has_no_position() {
        let measure = PathMeasure::new(&Path::empty());
        assert!(measure.position_at(1.0).is_none());
        assert!(measure.trim(0.0, 1.0).is_empty());
    }

    #[test]
    fn point_at_x_bisects_along_length() {
        let path = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 50.0))
            .build();
        let p = PathMeasure::new(&path).point_at_x(40.0, 30).expect("point");
        assert!((p.x - 40.0).abs() <= 1e-6);
        assert!((p.y - 20.0).abs() <= 1e-6);
    }
}
