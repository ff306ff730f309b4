use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::core::bezier::CubicBezier;

/// One draw command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
}

impl PathSegment {
    /// End point of the command, `None` for `Close`.
    #[must_use]
    pub fn end_point(self) -> Option<Point> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::CubicTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    fn same_kind(self, other: Self) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// Immutable list of draw commands.
///
/// Drawing-surface adapters replay the segments against their native path
/// builder; nothing here depends on a rasterizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> PathBuilder {
        PathBuilder::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of drawing segments (everything except `MoveTo`).
    #[must_use]
    pub fn draw_segment_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().and_then(|s| s.end_point())
    }

    /// Returns `true` when both paths use the same command sequence, which
    /// allows segment-wise interpolation without resampling.
    #[must_use]
    pub fn same_topology(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.same_kind(*b))
    }

    /// Splits the path into contours of cubic segments. Lines become cubics
    /// with controls at the thirds; `Close` becomes a closing line when the
    /// contour does not already end at its start.
    #[must_use]
    pub fn to_contours(&self) -> Vec<CubicContour> {
        let mut contours = Vec::new();
        let mut current: Option<CubicContour> = None;
        let mut cursor = Point::default();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if let Some(done) = current.take() {
                        contours.push(done);
                    }
                    current = Some(CubicContour::new(p));
                    cursor = p;
                }
                PathSegment::LineTo(p) => {
                    let contour = current.get_or_insert_with(|| CubicContour::new(cursor));
                    contour.cubics.push(CubicBezier::from_line(cursor, p));
                    cursor = p;
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let contour = current.get_or_insert_with(|| CubicContour::new(cursor));
                    contour.cubics.push(CubicBezier::new(cursor, ctrl1, ctrl2, to));
                    cursor = to;
                }
                PathSegment::Close => {
                    if let Some(mut contour) = current.take() {
                        if cursor != contour.start {
                            contour
                                .cubics
                                .push(CubicBezier::from_line(cursor, contour.start));
                        }
                        contour.closed = true;
                        cursor = contour.start;
                        contours.push(contour);
                    }
                }
            }
        }

        if let Some(done) = current {
            contours.push(done);
        }
        contours
    }

    /// Rebuilds a path from cubic contours.
    #[must_use]
    pub fn from_contours(contours: &[CubicContour]) -> Self {
        let mut builder = PathBuilder::default();
        for contour in contours {
            builder = builder.move_to(contour.start);
            for cubic in &contour.cubics {
                builder = builder.cubic_to(cubic.ctrl1, cubic.ctrl2, cubic.to);
            }
            if contour.closed {
                builder = builder.close();
            }
        }
        builder.build()
    }

    /// SVG path data with absolute commands, for snapshots and debugging.
    #[must_use]
    pub fn to_svg_d(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            // Writing into a String cannot fail.
            let _ = match *segment {
                PathSegment::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
                PathSegment::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
                PathSegment::CubicTo { ctrl1, ctrl2, to } => write!(
                    out,
                    "C{},{},{},{},{},{}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                ),
                PathSegment::Close => write!(out, "Z"),
            };
        }
        out
    }

    /// Returns `true` when every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|segment| match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p.is_finite(),
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite()
            }
            PathSegment::Close => true,
        })
    }
}

/// Consuming builder for [`Path`].
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
}

impl PathBuilder {
    #[must_use]
    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    #[must_use]
    pub fn line_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    #[must_use]
    pub fn cubic_to(mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        self.segments.push(PathSegment::CubicTo { ctrl1, ctrl2, to });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    #[must_use]
    pub fn extend(mut self, segments: impl IntoIterator<Item = PathSegment>) -> Self {
        self.segments.extend(segments);
        self
    }

    #[must_use]
    pub fn build(self) -> Path {
        Path {
            segments: self.segments,
        }
    }
}

/// A sub-path normalized to cubic segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicContour {
    pub start: Point,
    pub cubics: Vec<CubicBezier>,
    pub closed: bool,
}

impl CubicContour {
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self {
            start,
            cubics: Vec::new(),
            closed: false,
        }
    }

    /// Contour of `count` zero-length cubics sitting on `at`.
    #[must_use]
    pub fn collapsed(at: Point, count: usize, closed: bool) -> Self {
        Self {
            start: at,
            cubics: vec![CubicBezier::point(at); count],
            closed,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.cubics.iter().map(|c| c.length()).sum()
    }
}
