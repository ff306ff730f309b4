//! Interpolation between two paths.
//!
//! Paths with the same command sequence interpolate segment by segment and
//! keep their command kinds. Anything else goes through a cubic
//! normalization:
//!
//! 1. both paths are split into cubic contours; a missing contour (including
//!    an empty path) becomes a collapsed contour sitting on the start point
//!    of its counterpart, so "no data" morphs as an expand/collapse;
//! 2. the contour with fewer cubics is subdivided until the counts match.
//!    Each step splits the piece with the greatest arc length at half its
//!    length (earliest piece on ties). Splits are exact, so the resampled
//!    contour traces the same curve;
//! 3. start points and control points are interpolated pairwise.
//!
//! `progress <= 0` returns the first path and `progress >= 1` the second,
//! unchanged.

use crate::core::bezier::CubicBezier;
use crate::core::path::CubicContour;
use crate::core::primitives::clamp_progress;
use crate::core::{Path, PathSegment, Point};

/// Stateless path interpolator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathMorpher;

impl PathMorpher {
    #[must_use]
    pub fn interpolate(from: &Path, to: &Path, progress: f64) -> Path {
        let progress = clamp_progress(progress);
        if progress <= 0.0 {
            return from.clone();
        }
        if progress >= 1.0 {
            return to.clone();
        }
        if from.is_empty() && to.is_empty() {
            return Path::empty();
        }

        if from.same_topology(to) {
            return interpolate_same_topology(from, to, progress);
        }

        let mut from_contours = from.to_contours();
        let mut to_contours = to.to_contours();
        align_contour_counts(&mut from_contours, &mut to_contours);

        let merged: Vec<CubicContour> = from_contours
            .into_iter()
            .zip(to_contours)
            .map(|(a, b)| {
                let target = a.cubics.len().max(b.cubics.len());
                let a = resample_contour(a, target);
                let b = resample_contour(b, target);
                interpolate_contour(&a, &b, progress)
            })
            .collect();

        Path::from_contours(&merged)
    }

    /// Resamples `path` so every contour has at least `segment_count` cubic
    /// segments, using the same rule as mismatched morphs.
    #[must_use]
    pub fn resample(path: &Path, segment_count: usize) -> Path {
        let contours: Vec<CubicContour> = path
            .to_contours()
            .into_iter()
            .map(|contour| resample_contour(contour, segment_count))
            .collect();
        Path::from_contours(&contours)
    }
}

fn interpolate_same_topology(from: &Path, to: &Path, t: f64) -> Path {
    let segments = from
        .segments()
        .iter()
        .zip(to.segments())
        .map(|(a, b)| match (*a, *b) {
            (PathSegment::MoveTo(p), PathSegment::MoveTo(q)) => PathSegment::MoveTo(p.lerp(q, t)),
            (PathSegment::LineTo(p), PathSegment::LineTo(q)) => PathSegment::LineTo(p.lerp(q, t)),
            (
                PathSegment::CubicTo {
                    ctrl1: a1,
                    ctrl2: a2,
                    to: a3,
                },
                PathSegment::CubicTo {
                    ctrl1: b1,
                    ctrl2: b2,
                    to: b3,
                },
            ) => PathSegment::CubicTo {
                ctrl1: a1.lerp(b1, t),
                ctrl2: a2.lerp(b2, t),
                to: a3.lerp(b3, t),
            },
            _ => PathSegment::Close,
        });
    Path::builder().extend(segments).build()
}

fn align_contour_counts(from: &mut Vec<CubicContour>, to: &mut Vec<CubicContour>) {
    let fallback = from
        .first()
        .or(to.first())
        .map_or(Point::default(), |c| c.start);

    while from.len() < to.len() {
        let other = &to[from.len()];
        from.push(CubicContour::collapsed(other.start, 0, other.closed));
    }
    while to.len() < from.len() {
        let other = &from[to.len()];
        to.push(CubicContour::collapsed(other.start, 0, other.closed));
    }
    if from.is_empty() {
        from.push(CubicContour::new(fallback));
        to.push(CubicContour::new(fallback));
    }
}

fn resample_contour(mut contour: CubicContour, target: usize) -> CubicContour {
    if contour.cubics.len() >= target {
        return contour;
    }
    if contour.cubics.is_empty() {
        return CubicContour::collapsed(contour.start, target, contour.closed);
    }

    let mut lengths: Vec<f64> = contour.cubics.iter().map(|c| c.length()).collect();
    while contour.cubics.len() < target {
        let mut longest = 0;
        for (i, len) in lengths.iter().enumerate() {
            if *len > lengths[longest] {
                longest = i;
            }
        }

        let piece = contour.cubics[longest];
        let t = if lengths[longest] > 0.0 {
            piece.t_at_length(lengths[longest] * 0.5)
        } else {
            0.5
        };
        let (head, tail) = piece.split(t);
        contour.cubics[longest] = head;
        contour.cubics.insert(longest + 1, tail);
        lengths[longest] = head.length();
        lengths.insert(longest + 1, tail.length());
    }
    contour
}

fn interpolate_contour(a: &CubicContour, b: &CubicContour, t: f64) -> CubicContour {
    let start = a.start.lerp(b.start, t);
    let mut cursor = start;
    let cubics = a
        .cubics
        .iter()
        .zip(&b.cubics)
        .map(|(ca, cb)| {
            let cubic = CubicBezier::new(
                cursor,
                ca.ctrl1.lerp(cb.ctrl1, t),
                ca.ctrl2.lerp(cb.ctrl2, t),
                ca.to.lerp(cb.to, t),
            );
            cursor = cubic.to;
            cubic
        })
        .collect();

    CubicContour {
        start,
        cubics,
        closed: if t < 0.5 { a.closed } else { b.closed },
    }
}
