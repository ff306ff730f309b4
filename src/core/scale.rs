use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::primitives::finite_or;

/// Affine domain-to-range mapping.
///
/// The domain is normalized so `domain_min <= domain_max`; the range keeps
/// its orientation, which is how a y axis maps larger values upwards
/// (`range = (bottom, top)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Non-finite bounds are replaced by `0.0` and a reversed domain is
    /// swapped, so construction never fails.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let d0 = finite_or(domain.0, 0.0);
        let d1 = finite_or(domain.1, 0.0);
        Self {
            domain_min: d0.min(d1),
            domain_max: d0.max(d1),
            range_start: finite_or(range.0, 0.0),
            range_end: finite_or(range.1, 0.0),
        }
    }

    /// Scale covering the extent of `values`, ignoring non-finite entries.
    /// An empty input yields the degenerate domain `[0, 0]`.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let (min, max) = extent(values).unwrap_or((0.0, 0.0));
        Self::new((min, max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_min == self.domain_max
    }

    #[must_use]
    pub fn range_midpoint(self) -> f64 {
        (self.range_start + self.range_end) * 0.5
    }

    /// Maps a domain value into the range. A zero-width domain maps every
    /// input to the range midpoint; non-finite input maps to the midpoint as
    /// well.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return self.range_midpoint();
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Maps a range value back into the domain. Degenerate domains, zero-size
    /// ranges and non-finite input resolve to `domain_min`.
    #[must_use]
    pub fn invert(self, value: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if self.is_degenerate() || span == 0.0 || !value.is_finite() {
            return self.domain_min;
        }
        let t = (value - self.range_start) / span;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Like [`LinearScale::invert`] but clamps the pixel into the range first.
    #[must_use]
    pub fn invert_clamped(self, value: f64) -> f64 {
        let lo = self.range_start.min(self.range_end);
        let hi = self.range_start.max(self.range_end);
        let clamped = if value.is_nan() { lo } else { value.clamp(lo, hi) };
        self.invert(clamped)
    }

    /// `count` evenly spaced domain values, both ends included.
    ///
    /// `count <= 1` yields only the domain minimum; a degenerate domain
    /// yields only its single value.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 || self.is_degenerate() {
            return vec![self.domain_min];
        }

        let step = (self.domain_max - self.domain_min) / (count - 1) as f64;
        (0..count)
            .map(|i| {
                if i == count - 1 {
                    self.domain_max
                } else {
                    self.domain_min + step * i as f64
                }
            })
            .collect()
    }
}

/// Start and width of one category slot in a [`BandScale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub start: f64,
    pub bandwidth: f64,
}

impl Band {
    #[must_use]
    pub fn center(self) -> f64 {
        self.start + self.bandwidth * 0.5
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.bandwidth
    }
}

/// Categorical scale splitting the range into equal bands.
///
/// With `n` keys the range is divided into steps of
/// `span / (n - padding_inner + 2 * padding_outer)`; each band is
/// `step * (1 - padding_inner)` wide and the leftover span is split evenly
/// between both ends (`step * padding_outer` each unless the step had to be
/// widened). Duplicate keys collapse onto their first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    keys: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new<I, K>(keys: I, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            range_start: finite_or(range.0, 0.0),
            range_end: finite_or(range.1, 0.0),
            padding_inner: finite_or(padding_inner, 0.0).clamp(0.0, 1.0),
            padding_outer: finite_or(padding_outer, 0.0).max(0.0),
        }
    }

    /// Band scale keyed by index (`"0"`, `"1"`, ...), one band per item.
    #[must_use]
    pub fn indexed(count: usize, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self {
        Self::new(
            (0..count).map(|i| i.to_string()),
            range,
            padding_inner,
            padding_outer,
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.keys.len() as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (self.range_end - self.range_start) / denom
    }

    /// Start of the first band: half of whatever the bands and inner gaps
    /// leave of the range.
    fn first_start(&self, step: f64) -> f64 {
        let n = self.keys.len() as f64;
        let leftover = (self.range_end - self.range_start) - step * (n - self.padding_inner);
        self.range_start + leftover * 0.5
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        (self.step() * (1.0 - self.padding_inner)).abs()
    }

    /// Band for the key at `index` in domain order.
    #[must_use]
    pub fn band_at(&self, index: usize) -> Option<Band> {
        if index >= self.keys.len() {
            return None;
        }
        let step = self.step();
        let start = self.first_start(step) + step * index as f64;
        let bandwidth = self.bandwidth();
        // Reversed ranges walk leftwards; report the band's low edge.
        let start = if step < 0.0 { start - bandwidth } else { start };
        Some(Band { start, bandwidth })
    }

    #[must_use]
    pub fn map(&self, key: &str) -> Option<Band> {
        self.keys.get_index_of(key).and_then(|i| self.band_at(i))
    }

    /// Index of the band whose step slot contains `pixel`, clamped to the
    /// first/last band. `None` only when the scale has no keys.
    #[must_use]
    pub fn index_at(&self, pixel: f64) -> Option<usize> {
        let n = self.keys.len();
        if n == 0 {
            return None;
        }
        let step = self.step();
        if step == 0.0 || !pixel.is_finite() {
            return Some(0);
        }
        let first = self.first_start(step);
        // Slots are centered on bands, so shift by half the inner gap.
        let offset = (pixel - first + step * self.padding_inner * 0.5) / step;
        let index = offset.floor().clamp(0.0, (n - 1) as f64);
        Some(index as usize)
    }
}

/// Either kind of scale an axis can be driven by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Band(BandScale),
}

impl From<LinearScale> for Scale {
    fn from(value: LinearScale) -> Self {
        Self::Linear(value)
    }
}

impl From<BandScale> for Scale {
    fn from(value: BandScale) -> Self {
        Self::Band(value)
    }
}

/// `(min, max)` over the finite values, or `None` when there are none.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
