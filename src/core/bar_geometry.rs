use serde::{Deserialize, Serialize};

use crate::core::{BandScale, DataPoint, LinearScale};

/// Pixel rectangle of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Screen y of the zero line the bar grows from.
    pub baseline_y: f64,
    pub value: f64,
}

impl BarRect {
    /// Screen y of the bar's value end (top for positive values).
    #[must_use]
    pub fn value_y(self) -> f64 {
        if self.value < 0.0 {
            self.y + self.height
        } else {
            self.y
        }
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width * 0.5
    }

    /// The same bar with zero height, resting on its baseline.
    #[must_use]
    pub fn collapsed(self) -> Self {
        Self {
            y: self.baseline_y,
            height: 0.0,
            value: 0.0,
            ..self
        }
    }
}

/// Screen y of the zero line. Degenerate value domains (all values equal to
/// zero) rest on the range floor instead of the range midpoint.
#[must_use]
pub fn baseline_y(y_scale: LinearScale) -> f64 {
    if y_scale.is_degenerate() {
        return y_scale.range().0;
    }
    let (min, max) = y_scale.domain();
    y_scale.map(0.0_f64.clamp(min, max))
}

/// Projects one bar per point; band `i` hosts point `i`.
///
/// Heights are `|baseline - y_scale.map(value)|`, so with a `[0, max]` domain
/// the height is `range_floor - map(value)`. Non-finite values and
/// degenerate domains produce zero-height bars.
#[must_use]
pub fn project_bars(points: &[DataPoint], x_scale: &BandScale, y_scale: LinearScale) -> Vec<BarRect> {
    let baseline = baseline_y(y_scale);
    points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let band = x_scale.band_at(index)?;
            let value = if point.y.is_finite() { point.y } else { 0.0 };
            let top = if y_scale.is_degenerate() {
                baseline
            } else {
                y_scale.map(value)
            };
            Some(BarRect {
                index,
                x: band.start,
                y: top.min(baseline),
                width: band.bandwidth,
                height: (baseline - top).abs(),
                baseline_y: baseline,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::project_bars;
    use crate::core::{BandScale, DataPoint, LinearScale};

    #[test]
    fn negative_values_grow_downwards() {
        let points = vec![DataPoint::new(0.0, -10.0), DataPoint::new(1.0, 10.0)];
        let x = BandScale::indexed(2, (0.0, 200.0), 0.0, 0.0);
        let y = LinearScale::new((-10.0, 10.0), (200.0, 0.0));
        let bars = project_bars(&points, &x, y);
        assert_eq!(bars[0].y, 100.0);
        assert_eq!(bars[0].height, 100.0);
        assert_eq!(bars[0].value_y(), 200.0);
        assert_eq!(bars[1].y, 0.0);
    }

    #[test]
    fn all_zero_values_give_flat_bars_on_floor() {
        let points = vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 0.0)];
        let x = BandScale::indexed(2, (0.0, 200.0), 0.2, 0.1);
        let y = LinearScale::new((0.0, 0.0), (180.0, 20.0));
        let bars = project_bars(&points, &x, y);
        assert!(bars.iter().all(|b| b.height == 0.0 && b.y == 180.0));
    }
}
