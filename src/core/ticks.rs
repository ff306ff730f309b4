use serde::{Deserialize, Serialize};

use crate::core::{BandScale, DataPoint, LinearScale, Scale};

/// One labeled reference point on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Screen coordinate along the axis.
    pub position: f64,
    pub value: f64,
    pub label: String,
}

/// Ticks of one axis in domain order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickSet {
    pub ticks: Vec<Tick>,
}

impl TickSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().map(|t| t.position)
    }
}

/// Derives tick sets from scales without mutating them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisTickPlanner;

impl AxisTickPlanner {
    /// `count` evenly spaced ticks across the domain of a linear scale.
    ///
    /// `count == 1` yields the domain minimum only; `count == 0` yields no
    /// ticks. The formatter is never called with a non-finite value.
    pub fn linear<F>(scale: LinearScale, count: usize, formatter: F) -> TickSet
    where
        F: Fn(f64) -> String,
    {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .filter(|value| value.is_finite())
            .filter_map(|value| {
                let position = scale.map(value);
                position.is_finite().then(|| Tick {
                    position,
                    value,
                    label: formatter(value),
                })
            })
            .collect();
        TickSet { ticks }
    }

    /// One tick per category, centered in its band.
    ///
    /// Labels come from the matching point's `label`, falling back to the
    /// category index, and pass through `formatter`. Points beyond the band
    /// count are ignored; bands beyond the points use the index label.
    pub fn band<F>(scale: &BandScale, points: &[DataPoint], formatter: F) -> TickSet
    where
        F: Fn(&str) -> String,
    {
        let ticks = (0..scale.len())
            .filter_map(|index| {
                let band = scale.band_at(index)?;
                let raw = points
                    .get(index)
                    .and_then(|p| p.label.clone())
                    .unwrap_or_else(|| index.to_string());
                Some(Tick {
                    position: band.center(),
                    value: index as f64,
                    label: formatter(&raw),
                })
            })
            .collect();
        TickSet { ticks }
    }

    /// Dispatches on the scale kind. Band scales ignore `count` and the
    /// numeric formatter; their labels come from `points`.
    pub fn plan<F>(scale: &Scale, count: usize, points: &[DataPoint], formatter: F) -> TickSet
    where
        F: Fn(f64) -> String,
    {
        match scale {
            Scale::Linear(linear) => Self::linear(*linear, count, formatter),
            Scale::Band(band) => Self::band(band, points, str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AxisTickPlanner;
    use crate::core::{BandScale, DataPoint, LinearScale};

    #[test]
    fn degenerate_domain_yields_single_tick_at_midpoint() {
        let scale = LinearScale::new((7.0, 7.0), (0.0, 100.0));
        let ticks = AxisTickPlanner::linear(scale, 5, |v| format!("{v}"));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks.ticks[0].position, 50.0);
        assert_eq!(ticks.ticks[0].label, "7");
    }

    #[test]
    fn band_labels_fall_back_to_index() {
        let scale = BandScale::indexed(3, (0.0, 300.0), 0.0, 0.0);
        let points = vec![
            DataPoint::new(0.0, 1.0).with_label("Mon"),
            DataPoint::new(1.0, 2.0),
        ];
        let ticks = AxisTickPlanner::band(&scale, &points, |s| s.to_uppercase());
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["MON", "1", "2"]);
        assert_eq!(ticks.ticks[0].position, 50.0);
    }
}
