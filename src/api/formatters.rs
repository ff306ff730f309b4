use std::fmt;
use std::sync::Arc;

use chrono::DateTime;

use crate::core::DataPoint;

type NumberFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;
type CategoryFn = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;
type PointFn = Arc<dyn Fn(&DataPoint) -> String + Send + Sync + 'static>;

/// Formats numeric tick and value labels.
///
/// The default prints at most two decimals with trailing zeros trimmed.
/// `format` never reaches the wrapped closure with a non-finite value.
#[derive(Clone)]
pub struct ValueFormatter(NumberFn);

impl ValueFormatter {
    pub fn new<F>(formatter: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(formatter))
    }

    /// Fixed number of decimals.
    #[must_use]
    pub fn fixed(precision: u8) -> Self {
        let precision = usize::from(precision);
        Self::new(move |value| format!("{value:.precision$}"))
    }

    /// Interprets values as unix seconds and prints `HH:MM` in UTC.
    #[must_use]
    pub fn unix_time_of_day() -> Self {
        Self::new(|value| {
            DateTime::from_timestamp(value.floor() as i64, 0)
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_default()
        })
    }

    #[must_use]
    pub fn format(&self, value: f64) -> Option<String> {
        value.is_finite().then(|| (self.0)(value))
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(format_compact_number)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// Formats category labels on band axes. Defaults to identity.
#[derive(Clone)]
pub struct CategoryFormatter(CategoryFn);

impl CategoryFormatter {
    pub fn new<F>(formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(formatter))
    }

    #[must_use]
    pub fn format(&self, category: &str) -> String {
        (self.0)(category)
    }
}

impl Default for CategoryFormatter {
    fn default() -> Self {
        Self::new(str::to_owned)
    }
}

impl fmt::Debug for CategoryFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CategoryFormatter(..)")
    }
}

/// Formats the tooltip text for a selected point.
///
/// The default prints the label (when present) followed by the compact y
/// value, e.g. `"Mar: 42.5"`.
#[derive(Clone)]
pub struct PointFormatter(PointFn);

impl PointFormatter {
    pub fn new<F>(formatter: F) -> Self
    where
        F: Fn(&DataPoint) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(formatter))
    }

    /// `None` for points with non-finite coordinates.
    #[must_use]
    pub fn format(&self, point: &DataPoint) -> Option<String> {
        point.is_finite().then(|| (self.0)(point))
    }
}

impl Default for PointFormatter {
    fn default() -> Self {
        Self::new(|point| match &point.label {
            Some(label) => format!("{label}: {}", format_compact_number(point.y)),
            None => format_compact_number(point.y),
        })
    }
}

impl fmt::Debug for PointFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointFormatter(..)")
    }
}

/// Up to two decimals, trailing zeros and a dangling point removed.
#[must_use]
pub fn format_compact_number(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PointFormatter, ValueFormatter, format_compact_number};
    use crate::core::DataPoint;

    #[test]
    fn compact_number_trims_zeros() {
        assert_eq!(format_compact_number(12.0), "12");
        assert_eq!(format_compact_number(12.5), "12.5");
        assert_eq!(format_compact_number(0.125), "0.13");
        assert_eq!(format_compact_number(-0.001), "0");
        assert_eq!(format_compact_number(100.0), "100");
    }

    #[test]
    fn formatter_never_sees_non_finite_values() {
        let formatter = ValueFormatter::new(|v| {
            assert!(v.is_finite());
            format!("{v}")
        });
        assert_eq!(formatter.format(f64::NAN), None);
        assert_eq!(formatter.format(f64::INFINITY), None);
        assert_eq!(formatter.format(2.0).as_deref(), Some("2"));
    }

    #[test]
    fn default_point_formatter_uses_label() {
        let point = DataPoint::new(1.0, 42.5).with_label("Mar");
        assert_eq!(
            PointFormatter::default().format(&point).as_deref(),
            Some("Mar: 42.5")
        );
    }

    #[test]
    fn time_of_day_formats_utc() {
        let formatter = ValueFormatter::unix_time_of_day();
        assert_eq!(formatter.format(3_600.0 * 13.0 + 60.0 * 5.0).as_deref(), Some("13:05"));
    }
}
