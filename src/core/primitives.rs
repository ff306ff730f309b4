/// Replaces NaN/Infinity with `fallback` so derived geometry stays finite.
#[must_use]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Clamps an animation progress sample into `[0, 1]`; NaN counts as `0`.
#[must_use]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_progress, finite_or};

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(1.2), 1.0);
        assert_eq!(clamp_progress(0.25), 0.25);
    }

    #[test]
    fn non_finite_values_fall_back() {
        assert_eq!(finite_or(f64::INFINITY, 3.0), 3.0);
        assert_eq!(finite_or(2.0, 3.0), 2.0);
    }
}
