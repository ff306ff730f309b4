use approx::assert_abs_diff_eq;
use chart_motion::core::{AxisTickPlanner, BandScale, DataPoint, LinearScale, Scale, extent};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (20.0, 320.0));

    let original = 42.5;
    let px = scale.map(original);
    let recovered = scale.invert(px);

    assert_abs_diff_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn y_scale_maps_larger_values_upwards() {
    let scale = LinearScale::new((0.0, 100.0), (180.0, 20.0));
    assert_abs_diff_eq!(scale.map(0.0), 180.0);
    assert_abs_diff_eq!(scale.map(100.0), 20.0);
    assert!(scale.map(75.0) < scale.map(25.0));
}

#[test]
fn reversed_domain_is_normalized() {
    let scale = LinearScale::new((100.0, 0.0), (0.0, 200.0));
    assert_eq!(scale.domain(), (0.0, 100.0));
    assert_abs_diff_eq!(scale.map(50.0), 100.0);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
    assert!(scale.is_degenerate());
    assert_eq!(scale.map(5.0), 50.0);
    assert_eq!(scale.map(-1_000.0), 50.0);
    assert_eq!(scale.invert(20.0), 5.0);
    assert_eq!(scale.ticks(5), vec![5.0]);
}

#[test]
fn non_finite_input_never_escapes() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
    assert_eq!(scale.map(f64::NAN), 50.0);
    assert_eq!(scale.invert(f64::INFINITY), 0.0);

    let scale = LinearScale::new((f64::NAN, 10.0), (0.0, f64::INFINITY));
    assert_eq!(scale.domain(), (0.0, 10.0));
    assert_eq!(scale.range(), (0.0, 0.0));
}

#[test]
fn invert_clamped_pins_to_domain_edges() {
    let scale = LinearScale::new((0.0, 10.0), (20.0, 320.0));
    assert_eq!(scale.invert_clamped(-50.0), 0.0);
    assert_eq!(scale.invert_clamped(10_000.0), 10.0);
    assert_eq!(scale.invert_clamped(f64::NAN), 0.0);
}

#[test]
fn from_values_skips_non_finite_entries() {
    let scale = LinearScale::from_values([3.0, f64::NAN, -2.0, 8.0, f64::INFINITY], (0.0, 1.0));
    assert_eq!(scale.domain(), (-2.0, 8.0));
    assert_eq!(extent(std::iter::empty()), None);
    assert_eq!(extent([f64::NAN]), None);
}

#[test]
fn five_ticks_include_both_domain_ends() {
    let ticks = LinearScale::new((0.0, 100.0), (0.0, 1.0)).ticks(5);
    assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);

    let ticks = LinearScale::new((0.1, 0.7), (0.0, 1.0)).ticks(7);
    assert_eq!(ticks.len(), 7);
    assert_eq!(ticks.first().copied(), Some(0.1));
    assert_eq!(ticks.last().copied(), Some(0.7));
}

#[test]
fn band_scale_splits_range_with_padding() {
    let scale = BandScale::indexed(5, (0.0, 300.0), 0.2, 0.1);
    assert_abs_diff_eq!(scale.step(), 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.bandwidth(), 48.0, epsilon = 1e-9);

    let first = scale.band_at(0).expect("first band");
    assert_abs_diff_eq!(first.start, 6.0, epsilon = 1e-9);
    let last = scale.band_at(4).expect("last band");
    assert_abs_diff_eq!(last.end(), 294.0, epsilon = 1e-9);
    assert!(scale.band_at(5).is_none());
}

#[test]
fn band_scale_keys_keep_first_occurrence() {
    let scale = BandScale::new(["mon", "tue", "mon", "wed"], (0.0, 90.0), 0.0, 0.0);
    assert_eq!(scale.len(), 3);
    assert_eq!(scale.keys().collect::<Vec<_>>(), vec!["mon", "tue", "wed"]);
    let tue = scale.map("tue").expect("tue band");
    assert_abs_diff_eq!(tue.start, 30.0, epsilon = 1e-9);
    assert!(scale.map("sun").is_none());
}

#[test]
fn band_index_at_clamps_to_outer_bands() {
    let scale = BandScale::indexed(4, (0.0, 400.0), 0.2, 0.1);
    assert_eq!(scale.index_at(-100.0), Some(0));
    assert_eq!(scale.index_at(1_000.0), Some(3));
    let second = scale.band_at(1).expect("band");
    assert_eq!(scale.index_at(second.center()), Some(1));
    assert_eq!(BandScale::indexed(0, (0.0, 400.0), 0.2, 0.1).index_at(10.0), None);
}

#[test]
fn planner_returns_requested_ticks_spanning_the_domain() {
    let scale = LinearScale::new((-12.5, 87.5), (180.0, 20.0));
    let ticks = AxisTickPlanner::linear(scale, 5, |v| format!("{v:.1}"));

    assert_eq!(ticks.len(), 5);
    assert_eq!(ticks.ticks[0].value, -12.5);
    assert_eq!(ticks.ticks[4].value, 87.5);
    assert_eq!(ticks.ticks[0].position, 180.0);
    assert_eq!(ticks.ticks[4].position, 20.0);
    assert_eq!(ticks.ticks[2].label, "37.5");
    assert!(AxisTickPlanner::linear(scale, 0, |v| v.to_string()).is_empty());
}

#[test]
fn band_ticks_sit_in_band_centers() {
    let points = vec![
        DataPoint::new(0.0, 1.0).with_label("Q1"),
        DataPoint::new(1.0, 2.0).with_label("Q2"),
    ];
    let scale = Scale::Band(BandScale::indexed(2, (0.0, 200.0), 0.0, 0.0));
    let ticks = AxisTickPlanner::plan(&scale, 5, &points, |v| v.to_string());

    let positions: Vec<f64> = ticks.positions().collect();
    assert_eq!(positions, vec![50.0, 150.0]);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Q1", "Q2"]);
}

#[test]
fn lone_band_with_widened_step_stays_centered() {
    let scale = BandScale::indexed(1, (0.0, 100.0), 0.5, 0.0);
    assert_abs_diff_eq!(scale.step(), 100.0, epsilon = 1e-12);
    let band = scale.band_at(0).expect("band");
    assert_abs_diff_eq!(band.bandwidth, 50.0, epsilon = 1e-12);
    assert_abs_diff_eq!(band.start, 25.0, epsilon = 1e-12);
    assert_abs_diff_eq!(band.center(), 50.0, epsilon = 1e-12);
    assert_eq!(scale.index_at(50.0), Some(0));

    let reversed = BandScale::indexed(1, (100.0, 0.0), 0.5, 0.0);
    let band = reversed.band_at(0).expect("band");
    assert_abs_diff_eq!(band.center(), 50.0, epsilon = 1e-12);
}
