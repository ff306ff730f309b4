use chart_motion::core::{
    CurveBuilder, DataPoint, LinearScale, Path, PathMorpher, Point, ScrubMode, ScrubResolver,
    pie_slices,
};
use proptest::prelude::*;
use std::f64::consts::TAU;

fn vertices(ys: &[f64]) -> Vec<Point> {
    ys.iter()
        .enumerate()
        .map(|(i, y)| Point::new(i as f64 * 25.0, *y))
        .collect()
}

proptest! {
    #[test]
    fn linear_scale_round_trip(
        domain_min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        fraction in 0.0f64..1.0,
        range_start in -2_000.0f64..2_000.0,
        range_span in 1.0f64..4_000.0
    ) {
        let scale = LinearScale::new(
            (domain_min, domain_min + span),
            (range_start, range_start + range_span),
        );
        let value = domain_min + span * fraction;
        let recovered = scale.invert(scale.map(value));
        prop_assert!((recovered - value).abs() <= (span + domain_min.abs()) * 1e-9);
    }

    #[test]
    fn mapped_values_stay_inside_range(
        values in prop::collection::vec(-1e6f64..1e6, 1..64),
        width in 10.0f64..2_000.0
    ) {
        let scale = LinearScale::from_values(values.iter().copied(), (0.0, width));
        for v in values {
            let px = scale.map(v);
            prop_assert!((-1e-9..=width + 1e-9).contains(&px));
        }
    }

    #[test]
    fn morph_endpoints_are_exact_for_any_counts(
        a in prop::collection::vec(0.0f64..200.0, 0..12),
        b in prop::collection::vec(0.0f64..200.0, 0..12)
    ) {
        let builder = CurveBuilder::default();
        let from = builder.build(&vertices(&a), 200.0).line;
        let to = builder.build(&vertices(&b), 200.0).line;

        prop_assert_eq!(PathMorpher::interpolate(&from, &to, 0.0), from.clone());
        prop_assert_eq!(PathMorpher::interpolate(&from, &to, 1.0), to.clone());
    }

    #[test]
    fn morph_with_itself_is_identity(
        ys in prop::collection::vec(0.0f64..200.0, 0..12),
        t in 0.0f64..1.0
    ) {
        let path = CurveBuilder::default().build(&vertices(&ys), 200.0).line;
        prop_assert_eq!(PathMorpher::interpolate(&path, &path, t), path);
    }

    #[test]
    fn intermediate_morphs_stay_finite(
        a in prop::collection::vec(0.0f64..200.0, 0..12),
        b in prop::collection::vec(0.0f64..200.0, 0..12),
        t in 0.0f64..1.0
    ) {
        let builder = CurveBuilder::default();
        let from = builder.build(&vertices(&a), 200.0).line;
        let to = builder.build(&vertices(&b), 200.0).line;
        let mid = PathMorpher::interpolate(&from, &to, t);
        prop_assert!(mid.is_finite());
        if from.is_empty() && to.is_empty() {
            prop_assert_eq!(mid, Path::empty());
        }
    }

    #[test]
    fn pie_sweeps_cover_the_full_turn(
        values in prop::collection::vec(0.01f64..1_000.0, 1..16),
        pad in 0.0f64..0.1
    ) {
        let slices = pie_slices(&values, pad);
        prop_assert_eq!(slices.len(), values.len());
        prop_assert!((slices[0].start_angle).abs() <= 1e-12);
        prop_assert!((slices[slices.len() - 1].end_angle - TAU).abs() <= 1e-9);
        for pair in slices.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() <= 1e-9);
        }
    }

    #[test]
    fn nearest_point_scrub_never_leaves_the_data(
        xs in prop::collection::vec(-500.0f64..500.0, 1..32),
        pointer in -1_000.0f64..1_000.0
    ) {
        let points: Vec<DataPoint> = xs.iter().map(|x| DataPoint::new(*x, x * 2.0)).collect();
        let x_scale = LinearScale::from_values(xs.iter().copied(), (0.0, 300.0));
        let y_scale = LinearScale::from_values(points.iter().map(|p| p.y), (200.0, 0.0));
        let selection = ScrubResolver::new(&points, x_scale, y_scale)
            .resolve(ScrubMode::NearestPoint, pointer)
            .expect("selection");
        prop_assert!(selection.index < points.len());
        prop_assert_eq!(selection.data_value.x, points[selection.index].x);
    }
}
