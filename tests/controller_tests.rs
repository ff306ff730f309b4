use chart_motion::animation::{AnimationTuning, Easing, ManualProgress};
use chart_motion::api::{
    AxisOptions, BarChartConfig, CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartController, ChartLayout,
    ChartLayoutEngine, DataUpdate, LineChartConfig, PieChartConfig, ScatterChartConfig,
};
use chart_motion::core::{DataPoint, PieDatum, ScrubMode, Viewport};
use chart_motion::render::{NullRenderer, PathStyle};

fn series(values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(i as f64, *v))
        .collect()
}

fn line_config() -> LineChartConfig {
    LineChartConfig::new(Viewport::new(340.0, 200.0))
}

#[test]
fn chart_starts_hidden_and_reveals_over_time() {
    let mut chart = ChartController::line(line_config(), series(&[1.0, 3.0, 2.0])).expect("chart");
    assert_eq!(chart.entry().reveal(), 0.0);
    assert!(chart.is_animating());

    let mut last = 0.0;
    for _ in 0..10 {
        chart.advance(100.0);
        let reveal = chart.entry().reveal();
        assert!(reveal >= last);
        last = reveal;
    }
    assert!(last > 0.0 && last < 1.0);

    chart.advance(1_000.0);
    assert_eq!(chart.entry().reveal(), 1.0);
    assert!(!chart.is_animating());
}

#[test]
fn entry_progress_can_be_sampled_from_host_source() {
    let mut chart = ChartController::line(line_config(), series(&[1.0, 3.0, 2.0])).expect("chart");
    let mut source = ManualProgress::new(0.4);
    chart.sample_entry(&mut source);
    assert_eq!(chart.entry().reveal(), 0.4);

    source.set(1.0);
    chart.sample_entry(&mut source);
    assert!(!chart.entry().is_running());
}

#[test]
fn new_data_morphs_from_displayed_geometry() {
    let mut chart =
        ChartController::line(line_config(), series(&[1.0, 3.0, 2.0])).expect("chart");
    let before = chart.displayed_geometry();

    assert_eq!(chart.set_data(series(&[2.0, 1.0, 4.0, 3.0])), DataUpdate::Morphing);
    assert!(chart.is_morphing());
    assert_eq!(chart.morph_progress(), 0.0);
    assert_eq!(chart.displayed_geometry().curve, before.curve);

    chart.set_morph_progress(1.0);
    assert!(!chart.is_morphing());
    assert_eq!(chart.displayed_geometry(), *chart.target_geometry());
}

#[test]
fn interrupted_morph_converges_to_latest_data() {
    let layout = ChartLayoutEngine::line(line_config()).expect("layout");
    let mut chart =
        ChartController::line(line_config(), series(&[1.0, 3.0, 2.0])).expect("chart");

    chart.set_data(series(&[5.0, 1.0, 4.0, 2.0, 6.0]));
    chart.set_morph_progress(0.4);
    let in_flight = chart.displayed_geometry();

    let latest = series(&[2.0, 2.5, 1.0]);
    assert_eq!(chart.set_data(latest.clone()), DataUpdate::Morphing);
    assert_eq!(chart.morph_progress(), 0.0);
    assert_eq!(chart.displayed_geometry().curve, in_flight.curve);

    chart.set_morph_progress(0.7);
    chart.set_morph_progress(1.0);
    assert!(!chart.is_morphing());
    assert_eq!(chart.displayed_geometry(), layout.layout(&latest));
    assert_eq!(chart.data(), latest.as_slice());
}

#[test]
fn advance_drives_morph_with_configured_duration() {
    let config = line_config().with_animate(true);
    let mut chart = ChartController::line(config, series(&[1.0, 2.0])).expect("chart");
    chart.set_entry_progress(1.0);
    chart.set_data(series(&[2.0, 1.0]));

    assert!(chart.advance(500.0));
    let partial = chart.morph_progress();
    assert!(partial > 0.0 && partial < 1.0);
    assert!(!chart.advance(1_000.0));
    assert_eq!(chart.morph_progress(), 1.0);
}

#[test]
fn identical_data_does_not_restart_animation() {
    let mut chart = ChartController::bar(
        BarChartConfig::new(Viewport::new(340.0, 200.0)),
        series(&[40.0, 65.0]),
    )
    .expect("chart");
    assert_eq!(chart.set_data(series(&[40.0, 65.0])), DataUpdate::Unchanged);
    assert!(!chart.is_morphing());
}

#[test]
fn non_animated_chart_swaps_geometry_immediately() {
    let config = PieChartConfig::new(Viewport::new(200.0, 200.0)).with_animate(false);
    let mut chart = ChartController::pie(
        config,
        vec![PieDatum::new(1.0, "#ff0000"), PieDatum::new(1.0, "#00ff00")],
    )
    .expect("chart");
    assert_eq!(chart.frame().paths.len(), 2);

    let update = chart.set_data(vec![
        PieDatum::new(1.0, "#ff0000"),
        PieDatum::new(2.0, "#00ff00"),
        PieDatum::new(3.0, "#0000ff"),
    ]);
    assert_eq!(update, DataUpdate::Replaced);
    assert!(!chart.is_animating());
    assert_eq!(chart.frame().paths.len(), 3);
}

#[test]
fn null_renderer_counts_bar_frame_primitives() {
    let config = BarChartConfig::new(Viewport::new(340.0, 200.0))
        .with_animate(false)
        .with_axes(AxisOptions::hidden());
    let chart = ChartController::bar(config, series(&[40.0, 65.0, 85.0, 55.0, 70.0]))
        .expect("chart");

    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 5);
    assert_eq!(renderer.last_line_count, 0);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn bar_values_are_labelled_when_enabled() {
    let config = BarChartConfig::new(Viewport::new(340.0, 200.0))
        .with_animate(false)
        .with_axes(AxisOptions::hidden())
        .with_show_values(true);
    let chart = ChartController::bar(config, series(&[40.0, 65.5])).expect("chart");
    let labels: Vec<String> = chart.frame().texts.into_iter().map(|t| t.text).collect();
    assert_eq!(labels, vec!["40".to_owned(), "65.5".to_owned()]);
}

#[test]
fn entry_reveal_trims_the_line_stroke() {
    let mut chart =
        ChartController::line(line_config(), series(&[1.0, 3.0, 2.0, 4.0])).expect("chart");
    assert!(
        chart
            .frame()
            .paths
            .iter()
            .all(|p| matches!(p.style, PathStyle::Fill))
    );

    chart.set_entry_progress(0.5);
    let strokes = chart
        .frame()
        .paths
        .iter()
        .filter(|p| matches!(p.style, PathStyle::Stroke { .. }))
        .count();
    assert_eq!(strokes, 1);
}

#[test]
fn set_layout_snaps_to_resized_geometry() {
    let mut chart = ChartController::scatter(
        ScatterChartConfig::new(Viewport::new(340.0, 200.0)),
        series(&[1.0, 2.0, 3.0]),
    )
    .expect("chart");
    chart.set_data(series(&[3.0, 2.0, 1.0]));
    assert!(chart.is_morphing());

    let resized = ChartLayoutEngine::scatter(ScatterChartConfig::new(Viewport::new(500.0, 300.0)))
        .expect("layout");
    chart.set_layout(resized);
    assert!(!chart.is_morphing());
    let area = chart.target_geometry().plot_area.expect("area");
    assert_eq!(area.right, 480.0);
}

#[test]
fn tuning_comes_from_config() {
    let config = BarChartConfig::new(Viewport::new(340.0, 200.0));
    let chart = ChartController::bar(config, series(&[1.0])).expect("chart");
    assert_eq!(
        chart.layout().animation(),
        AnimationTuning::new(1_000.0, Easing::ExpOut)
    );
}

#[test]
fn snapshot_json_carries_schema_and_geometry() {
    let chart = ChartController::line(line_config().with_animate(false), series(&[1.0, 2.0]))
        .expect("chart");
    let json = chart.snapshot_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

    assert_eq!(
        value["schema_version"].as_u64(),
        Some(u64::from(CHART_SNAPSHOT_JSON_SCHEMA_V1))
    );
    assert_eq!(value["data_len"].as_u64(), Some(2));
    assert_eq!(value["morphing"].as_bool(), Some(false));
    assert_eq!(value["entry_reveal"].as_f64(), Some(1.0));
    assert!(value["selection"].is_null());
    assert_eq!(
        value["geometry"]["curve"]["line"]["segments"][0]["kind"].as_str(),
        Some("move_to")
    );
}

#[test]
fn zero_size_chart_is_built_and_renders_nothing() {
    let config = LineChartConfig::new(Viewport::new(0.0, 0.0)).with_scrubbing(ScrubMode::OnCurve);
    let mut chart = ChartController::line(config, series(&[1.0, 3.0, 2.0])).expect("chart");
    chart.set_entry_progress(1.0);

    assert!(chart.frame().is_empty());
    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert!(chart.pointer_down(10.0).is_none());

    assert_eq!(chart.set_data(series(&[4.0, 5.0])), DataUpdate::Morphing);
    chart.set_morph_progress(1.0);
    assert!(chart.frame().is_empty());
}

#[test]
fn overshooting_entry_easing_does_not_cut_morph_short() {
    let config = ScatterChartConfig::new(Viewport::new(340.0, 200.0));
    assert_eq!(config.animation.easing, Easing::BackOut { overshoot: 1.5 });
    let mut chart = ChartController::scatter(config, series(&[1.0, 2.0, 3.0])).expect("chart");
    chart.set_entry_progress(1.0);
    chart.set_data(series(&[3.0, 2.0, 1.0]));

    assert!(chart.advance(600.0));
    assert!(chart.is_morphing());
    assert!(chart.morph_progress() < 1.0);

    assert!(!chart.advance(400.0));
    assert!(!chart.is_morphing());
}
