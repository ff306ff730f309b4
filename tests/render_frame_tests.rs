use approx::assert_abs_diff_eq;
use chart_motion::ChartError;
use chart_motion::api::{BarChartConfig, LineChartConfig, PieChartConfig};
use chart_motion::core::{Path, Point, Viewport};
use chart_motion::render::{
    CirclePrimitive, Color, LinePrimitive, NullRenderer, Paint, PathPrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[test]
fn colors_parse_from_hex_and_rgb_forms() {
    assert_eq!(Color::parse("#fff").expect("short hex"), Color::WHITE);
    assert_eq!(
        Color::parse("#00d2ff").expect("hex"),
        Color::rgb(0.0, 210.0 / 255.0, 1.0)
    );
    let translucent = Color::parse("#ffffff50").expect("hex with alpha");
    assert_abs_diff_eq!(translucent.alpha, 80.0 / 255.0, epsilon = 1e-12);

    let rgba = Color::parse("rgba(255, 255, 255, 0.3)").expect("rgba");
    assert_eq!(rgba, Color::rgba(1.0, 1.0, 1.0, 0.3));
    assert_eq!(Color::parse(" RGB(0, 0, 255) ").expect("rgb"), Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(Color::parse("transparent").expect("keyword"), Color::TRANSPARENT);
}

#[test]
fn malformed_colors_report_their_input() {
    for input in ["", "#12", "#ggg", "rgb(1, 2)", "rgba(1, 2, 3, x)", "blue"] {
        let err = Color::parse(input).expect_err("must fail");
        assert!(matches!(err, ChartError::InvalidColor(ref raw) if raw == input));
    }
}

#[test]
fn fading_scales_alpha_only() {
    let color = Color::rgba(0.2, 0.4, 0.6, 0.8);
    let faded = color.faded(0.5);
    assert_eq!((faded.red, faded.green, faded.blue), (0.2, 0.4, 0.6));
    assert_abs_diff_eq!(faded.alpha, 0.4, epsilon = 1e-12);
    assert_eq!(color.faded(3.0).alpha, 0.8);
    assert_eq!(color.faded(f64::NAN).alpha, 0.8);
}

#[test]
fn empty_frame_validates() {
    let frame = RenderFrame::new(Viewport::new(320.0, 200.0));
    assert!(frame.is_empty());
    frame.validate().expect("valid frame");
}

#[test]
fn non_finite_viewport_is_rejected() {
    RenderFrame::new(Viewport::new(0.0, 0.0))
        .validate()
        .expect("zero-size frame is empty, not invalid");

    let frame = RenderFrame::new(Viewport::new(f64::NAN, 200.0));
    assert!(matches!(
        frame.validate(),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn non_finite_primitives_are_rejected() {
    let viewport = Viewport::new(320.0, 200.0);

    let frame = RenderFrame::new(viewport).with_line(LinePrimitive::new(
        0.0,
        f64::NAN,
        10.0,
        10.0,
        1.0,
        Color::WHITE,
    ));
    assert!(frame.validate().is_err());

    let path = Path::builder()
        .move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(f64::INFINITY, 1.0))
        .build();
    let frame = RenderFrame::new(viewport).with_path(PathPrimitive::fill(path, Paint::Solid(Color::WHITE)));
    assert!(frame.validate().is_err());

    let frame = RenderFrame::new(viewport).with_text(TextPrimitive::new(
        "",
        10.0,
        10.0,
        12.0,
        Color::WHITE,
        TextHAlign::Left,
    ));
    assert!(frame.validate().is_err());
}

#[test]
fn null_renderer_counts_each_primitive_list() {
    let frame = RenderFrame::new(Viewport::new(320.0, 200.0))
        .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, Color::WHITE))
        .with_rect(
            RectPrimitive::new(10.0, 10.0, 40.0, 80.0, Paint::Solid(Color::WHITE))
                .with_corner_radius(8.0),
        )
        .with_circle(CirclePrimitive::filled(Point::new(50.0, 50.0), 4.0, Color::WHITE))
        .with_circle(CirclePrimitive::filled(Point::new(60.0, 50.0), 4.0, Color::WHITE))
        .with_text(TextPrimitive::new("42", 5.0, 5.0, 10.0, Color::WHITE, TextHAlign::Center));
    assert_eq!(frame.primitive_count(), 5);

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_circle_count, 2);
    assert_eq!(renderer.last_text_count, 1);
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let config = LineChartConfig::from_json_str(
        r#"{ "viewport": { "width": 340.0, "height": 200.0 }, "tension": 0.5 }"#,
    )
    .expect("line config");
    assert_eq!(config.tension, 0.5);
    assert_eq!(config.color, "#00d2ff");
    assert_eq!(config.stroke_width, 3.0);
    config.validate().expect("valid");

    let config = BarChartConfig::from_json_str(
        r#"{ "viewport": { "width": 340.0, "height": 200.0 }, "show_values": true }"#,
    )
    .expect("bar config");
    assert!(config.show_values);
    assert_eq!(config.corner_radius, 8.0);

    let config =
        PieChartConfig::from_json_str(r#"{ "viewport": { "width": 200.0, "height": 200.0 } }"#)
            .expect("pie config");
    assert_eq!(config.pad_angle, 0.02);
}

#[test]
fn malformed_config_json_is_a_config_error() {
    let err = LineChartConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}
