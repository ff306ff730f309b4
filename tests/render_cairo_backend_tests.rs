#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_motion::ChartError;
use chart_motion::api::{AxisOptions, BarChartConfig, ChartController, LineChartConfig, PieChartConfig};
use chart_motion::core::{DataPoint, PieDatum, Viewport};
use chart_motion::render::{CairoContextRenderer, CairoRenderer, Renderer};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_draws_line_chart_primitives() {
    let chart = ChartController::line(
        LineChartConfig::new(Viewport::new(340.0, 200.0)).with_animate(false),
        vec![
            DataPoint::new(0.0, 10.0),
            DataPoint::new(1.0, 30.0),
            DataPoint::new(2.0, 20.0),
        ],
    )
    .expect("chart");

    let mut renderer = CairoRenderer::new(340, 200).expect("renderer");
    chart.render(&mut renderer).expect("render");
    let stats = renderer.last_stats();

    // Fill and stroke.
    assert_eq!(stats.paths_drawn, 2);
    assert!(stats.lines_drawn >= 2);
    assert_eq!(stats.texts_drawn, 10);
}

#[test]
fn cairo_renderer_draws_rounded_bars() {
    let chart = ChartController::bar(
        BarChartConfig::new(Viewport::new(340.0, 200.0))
            .with_animate(false)
            .with_axes(AxisOptions::hidden()),
        vec![DataPoint::new(0.0, 4.0), DataPoint::new(1.0, -2.0)],
    )
    .expect("chart");

    let mut renderer = CairoRenderer::new(340, 200).expect("renderer");
    renderer.render(&chart.frame()).expect("render");
    assert_eq!(renderer.last_stats().rects_drawn, 2);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let chart = ChartController::pie(
        PieChartConfig::new(Viewport::new(200.0, 200.0))
            .with_animate(false)
            .with_labels(true),
        vec![
            PieDatum::new(3.0, "#ff6b6b").with_label("A"),
            PieDatum::new(1.0, "#4ecdc4").with_label("B"),
        ],
    )
    .expect("chart");

    let surface = ImageSurface::create(Format::ARgb32, 200, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(200, 200).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &chart.frame())
        .expect("render on context");

    let stats = renderer.last_stats();
    assert_eq!(stats.paths_drawn, 2);
    assert_eq!(stats.texts_drawn, 2);
}
