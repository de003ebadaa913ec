#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use telechart_rs::core::{ChartData, LineSeries, PrimaryAxis, SeriesId};
use telechart_rs::interaction::PointerEvent;
use telechart_rs::render::{
    CairoContextRenderer, CairoRenderer, Color, NullRenderer, RenderFrame, Renderer, SurfaceKind,
};
use telechart_rs::{ChartConfig, ChartError, ChartEvent, LineChart};

fn settled_frames(hover: bool) -> (RenderFrame, RenderFrame) {
    let data = ChartData {
        primary_axis: PrimaryAxis::new((0..60).map(|i| f64::from(i) * 3_600_000.0).collect())
            .expect("axis"),
        series: vec![
            LineSeries::new(
                SeriesId::new("y0"),
                "Joined",
                Color::from_hex("#3DC23F").expect("color"),
                (0..60).map(|i| f64::from(i * i)).collect(),
            ),
            LineSeries::new(
                SeriesId::new("y1"),
                "Left",
                Color::from_hex("#F34C44").expect("color"),
                (0..60).map(|i| f64::from(100 - i)).collect(),
            ),
        ],
    };
    let mut chart = LineChart::new(data, ChartConfig::default()).expect("chart");
    if hover {
        chart.dispatch(ChartEvent::MainPointerMove(PointerEvent::mouse(120.0)));
    }

    let mut capture = NullRenderer::default();
    chart.advance(0.0, &mut capture).expect("first frame");
    chart.advance(1_000.0, &mut capture).expect("settled frame");
    (
        capture.last_frame(SurfaceKind::Main).expect("main").clone(),
        capture.last_frame(SurfaceKind::Preview).expect("preview").clone(),
    )
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_main_surface_with_edge_fade() {
    let (main, _) = settled_frames(false);
    let mut renderer = CairoRenderer::new(10, 10).expect("renderer");
    renderer.render(&main).expect("render");

    assert_eq!(renderer.surface().width(), 400);
    assert_eq!(renderer.surface().height(), 300);
    let stats = renderer.last_stats();
    assert_eq!(stats.polylines_drawn, 2);
    assert_eq!(stats.masks_applied, 1);
    assert_eq!(stats.circles_drawn, 0);
    assert!(stats.lines_drawn >= 1);
    assert!(stats.texts_drawn >= stats.lines_drawn);
}

#[test]
fn cairo_renderer_draws_hover_markers() {
    let (main, _) = settled_frames(true);
    let mut renderer = CairoRenderer::new(400, 300).expect("renderer");
    renderer.render(&main).expect("render");
    assert_eq!(renderer.last_stats().circles_drawn, 2);
}

#[test]
fn cairo_renderer_can_draw_preview_on_external_context() {
    let (_, preview) = settled_frames(false);
    let mut renderer = CairoRenderer::new(400, 50).expect("renderer");

    let surface = ImageSurface::create(Format::ARgb32, 400, 50).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &preview)
        .expect("render on context");

    let stats = renderer.last_stats();
    assert_eq!(stats.polylines_drawn, 2);
    assert_eq!(stats.texts_drawn, 0);
    assert_eq!(stats.masks_applied, 0);
}
