use cairo::{Context, Format, ImageSurface, LinearGradient as CairoGradient, Operator};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, CompositeMode, DrawCommand, LinearGradient, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
    pub masks_applied: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Offscreen rendering through `Renderer::render` resizes the backing image
/// surface to the frame viewport; `CairoContextRenderer` draws in place on a
/// host-provided context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(width, height)?,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut stats = CairoRenderStats::default();
        for entry in &frame.commands {
            match &entry.command {
                DrawCommand::Clear => {
                    context.set_operator(Operator::Clear);
                    context
                        .paint()
                        .map_err(|err| map_backend_error("failed to clear surface", err))?;
                    context.set_operator(Operator::Over);
                }
                DrawCommand::Line(line) => {
                    apply_color(context, line.color);
                    context.set_line_width(line.stroke_width);
                    context.new_path();
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Polyline(polyline) => {
                    let mut points = polyline.points.iter();
                    let Some(&(x, y)) = points.next() else {
                        continue;
                    };
                    context.new_path();
                    context.move_to(x, y);
                    for &(x, y) in points {
                        context.line_to(x, y);
                    }
                    apply_color(context, polyline.color);
                    context.set_line_width(polyline.stroke_width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
                    stats.polylines_drawn += 1;
                }
                DrawCommand::ClearRect(rect) => {
                    context.set_operator(Operator::Clear);
                    append_rect_path(context, *rect);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to clear rectangle", err))?;
                    context.set_operator(Operator::Over);
                }
                DrawCommand::Circle(circle) => {
                    context.new_path();
                    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
                    apply_color(context, circle.color);
                    context.set_line_width(circle.stroke_width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke circle", err))?;
                    stats.circles_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
                DrawCommand::GradientFill {
                    rect,
                    gradient,
                    composite,
                } => {
                    fill_gradient(context, *rect, gradient, *composite)?;
                    stats.masks_applied += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let width = frame.viewport.width as i32;
        let height = frame.viewport.height as i32;
        if self.surface.width() != width || self.surface.height() != height {
            self.surface = create_surface(width, height)?;
        }

        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    context.new_path();
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn fill_gradient(
    context: &Context,
    rect: RectPrimitive,
    gradient: &LinearGradient,
    composite: CompositeMode,
) -> ChartResult<()> {
    let pattern = CairoGradient::new(gradient.x0, gradient.y0, gradient.x1, gradient.y1);
    for stop in &gradient.stops {
        pattern.add_color_stop_rgba(
            stop.offset,
            stop.color.red,
            stop.color.green,
            stop.color.blue,
            stop.color.alpha,
        );
    }

    context.set_operator(match composite {
        CompositeMode::SourceOver => Operator::Over,
        CompositeMode::DestinationIn => Operator::DestIn,
    });
    context
        .set_source(&pattern)
        .map_err(|err| map_backend_error("failed to set gradient source", err))?;
    append_rect_path(context, rect);
    let filled = context
        .fill()
        .map_err(|err| map_backend_error("failed to fill gradient", err));
    context.set_operator(Operator::Over);
    filled
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
