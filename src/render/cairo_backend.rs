use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, LinearGradient as CairoGradient};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::{Path, PathSegment};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, Paint, PathStyle, RectPrimitive, RenderFrame, Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension for renderers that can draw into an external Cairo context,
/// such as a toolkit's draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen into an image surface through `Renderer::render`, or onto
/// a caller-owned context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: f64::from(width),
                height: f64::from(height),
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::TRANSPARENT,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        context.set_line_cap(LineCap::Round);
        context.set_line_join(LineJoin::Round);
        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for primitive in &frame.paths {
            if primitive.path.is_empty() {
                continue;
            }
            context.new_path();
            append_path(context, &primitive.path);
            apply_paint(context, primitive.paint)?;
            match primitive.style {
                PathStyle::Fill => context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill path", err))?,
                PathStyle::Stroke { width } => {
                    context.set_line_width(width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke path", err))?;
                }
            }
            stats.paths_drawn += 1;
        }

        for rect in &frame.rects {
            context.new_path();
            append_rect_path(context, *rect);
            apply_paint(context, rect.paint)?;
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            context.new_path();
            context.arc(circle.center.x, circle.center.y, circle.radius, 0.0, 2.0 * PI);
            apply_color(context, circle.fill);
            if circle.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
                apply_color(context, circle.border_color);
                context.set_line_width(circle.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke circle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
            }
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let offset = match text.h_align {
                TextHAlign::Left => 0.0,
                TextHAlign::Center => -f64::from(text_width) / 2.0,
                TextHAlign::Right => -f64::from(text_width),
            };

            context
                .save()
                .map_err(|err| map_backend_error("failed to save cairo state", err))?;
            context.translate(text.x, text.y);
            if text.rotation != 0.0 {
                context.rotate(-text.rotation);
            }
            apply_color(context, text.color);
            context.move_to(offset, 0.0);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
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

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_paint(context: &Context, paint: Paint) -> ChartResult<()> {
    match paint {
        Paint::Solid(color) => apply_color(context, color),
        Paint::Gradient(gradient) => {
            let pattern = CairoGradient::new(
                gradient.start.x,
                gradient.start.y,
                gradient.end.x,
                gradient.end.y,
            );
            let (a, b) = (gradient.start_color, gradient.end_color);
            pattern.add_color_stop_rgba(0.0, a.red, a.green, a.blue, a.alpha);
            pattern.add_color_stop_rgba(1.0, b.red, b.green, b.blue, b.alpha);
            context
                .set_source(&pattern)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        }
    }
    Ok(())
}

fn append_path(context: &Context, path: &Path) {
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => context.move_to(p.x, p.y),
            PathSegment::LineTo(p) => context.line_to(p.x, p.y),
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                context.curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
            }
            PathSegment::Close => context.close_path(),
        }
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
