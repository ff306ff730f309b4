use std::f64::consts::FRAC_PI_2;

use crate::core::{PlotArea, Point, ScrubSelection, TickSet, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, Paint, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::padding_resolver::{PaddingRequest, resolve_padding, resolve_plot_area};
use super::{AxisOptions, PaddingTuning, ScrubOptions, TitleOptions, TooltipOptions};

const TICK_LABEL_GAP: f64 = 4.0;
const Y_LABEL_GAP: f64 = 6.0;
const AXIS_TITLE_INSET: f64 = 4.0;
const TOOLTIP_PADDING_X: f64 = 8.0;
const TOOLTIP_PADDING_Y: f64 = 6.0;
const TOOLTIP_OFFSET: f64 = 10.0;
const TOOLTIP_CORNER_RADIUS: f64 = 6.0;
const INDICATOR_BORDER_WIDTH: f64 = 2.0;
// Average glyph advance relative to font size, used to size tooltip boxes.
const GLYPH_ADVANCE: f64 = 0.6;

/// Axis, grid, title and tooltip drawing shared by the cartesian charts.
///
/// Colors are parsed once at construction so frame building is infallible.
#[derive(Debug, Clone)]
pub(crate) struct CartesianDecor {
    axes: AxisOptions,
    titles: TitleOptions,
    tooltip: TooltipOptions,
    scrub: ScrubOptions,
    padding: PaddingTuning,
    axis_color: Color,
    label_color: Color,
    grid_color: Color,
    title_color: Color,
    axis_title_color: Color,
    tooltip_background: Color,
    tooltip_text: Color,
}

impl CartesianDecor {
    pub(crate) fn new(
        axes: &AxisOptions,
        titles: &TitleOptions,
        tooltip: &TooltipOptions,
        scrub: ScrubOptions,
        padding: PaddingTuning,
    ) -> ChartResult<Self> {
        Ok(Self {
            axis_color: Color::parse(&axes.axis_color)?,
            label_color: Color::parse(&axes.label_color)?,
            grid_color: Color::parse(&axes.grid_color)?,
            title_color: Color::parse(&titles.title_color)?,
            axis_title_color: Color::parse(&titles.axis_title_color)?,
            tooltip_background: Color::parse(&tooltip.background_color)?,
            tooltip_text: Color::parse(&tooltip.text_color)?,
            axes: axes.clone(),
            titles: titles.clone(),
            tooltip: tooltip.clone(),
            scrub,
            padding,
        })
    }

    pub(crate) fn axes(&self) -> &AxisOptions {
        &self.axes
    }

    pub(crate) fn scrub(&self) -> ScrubOptions {
        self.scrub
    }

    /// Only title and axis-title presence widen the margins; visibility
    /// toggles never move the plot.
    pub(crate) fn plot_area(&self, viewport: Viewport) -> Option<PlotArea> {
        let request = PaddingRequest {
            title: self.titles.title.is_some(),
            x_axis_title: self.titles.x_axis_title.is_some(),
            y_axis_title: self.titles.y_axis_title.is_some(),
        };
        resolve_plot_area(viewport, resolve_padding(self.padding, request))
    }

    pub(crate) fn push_grid(
        &self,
        frame: &mut RenderFrame,
        area: PlotArea,
        x_ticks: &TickSet,
        y_ticks: &TickSet,
    ) {
        if !self.axes.show_grid {
            return;
        }
        for y in y_ticks.positions() {
            frame
                .lines
                .push(LinePrimitive::new(area.left, y, area.right, y, 1.0, self.grid_color));
        }
        for x in x_ticks.positions() {
            frame
                .lines
                .push(LinePrimitive::new(x, area.top, x, area.bottom, 1.0, self.grid_color));
        }
    }

    /// Axis lines; the x axis sits at `x_axis_y` (the zero line for bars).
    pub(crate) fn push_axes(&self, frame: &mut RenderFrame, area: PlotArea, x_axis_y: f64) {
        if self.axes.show_x_axis && x_axis_y.is_finite() {
            frame.lines.push(LinePrimitive::new(
                area.left,
                x_axis_y,
                area.right,
                x_axis_y,
                1.0,
                self.axis_color,
            ));
        }
        if self.axes.show_y_axis {
            frame.lines.push(LinePrimitive::new(
                area.left,
                area.top,
                area.left,
                area.bottom,
                1.0,
                self.axis_color,
            ));
        }
    }

    pub(crate) fn push_tick_labels(
        &self,
        frame: &mut RenderFrame,
        area: PlotArea,
        x_ticks: &TickSet,
        y_ticks: &TickSet,
    ) {
        let size = self.axes.label_size;
        if self.axes.show_x_labels {
            for tick in x_ticks.iter().filter(|t| !t.label.is_empty()) {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    tick.position,
                    area.bottom + TICK_LABEL_GAP,
                    size,
                    self.label_color,
                    TextHAlign::Center,
                ));
            }
        }
        if self.axes.show_y_labels {
            for tick in y_ticks.iter().filter(|t| !t.label.is_empty()) {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    area.left - Y_LABEL_GAP,
                    tick.position - size * 0.5,
                    size,
                    self.label_color,
                    TextHAlign::Right,
                ));
            }
        }
    }

    pub(crate) fn push_titles(&self, frame: &mut RenderFrame, viewport: Viewport, area: PlotArea) {
        if let Some(title) = self.titles.title.as_deref().filter(|t| !t.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                title,
                viewport.width * 0.5,
                self.padding.base * 0.5,
                self.titles.title_size,
                self.title_color,
                TextHAlign::Center,
            ));
        }
        let size = self.titles.axis_title_size;
        if let Some(title) = self.titles.x_axis_title.as_deref().filter(|t| !t.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                title,
                area.center().x,
                viewport.height - size - AXIS_TITLE_INSET,
                size,
                self.axis_title_color,
                TextHAlign::Center,
            ));
        }
        if let Some(title) = self.titles.y_axis_title.as_deref().filter(|t| !t.is_empty()) {
            frame.texts.push(
                TextPrimitive::new(
                    title,
                    AXIS_TITLE_INSET,
                    area.center().y,
                    size,
                    self.axis_title_color,
                    TextHAlign::Center,
                )
                .rotated(FRAC_PI_2),
            );
        }
    }

    /// Guide line, indicator dot and tooltip for an active selection.
    pub(crate) fn push_selection(
        &self,
        frame: &mut RenderFrame,
        viewport: Viewport,
        area: PlotArea,
        selection: &ScrubSelection,
        accent: Color,
        tooltip_text: Option<String>,
    ) {
        let at = selection.screen_position;
        if !at.is_finite() {
            return;
        }
        if self.scrub.show_indicator {
            frame.lines.push(LinePrimitive::new(
                at.x,
                area.top,
                at.x,
                area.bottom,
                1.0,
                self.axis_color,
            ));
            frame.circles.push(
                CirclePrimitive::filled(at, self.scrub.indicator_radius, accent)
                    .with_border(Color::WHITE, INDICATOR_BORDER_WIDTH),
            );
        }
        if self.tooltip.show {
            if let Some(text) = tooltip_text.filter(|t| !t.is_empty()) {
                self.push_tooltip(frame, viewport, at, text);
            }
        }
    }

    fn push_tooltip(&self, frame: &mut RenderFrame, viewport: Viewport, anchor: Point, text: String) {
        let size = self.tooltip.font_size;
        let width = text.chars().count() as f64 * size * GLYPH_ADVANCE + 2.0 * TOOLTIP_PADDING_X;
        let height = size + 2.0 * TOOLTIP_PADDING_Y;

        let max_x = (viewport.width - width).max(0.0);
        let x = (anchor.x - width * 0.5).clamp(0.0, max_x);
        let above = anchor.y - TOOLTIP_OFFSET - height;
        let y = if above >= 0.0 {
            above
        } else {
            anchor.y + TOOLTIP_OFFSET
        };

        frame.rects.push(
            RectPrimitive::new(x, y, width, height, Paint::Solid(self.tooltip_background))
                .with_corner_radius(TOOLTIP_CORNER_RADIUS),
        );
        frame.texts.push(TextPrimitive::new(
            text,
            x + width * 0.5,
            y + TOOLTIP_PADDING_Y,
            size,
            self.tooltip_text,
            TextHAlign::Center,
        ));
    }
}

/// Parses a per-item color, falling back when it is absent or malformed.
pub(crate) fn resolve_item_color(raw: Option<&str>, fallback: Color, index: usize) -> Color {
    match raw {
        None => fallback,
        Some(text) => match Color::parse(text) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(index, error = %err, "ignoring unparseable item color");
                fallback
            }
        },
    }
}
