use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Viewport};

/// Pixel margins reserved around the plot.
///
/// Every edge starts at `base`. Tick-label gutters are always reserved so
/// hiding labels never moves the plot; titles add fixed increments on the
/// edge they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingTuning {
    pub base: f64,
    pub title: f64,
    pub x_axis_title: f64,
    pub y_axis_title: f64,
    pub x_tick_labels: f64,
    pub y_tick_labels: f64,
}

impl Default for PaddingTuning {
    fn default() -> Self {
        Self {
            base: 20.0,
            title: 20.0,
            x_axis_title: 20.0,
            y_axis_title: 25.0,
            x_tick_labels: 16.0,
            y_tick_labels: 28.0,
        }
    }
}

/// Which decorations are present for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddingRequest {
    pub title: bool,
    pub x_axis_title: bool,
    pub y_axis_title: bool,
}

/// Resolved per-edge margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[must_use]
pub fn resolve_padding(tuning: PaddingTuning, request: PaddingRequest) -> Padding {
    let extra = |present: bool, amount: f64| if present { amount.max(0.0) } else { 0.0 };
    let base = tuning.base.max(0.0);
    Padding {
        top: base + extra(request.title, tuning.title),
        right: base,
        bottom: base
            + tuning.x_tick_labels.max(0.0)
            + extra(request.x_axis_title, tuning.x_axis_title),
        left: base
            + tuning.y_tick_labels.max(0.0)
            + extra(request.y_axis_title, tuning.y_axis_title),
    }
}

/// Plot rectangle inside `viewport`; `None` when margins leave no room or the
/// viewport is invalid.
#[must_use]
pub fn resolve_plot_area(viewport: Viewport, padding: Padding) -> Option<PlotArea> {
    if !viewport.is_valid() {
        return None;
    }
    let area = PlotArea {
        left: padding.left,
        top: padding.top,
        right: viewport.width - padding.right,
        bottom: viewport.height - padding.bottom,
    };
    area.is_valid().then_some(area)
}
