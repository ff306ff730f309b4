use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ScrubMode, ScrubSelection};

/// Receives the resolved selection, or `None` when scrubbing ends.
pub type SelectionCallback = Box<dyn FnMut(Option<ScrubSelection>) + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Idle,
    Scrubbing,
}

/// Pointer lifecycle for scrubbing.
///
/// Events are handled in arrival order and each one invokes the selection
/// callback exactly once, synchronously. Resolution itself is supplied by the
/// caller so this type stays independent of chart geometry. While disabled,
/// events are ignored and the callback never fires.
pub struct ScrubController {
    enabled: bool,
    mode: ScrubMode,
    phase: PointerPhase,
    selection: Option<ScrubSelection>,
    callback: Option<SelectionCallback>,
}

impl fmt::Debug for ScrubController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrubController")
            .field("enabled", &self.enabled)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("selection", &self.selection)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Default for ScrubController {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: ScrubMode::NearestPoint,
            phase: PointerPhase::Idle,
            selection: None,
            callback: None,
        }
    }
}

impl ScrubController {
    #[must_use]
    pub fn new(enabled: bool, mode: ScrubMode) -> Self {
        Self {
            enabled,
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling clears any active selection without firing the callback.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.phase = PointerPhase::Idle;
            self.selection = None;
        }
    }

    #[must_use]
    pub fn mode(&self) -> ScrubMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScrubMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> Option<ScrubSelection> {
        self.selection
    }

    pub fn set_callback(&mut self, callback: SelectionCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn on_pointer_down<F>(&mut self, x: f64, resolve: F) -> Option<ScrubSelection>
    where
        F: FnOnce(ScrubMode, f64) -> Option<ScrubSelection>,
    {
        if !self.enabled {
            return None;
        }
        trace!(x, "scrub pointer down");
        self.phase = PointerPhase::Scrubbing;
        self.update(x, resolve)
    }

    /// A move without a preceding down starts scrubbing as if it were one.
    pub fn on_pointer_move<F>(&mut self, x: f64, resolve: F) -> Option<ScrubSelection>
    where
        F: FnOnce(ScrubMode, f64) -> Option<ScrubSelection>,
    {
        if !self.enabled {
            return None;
        }
        trace!(x, "scrub pointer move");
        self.phase = PointerPhase::Scrubbing;
        self.update(x, resolve)
    }

    pub fn on_pointer_up(&mut self) {
        if self.enabled {
            trace!("scrub pointer up");
            self.end();
        }
    }

    pub fn on_pointer_cancel(&mut self) {
        if self.enabled {
            trace!("scrub pointer cancel");
            self.end();
        }
    }

    fn update<F>(&mut self, x: f64, resolve: F) -> Option<ScrubSelection>
    where
        F: FnOnce(ScrubMode, f64) -> Option<ScrubSelection>,
    {
        self.selection = resolve(self.mode, x);
        self.notify();
        self.selection
    }

    fn end(&mut self) {
        self.phase = PointerPhase::Idle;
        self.selection = None;
        self.notify();
    }

    fn notify(&mut self) {
        let selection = self.selection;
        if let Some(callback) = self.callback.as_mut() {
            callback(selection);
        }
    }
}
