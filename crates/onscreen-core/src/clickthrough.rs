//! Cursor-polling click-through for the capture window.
//!
//! Every tick re-derives the wanted window mode from the cursor position
//! alone and reapplies it while the cursor is over the window. No input hooks
//! are installed; a failed OS call is retried on the next tick.

use onscreen_types::{ClickThroughState, ColorKey, Point, Rect};

use crate::error::SinkError;

/// Read-only view of the host window, all in screen coordinates
pub trait HostWindow {
    fn cursor_position(&self) -> Option<Point>;

    /// Outer frame including title bar and borders
    fn outer_bounds(&self) -> Rect;

    /// Sub-rectangle whose pixels are captured and which passes clicks through
    fn capture_region(&self) -> Rect;

    fn is_minimized(&self) -> bool;
}

/// OS-level window style mutation
pub trait WindowAttributeSink {
    fn apply(&self, attributes: WindowAttributes) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAttributes {
    pub topmost: bool,
    pub layered: bool,
    pub input_transparent: bool,
    pub color_key: Option<ColorKey>,
}

impl WindowAttributes {
    pub fn pass_through(color_key: ColorKey) -> Self {
        Self {
            topmost: true,
            layered: true,
            input_transparent: true,
            color_key: Some(color_key),
        }
    }

    pub fn interactive(color_key: ColorKey) -> Self {
        Self {
            topmost: true,
            layered: true,
            input_transparent: false,
            color_key: Some(color_key),
        }
    }

    /// Plain window: no topmost, no layering, no click-through
    pub fn disabled() -> Self {
        Self {
            topmost: false,
            layered: false,
            input_transparent: false,
            color_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applied {
    Hooked(ClickThroughState),
    Disabled,
}

pub struct ClickThroughController {
    color_key: ColorKey,
    hooking: bool,
    state: Option<ClickThroughState>,
    applied: Option<Applied>,
}

impl ClickThroughController {
    /// Starts unhooked; call [`enable`](Self::enable) to enter selecting mode
    pub fn new(color_key: ColorKey) -> Self {
        Self {
            color_key,
            hooking: false,
            state: None,
            applied: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.hooking
    }

    /// Last decided state; `None` while hooking is disabled
    pub fn state(&self) -> Option<ClickThroughState> {
        self.state
    }

    /// Enter selecting mode, starting out click-through
    pub fn enable(&mut self, sink: &impl WindowAttributeSink) {
        self.hooking = true;
        self.state = Some(ClickThroughState::PassThrough);
        self.apply(sink, Applied::Hooked(ClickThroughState::PassThrough));
    }

    /// Leave selecting mode and behave like an ordinary window
    pub fn disable(&mut self, sink: &impl WindowAttributeSink) {
        self.hooking = false;
        self.state = None;
        self.apply(sink, Applied::Disabled);
    }

    /// Wanted state for the current cursor position, `None` meaning "keep"
    pub fn decide(&self, host: &impl HostWindow) -> Option<ClickThroughState> {
        let cursor = host.cursor_position()?;

        if !host.outer_bounds().contains(cursor) {
            return None;
        }

        if host.capture_region().contains(cursor) {
            Some(ClickThroughState::PassThrough)
        } else {
            Some(ClickThroughState::Interactive)
        }
    }

    /// One polling step. Never blocks and never fails.
    pub fn tick(
        &mut self,
        host: &impl HostWindow,
        sink: &impl WindowAttributeSink,
    ) -> Option<ClickThroughState> {
        if host.is_minimized() {
            return self.state;
        }

        if !self.hooking {
            if self.applied != Some(Applied::Disabled) {
                self.apply(sink, Applied::Disabled);
            }
            return None;
        }

        match self.decide(host) {
            // Cursor inside the window: reapply even when unchanged, in case
            // something else reset the window's style or z-order
            Some(next) => {
                self.state = Some(next);
                self.apply(sink, Applied::Hooked(next));
            }
            // Outside or unknown: keep the last decision, retrying it if it never landed
            None => {
                if let Some(state) = self.state
                    && self.applied != Some(Applied::Hooked(state))
                {
                    self.apply(sink, Applied::Hooked(state));
                }
            }
        }

        self.state
    }

    fn apply(&mut self, sink: &impl WindowAttributeSink, target: Applied) {
        let attributes = match target {
            Applied::Hooked(ClickThroughState::PassThrough) => {
                WindowAttributes::pass_through(self.color_key)
            }
            Applied::Hooked(ClickThroughState::Interactive) => {
                WindowAttributes::interactive(self.color_key)
            }
            Applied::Disabled => WindowAttributes::disabled(),
        };

        match sink.apply(attributes) {
            Ok(()) => {
                tracing::debug!("Window attributes now {:?}", target);
                self.applied = Some(target);
            }
            Err(e) => {
                tracing::warn!("{}; retrying on next tick", e);
            }
        }
    }
}
