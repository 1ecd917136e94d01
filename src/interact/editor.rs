use crate::foundation::core::{Point, Size, Viewport};
use crate::interact::drag::{DragController, NoCapture, PointerCapture};
use crate::interact::zoom::WheelZoom;
use crate::layout::fit::{FitPolicy, FitRect, fit_in_viewport};
use crate::transform::state::{ScaleRange, Transform};

/// Interaction event delivered by the host.
///
/// `over_surface` is the host's hit-test for the editing surface. Moves and releases carry no
/// hit-test: while a drag is active they are honored wherever the pointer is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down {
        /// Pointer position in display coordinates.
        pos: Point,
        /// Whether the press landed on the editing surface.
        over_surface: bool,
    },
    /// Pointer moved.
    Move {
        /// Pointer position in display coordinates.
        pos: Point,
    },
    /// Primary button released.
    Up {
        /// Pointer position in display coordinates.
        pos: Point,
    },
    /// Wheel tick. Positive `delta` zooms in.
    Wheel {
        /// Signed wheel delta.
        delta: f64,
        /// Whether the pointer is over the editing surface.
        over_surface: bool,
    },
}

/// What the editor did with an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The transform changed and the preview should be redrawn.
    pub changed: bool,
    /// The host must suppress the event's native behavior (page scroll, text selection).
    pub consumed: bool,
}

impl EventResponse {
    const IGNORED: Self = Self {
        changed: false,
        consumed: false,
    };

    fn consumed(changed: bool) -> Self {
        Self {
            changed,
            consumed: true,
        }
    }
}

/// One editable image: its attached source, its transform and its controllers.
///
/// Every instance is independent; a gallery holds one editor per item.
#[derive(Debug)]
pub struct ImageEditor<C: PointerCapture = NoCapture> {
    source: Option<Size>,
    transform: Transform,
    zoom: WheelZoom,
    display_ratio: f64,
    drag: DragController<C>,
}

impl ImageEditor<NoCapture> {
    /// Editor without a window-level capture, for hosts that deliver every pointer event.
    pub fn headless(zoom: WheelZoom) -> Self {
        Self::new(zoom, NoCapture)
    }
}

impl<C: PointerCapture> ImageEditor<C> {
    /// Editor with no image attached.
    pub fn new(zoom: WheelZoom, capture: C) -> Self {
        Self {
            source: None,
            transform: Transform::IDENTITY,
            zoom,
            display_ratio: 1.0,
            drag: DragController::new(capture),
        }
    }

    /// Attach a decoded source of `natural_width x natural_height`. Any drag in progress
    /// ends and the transform resets to identity.
    pub fn attach(&mut self, natural_width: u32, natural_height: u32) {
        self.drag.release();
        self.source = Some(Size::new(
            f64::from(natural_width),
            f64::from(natural_height),
        ));
        self.transform = Transform::IDENTITY;
        tracing::debug!(natural_width, natural_height, "image attached to editor");
    }

    /// Attach a source and restore a persisted transform for it (sanitized into range).
    pub fn attach_with(&mut self, natural_width: u32, natural_height: u32, transform: Transform) {
        self.attach(natural_width, natural_height);
        self.transform = transform.sanitized(self.zoom.range);
    }

    /// Remove the source. Interaction becomes a no-op until the next attach.
    pub fn detach(&mut self) {
        self.drag.release();
        self.source = None;
        self.transform = Transform::IDENTITY;
    }

    /// Natural size of the attached source.
    pub fn source_size(&self) -> Option<Size> {
        self.source
    }

    /// Current transform, in preview units.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Scale range of this use site.
    pub fn scale_range(&self) -> ScaleRange {
        self.zoom.range
    }

    /// `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Set the zoom the editing surface is displayed at (CSS-style zoom of the editor).
    ///
    /// Applies to drags started afterwards.
    pub fn set_display_ratio(&mut self, ratio: f64) {
        self.display_ratio = ratio;
    }

    /// Fit rectangle of the attached source inside `viewport`.
    pub fn fit(&self, policy: FitPolicy, viewport: Viewport) -> Option<FitRect> {
        self.source
            .map(|s| fit_in_viewport(policy, s.width, s.height, viewport))
    }

    /// Drive the state machine with one event.
    pub fn handle(&mut self, event: PointerEvent) -> EventResponse {
        match event {
            PointerEvent::Down { pos, over_surface } => {
                if !over_surface || self.source.is_none() {
                    return EventResponse::IGNORED;
                }
                let started = self.drag.press(&self.transform, pos, self.display_ratio);
                if started {
                    tracing::trace!(x = pos.x, y = pos.y, "drag started");
                }
                EventResponse::consumed(false)
            }
            PointerEvent::Move { pos } => {
                if !self.drag.is_dragging() {
                    return EventResponse::IGNORED;
                }
                let changed = self.drag.drag_to(&mut self.transform, pos);
                EventResponse::consumed(changed)
            }
            PointerEvent::Up { .. } => {
                if self.drag.release() {
                    tracing::trace!(x = self.transform.x, y = self.transform.y, "drag ended");
                    EventResponse::consumed(false)
                } else {
                    EventResponse::IGNORED
                }
            }
            PointerEvent::Wheel {
                delta,
                over_surface,
            } => {
                if !over_surface || self.source.is_none() {
                    return EventResponse::IGNORED;
                }
                let next = self.zoom.apply(&self.transform, delta);
                let changed = next != self.transform;
                self.transform = next;
                EventResponse::consumed(changed)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/editor.rs"]
mod tests;
