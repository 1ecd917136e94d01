//! Pointer-drag controller: turns pointer movement into translation of a [`Transform`].
//!
//! Lifecycle:
//!
//! 1) Pointer down on the surface with an image attached: [`begin_drag`] snapshots the start
//!    pointer and the transform. Nothing is mutated yet.
//! 2) Each pointer move: [`update_drag`] recomputes the offset from the snapshot (not from the
//!    previous move), so rounding never accumulates.
//! 3) Pointer up, anywhere: [`end_drag`] drops the snapshot.
//!
//! Move/up must keep arriving after the pointer leaves the surface. [`DragController`]
//! enforces this with a [`PointerCapture`] that is acquired when the drag starts and released
//! exactly once when it ends.

use crate::foundation::core::{Point, Vec2};
use crate::transform::state::Transform;

/// Snapshot taken when a drag starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    start: Point,
    initial: Transform,
    display_ratio: f64,
}

impl DragSession {
    /// Divide pointer deltas by `ratio`, the zoom the editing surface is displayed at.
    ///
    /// Keeps the transform in true preview units however large the editor is drawn. Values
    /// that are not finite and positive fall back to 1.
    pub fn with_display_ratio(mut self, ratio: f64) -> Self {
        self.display_ratio = sanitize_ratio(ratio);
        self
    }

    /// Pointer position the drag started at.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Transform at drag start.
    pub fn initial(&self) -> Transform {
        self.initial
    }

    /// Active display ratio.
    pub fn display_ratio(&self) -> f64 {
        self.display_ratio
    }

    /// Translation since the start, in preview units.
    pub fn offset(&self, pointer: Point) -> Vec2 {
        (pointer - self.start) / self.display_ratio
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Start a drag at `pointer` from the current `transform`.
pub fn begin_drag(transform: &Transform, pointer: Point) -> DragSession {
    DragSession {
        start: pointer,
        initial: *transform,
        display_ratio: 1.0,
    }
}

/// Transform for the pointer at `pointer`: the snapshot translated by the pointer offset.
///
/// Translation is not clamped. Scale is carried over from the snapshot.
pub fn update_drag(session: &DragSession, pointer: Point) -> Transform {
    let d = session.offset(pointer);
    Transform {
        x: session.initial.x + d.x,
        y: session.initial.y + d.y,
        scale: session.initial.scale,
    }
}

/// Finish a drag. The snapshot is discarded; the transform keeps its last value.
pub fn end_drag(session: DragSession) {
    drop(session);
}

/// Window-level pointer subscription held for the duration of a drag.
///
/// Implementations subscribe to move/up events outside the surface in `capture` and
/// unsubscribe in `release`.
pub trait PointerCapture {
    /// Start receiving pointer move/up events regardless of hit-testing.
    fn capture(&mut self);
    /// Stop receiving global pointer events.
    fn release(&mut self);
}

/// Capture for hosts that already deliver every pointer event (headless, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self) {}
    fn release(&mut self) {}
}

/// Idle/Dragging state machine bound to a pointer capture.
#[derive(Debug, Default)]
pub struct DragController<C: PointerCapture = NoCapture> {
    capture: C,
    session: Option<DragSession>,
}

impl<C: PointerCapture> DragController<C> {
    /// Controller in the idle state.
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            session: None,
        }
    }

    /// `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Borrow the capture implementation.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Idle -> Dragging. Returns `false` (and stays idle) when already dragging.
    pub fn press(&mut self, transform: &Transform, pointer: Point, display_ratio: f64) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(begin_drag(transform, pointer).with_display_ratio(display_ratio));
        self.capture.capture();
        true
    }

    /// Dragging -> Dragging. Writes the new translation into `transform` and reports whether
    /// it changed. No-op while idle or for a non-finite pointer position.
    pub fn drag_to(&mut self, transform: &mut Transform, pointer: Point) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }
        let next = update_drag(session, pointer);
        let changed = next.x != transform.x || next.y != transform.y;
        transform.x = next.x;
        transform.y = next.y;
        changed
    }

    /// Dragging -> Idle, releasing the capture. Returns `false` when already idle.
    pub fn release(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                end_drag(session);
                self.capture.release();
                true
            }
            None => false,
        }
    }
}

impl<C: PointerCapture> Drop for DragController<C> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/drag.rs"]
mod tests;
