//! Direct-manipulation controllers.
//!
//! All mutation happens synchronously on the host's event thread; nothing here blocks.

/// Pointer-drag controller and pointer capture.
pub mod drag;
/// Per-image editor dispatching host events to the controllers.
pub mod editor;
/// Wheel-zoom controller.
pub mod zoom;
