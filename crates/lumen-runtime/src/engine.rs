//! The contract between an effect and the scheduler.

use std::time::Duration;

use lumen_core::{FxResult, Ndc, Viewport};

/// A per-mount visual effect driven one tick per display refresh.
pub trait Engine {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Advance one frame. `now` is monotonic time since an arbitrary origin.
    ///
    /// Returning an error skips the frame: whatever the engine last produced
    /// stays visible and the next refresh ticks again.
    fn tick(&mut self, now: Duration) -> FxResult<()>;

    /// Latest pointer position, or `None` once the pointer left the surface.
    fn pointer_moved(&mut self, _pointer: Option<Ndc>) {}

    /// The drawing surface changed size.
    fn resized(&mut self, _viewport: Viewport) {}
}
