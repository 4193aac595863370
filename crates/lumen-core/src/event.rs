#![forbid(unsafe_code)]

//! Host input events: pointer motion and viewport resizes.
//!
//! # Invariants
//! 1. [`Ndc`] components are always finite and within `[-1, 1]`.
//! 2. The y axis of [`Ndc`] points up (inverted relative to screen space).
//! 3. A [`Viewport`] built through [`Viewport::new`] has non-zero dimensions.

// ---------------------------------------------------------------------------
// Ndc
// ---------------------------------------------------------------------------

/// A pointer position in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ndc {
    pub x: f32,
    pub y: f32,
}

impl Ndc {
    /// Create a position, clamping each axis into `[-1, 1]`.
    ///
    /// Returns `None` when either component is not finite.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        })
    }

    /// Convert a client-space pointer position over a surface of the given
    /// size into NDC. The top-left corner maps to `(-1, 1)`.
    #[must_use]
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Self::new(
            (client_x / width) * 2.0 - 1.0,
            -(client_y / height) * 2.0 + 1.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Size of the host's drawing surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport; zero-sized surfaces are rejected.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Notification delivered by the host between frame ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to a new position.
    PointerMove(Ndc),
    /// The pointer left the surface.
    PointerLeave,
    /// The drawing surface changed size.
    Resize(Viewport),
}
