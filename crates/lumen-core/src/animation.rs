#![forbid(unsafe_code)]

//! Time-bounded tweens.
//!
//! A [`Tween`] interpolates an `N`-component value from a start state to an
//! end state over a fixed duration. It is advanced explicitly by frame time
//! deltas; nothing runs in the background.

use std::time::Duration;

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^2`: fast start, gentle landing.
    #[default]
    QuadOut,
}

impl Easing {
    /// Map progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Interpolation of `N` channels from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<const N: usize> {
    from: [f32; N],
    to: [f32; N],
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<const N: usize> Tween<N> {
    /// Start a tween at `from`.
    #[must_use]
    pub fn new(from: [f32; N], to: [f32; N], duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> [f32; N] {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    /// Normalized progress in `[0, 1]` (linear, before easing).
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> [f32; N] {
        if self.is_complete() {
            return self.to;
        }
        let e = self.easing.apply(self.progress());
        let mut out = self.from;
        for (o, (a, b)) in out.iter_mut().zip(self.from.iter().zip(self.to.iter())) {
            *o = a + (b - a) * e;
        }
        out
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
