#![forbid(unsafe_code)]

//! Step-based frame scheduler.
//!
//! [`FrameScheduler`] drives one [`Engine`] without threads, timers, or
//! blocking. The host calls [`step`](FrameScheduler::step) from its display
//! refresh callback (e.g. `requestAnimationFrame`) and asks for another
//! refresh only while [`StepResult::reschedule`] is true.
//!
//! Teardown is explicit and total: [`cancel`](FrameScheduler::cancel), firing
//! the [`CancelToken`], or dropping the scheduler all stop ticks and release
//! the engine's input subscription.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::{FxError, FxResult, Viewport, env};

use crate::engine::Engine;
use crate::subscription::{InputHub, Subscription};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Outcome of a single [`FrameScheduler::step`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the engine was ticked.
    pub ticked: bool,
    /// Whether the tick failed and the frame was skipped.
    pub degraded: bool,
    /// Number of coalesced input updates applied before the tick.
    pub inputs_applied: u32,
    /// Whether the host should request another refresh callback.
    pub reschedule: bool,
}

/// Shared cancellation flag.
///
/// Clones observe the same flag; any holder can stop the scheduler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

// ---------------------------------------------------------------------------
// FrameScheduler
// ---------------------------------------------------------------------------

/// Refresh-driven runner for a single engine instance.
pub struct FrameScheduler<E: Engine> {
    engine: E,
    subscription: Option<Subscription>,
    token: CancelToken,
    running: bool,
    frame_idx: u64,
    degraded_frames: u64,
}

impl<E: Engine> FrameScheduler<E> {
    /// Mount `engine` on a drawing surface.
    ///
    /// `surface` is the host's surface size, or `None` when the mounting
    /// element is absent. Honors `LUMEN_FX_DISABLE`.
    pub fn mount(engine: E, surface: Option<Viewport>, hub: &InputHub) -> FxResult<Self> {
        Self::mount_with_env(engine, surface, hub, |k| std::env::var(k).ok())
    }

    /// [`mount`](Self::mount) with an injectable environment lookup.
    pub fn mount_with_env<F>(
        mut engine: E,
        surface: Option<Viewport>,
        hub: &InputHub,
        get_env: F,
    ) -> FxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if env::truthy_with(env::ENV_FX_DISABLE, &get_env) {
            return Err(FxError::ResourceUnavailable(format!(
                "{} disabled by {}",
                engine.name(),
                env::ENV_FX_DISABLE
            )));
        }
        let viewport = surface.ok_or_else(|| {
            FxError::ResourceUnavailable(format!("{}: mounting surface is absent", engine.name()))
        })?;

        engine.resized(viewport);
        let subscription = hub.subscribe();
        lumen_core::info!(
            engine = engine.name(),
            width = viewport.width,
            height = viewport.height,
            "engine mounted"
        );

        Ok(Self {
            engine,
            subscription: Some(subscription),
            token: CancelToken::default(),
            running: true,
            frame_idx: 0,
            degraded_frames: 0,
        })
    }

    // -- Step ---------------------------------------------------------------

    /// Apply the latest input and tick the engine once.
    ///
    /// `now` is the monotonic timestamp from the host's refresh callback.
    pub fn step(&mut self, now: Duration) -> StepResult {
        if self.running && self.token.is_cancelled() {
            self.cancel();
        }
        if !self.running {
            return StepResult::default();
        }

        let mut result = StepResult::default();

        if let Some(sub) = &self.subscription {
            if let Some(viewport) = sub.take_viewport() {
                self.engine.resized(viewport);
                result.inputs_applied += 1;
            }
            if let Some(pointer) = sub.take_pointer() {
                self.engine.pointer_moved(pointer);
                result.inputs_applied += 1;
            }
        }

        match self.engine.tick(now) {
            Ok(()) => {
                result.ticked = true;
                lumen_core::trace!(engine = self.engine.name(), frame = self.frame_idx, "tick");
            }
            Err(err) => {
                self.degraded_frames += 1;
                result.degraded = true;
                lumen_core::warn!(
                    engine = self.engine.name(),
                    frame = self.frame_idx,
                    error = %err,
                    "frame skipped"
                );
            }
        }
        self.frame_idx += 1;

        result.reschedule = self.running;
        result
    }

    // -- Teardown -----------------------------------------------------------

    /// Stop ticking and release the input subscription. Idempotent.
    pub fn cancel(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.token.cancel();
        self.subscription = None;
        lumen_core::info!(
            engine = self.engine.name(),
            frames = self.frame_idx,
            degraded = self.degraded_frames,
            "engine torn down"
        );
    }

    /// A token that cancels this scheduler on its next step.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running && !self.token.is_cancelled()
    }

    /// Number of steps that reached the engine.
    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Number of skipped frames.
    #[must_use]
    pub fn degraded_frames(&self) -> u64 {
        self.degraded_frames
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: Engine> Drop for FrameScheduler<E> {
    fn drop(&mut self) {
        self.cancel();
    }
}
