#![forbid(unsafe_code)]

//! Runtime: drives effect engines from the host's refresh callback.
//!
//! # Role in Lumen
//! A host (browser canvas, native window, test harness) owns the display
//! cadence. Each refresh it calls [`FrameScheduler::step`] with a monotonic
//! timestamp; the scheduler applies the latest coalesced input and ticks the
//! engine once.
//!
//! ```text
//! host refresh callback
//!   → InputHub::dispatch(event)   // pointer / resize, last write wins
//!   → FrameScheduler::step(now)   // apply latest input, Engine::tick(now)
//!   → host reads engine buffers   // blit pixels / draw mesh
//!   → request next refresh if StepResult::reschedule
//! ```
//!
//! Everything runs on one thread; shared state uses `Rc`/`Cell`.

pub mod clock;
pub mod engine;
pub mod scheduler;
pub mod subscription;

pub use clock::FrameClock;
pub use engine::Engine;
pub use scheduler::{CancelToken, FrameScheduler, StepResult};
pub use subscription::{InputHub, Subscription};
