//! Idle wobble of the terrain vertices.

use super::mesh::{POSITION_STRIDE, TerrainMesh};

/// Counter increment per tick.
pub const FRAME_STEP: f64 = 0.01;
/// Peak x/y displacement from the original position.
pub const AMPLITUDE: f64 = 0.003;

/// Moves every vertex on a small circle-ish path around its original
/// position. Runs every tick regardless of pointer activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerrainAnimator {
    counter: f64,
}

impl TerrainAnimator {
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0.0 }
    }

    /// Animator resuming from a known counter.
    #[must_use]
    pub const fn starting_at(counter: f64) -> Self {
        Self { counter }
    }

    #[must_use]
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Step the counter and rewrite x/y of every vertex. z is left alone.
    pub fn tick(&mut self, mesh: &mut TerrainMesh) {
        self.counter += FRAME_STEP;
        let counter = self.counter;
        let (positions, original, phases) = mesh.animation_buffers_mut();
        for ((pos, orig), phase) in positions
            .chunks_exact_mut(POSITION_STRIDE)
            .zip(original.chunks_exact(POSITION_STRIDE))
            .zip(phases.chunks_exact(POSITION_STRIDE))
        {
            pos[0] = orig[0] + ((counter + f64::from(phase[0])).cos() * AMPLITUDE) as f32;
            pos[1] = orig[1] + ((counter + f64::from(phase[1])).sin() * AMPLITUDE) as f32;
        }
    }
}
