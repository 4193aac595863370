#![forbid(unsafe_code)]

//! Static height fields sampled by the plasma compositor.
//!
//! Both fields are square grids of side `size`, indexed `u * size + v`, with
//! values in `[0, 127]` so the sum of one sample from each is a valid
//! palette index. They are computed once and never mutated.

use std::f64::consts::PI;

#[inline]
fn distance(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Maximum value of a single field.
pub const HEIGHT_MAX: u8 = 127;

/// Square grid of 7-bit heights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightField {
    size: usize,
    data: Vec<u8>,
}

impl HeightField {
    fn build(size: usize, f: impl Fn(f64, f64) -> f64) -> Self {
        let half = (size / 2) as f64;
        let mut data = Vec::with_capacity(size * size);
        for u in 0..size {
            let cx = u as f64 - half;
            for v in 0..size {
                let cy = v as f64 - half;
                data.push(f(cx, cy).floor().clamp(0.0, f64::from(HEIGHT_MAX)) as u8);
            }
        }
        Self { size, data }
    }

    /// Concentric ripple around the grid center.
    ///
    /// `floor(((sin(d * 2π/(size/2) - 50) + 1) / 2) * 128)`, `d` the distance
    /// to the center.
    #[must_use]
    pub fn ripple(size: usize) -> Self {
        let stretch = (2.0 * PI) / (size / 2).max(1) as f64;
        Self::build(size, |cx, cy| {
            let d = distance(cx, cy);
            let ripple = (d * stretch - 50.0).sin();
            ((ripple + 1.0) / 2.0) * 128.0
        })
    }

    /// Two stretched radial waves interfering.
    ///
    /// `floor(((sin(d1) + cos(d2) + 2) / 4) * 127)` with `d1`, `d2` distances
    /// under different axis scalings.
    #[must_use]
    pub fn interference(size: usize) -> Self {
        Self::build(size, |cx, cy| {
            let d1 = distance(0.8 * cx, 1.3 * cy) * 0.022;
            let d2 = distance(1.35 * cx, 0.45 * cy) * 0.022;
            let h = d1.sin() + d2.cos();
            ((h + 2.0) / 4.0) * 127.0
        })
    }

    /// Side length.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sample at row `u`, column `v`.
    #[inline]
    #[must_use]
    pub fn get(&self, u: usize, v: usize) -> u8 {
        self.data[u * self.size + v]
    }

    /// Row `u` as a slice.
    #[inline]
    #[must_use]
    pub fn row(&self, u: usize) -> &[u8] {
        &self.data[u * self.size..(u + 1) * self.size]
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
