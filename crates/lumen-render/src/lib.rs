#![forbid(unsafe_code)]

//! Render kernel: colors, pixel buffers, and ray geometry.
//!
//! # Role in Lumen
//! `lumen-render` holds everything an effect writes into or casts against:
//! the RGBA [`PixelBuffer`](framebuffer::PixelBuffer) a host blits, the color
//! types shared by palettes and meshes, and the camera/ray/intersection math
//! used for pointer picking.
//!
//! # Primary responsibilities
//! - **Color**: `PackedRgba`, 8-bit `Rgb8` palette entries, unit-range `RgbF`.
//! - **PixelBuffer**: fixed-size row-major RGBA8 surface.
//! - **Camera**: perspective projection and NDC-to-ray unprojection.
//! - **Intersection**: ray–triangle and ray–AABB tests.
//!
//! # How it fits in the system
//! This crate has no notion of time or input; `lumen-extras` drives it from
//! engine ticks scheduled by `lumen-runtime`.

pub mod camera;
pub mod color;
pub mod framebuffer;
pub mod geometry;
pub mod intersect;

pub use camera::{DirectionalLight, PerspectiveCamera, Ray};
pub use color::{PackedRgba, Rgb8, RgbF};
pub use framebuffer::PixelBuffer;
pub use geometry::Vec3;
