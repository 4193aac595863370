#![forbid(unsafe_code)]

//! Plasma cloud backdrop (pixel-space).
//!
//! Two static height fields are scrolled against each other along slow
//! cosine paths; their summed height indexes a 256-entry palette. The output
//! fades in linearly over the first 255 composited frames.
//!
//! # Frame cycle
//! ```text
//! first tick:  build palette + height fields, clear buffer (alpha 0)
//! every tick:  offsets(t) → sample field1 + field2 → palette → RGBA, alpha += 1
//! ```

use std::f64::consts::PI;
use std::time::Duration;

use lumen_core::{FxError, FxResult, Viewport};
use lumen_render::{PackedRgba, PixelBuffer};
use lumen_runtime::Engine;

use super::height_field::HeightField;
use super::palette::{ColorPalette, GradientName};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Largest accepted height-field side; two fields of this side take 32 MiB.
pub const MAX_MAP_SIZE: usize = 4096;

/// Sizes and speed of the plasma.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PlasmaGeometry {
    /// Side of each height field.
    pub map_size: usize,
    /// Side of the output pixel buffer.
    pub img_size: usize,
    /// Global scroll speed multiplier.
    pub governor: f64,
}

impl Default for PlasmaGeometry {
    fn default() -> Self {
        Self {
            map_size: 1024,
            img_size: 512,
            governor: 0.3,
        }
    }
}

impl PlasmaGeometry {
    /// Validate constraints and return all violations.
    ///
    /// `2 * img_size <= map_size` keeps every scrolled sample inside the
    /// height fields, since offsets never exceed `map_size / 2`. The
    /// `MAX_MAP_SIZE` cap bounds allocation and keeps `img_size` within u32.
    pub fn validate(&self) -> Result<(), Vec<FxError>> {
        let mut errors = Vec::new();
        if self.map_size == 0 || self.map_size % 2 != 0 {
            errors.push(FxError::config("map_size", self.map_size, "must be even and > 0"));
        }
        if self.map_size > MAX_MAP_SIZE {
            errors.push(FxError::config(
                "map_size",
                self.map_size,
                format!("must be at most {MAX_MAP_SIZE}"),
            ));
        }
        if self.img_size == 0 {
            errors.push(FxError::config("img_size", self.img_size, "must be > 0"));
        }
        if self.img_size.saturating_mul(2) > self.map_size {
            errors.push(FxError::config(
                "img_size",
                self.img_size,
                "must be at most half of map_size",
            ));
        }
        if !self.governor.is_finite() {
            errors.push(FxError::config("governor", self.governor, "must be finite"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Plasma mount configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlasmaConfig {
    #[cfg_attr(feature = "serde", serde(rename = "gradientName"))]
    pub gradient: GradientName,
    pub is_light: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: PlasmaGeometry,
}

impl PlasmaConfig {
    /// Config with default geometry; fails on an unknown gradient name.
    pub fn new(gradient_name: &str, is_light: bool) -> FxResult<Self> {
        Ok(Self {
            gradient: gradient_name.parse()?,
            is_light,
            geometry: PlasmaGeometry::default(),
        })
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: PlasmaGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

// ---------------------------------------------------------------------------
// Offsets
// ---------------------------------------------------------------------------

/// Scroll offsets of the two height fields for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlasmaOffsets {
    pub dx1: usize,
    pub dy1: usize,
    pub dx2: usize,
    pub dy2: usize,
}

impl PlasmaOffsets {
    /// Offsets at elapsed time `t_ms` (milliseconds).
    ///
    /// Each offset is `floor(((cos(phase(t)) + 1) / 2) * map_size / 2)`, so
    /// always within `[0, map_size / 2]` for finite `t_ms`.
    #[must_use]
    pub fn at(t_ms: f64, governor: f64, map_size: usize) -> Self {
        let half = map_size / 2;
        let scale = |phase: f64| -> usize {
            let v = (((phase.cos() + 1.0) / 2.0) * map_size as f64) / 2.0;
            (v.floor().max(0.0) as usize).min(half)
        };
        Self {
            dx1: scale(t_ms * 0.0002 * governor + 0.9 + PI),
            dy1: scale(t_ms * 0.0003 * governor - 0.1),
            dx2: scale(t_ms * -0.0002 * governor + 1.2),
            dy2: scale(t_ms * -0.0003 * governor - 0.8 + PI),
        }
    }
}

// ---------------------------------------------------------------------------
// PlasmaCompositor
// ---------------------------------------------------------------------------

/// Owns the palette, height fields, and output buffer of one plasma.
#[derive(Debug, Clone)]
pub struct PlasmaCompositor {
    geometry: PlasmaGeometry,
    palette: ColorPalette,
    fields: Option<(HeightField, HeightField)>,
    pixels: PixelBuffer,
    alpha: u8,
    offsets: PlasmaOffsets,
    frames_composited: u64,
}

impl PlasmaCompositor {
    /// Validate `config` and build the palette. Height fields are deferred to
    /// the first tick.
    pub fn new(config: &PlasmaConfig) -> FxResult<Self> {
        config
            .geometry
            .validate()
            .map_err(|mut errs| errs.swap_remove(0))?;
        let img = config.geometry.img_size as u32;
        Ok(Self {
            geometry: config.geometry,
            palette: ColorPalette::for_gradient(config.gradient, config.is_light),
            fields: None,
            pixels: PixelBuffer::new(img, img),
            alpha: 0,
            offsets: PlasmaOffsets::default(),
            frames_composited: 0,
        })
    }

    /// Advance one frame at elapsed time `t_ms`.
    ///
    /// The first call only initializes; later calls composite. A non-finite
    /// time skips the frame and leaves the buffer untouched.
    pub fn tick(&mut self, t_ms: f64) -> FxResult<()> {
        if self.fields.is_none() {
            self.initialize();
            return Ok(());
        }
        if !t_ms.is_finite() {
            return Err(FxError::DegradedFrame(format!(
                "plasma: non-finite elapsed time {t_ms}"
            )));
        }
        self.offsets = PlasmaOffsets::at(t_ms, self.geometry.governor, self.geometry.map_size);
        self.composite();
        self.alpha = self.alpha.saturating_add(1);
        self.frames_composited += 1;
        Ok(())
    }

    fn initialize(&mut self) {
        let size = self.geometry.map_size;
        self.fields = Some((HeightField::ripple(size), HeightField::interference(size)));
        self.pixels.fill(PackedRgba::rgba(0, 0, 0, self.alpha));
        lumen_core::debug!(map_size = size, img_size = self.geometry.img_size, "plasma initialized");
    }

    fn composite(&mut self) {
        let Some((field1, field2)) = &self.fields else {
            return;
        };
        let img = self.geometry.img_size;
        let off = self.offsets;
        let alpha = self.alpha;
        let palette = &self.palette;

        for u in 0..img {
            let row1 = &field1.row(u + off.dy1)[off.dx1..off.dx1 + img];
            let row2 = &field2.row(u + off.dy2)[off.dx2..off.dx2 + img];
            let out = self.pixels.row_mut(u as u32);
            for ((px, h1), h2) in out.chunks_exact_mut(4).zip(row1).zip(row2) {
                let c = palette.get(h1 + h2);
                px.copy_from_slice(&[c.r, c.g, c.b, alpha]);
            }
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.fields.is_some()
    }

    /// Fade-in alpha applied on the next composited frame.
    #[must_use]
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Offsets used by the most recent composited frame.
    #[must_use]
    pub fn offsets(&self) -> PlasmaOffsets {
        self.offsets
    }

    #[must_use]
    pub fn frames_composited(&self) -> u64 {
        self.frames_composited
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    #[must_use]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    #[must_use]
    pub fn height_fields(&self) -> Option<(&HeightField, &HeightField)> {
        self.fields.as_ref().map(|(a, b)| (a, b))
    }

    #[must_use]
    pub fn geometry(&self) -> PlasmaGeometry {
        self.geometry
    }
}

// ---------------------------------------------------------------------------
// PlasmaEngine
// ---------------------------------------------------------------------------

/// Plasma compositor bound to a host surface.
///
/// The buffer stays `img_size`² regardless of the surface size; the host
/// scales when blitting.
#[derive(Debug, Clone)]
pub struct PlasmaEngine {
    compositor: PlasmaCompositor,
    viewport: Option<Viewport>,
}

impl PlasmaEngine {
    pub fn new(config: &PlasmaConfig) -> FxResult<Self> {
        Ok(Self {
            compositor: PlasmaCompositor::new(config)?,
            viewport: None,
        })
    }

    #[must_use]
    pub fn compositor(&self) -> &PlasmaCompositor {
        &self.compositor
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        self.compositor.pixels()
    }

    /// Latest host surface size.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl Engine for PlasmaEngine {
    fn name(&self) -> &'static str {
        "plasma"
    }

    fn tick(&mut self, now: Duration) -> FxResult<()> {
        self.compositor.tick(now.as_secs_f64() * 1000.0)
    }

    fn resized(&mut self, viewport: Viewport) {
        lumen_core::debug!(width = viewport.width, height = viewport.height, "plasma surface resized");
        self.viewport = Some(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_render::Rgb8;

    fn small(gradient: &str, is_light: bool) -> PlasmaConfig {
        PlasmaConfig::new(gradient, is_light)
            .unwrap()
            .with_geometry(PlasmaGeometry {
                map_size: 64,
                img_size: 32,
                governor: 0.3,
            })
    }

    #[test]
    fn unknown_gradient_fails_fast() {
        assert!(matches!(
            PlasmaConfig::new("plasma-nope", false),
            Err(FxError::Configuration { .. })
        ));
    }

    #[test]
    fn geometry_validation_collects_every_violation() {
        let g = PlasmaGeometry {
            map_size: 7,
            img_size: 0,
            governor: f64::NAN,
        };
        let errs = g.validate().unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(PlasmaGeometry::default().validate().is_ok());
        let oversized = PlasmaGeometry {
            map_size: 64,
            img_size: 33,
            governor: 0.3,
        };
        assert!(PlasmaCompositor::new(&small("plasma-body", false).with_geometry(oversized)).is_err());
    }

    #[test]
    fn huge_map_size_fails_at_construction() {
        let g = PlasmaGeometry {
            map_size: 1 << (usize::BITS - 1),
            img_size: 2,
            governor: 0.3,
        };
        let errs = g.validate().unwrap_err();
        assert!(matches!(errs[..], [FxError::Configuration { field: "map_size", .. }]));
        let err = PlasmaCompositor::new(&small("plasma-body", false).with_geometry(g)).unwrap_err();
        assert!(err.is_fatal());

        let at_cap = PlasmaGeometry {
            map_size: MAX_MAP_SIZE,
            img_size: MAX_MAP_SIZE / 2,
            governor: 0.3,
        };
        assert!(at_cap.validate().is_ok());
        let over = PlasmaGeometry {
            map_size: MAX_MAP_SIZE + 2,
            ..at_cap
        };
        assert_eq!(over.validate().unwrap_err().len(), 1);
    }

    #[test]
    fn first_tick_initializes_without_compositing() {
        let mut c = PlasmaCompositor::new(&small("plasma-body", false)).unwrap();
        assert!(!c.is_initialized());
        c.tick(0.0).unwrap();
        assert!(c.is_initialized());
        assert_eq!(c.frames_composited(), 0);
        assert_eq!(c.alpha(), 0);
        assert!(c.pixels().as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn composited_pixels_follow_palette_and_offsets() {
        let mut c = PlasmaCompositor::new(&small("plasma-footer", true)).unwrap();
        c.tick(0.0).unwrap();
        c.tick(12_345.0).unwrap();
        let off = c.offsets();
        assert_eq!(off, PlasmaOffsets::at(12_345.0, 0.3, 64));
        let (f1, f2) = c.height_fields().unwrap();
        for (u, v) in [(0usize, 0usize), (5, 17), (31, 31)] {
            let h = f1.get(u + off.dy1, v + off.dx1) + f2.get(u + off.dy2, v + off.dx2);
            let Rgb8 { r, g, b } = c.palette().get(h);
            assert_eq!(
                c.pixels().get_pixel(v as u32, u as u32),
                PackedRgba::rgba(r, g, b, 0)
            );
        }
        assert_eq!(c.alpha(), 1);
    }

    #[test]
    fn alpha_saturates_after_255_frames() {
        let mut c = PlasmaCompositor::new(&small("plasma-jobs", false)).unwrap();
        c.tick(0.0).unwrap();
        let mut last = c.alpha();
        for frame in 1..=300u32 {
            c.tick(f64::from(frame) * 16.0).unwrap();
            assert!(c.alpha() >= last);
            last = c.alpha();
            if frame == 254 {
                assert_eq!(c.alpha(), 254);
            }
        }
        assert_eq!(c.frames_composited(), 300);
        assert_eq!(c.alpha(), 255);
        assert_eq!(c.pixels().get_pixel(0, 0).a(), 255);
    }

    #[test]
    fn non_finite_time_keeps_last_frame() {
        let mut c = PlasmaCompositor::new(&small("plasma-gdpr", false)).unwrap();
        c.tick(0.0).unwrap();
        c.tick(100.0).unwrap();
        let before = c.pixels().as_bytes().to_vec();
        let err = c.tick(f64::NAN).unwrap_err();
        assert!(matches!(err, FxError::DegradedFrame(_)));
        assert_eq!(c.pixels().as_bytes(), &before[..]);
        assert_eq!(c.alpha(), 1);
    }

    #[test]
    fn offsets_at_time_zero() {
        let off = PlasmaOffsets::at(0.0, 0.3, 1024);
        let expect = |phase: f64| ((((phase.cos() + 1.0) / 2.0) * 1024.0) / 2.0).floor() as usize;
        assert_eq!(off.dx1, expect(0.9 + PI));
        assert_eq!(off.dy1, expect(-0.1));
        assert_eq!(off.dx2, expect(1.2));
        assert_eq!(off.dy2, expect(-0.8 + PI));
    }

    #[test]
    fn engine_converts_duration_to_milliseconds() {
        let mut engine = PlasmaEngine::new(&small("plasma-header", false)).unwrap();
        engine.tick(Duration::ZERO).unwrap();
        engine.tick(Duration::from_millis(2_000)).unwrap();
        assert_eq!(
            engine.compositor().offsets(),
            PlasmaOffsets::at(2_000.0, 0.3, 64)
        );
        engine.resized(Viewport::new(1920, 1080).unwrap());
        assert_eq!(engine.viewport(), Viewport::new(1920, 1080));
    }
}
