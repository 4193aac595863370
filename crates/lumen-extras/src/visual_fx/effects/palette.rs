#![forbid(unsafe_code)]

//! Fixed-length plasma palettes.
//!
//! A palette is 256 colors built from five control stops: four linear
//! segments of 64 entries each. Entry `i` of segment `s` is
//! `floor(stop[s] + (stop[s+1] - stop[s]) * (i / 64))` per channel, so entry 0
//! is exactly `stop[0]` and entry 255 sits one 64th of a step short of
//! `stop[4]`.

use std::fmt;
use std::str::FromStr;

use lumen_core::FxError;
use lumen_render::Rgb8;

/// Number of palette entries.
pub const PALETTE_LEN: usize = 256;
/// Entries per segment between two control stops.
const SEGMENT_LEN: usize = 64;

const TOMATO: Rgb8 = Rgb8::new(255, 97, 76);
const TEAL: Rgb8 = Rgb8::new(86, 191, 255);
const BLUE: Rgb8 = Rgb8::new(32, 78, 216);
const PURPLE: Rgb8 = Rgb8::new(126, 47, 229);

// ---------------------------------------------------------------------------
// GradientName
// ---------------------------------------------------------------------------

/// Which page section the plasma backs; selects the control stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GradientName {
    PlasmaHeader,
    PlasmaBody,
    PlasmaGdpr,
    PlasmaJobs,
    PlasmaFooter,
}

impl GradientName {
    pub const ALL: [Self; 5] = [
        Self::PlasmaHeader,
        Self::PlasmaBody,
        Self::PlasmaGdpr,
        Self::PlasmaJobs,
        Self::PlasmaFooter,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlasmaHeader => "plasma-header",
            Self::PlasmaBody => "plasma-body",
            Self::PlasmaGdpr => "plasma-gdpr",
            Self::PlasmaJobs => "plasma-jobs",
            Self::PlasmaFooter => "plasma-footer",
        }
    }

    /// The five control stops for this gradient over `base`.
    #[must_use]
    pub const fn stops(self, base: Rgb8) -> [Rgb8; 5] {
        match self {
            Self::PlasmaHeader => [base, base, TEAL, PURPLE, PURPLE],
            Self::PlasmaBody | Self::PlasmaGdpr | Self::PlasmaJobs => {
                [base, base, base, BLUE, TOMATO]
            }
            Self::PlasmaFooter => [base, base, TEAL, TOMATO, TOMATO],
        }
    }
}

impl FromStr for GradientName {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| FxError::config("gradient_name", s, "unknown gradient"))
    }
}

impl fmt::Display for GradientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base color behind the plasma: white for light pages, black for dark.
#[inline]
#[must_use]
pub const fn base_color(is_light: bool) -> Rgb8 {
    if is_light { Rgb8::WHITE } else { Rgb8::BLACK }
}

// ---------------------------------------------------------------------------
// ColorPalette
// ---------------------------------------------------------------------------

/// Immutable 256-entry gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    entries: [Rgb8; PALETTE_LEN],
}

impl ColorPalette {
    /// Build from five control stops.
    #[must_use]
    pub fn from_stops(stops: [Rgb8; 5]) -> Self {
        let mut entries = [Rgb8::BLACK; PALETTE_LEN];
        for (i, entry) in entries.iter_mut().enumerate() {
            let seg = i / SEGMENT_LEN;
            let f = (i % SEGMENT_LEN) as f64 / SEGMENT_LEN as f64;
            *entry = stops[seg].lerp_floor(stops[seg + 1], f);
        }
        Self { entries }
    }

    /// Palette for a named gradient over the light or dark base.
    #[must_use]
    pub fn for_gradient(name: GradientName, is_light: bool) -> Self {
        Self::from_stops(name.stops(base_color(is_light)))
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: u8) -> Rgb8 {
        self.entries[index as usize]
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Rgb8; PALETTE_LEN] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        PALETTE_LEN
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
