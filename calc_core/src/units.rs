//! # Pixel Units
//!
//! Type-safe wrappers for the two pixel spaces of the drawing surface. Layout
//! and pointer positions are in CSS (logical) pixels; the raster is allocated
//! in physical pixels. The [`DevicePixelRatio`] converts between them.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{CssPx, CssSize, DevicePixelRatio};
//!
//! let size = CssSize::new(CssPx(300.5), CssPx(256.0));
//! let physical = size.to_physical(DevicePixelRatio::new(2.0).unwrap());
//! assert_eq!((physical.width, physical.height), (601, 512));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Scalars
// ============================================================================

/// Logical length in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssPx(pub f32);

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f32> for $type {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f32> for $type {
            type Output = Self;
            fn div(self, rhs: f32) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw value
            pub fn value(self) -> f32 {
                self.0
            }
        }
    };
}

impl_arithmetic!(CssPx);

impl CssPx {
    /// Restrict to `[min, max]`
    pub fn clamp(self, min: CssPx, max: CssPx) -> CssPx {
        CssPx(self.0.clamp(min.0, max.0))
    }
}

/// Physical pixels per CSS pixel
///
/// Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct DevicePixelRatio(f32);

impl DevicePixelRatio {
    pub const ONE: DevicePixelRatio = DevicePixelRatio(1.0);

    pub fn new(ratio: f32) -> CalcResult<Self> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(DevicePixelRatio(ratio))
        } else {
            Err(CalcError::invalid_input(
                "device_pixel_ratio",
                ratio.to_string(),
                "must be a finite number greater than zero",
            ))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Physical pixel count for a CSS length, `floor(css × dpr)` but at least 1
    pub fn to_physical(self, css: CssPx) -> u32 {
        let scaled = (css.0 * self.0).floor();
        if scaled.is_finite() && scaled >= 1.0 {
            scaled as u32
        } else {
            1
        }
    }
}

impl Default for DevicePixelRatio {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f32> for DevicePixelRatio {
    type Error = CalcError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        DevicePixelRatio::new(value)
    }
}

impl From<DevicePixelRatio> for f32 {
    fn from(dpr: DevicePixelRatio) -> Self {
        dpr.0
    }
}

// ============================================================================
// Points and Sizes
// ============================================================================

/// Position in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CssPoint {
    pub x: CssPx,
    pub y: CssPx,
}

impl CssPoint {
    pub fn new(x: f32, y: f32) -> Self {
        CssPoint { x: CssPx(x), y: CssPx(y) }
    }

    /// This point relative to `origin`
    pub fn relative_to(self, origin: CssPoint) -> CssPoint {
        CssPoint {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Logical size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CssSize {
    pub width: CssPx,
    pub height: CssPx,
}

impl CssSize {
    pub fn new(width: CssPx, height: CssPx) -> Self {
        CssSize { width, height }
    }

    pub fn to_physical(self, dpr: DevicePixelRatio) -> PhysicalSize {
        PhysicalSize {
            width: dpr.to_physical(self.width),
            height: dpr.to_physical(self.height),
        }
    }

    /// Whether a canvas-local point lies inside this size
    pub fn contains(self, point: CssPoint) -> bool {
        point.x.0 >= 0.0
            && point.y.0 >= 0.0
            && point.x.0 < self.width.0
            && point.y.0 < self.height.0
    }
}

/// Raster size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}
