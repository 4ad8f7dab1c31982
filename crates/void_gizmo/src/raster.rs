//! Raster snapping.
//!
//! A [`RasterScalar`] accumulates continuous input and hands it out in whole
//! raster steps. The part that does not fill a step stays inside the scalar
//! for the next frame, so slow drags still add up to a step eventually.

use core::ops::AddAssign;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single accumulating number that can be snapped to a raster.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterScalar {
    value: f32,
}

impl RasterScalar {
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self { value }
    }

    /// The raw accumulated value, without any raster applied.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Returns the value snapped to the nearest multiple of `size`.
    ///
    /// ```
    /// use void_gizmo::RasterScalar;
    ///
    /// assert_eq!(RasterScalar::new(3.5).raster(5.0), 5.0);
    /// assert_eq!(RasterScalar::new(2.4).raster(5.0), 0.0);
    /// assert_eq!(RasterScalar::new(-4.9).raster(5.0), -5.0);
    /// assert_eq!(RasterScalar::new(-1.4).raster(3.0), 0.0);
    /// ```
    ///
    /// A non-positive size disables the raster and returns the raw value.
    pub fn raster(&self, size: f32) -> f32 {
        if !(size > 0.0) {
            return self.value;
        }
        (self.value / size).round() * size
    }

    /// Emits the snapped value if it is at least one raster step and keeps the
    /// remainder, otherwise emits zero and keeps everything.
    ///
    /// ```
    /// use void_gizmo::RasterScalar;
    ///
    /// let mut num = RasterScalar::default();
    /// num += 2.3;
    /// assert_eq!(num.raster_flush(5.0), 0.0);
    /// num += 1.0;
    /// assert_eq!(num.raster_flush(5.0), 5.0);
    /// assert!((num.value() + 1.7).abs() < 1e-5);
    /// ```
    pub fn raster_flush(&mut self, size: f32) -> f32 {
        if !(size > 0.0) {
            // No raster: everything passes through.
            let out = self.value;
            self.value = 0.0;
            return out;
        }

        let steps = (self.value / size).round();
        if steps.abs() > 0.5 {
            let out = steps * size;
            self.value -= out;
            out
        } else {
            0.0
        }
    }
}

impl AddAssign<f32> for RasterScalar {
    #[inline]
    fn add_assign(&mut self, rhs: f32) {
        self.value += rhs;
    }
}

impl From<f32> for RasterScalar {
    #[inline]
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Three raster scalars, composed component-wise for 3D translation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterVector {
    pub x: RasterScalar,
    pub y: RasterScalar,
    pub z: RasterScalar,
}

impl RasterVector {
    /// The accumulated vector without raster.
    pub fn real_vector(&self) -> Vec3 {
        Vec3::new(self.x.value(), self.y.value(), self.z.value())
    }

    pub fn raster_vector(&self, size: f32) -> Vec3 {
        Vec3::new(self.x.raster(size), self.y.raster(size), self.z.raster(size))
    }

    pub fn raster_flush_vector(&mut self, size: f32) -> Vec3 {
        Vec3::new(
            self.x.raster_flush(size),
            self.y.raster_flush(size),
            self.z.raster_flush(size),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign<Vec3> for RasterVector {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// How translation is snapped while dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterMode {
    /// Free movement
    #[default]
    None,
    /// Steps are counted from where the drag started
    Relative,
    /// Steps land on global grid coordinates
    Absolute,
}

/// Translation raster settings plus the remainder of the current drag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub mode: RasterMode,
    /// Raster step in world units. Always greater than zero.
    pub size: f32,
    /// Keep the gizmo itself off-grid while the selected nodes snap.
    pub move_free_in_raster: bool,
    /// Unflushed remainder. Lives for one continuous drag.
    #[serde(skip)]
    pub vector: RasterVector,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            mode: RasterMode::None,
            size: 1.0,
            move_free_in_raster: true,
            vector: RasterVector::default(),
        }
    }
}

impl RasterConfig {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.mode != RasterMode::None
    }

    /// Adds `delta` to the remainder and returns the whole steps that are due.
    pub fn accumulate(&mut self, delta: Vec3) -> Vec3 {
        self.vector += delta;
        self.vector.raster_flush_vector(self.size)
    }

    /// Offset between the snapped nodes and the free-moving gizmo.
    pub fn free_offset(&self) -> Vec3 {
        if self.is_enabled() && self.move_free_in_raster {
            self.vector.real_vector()
        } else {
            Vec3::ZERO
        }
    }
}
