//! Gizmo preferences

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GizmoError, Result};
use crate::raster::RasterConfig;

/// Tunable manipulator settings, stored as TOML next to the editor preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Pick distance around axis lines, in pixels
    pub selection_radius: f32,

    /// Plane handle size as a fraction of the axis length, in [0, 1]
    pub axes_plane_size: f32,

    /// Half extent of the uniform handle as a fraction of the axis length
    pub uniform_box_size: f32,

    /// Fade out axes that point at the camera
    pub use_visibility: bool,

    /// Off-axis angle (degrees) below which an axis is fully hidden
    pub visibility_min_angle: f32,

    /// Off-axis angle (degrees) above which an axis is fully visible
    pub visibility_max_angle: f32,

    /// World units per pixel and unit of camera distance
    pub distance_factor: f32,

    /// Degrees per pixel of pointer motion
    pub rotate_speed: f32,

    /// Extra factor on the screen-constant gizmo size
    pub gizmo_scale: f32,

    /// Warp the pointer onto the gizmo origin when a drag starts
    pub align_cursor: bool,

    /// Always translate by picking the pointer on the active axis or plane
    pub picking_only_translation: bool,

    /// Rotation snap angle in degrees
    pub rotation_step: Option<f32>,

    /// Translation raster
    pub raster: RasterConfig,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            selection_radius: 5.0,
            axes_plane_size: 0.3,
            uniform_box_size: 0.15,
            use_visibility: true,
            visibility_min_angle: 5.0,
            visibility_max_angle: 15.0,
            distance_factor: 0.05,
            rotate_speed: 0.2,
            gizmo_scale: 1.0,
            align_cursor: false,
            picking_only_translation: false,
            rotation_step: None,
            raster: RasterConfig::default(),
        }
    }
}

impl GizmoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GizmoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load preferences from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded gizmo config from {:?}", path);
        Ok(config)
    }

    /// Save preferences to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Saved gizmo config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.raster.size > 0.0) {
            return Err(GizmoError::InvalidConfig(format!(
                "raster size must be positive, got {}",
                self.raster.size
            )));
        }
        if !(self.selection_radius > 0.0) {
            return Err(GizmoError::InvalidConfig(format!(
                "selection radius must be positive, got {}",
                self.selection_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.axes_plane_size) {
            return Err(GizmoError::InvalidConfig(format!(
                "axes plane size must be in [0, 1], got {}",
                self.axes_plane_size
            )));
        }
        if self.visibility_max_angle < self.visibility_min_angle {
            return Err(GizmoError::InvalidConfig(
                "visibility max angle is below the min angle".into(),
            ));
        }
        if let Some(step) = self.rotation_step {
            if !(step > 0.0) {
                return Err(GizmoError::InvalidConfig(format!(
                    "rotation step must be positive, got {}",
                    step
                )));
            }
        }
        Ok(())
    }
}
