//! Entity pose sampled from the host each update.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Eye height of a standing player, in blocks.
pub const PLAYER_EYE_HEIGHT: f64 = 1.62;

/// Error returned when a pose component is not a finite number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// A named component was NaN or infinite.
    #[error("pose component `{component}` is not finite ({value})")]
    NonFinite {
        /// Field name (`x`, `y`, `z`, `yaw`, `pitch` or `eye_height`).
        component: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Position and orientation of a tracked entity.
///
/// Yaw and pitch are in degrees using the voxel-world convention: yaw 0 faces
/// +Z, yaw 90 faces -X, positive pitch looks down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World X of the entity's feet.
    pub x: f64,
    /// World Y of the entity's feet.
    pub y: f64,
    /// World Z of the entity's feet.
    pub z: f64,
    /// Horizontal rotation in degrees.
    pub yaw: f64,
    /// Vertical rotation in degrees.
    pub pitch: f64,
    /// Distance from the feet to the eyes.
    #[serde(default = "default_eye_height")]
    pub eye_height: f64,
}

fn default_eye_height() -> f64 {
    PLAYER_EYE_HEIGHT
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(DVec3::ZERO, 0.0, 0.0, PLAYER_EYE_HEIGHT)
    }
}

impl Pose {
    /// Create a pose from host data that is finite by construction.
    pub fn new(position: DVec3, yaw: f64, pitch: f64, eye_height: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            yaw,
            pitch,
            eye_height,
        }
    }

    /// Create a pose, rejecting NaN or infinite components.
    pub fn try_new(
        position: DVec3,
        yaw: f64,
        pitch: f64,
        eye_height: f64,
    ) -> Result<Self, PoseError> {
        let pose = Self::new(position, yaw, pitch, eye_height);
        pose.validate()?;
        Ok(pose)
    }

    /// Check that every component is finite.
    pub fn validate(&self) -> Result<(), PoseError> {
        let components = [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("yaw", self.yaw),
            ("pitch", self.pitch),
            ("eye_height", self.eye_height),
        ];
        for (component, value) in components {
            if !value.is_finite() {
                return Err(PoseError::NonFinite { component, value });
            }
        }
        Ok(())
    }

    /// Feet position.
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Eye position (feet raised by the eye height).
    pub fn eye_position(&self) -> DVec3 {
        DVec3::new(self.x, self.y + self.eye_height, self.z)
    }

    /// Largest absolute difference across x, y, z, yaw and pitch.
    ///
    /// Eye height is not compared.
    pub fn max_component_delta(&self, other: &Pose) -> f64 {
        [
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.yaw - other.yaw,
            self.pitch - other.pitch,
        ]
        .into_iter()
        .map(f64::abs)
        .fold(0.0, f64::max)
    }

    /// Return a copy moved by `offset` and turned by the given angles.
    pub fn moved(&self, offset: DVec3, yaw_delta: f64, pitch_delta: f64) -> Self {
        Self::new(
            self.position() + offset,
            self.yaw + yaw_delta,
            self.pitch + pitch_delta,
            self.eye_height,
        )
    }

    /// Unit vector the entity is looking along.
    pub fn look_direction(&self) -> DVec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        DVec3::new(-yaw_sin * pitch_cos, -pitch_sin, yaw_cos * pitch_cos)
    }
}
