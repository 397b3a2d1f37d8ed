//! World <-> entity space transform for one pose.

use glam::{DMat3, DVec3};
use illuminated_core::Pose;

use crate::cone::{DEPTH, DISTANCE_DELTA};

/// Shift along the entity-space Y axis that moves the eye from the origin to
/// its place inside the cone, `DISTANCE_DELTA` in front of the apex.
const APEX_OFFSET: DVec3 = DVec3::new(0.0, DEPTH / 2.0 - DISTANCE_DELTA, 0.0);

/// Rotation pair and eye position derived from a [`Pose`].
///
/// `rotation` maps world directions into entity space and `inverse` is its
/// exact matrix inverse. Both are always built together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedFrame {
    rotation: DMat3,
    inverse: DMat3,
    eye: DVec3,
}

impl OrientedFrame {
    /// Build the frame for a pose.
    ///
    /// The rotation is `Rz(pitch) * Rz(-90°) * Ry(yaw) * Ry(90°)`, which turns
    /// the look direction onto entity-space -Y.
    pub fn from_pose(pose: &Pose) -> Self {
        let rotation = DMat3::from_rotation_z(pose.pitch.to_radians())
            * DMat3::from_rotation_z(-std::f64::consts::FRAC_PI_2)
            * DMat3::from_rotation_y(pose.yaw.to_radians())
            * DMat3::from_rotation_y(std::f64::consts::FRAC_PI_2);
        Self {
            rotation,
            inverse: rotation.inverse(),
            eye: pose.eye_position(),
        }
    }

    /// World -> entity rotation.
    pub fn rotation(&self) -> DMat3 {
        self.rotation
    }

    /// Entity -> world rotation.
    pub fn inverse_rotation(&self) -> DMat3 {
        self.inverse
    }

    /// Eye position captured when the frame was built.
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Convert a world-space point into entity space.
    pub fn world_to_entity_space(&self, point: DVec3) -> DVec3 {
        self.rotation * (point - self.eye) + APEX_OFFSET
    }

    /// Convert an entity-space point back into world space.
    pub fn entity_to_world_space(&self, point: DVec3) -> DVec3 {
        self.inverse * (point - APEX_OFFSET) + self.eye
    }

    /// World-space direction the light shines along.
    pub fn forward(&self) -> DVec3 {
        self.inverse * DVec3::NEG_Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(yaw: f64, pitch: f64) -> Pose {
        Pose::new(DVec3::new(3.5, 70.0, -12.25), yaw, pitch, 1.62)
    }

    #[test]
    fn forward_matches_look_direction() {
        for (yaw, pitch) in [(0.0, 0.0), (90.0, 0.0), (-135.0, 30.0), (200.0, -60.0)] {
            let pose = pose(yaw, pitch);
            let frame = OrientedFrame::from_pose(&pose);
            let delta = frame.forward() - pose.look_direction();
            assert!(delta.length() < 1e-12, "yaw {yaw} pitch {pitch}: {delta:?}");
        }
    }

    #[test]
    fn inverse_undoes_rotation() {
        let frame = OrientedFrame::from_pose(&pose(37.0, -12.0));
        let product = frame.rotation() * frame.inverse_rotation();
        assert!(product.abs_diff_eq(DMat3::IDENTITY, 1e-12));
    }

    #[test]
    fn eye_sits_in_front_of_apex() {
        let frame = OrientedFrame::from_pose(&pose(45.0, 10.0));
        let eye = frame.world_to_entity_space(frame.eye());
        assert!((eye - APEX_OFFSET).length() < 1e-12);
        assert_eq!(APEX_OFFSET.y, 7.0);
    }

    #[test]
    fn round_trip_restores_point() {
        let frame = OrientedFrame::from_pose(&pose(-80.0, 45.0));
        let point = DVec3::new(10.25, 64.5, -3.0);
        let back = frame.entity_to_world_space(frame.world_to_entity_space(point));
        assert!((back - point).length() < 1e-9);
    }
}
