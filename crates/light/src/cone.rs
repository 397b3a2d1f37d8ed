//! Signed-distance cone light with a cached orientation frame.

use glam::{DVec3, IVec3};
use illuminated_core::Pose;
use tracing::trace;

use crate::bounds::LightBox;
use crate::frame::OrientedFrame;

/// Radius of the cone at its base, in blocks.
pub const RADIUS: f64 = 8.0;

/// Length of the cone along its axis, in blocks.
pub const DEPTH: f64 = 20.0;

/// How far in front of the cone apex the apparent light source sits.
pub const DISTANCE_DELTA: f64 = 3.0;

/// Pose change (blocks or degrees, per component) that forces a new frame.
pub const REFRESH_THRESHOLD: f64 = 0.1;

/// Lower bound for the falloff distance, keeping the power term finite.
pub const MIN_FALLOFF_DISTANCE: f64 = 1e-3;

/// Brightest light level on the host scale.
pub const MAX_LIGHT_LEVEL: f64 = 15.0;

/// Quintic ease `t³(t(6t - 15) + 10)` over `t` clamped to `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Flashlight cone bound to one tracked entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeLightModel {
    last_pose: Pose,
    frame: OrientedFrame,
}

impl ConeLightModel {
    /// Create a model and build its frame from the current pose.
    pub fn new(pose: Pose) -> Self {
        Self {
            last_pose: pose,
            frame: OrientedFrame::from_pose(&pose),
        }
    }

    /// Pose the current frame was built from.
    pub fn pose(&self) -> &Pose {
        &self.last_pose
    }

    /// Current orientation frame.
    pub fn frame(&self) -> &OrientedFrame {
        &self.frame
    }

    /// Rebuild the frame if the entity moved or turned far enough.
    ///
    /// Returns `true` when any of x, y, z, yaw or pitch differs from the last
    /// observed pose by at least [`REFRESH_THRESHOLD`]; state is untouched
    /// otherwise.
    pub fn refresh_if_changed(&mut self, pose: &Pose) -> bool {
        let delta = pose.max_component_delta(&self.last_pose);
        if delta < REFRESH_THRESHOLD {
            return false;
        }
        trace!(delta, yaw = pose.yaw, pitch = pose.pitch, "rebuilding flashlight frame");
        self.last_pose = *pose;
        self.frame = OrientedFrame::from_pose(pose);
        true
    }

    /// Convert a world-space point into entity space.
    pub fn world_to_entity_space(&self, point: DVec3) -> DVec3 {
        self.frame.world_to_entity_space(point)
    }

    /// Convert an entity-space point into world space.
    pub fn entity_to_world_space(&self, point: DVec3) -> DVec3 {
        self.frame.entity_to_world_space(point)
    }

    /// Light intensity at a world point, in `[0, 15]`.
    pub fn illumination_at(&self, point: DVec3) -> f64 {
        let local = self.world_to_entity_space(point);

        // Vertical cone: radius shrinks from RADIUS at y = -DEPTH/2 to zero at
        // the apex y = DEPTH/2; caps close both ends.
        let sdf = (RADIUS * (0.5 - local.y / DEPTH) - local.x.hypot(local.z))
            .min(DEPTH * 0.5 - local.y.abs());

        let distance = (DEPTH / 2.0 - local.y - DISTANCE_DELTA).max(MIN_FALLOFF_DISTANCE);
        let intensity = DEPTH / distance.powf(1.5);

        let light = smoothstep(sdf).clamp(0.0, 1.0) * intensity * MAX_LIGHT_LEVEL;
        light.clamp(0.0, MAX_LIGHT_LEVEL)
    }

    /// Light intensity sampled at the centre of a block.
    pub fn illumination_at_block(&self, block: IVec3) -> f64 {
        self.illumination_at(block.as_dvec3() + DVec3::splat(0.5))
    }

    /// Block light level (0-15) the host would store for a block.
    pub fn light_level_at_block(&self, block: IVec3) -> u8 {
        self.illumination_at_block(block).round() as u8
    }

    /// Lattice box enclosing the whole cone in world space.
    pub fn bounding_box(&self) -> LightBox {
        let horizontal = [-RADIUS, RADIUS];
        let vertical = [-(DEPTH / 2.0).ceil(), (DEPTH / 2.0).floor()];

        let mut corners = [DVec3::ZERO; 8];
        let mut i = 0;
        for x in horizontal {
            for y in vertical {
                for z in horizontal {
                    corners[i] = self.entity_to_world_space(DVec3::new(x, y, z));
                    i += 1;
                }
            }
        }

        let (min, max) = corners.into_iter().fold(
            (DVec3::splat(f64::MAX), DVec3::splat(f64::MIN)),
            |(min, max), corner| (min.min(corner), max.max(corner)),
        );
        LightBox::from_extent(min, max)
    }
}
