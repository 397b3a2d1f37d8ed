#![warn(missing_docs)]
//! Cone-shaped dynamic light cast by a hand-held flashlight.
//!
//! Two euclidean spaces are involved:
//! - world space, the usual voxel-world coordinates;
//! - entity space, centred on the light cone, where the eye looks along -Y
//!   and the cone axis is the Y axis through the origin.
//!
//! [`OrientedFrame`] converts between the two with a translation and a
//! rotation (no scaling). [`ConeLightModel`] evaluates the cone in entity
//! space and reports its world-space bounds.

mod bounds;
mod cone;
mod frame;

pub use bounds::LightBox;
pub use cone::{
    smoothstep, ConeLightModel, DEPTH, DISTANCE_DELTA, MAX_LIGHT_LEVEL, MIN_FALLOFF_DISTANCE,
    RADIUS, REFRESH_THRESHOLD,
};
pub use frame::OrientedFrame;
