#![warn(missing_docs)]
//! Client-side glue: which entities carry a flashlight light, and how the
//! host is told about it.

pub mod render_light;
pub mod tracker;

pub use render_light::{entity_block_light, FULL_BRIGHT};
pub use tracker::{
    DynamicLightManager, EntityId, EntitySnapshot, FlashlightTracker, LightEvent, TickSummary,
};
