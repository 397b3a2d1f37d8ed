#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod item;
pub mod pose;

// Re-export commonly used types
pub use item::{Hands, ItemKind, ItemStack, UseOutcome, FLASHLIGHT_TOGGLE_SOUND};
pub use pose::{Pose, PoseError, PLAYER_EYE_HEIGHT};

/// Namespace for every identifier registered by the flashlight content.
pub const NAMESPACE: &str = "illuminated";

/// Build a namespaced identifier of the form `illuminated:<path>`.
pub fn id(path: &str) -> String {
    format!("{NAMESPACE}:{path}")
}
