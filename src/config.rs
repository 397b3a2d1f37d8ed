//! Scene configuration for the headless probe, loaded from TOML.

use anyhow::{Context, Result};
use glam::DVec3;
use illuminated_client::{EntityId, EntitySnapshot};
use illuminated_core::{Hands, ItemStack, Pose, PoseError, PLAYER_EYE_HEIGHT};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SCENE_PATH: &str = "config/scene.toml";

/// Scene validation failures.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity {id}: {source}")]
    InvalidPose {
        id: u64,
        #[source]
        source: PoseError,
    },
    #[error("entity id {0} is used more than once")]
    DuplicateEntity(u64),
    #[error("entity {id}: step component is not finite")]
    InvalidStep { id: u64 },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of client ticks to simulate.
    pub ticks: u32,
    /// Half-width, in blocks, of the printed light slice.
    pub slice_radius: i32,
    pub entities: Vec<SceneEntity>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneEntity {
    pub id: u64,
    pub pose: Pose,
    /// Pose change applied after every tick.
    #[serde(default)]
    pub step: PoseStep,
    /// Hand slots; leave out for non-living entities.
    #[serde(default)]
    pub hands: Option<Hands>,
    /// Tick at which the entity uses its flashlight (toggling it).
    #[serde(default)]
    pub toggle_at_tick: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PoseStep {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub dyaw: f64,
    pub dpitch: f64,
}

impl PoseStep {
    fn is_finite(&self) -> bool {
        [self.dx, self.dy, self.dz, self.dyaw, self.dpitch]
            .iter()
            .all(|value| value.is_finite())
    }

    pub fn apply(&self, pose: &Pose) -> Pose {
        pose.moved(DVec3::new(self.dx, self.dy, self.dz), self.dyaw, self.dpitch)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut flashlight = ItemStack::flashlight();
        flashlight.on = Some(true);
        Self {
            ticks: 4,
            slice_radius: 12,
            entities: vec![SceneEntity {
                id: 1,
                pose: Pose::new(DVec3::new(0.0, 64.0, 0.0), 0.0, 0.0, PLAYER_EYE_HEIGHT),
                step: PoseStep {
                    dyaw: 15.0,
                    ..PoseStep::default()
                },
                hands: Some(Hands::new(Some(flashlight), None)),
                toggle_at_tick: None,
            }],
        }
    }
}

impl SceneConfig {
    /// Load a scene from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load_from_path_strict(path) {
            Ok(scene) => scene,
            Err(err) => {
                if path != Path::new(DEFAULT_SCENE_PATH) {
                    warn!("Failed to load {}: {err:#}. Using defaults", path.display());
                } else {
                    warn!(
                        "Scene not loaded from {}: {err:#}. Using defaults",
                        path.display()
                    );
                }
                SceneConfig::default()
            }
        }
    }

    /// Load and validate a scene, returning errors to the caller.
    pub fn load_from_path_strict(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("invalid scene {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let scene: SceneConfig = toml::from_str(contents)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let mut ids = BTreeSet::new();
        for entity in &self.entities {
            if !ids.insert(entity.id) {
                return Err(SceneError::DuplicateEntity(entity.id));
            }
            entity
                .pose
                .validate()
                .map_err(|source| SceneError::InvalidPose {
                    id: entity.id,
                    source,
                })?;
            if !entity.step.is_finite() {
                return Err(SceneError::InvalidStep { id: entity.id });
            }
        }
        Ok(())
    }

    /// Save the scene as pretty TOML.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

impl SceneEntity {
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId(self.id),
            pose: self.pose,
            hands: self.hands.clone(),
        }
    }
}
