//! Per-tick lifecycle of flashlight lights.
//!
//! Every client tick the host hands over a snapshot of the entities it is
//! rendering. Living entities holding a lit flashlight get a
//! [`ConeLightModel`]; the light is dropped as soon as the entity stops
//! qualifying or disappears from the snapshot.

use std::collections::{BTreeMap, BTreeSet};

use illuminated_core::{Hands, Pose};
use illuminated_light::{ConeLightModel, LightBox};
use tracing::{debug, trace};

/// Host entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// What the tracker needs to know about one rendered entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    /// Entity identifier.
    pub id: EntityId,
    /// Current pose.
    pub pose: Pose,
    /// Hand slots; `None` for entities that are not living.
    pub hands: Option<Hands>,
}

impl EntitySnapshot {
    fn carries_light(&self) -> bool {
        self.hands
            .as_ref()
            .is_some_and(Hands::is_holding_powered_flashlight)
    }
}

/// Host-side dynamic light registry.
pub trait DynamicLightManager {
    /// A new light starts shining.
    fn add_light(&mut self, id: EntityId, light: &ConeLightModel);
    /// A light is gone; `last_bounds` needs relighting.
    fn remove_light(&mut self, id: EntityId, last_bounds: LightBox);
    /// A light moved; both regions need relighting.
    fn relight(&mut self, id: EntityId, previous: LightBox, current: LightBox);
}

/// Recorded manager call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightEvent {
    /// See [`DynamicLightManager::add_light`].
    Added {
        /// Entity carrying the light.
        id: EntityId,
        /// Bounds at creation.
        bounds: LightBox,
    },
    /// See [`DynamicLightManager::remove_light`].
    Removed {
        /// Entity that carried the light.
        id: EntityId,
        /// Bounds before removal.
        bounds: LightBox,
    },
    /// See [`DynamicLightManager::relight`].
    Relit {
        /// Entity carrying the light.
        id: EntityId,
        /// Bounds before the move.
        previous: LightBox,
        /// Bounds after the move.
        current: LightBox,
    },
}

impl DynamicLightManager for Vec<LightEvent> {
    fn add_light(&mut self, id: EntityId, light: &ConeLightModel) {
        self.push(LightEvent::Added {
            id,
            bounds: light.bounding_box(),
        });
    }

    fn remove_light(&mut self, id: EntityId, last_bounds: LightBox) {
        self.push(LightEvent::Removed {
            id,
            bounds: last_bounds,
        });
    }

    fn relight(&mut self, id: EntityId, previous: LightBox, current: LightBox) {
        self.push(LightEvent::Relit {
            id,
            previous,
            current,
        });
    }
}

/// Counts from one [`FlashlightTracker::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Lights created this tick.
    pub added: usize,
    /// Lights dropped this tick.
    pub removed: usize,
    /// Lights whose frame was rebuilt.
    pub refreshed: usize,
    /// Lights alive after the tick.
    pub active: usize,
}

/// Owns one cone light per entity holding a lit flashlight.
#[derive(Debug, Default)]
pub struct FlashlightTracker {
    lights: BTreeMap<EntityId, ConeLightModel>,
    ticks: u64,
}

impl FlashlightTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile lights with the entities rendered this tick.
    pub fn tick(
        &mut self,
        entities: &[EntitySnapshot],
        manager: &mut dyn DynamicLightManager,
    ) -> TickSummary {
        self.ticks += 1;
        let mut summary = TickSummary::default();
        let mut seen = BTreeSet::new();

        for entity in entities {
            seen.insert(entity.id);

            if !entity.carries_light() {
                if let Some(light) = self.lights.remove(&entity.id) {
                    debug!(entity = entity.id.0, "flashlight switched off");
                    manager.remove_light(entity.id, light.bounding_box());
                    summary.removed += 1;
                }
                continue;
            }

            match self.lights.get_mut(&entity.id) {
                Some(light) => {
                    let previous = light.bounding_box();
                    if light.refresh_if_changed(&entity.pose) {
                        manager.relight(entity.id, previous, light.bounding_box());
                        summary.refreshed += 1;
                    }
                }
                None => {
                    let light = ConeLightModel::new(entity.pose);
                    debug!(entity = entity.id.0, "flashlight switched on");
                    manager.add_light(entity.id, &light);
                    self.lights.insert(entity.id, light);
                    summary.added += 1;
                }
            }
        }

        let vanished: Vec<EntityId> = self
            .lights
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        for id in vanished {
            if let Some(light) = self.lights.remove(&id) {
                debug!(entity = id.0, "flashlight holder left the world");
                manager.remove_light(id, light.bounding_box());
                summary.removed += 1;
            }
        }

        summary.active = self.lights.len();
        trace!(tick = self.ticks, ?summary, "flashlight tick");
        summary
    }

    /// Light carried by an entity, if any.
    pub fn get(&self, id: EntityId) -> Option<&ConeLightModel> {
        self.lights.get(&id)
    }

    /// Number of active lights.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether no light is active.
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Active lights in entity id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &ConeLightModel)> {
        self.lights.iter().map(|(id, light)| (*id, light))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use illuminated_core::{ItemKind, ItemStack};

    fn lit_flashlight() -> ItemStack {
        let mut stack = ItemStack::flashlight();
        stack.use_flashlight();
        stack
    }

    fn holder(id: u64, pose: Pose) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId(id),
            pose,
            hands: Some(Hands::new(Some(lit_flashlight()), None)),
        }
    }

    #[test]
    fn lit_flashlight_adds_light_once() {
        let mut tracker = FlashlightTracker::new();
        let mut events: Vec<LightEvent> = Vec::new();
        let entities = [holder(1, Pose::default())];

        let summary = tracker.tick(&entities, &mut events);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.active, 1);
        assert!(matches!(events[0], LightEvent::Added { id: EntityId(1), .. }));

        let summary = tracker.tick(&entities, &mut events);
        assert_eq!(summary, TickSummary { active: 1, ..Default::default() });
        assert_eq!(events.len(), 1);
        assert_eq!(tracker.ticks(), 2);
    }

    #[test]
    fn non_living_and_unlit_entities_get_no_light() {
        let mut tracker = FlashlightTracker::new();
        let mut events: Vec<LightEvent> = Vec::new();
        let entities = [
            EntitySnapshot {
                id: EntityId(1),
                pose: Pose::default(),
                hands: None,
            },
            EntitySnapshot {
                id: EntityId(2),
                pose: Pose::default(),
                hands: Some(Hands::new(Some(ItemStack::flashlight()), None)),
            },
            EntitySnapshot {
                id: EntityId(3),
                pose: Pose::default(),
                hands: Some(Hands::new(Some(ItemStack::new(ItemKind::Other(4), 1)), None)),
            },
        ];
        tracker.tick(&entities, &mut events);
        assert!(tracker.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn switching_off_removes_light() {
        let mut tracker = FlashlightTracker::new();
        let mut events: Vec<LightEvent> = Vec::new();
        let mut entity = holder(7, Pose::default());
        tracker.tick(std::slice::from_ref(&entity), &mut events);
        let bounds = tracker.get(EntityId(7)).expect("light").bounding_box();

        if let Some(hands) = entity.hands.as_mut() {
            if let Some(stack) = hands.main.as_mut() {
                stack.use_flashlight();
            }
        }
        let summary = tracker.tick(std::slice::from_ref(&entity), &mut events);
        assert_eq!(summary.removed, 1);
        assert!(tracker.get(EntityId(7)).is_none());
        assert_eq!(
            events.last(),
            Some(&LightEvent::Removed {
                id: EntityId(7),
                bounds
            })
        );
    }

    #[test]
    fn vanished_entity_drops_light() {
        let mut tracker = FlashlightTracker::new();
        let mut events: Vec<LightEvent> = Vec::new();
        tracker.tick(&[holder(1, Pose::default()), holder(2, Pose::default())], &mut events);
        assert_eq!(tracker.len(), 2);

        let summary = tracker.tick(&[holder(2, Pose::default())], &mut events);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.active, 1);
        assert!(tracker.get(EntityId(1)).is_none());
        assert_eq!(tracker.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![EntityId(2)]);
    }

    #[test]
    fn moving_holder_relights_old_and_new_region() {
        let mut tracker = FlashlightTracker::new();
        let mut events: Vec<LightEvent> = Vec::new();
        let start = Pose::default();
        tracker.tick(&[holder(1, start)], &mut events);
        let before = tracker.get(EntityId(1)).expect("light").bounding_box();

        // Jitter below the threshold does not relight.
        let jitter = start.moved(DVec3::new(0.05, 0.0, 0.0), 0.0, 0.0);
        let summary = tracker.tick(&[holder(1, jitter)], &mut events);
        assert_eq!(summary.refreshed, 0);

        let walked = start.moved(DVec3::new(4.0, 0.0, 0.0), 0.0, 0.0);
        let summary = tracker.tick(&[holder(1, walked)], &mut events);
        assert_eq!(summary.refreshed, 1);
        let after = tracker.get(EntityId(1)).expect("light").bounding_box();
        assert_eq!(
            events.last(),
            Some(&LightEvent::Relit {
                id: EntityId(1),
                previous: before,
                current: after
            })
        );
        assert_ne!(before, after);
    }
}
