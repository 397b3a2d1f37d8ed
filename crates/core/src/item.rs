//! Flashlight item stacks and the hands that hold them.

use serde::{Deserialize, Serialize};

/// Sound event played when a flashlight is switched on or off.
pub const FLASHLIGHT_TOGGLE_SOUND: &str = "illuminated:item.flashlight.toggle";

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Hand-held flashlight
    Flashlight,
    /// Any other item, by host item id
    Other(u16),
}

/// An item stack in a hand or inventory slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub kind: ItemKind,
    /// Quantity in stack
    pub count: u32,
    /// Flashlight "on" component (None when the stack does not carry it)
    #[serde(default)]
    pub on: Option<bool>,
}

/// Result of using a flashlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UseOutcome {
    /// Whether the flashlight is lit after the toggle.
    pub now_on: bool,
    /// Sound event id to play at the user.
    pub sound: &'static str,
    /// Playback volume.
    pub volume: f32,
    /// Playback pitch.
    pub pitch: f32,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(kind: ItemKind, count: u32) -> Self {
        let on = match kind {
            ItemKind::Flashlight => Some(false),
            ItemKind::Other(_) => None,
        };
        Self { kind, count, on }
    }

    /// A single unlit flashlight.
    pub fn flashlight() -> Self {
        Self::new(ItemKind::Flashlight, 1)
    }

    /// Check whether this stack is a flashlight
    pub fn is_flashlight(&self) -> bool {
        self.kind == ItemKind::Flashlight
    }

    /// Model property: true when this is a lit flashlight.
    pub fn flashlight_on(&self) -> bool {
        self.is_flashlight() && self.on.unwrap_or(false)
    }

    /// Use the item in hand. Flashlights flip their "on" component.
    ///
    /// Returns `None` for anything that is not a flashlight.
    pub fn use_flashlight(&mut self) -> Option<UseOutcome> {
        if !self.is_flashlight() {
            return None;
        }
        let now_on = !self.on.unwrap_or(false);
        self.on = Some(now_on);
        Some(UseOutcome {
            now_on,
            sound: FLASHLIGHT_TOGGLE_SOUND,
            volume: 1.0,
            pitch: 1.0,
        })
    }

    /// Called when the stack becomes a dropped item entity.
    ///
    /// Dropped flashlights never stay lit.
    pub fn on_dropped(&mut self) {
        if self.is_flashlight() && self.on == Some(true) {
            self.on = Some(false);
        }
    }
}

/// The two hand slots of a living entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hands {
    /// Main hand stack
    #[serde(default)]
    pub main: Option<ItemStack>,
    /// Off hand stack
    #[serde(default)]
    pub offhand: Option<ItemStack>,
}

impl Hands {
    /// Hands holding the given stacks.
    pub fn new(main: Option<ItemStack>, offhand: Option<ItemStack>) -> Self {
        Self { main, offhand }
    }

    /// Whether the entity holds a lit flashlight.
    ///
    /// A flashlight in the main hand decides alone, even when unlit; the off
    /// hand only counts when the main hand holds something else.
    pub fn is_holding_powered_flashlight(&self) -> bool {
        let flashlight = match &self.main {
            Some(stack) if stack.is_flashlight() => Some(stack),
            _ => self.offhand.as_ref().filter(|stack| stack.is_flashlight()),
        };
        flashlight.is_some_and(ItemStack::flashlight_on)
    }
}
