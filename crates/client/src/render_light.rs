//! Entity render light override.

use illuminated_core::Hands;

/// Block light used for an entity holding a lit flashlight.
pub const FULL_BRIGHT: u8 = 15;

/// Block light the renderer should use for an entity.
///
/// An entity holding a lit flashlight is always drawn fully lit; everything
/// else keeps the light sampled from the world.
pub fn entity_block_light(hands: Option<&Hands>, original: u8) -> u8 {
    match hands {
        Some(hands) if hands.is_holding_powered_flashlight() => FULL_BRIGHT,
        _ => original,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use illuminated_core::ItemStack;

    #[test]
    fn lit_flashlight_forces_full_bright() {
        let mut flashlight = ItemStack::flashlight();
        flashlight.use_flashlight();
        let hands = Hands::new(None, Some(flashlight));
        assert_eq!(entity_block_light(Some(&hands), 3), FULL_BRIGHT);
    }

    #[test]
    fn other_entities_keep_world_light() {
        let hands = Hands::new(Some(ItemStack::flashlight()), None);
        assert_eq!(entity_block_light(Some(&hands), 4), 4);
        assert_eq!(entity_block_light(None, 9), 9);
    }
}
