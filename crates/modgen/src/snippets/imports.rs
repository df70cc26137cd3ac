use std::collections::BTreeSet;

pub(crate) const BLOCK: &str = "net.minecraft.world.level.block.Block";
pub(crate) const BLOCKS: &str = "net.minecraft.world.level.block.Blocks";
pub(crate) const BLOCK_POS: &str = "net.minecraft.core.BlockPos";
pub(crate) const BUILT_IN_REGISTRIES: &str = "net.minecraft.core.registries.BuiltInRegistries";
pub(crate) const COMPONENT: &str = "net.minecraft.network.chat.Component";
pub(crate) const AABB: &str = "net.minecraft.world.phys.AABB";
pub(crate) const ENTITY_TYPE: &str = "net.minecraft.world.entity.EntityType";
pub(crate) const GAME_EVENT: &str = "net.minecraft.world.level.gameevent.GameEvent";
pub(crate) const ITEMS: &str = "net.minecraft.world.item.Items";
pub(crate) const ITEM_STACK: &str = "net.minecraft.world.item.ItemStack";
pub(crate) const LIGHTNING_BOLT: &str = "net.minecraft.world.entity.LightningBolt";
pub(crate) const LIVING_ENTITY: &str = "net.minecraft.world.entity.LivingEntity";
pub(crate) const MOB_EFFECT_INSTANCE: &str = "net.minecraft.world.effect.MobEffectInstance";
pub(crate) const MOB_EFFECTS: &str = "net.minecraft.world.effect.MobEffects";
pub(crate) const RESOURCE_LOCATION: &str = "net.minecraft.resources.ResourceLocation";
pub(crate) const SERVER_LEVEL: &str = "net.minecraft.server.level.ServerLevel";
pub(crate) const SERVER_TICK_EVENTS: &str =
    "net.fabricmc.fabric.api.event.lifecycle.v1.ServerTickEvents";
pub(crate) const SOUND_EVENTS: &str = "net.minecraft.sounds.SoundEvents";
pub(crate) const SOUND_SOURCE: &str = "net.minecraft.sounds.SoundSource";

/// Simple names recognised in hand-written fragments.
const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("AABB", AABB),
    ("BlockPos", BLOCK_POS),
    ("Blocks", BLOCKS),
    ("BuiltInRegistries", BUILT_IN_REGISTRIES),
    ("Component", COMPONENT),
    ("EntityType", ENTITY_TYPE),
    ("GameEvent", GAME_EVENT),
    ("ItemStack", ITEM_STACK),
    ("Items", ITEMS),
    ("LightningBolt", LIGHTNING_BOLT),
    ("LivingEntity", LIVING_ENTITY),
    ("MobEffectInstance", MOB_EFFECT_INSTANCE),
    ("MobEffects", MOB_EFFECTS),
    ("ResourceLocation", RESOURCE_LOCATION),
    ("ServerLevel", SERVER_LEVEL),
    ("ServerTickEvents", SERVER_TICK_EVENTS),
    ("SoundEvents", SOUND_EVENTS),
    ("SoundSource", SOUND_SOURCE),
];

pub(crate) fn infer(code: &str) -> BTreeSet<String> {
    KNOWN_SYMBOLS
        .iter()
        .filter(|(symbol, _)| mentions(code, symbol))
        .map(|(_, class)| class.to_string())
        .collect()
}

pub(crate) fn mentions(code: &str, symbol: &str) -> bool {
    code.match_indices(symbol).any(|(start, _)| {
        let before = code[..start].chars().next_back();
        let after = code[start + symbol.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_identifiers_only() {
        assert!(mentions("Blocks.STONE", "Blocks"));
        assert!(!mentions("ModBlocks.RUBY", "Blocks"));
        assert!(!mentions("ItemStacks.copy()", "ItemStack"));
        assert!(mentions("new ItemStack(Items.APPLE)", "ItemStack"));
    }

    #[test]
    fn comment_text_is_treated_like_code() {
        let inferred = infer("// spawns Items\nint x = 1;");
        assert!(inferred.contains(ITEMS));
    }
}
