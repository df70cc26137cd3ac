pub(crate) use crate::snippets::imports::{
    BLOCK, BLOCK_POS, BUILT_IN_REGISTRIES, COMPONENT, ITEM_STACK, RESOURCE_LOCATION, SERVER_TICK_EVENTS,
};

pub(crate) const ARRAY_LIST: &str = "java.util.ArrayList";
pub(crate) const AXE_ITEM: &str = "net.minecraft.world.item.AxeItem";
pub(crate) const ATTACK_BLOCK_CALLBACK: &str = "net.fabricmc.fabric.api.event.player.AttackBlockCallback";
pub(crate) const BLOCK_BEHAVIOUR: &str = "net.minecraft.world.level.block.state.BlockBehaviour";
pub(crate) const BLOCK_GETTER: &str = "net.minecraft.world.level.BlockGetter";
pub(crate) const BLOCK_ITEM: &str = "net.minecraft.world.item.BlockItem";
pub(crate) const BLOCK_STATE: &str = "net.minecraft.world.level.block.state.BlockState";
pub(crate) const BLOCK_TAGS: &str = "net.minecraft.tags.BlockTags";
pub(crate) const CREATIVE_MODE_TAB: &str = "net.minecraft.world.item.CreativeModeTab";
pub(crate) const CREATIVE_MODE_TABS: &str = "net.minecraft.world.item.CreativeModeTabs";
pub(crate) const FABRIC_ITEM_GROUP: &str = "net.fabricmc.fabric.api.itemgroup.v1.FabricItemGroup";
pub(crate) const FOOD_PROPERTIES: &str = "net.minecraft.world.food.FoodProperties";
pub(crate) const FUNCTION: &str = "java.util.function.Function";
pub(crate) const HOE_ITEM: &str = "net.minecraft.world.item.HoeItem";
pub(crate) const INTERACTION_RESULT: &str = crate::snippets::INTERACTION_RESULT;
pub(crate) const ITEM: &str = "net.minecraft.world.item.Item";
pub(crate) const ITEM_GROUP_EVENTS: &str = "net.fabricmc.fabric.api.itemgroup.v1.ItemGroupEvents";
pub(crate) const ITEM_TAGS: &str = "net.minecraft.tags.ItemTags";
pub(crate) const LIST: &str = "java.util.List";
pub(crate) const MINECRAFT_SERVER: &str = "net.minecraft.server.MinecraftServer";
pub(crate) const MOD_INITIALIZER: &str = "net.fabricmc.api.ModInitializer";
pub(crate) const PLAYER: &str = "net.minecraft.world.entity.player.Player";
pub(crate) const PLAYER_BLOCK_BREAK_EVENTS: &str =
    "net.fabricmc.fabric.api.event.player.PlayerBlockBreakEvents";
pub(crate) const REGISTRIES: &str = "net.minecraft.core.registries.Registries";
pub(crate) const REGISTRY: &str = "net.minecraft.core.Registry";
pub(crate) const RESOURCE_KEY: &str = "net.minecraft.resources.ResourceKey";
pub(crate) const SERVER_LIFECYCLE_EVENTS: &str =
    "net.fabricmc.fabric.api.event.lifecycle.v1.ServerLifecycleEvents";
pub(crate) const SHOVEL_ITEM: &str = "net.minecraft.world.item.ShovelItem";
pub(crate) const TAG_KEY: &str = "net.minecraft.tags.TagKey";
pub(crate) const TOOL_MATERIAL: &str = "net.minecraft.world.item.ToolMaterial";
pub(crate) const USE_BLOCK_CALLBACK: &str = "net.fabricmc.fabric.api.event.player.UseBlockCallback";
