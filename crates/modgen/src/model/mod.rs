mod block;
mod group;
mod item;
mod loot;
mod recipe;
mod tooling;

pub use block::{Block, BlockHooks, DEFAULT_HARDNESS, DEFAULT_RESISTANCE};
pub use group::{GroupIcon, GroupRef, ItemGroup, VanillaGroup};
pub use item::{FoodProperties, Item, ItemKind, ToolProperties};
pub use loot::{
    explosion_decay, fortune_bonus, inverted, set_fixed_count, set_uniform_count, silk_touch,
    survives_explosion, DropCount, LootEntry, LootKind, LootPool, LootTable, LootTableError, Rolls,
};
pub use recipe::{Recipe, RecipeError};
pub use tooling::{MiningLevel, ToolType};

pub(crate) use item::DEFAULT_STACK_SIZE;
pub(crate) use tooling::incorrect_for_tier_constant;
