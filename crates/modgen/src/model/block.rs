use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::group::GroupRef;
use super::item::DEFAULT_STACK_SIZE;
use super::loot::LootTable;
use super::recipe::Recipe;
use super::tooling::{MiningLevel, ToolType};
use crate::snippets::{Fragment, HookEvent};

pub const DEFAULT_HARDNESS: f32 = 1.5;
pub const DEFAULT_RESISTANCE: f32 = 6.0;

/// Supplies the fragments for each block event. Each method receives the fragments declared
/// on the block and returns the sequence to compile; `None` or an empty sequence means no hook.
pub trait BlockHooks: Send + Sync {
    fn on_left_click(&self, declared: &[Fragment]) -> Option<Vec<Fragment>> {
        declared_or_none(declared)
    }

    fn on_right_click(&self, declared: &[Fragment]) -> Option<Vec<Fragment>> {
        declared_or_none(declared)
    }

    fn on_break(&self, declared: &[Fragment]) -> Option<Vec<Fragment>> {
        declared_or_none(declared)
    }
}

fn declared_or_none(declared: &[Fragment]) -> Option<Vec<Fragment>> {
    (!declared.is_empty()).then(|| declared.to_vec())
}

struct DeclaredOnly;

impl BlockHooks for DeclaredOnly {}

#[derive(Clone)]
pub struct Block {
    id: String,
    name: String,
    max_stack_size: u32,
    block_texture: Option<PathBuf>,
    inventory_texture: Option<PathBuf>,
    group: Option<GroupRef>,
    recipe: Option<Recipe>,
    loot_table: Option<LootTable>,
    hardness: Option<f32>,
    resistance: Option<f32>,
    requires_tool: Option<bool>,
    tool_type: Option<ToolType>,
    mining_level: Option<MiningLevel>,
    mining_speeds: BTreeMap<ToolType, f32>,
    left_click: Vec<Fragment>,
    right_click: Vec<Fragment>,
    on_break: Vec<Fragment>,
    behavior: Arc<dyn BlockHooks>,
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hardness", &self.hardness)
            .field("resistance", &self.resistance)
            .field("tool_type", &self.tool_type)
            .field("mining_level", &self.mining_level)
            .field("mining_speeds", &self.mining_speeds)
            .field("left_click", &self.left_click.len())
            .field("right_click", &self.right_click.len())
            .field("on_break", &self.on_break.len())
            .finish_non_exhaustive()
    }
}

impl Block {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_stack_size: DEFAULT_STACK_SIZE,
            block_texture: None,
            inventory_texture: None,
            group: None,
            recipe: None,
            loot_table: None,
            hardness: None,
            resistance: None,
            requires_tool: None,
            tool_type: None,
            mining_level: None,
            mining_speeds: BTreeMap::new(),
            left_click: Vec::new(),
            right_click: Vec::new(),
            on_break: Vec::new(),
            behavior: Arc::new(DeclaredOnly),
        }
    }

    pub fn max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    pub fn block_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.block_texture = Some(path.into());
        self
    }

    pub fn inventory_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.inventory_texture = Some(path.into());
        self
    }

    pub fn group(mut self, group: impl Into<GroupRef>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn loot_table(mut self, table: LootTable) -> Self {
        self.loot_table = Some(table);
        self
    }

    pub fn hardness(mut self, hardness: f32) -> Self {
        self.hardness = Some(hardness);
        self
    }

    pub fn resistance(mut self, resistance: f32) -> Self {
        self.resistance = Some(resistance);
        self
    }

    pub fn requires_tool(mut self, requires_tool: bool) -> Self {
        self.requires_tool = Some(requires_tool);
        self
    }

    pub fn tool_type(mut self, tool_type: ToolType) -> Self {
        self.tool_type = Some(tool_type);
        self
    }

    pub fn mining_level(mut self, level: MiningLevel) -> Self {
        self.mining_level = Some(level);
        self
    }

    pub fn mining_speed(mut self, tool: ToolType, speed: f32) -> Self {
        self.mining_speeds.insert(tool, speed);
        self
    }

    pub fn on_left_click(mut self, fragment: impl Into<Fragment>) -> Self {
        self.left_click.push(fragment.into());
        self
    }

    pub fn on_right_click(mut self, fragment: impl Into<Fragment>) -> Self {
        self.right_click.push(fragment.into());
        self
    }

    pub fn on_break(mut self, fragment: impl Into<Fragment>) -> Self {
        self.on_break.push(fragment.into());
        self
    }

    pub fn on_event(mut self, event: HookEvent, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let target = match event {
            HookEvent::LeftClick => &mut self.left_click,
            HookEvent::RightClick => &mut self.right_click,
            HookEvent::Break => &mut self.on_break,
        };
        target.extend(fragments);
        self
    }

    /// Replaces how hook fragments are produced. Declared fragments are still offered to it.
    pub fn behavior(mut self, behavior: impl BlockHooks + 'static) -> Self {
        self.behavior = Arc::new(behavior);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack_size(&self) -> u32 {
        self.max_stack_size
    }

    pub fn block_texture_path(&self) -> Option<&Path> {
        self.block_texture.as_deref()
    }

    /// Falls back to the block texture.
    pub fn inventory_texture_path(&self) -> Option<&Path> {
        self.inventory_texture
            .as_deref()
            .or(self.block_texture.as_deref())
    }

    pub fn group_ref(&self) -> Option<&GroupRef> {
        self.group.as_ref()
    }

    pub fn recipe_ref(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn loot_table_ref(&self) -> Option<&LootTable> {
        self.loot_table.as_ref()
    }

    pub fn effective_hardness(&self) -> f32 {
        self.hardness.unwrap_or(DEFAULT_HARDNESS)
    }

    pub fn effective_resistance(&self) -> f32 {
        self.resistance.unwrap_or(DEFAULT_RESISTANCE)
    }

    /// An explicit setting wins; otherwise naming a tool type implies the requirement.
    pub fn effective_requires_tool(&self) -> bool {
        self.requires_tool.unwrap_or(self.tool_type.is_some())
    }

    pub fn tool(&self) -> Option<ToolType> {
        self.tool_type
    }

    pub fn level(&self) -> Option<MiningLevel> {
        self.mining_level
    }

    pub fn speed_overrides(&self) -> &BTreeMap<ToolType, f32> {
        &self.mining_speeds
    }

    pub fn hook_fragments(&self, event: HookEvent) -> Option<Vec<Fragment>> {
        let hooks = match event {
            HookEvent::LeftClick => self.behavior.on_left_click(&self.left_click),
            HookEvent::RightClick => self.behavior.on_right_click(&self.right_click),
            HookEvent::Break => self.behavior.on_break(&self.on_break),
        };
        hooks.filter(|fragments| !fragments.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thunder;

    impl BlockHooks for Thunder {
        fn on_break(&self, _declared: &[Fragment]) -> Option<Vec<Fragment>> {
            Some(vec![Fragment::new("world.explode();")])
        }
    }

    #[test]
    fn property_defaults() {
        let block = Block::new("m:plain", "Plain");
        assert_eq!(block.effective_hardness(), 1.5);
        assert_eq!(block.effective_resistance(), 6.0);
        assert!(!block.effective_requires_tool());
        assert_eq!(block.stack_size(), 64);

        let ore = Block::new("m:ore", "Ore").tool_type(ToolType::Pickaxe);
        assert!(ore.effective_requires_tool());
        assert!(!ore.clone().requires_tool(false).effective_requires_tool());
    }

    #[test]
    fn inventory_texture_falls_back_to_block_texture() {
        let block = Block::new("m:ore", "Ore").block_texture("tex/ore.png");
        assert_eq!(block.inventory_texture_path(), Some(Path::new("tex/ore.png")));
        let block = block.inventory_texture("tex/ore_item.png");
        assert_eq!(block.inventory_texture_path(), Some(Path::new("tex/ore_item.png")));
    }

    #[test]
    fn custom_behavior_keeps_declared_fragments_it_does_not_override() {
        let block = Block::new("m:storm", "Storm")
            .on_right_click("player.push(0.0, 1.0, 0.0);")
            .behavior(Thunder);
        assert_eq!(block.hook_fragments(HookEvent::LeftClick), None);
        assert_eq!(
            block.hook_fragments(HookEvent::RightClick),
            Some(vec![Fragment::raw("player.push(0.0, 1.0, 0.0);")])
        );
        assert_eq!(
            block.hook_fragments(HookEvent::Break),
            Some(vec![Fragment::new("world.explode();")])
        );
    }
}
