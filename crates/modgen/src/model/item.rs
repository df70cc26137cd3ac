use std::path::{Path, PathBuf};

use super::group::GroupRef;
use super::recipe::Recipe;
use super::tooling::ToolType;

pub(crate) const DEFAULT_STACK_SIZE: u32 = 64;
pub(crate) const TOOL_STACK_SIZE: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodProperties {
    pub nutrition: u32,
    pub saturation: f32,
    pub always_edible: bool,
}

impl FoodProperties {
    pub fn new(nutrition: u32, saturation: f32) -> Self {
        Self {
            nutrition,
            saturation,
            always_edible: false,
        }
    }

    pub fn always_edible(mut self) -> Self {
        self.always_edible = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolProperties {
    pub kind: ToolType,
    pub durability: u32,
    pub mining_speed_multiplier: f32,
    pub attack_damage: f32,
    /// 0 wood, 1 stone, 2 iron, 3 diamond, 4 and above netherite.
    pub mining_level: u32,
    pub enchantability: u32,
    pub repair_ingredient: Option<String>,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            kind: ToolType::Pickaxe,
            durability: 0,
            mining_speed_multiplier: 1.0,
            attack_damage: 1.0,
            mining_level: 0,
            enchantability: 0,
            repair_ingredient: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Plain,
    Food(FoodProperties),
    Tool(ToolProperties),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    name: String,
    max_stack_size: u32,
    texture: Option<PathBuf>,
    group: Option<GroupRef>,
    recipe: Option<Recipe>,
    kind: ItemKind,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_stack_size: DEFAULT_STACK_SIZE,
            texture: None,
            group: None,
            recipe: None,
            kind: ItemKind::Plain,
        }
    }

    pub fn food(id: impl Into<String>, name: impl Into<String>, food: FoodProperties) -> Self {
        let mut item = Self::new(id, name);
        item.kind = ItemKind::Food(food);
        item
    }

    /// Tools default to a stack size of one.
    pub fn tool(id: impl Into<String>, name: impl Into<String>, tool: ToolProperties) -> Self {
        let mut item = Self::new(id, name);
        item.max_stack_size = TOOL_STACK_SIZE;
        item.kind = ItemKind::Tool(tool);
        item
    }

    pub fn max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    pub fn texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
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

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack_size(&self) -> u32 {
        self.max_stack_size
    }

    pub fn texture_path(&self) -> Option<&Path> {
        self.texture.as_deref()
    }

    pub fn group_ref(&self) -> Option<&GroupRef> {
        self.group.as_ref()
    }

    pub fn recipe_ref(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub(crate) fn kind_label(&self) -> &'static str {
        match self.kind {
            ItemKind::Plain => "item",
            ItemKind::Food(_) => "food item",
            ItemKind::Tool(_) => "tool item",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_size_defaults_depend_on_kind() {
        assert_eq!(Item::new("m:ruby", "Ruby").stack_size(), 64);
        assert_eq!(
            Item::food("m:apple", "Apple", FoodProperties::new(4, 0.3)).stack_size(),
            64
        );
        let pickaxe = Item::tool("m:ruby_pickaxe", "Ruby Pickaxe", ToolProperties::default());
        assert_eq!(pickaxe.stack_size(), 1);
        assert_eq!(pickaxe.max_stack_size(16).stack_size(), 16);
    }

    #[test]
    fn tool_defaults() {
        let tool = ToolProperties::default();
        assert_eq!(tool.kind, ToolType::Pickaxe);
        assert_eq!(tool.durability, 0);
        assert_eq!(tool.mining_speed_multiplier, 1.0);
        assert_eq!(tool.attack_damage, 1.0);
        assert!(tool.repair_ingredient.is_none());
    }
}
