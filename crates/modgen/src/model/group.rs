use std::str::FromStr;

use crate::error::ValidationError;

/// The nine built-in creative tabs a registration may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VanillaGroup {
    BuildingBlocks,
    Natural,
    Functional,
    Redstone,
    Tools,
    Combat,
    FoodAndDrink,
    Ingredients,
    SpawnEggs,
}

impl VanillaGroup {
    pub const ALL: [VanillaGroup; 9] = [
        Self::BuildingBlocks,
        Self::Natural,
        Self::Functional,
        Self::Redstone,
        Self::Tools,
        Self::Combat,
        Self::FoodAndDrink,
        Self::Ingredients,
        Self::SpawnEggs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuildingBlocks => "building_blocks",
            Self::Natural => "natural",
            Self::Functional => "functional",
            Self::Redstone => "redstone",
            Self::Tools => "tools",
            Self::Combat => "combat",
            Self::FoodAndDrink => "food_and_drink",
            Self::Ingredients => "ingredients",
            Self::SpawnEggs => "spawn_eggs",
        }
    }

    /// Registry id of the vanilla tab.
    pub fn registry_id(self) -> &'static str {
        match self {
            Self::BuildingBlocks => "minecraft:building_blocks",
            Self::Natural => "minecraft:natural_blocks",
            Self::Functional => "minecraft:functional_blocks",
            Self::Redstone => "minecraft:redstone_blocks",
            Self::Tools => "minecraft:tools_and_utilities",
            Self::Combat => "minecraft:combat",
            Self::FoodAndDrink => "minecraft:food_and_drinks",
            Self::Ingredients => "minecraft:ingredients",
            Self::SpawnEggs => "minecraft:spawn_eggs",
        }
    }

    /// `CreativeModeTabs` constant holding the tab key.
    pub fn java_constant(self) -> &'static str {
        match self {
            Self::BuildingBlocks => "BUILDING_BLOCKS",
            Self::Natural => "NATURAL_BLOCKS",
            Self::Functional => "FUNCTIONAL_BLOCKS",
            Self::Redstone => "REDSTONE_BLOCKS",
            Self::Tools => "TOOLS_AND_UTILITIES",
            Self::Combat => "COMBAT",
            Self::FoodAndDrink => "FOOD_AND_DRINKS",
            Self::Ingredients => "INGREDIENTS",
            Self::SpawnEggs => "SPAWN_EGGS",
        }
    }

    pub(crate) fn from_registry_id(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.registry_id() == raw)
    }
}

impl FromStr for VanillaGroup {
    type Err = ValidationError;

    /// Accepts the short name (`natural`), the constant spelling (`NATURAL`), or the registry id.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == lowered || group.registry_id() == lowered)
            .ok_or_else(|| {
                let allowed = Self::ALL.map(Self::as_str);
                ValidationError::invalid_enum("vanilla item group", raw, &allowed)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupIcon {
    /// Registry id of an item or block declared in the same mod; falls back to a literal lookup.
    Entity(String),
    /// Any registry id, resolved at runtime.
    Literal(String),
}

/// A custom creative tab. The id may be bare (`new_foods`), in which case the mod id is its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    id: String,
    name: String,
    icon: Option<GroupIcon>,
}

impl ItemGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: GroupIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn set_icon(&mut self, icon: GroupIcon) {
        self.icon = Some(icon);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon_ref(&self) -> Option<&GroupIcon> {
        self.icon.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    Vanilla(VanillaGroup),
    Custom(ItemGroup),
}

impl From<VanillaGroup> for GroupRef {
    fn from(group: VanillaGroup) -> Self {
        Self::Vanilla(group)
    }
}

impl From<ItemGroup> for GroupRef {
    fn from(group: ItemGroup) -> Self {
        Self::Custom(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    #[test]
    fn vanilla_group_accepts_all_spellings() {
        assert_eq!("natural".parse::<VanillaGroup>(), Ok(VanillaGroup::Natural));
        assert_eq!("NATURAL".parse::<VanillaGroup>(), Ok(VanillaGroup::Natural));
        assert_eq!(
            "minecraft:food_and_drinks".parse::<VanillaGroup>(),
            Ok(VanillaGroup::FoodAndDrink)
        );
    }

    #[test]
    fn unknown_vanilla_group_is_enum_error() {
        let error = "decorations".parse::<VanillaGroup>().expect_err("unknown group");
        assert_eq!(error.kind(), ValidationErrorKind::InvalidEnumValue);
        assert!(error.to_string().contains("spawn_eggs"));
    }
}
