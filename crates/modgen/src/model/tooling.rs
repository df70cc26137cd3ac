use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolType {
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
}

impl ToolType {
    pub const ALL: [ToolType; 5] = [
        Self::Pickaxe,
        Self::Axe,
        Self::Shovel,
        Self::Hoe,
        Self::Sword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pickaxe => "pickaxe",
            Self::Axe => "axe",
            Self::Shovel => "shovel",
            Self::Hoe => "hoe",
            Self::Sword => "sword",
        }
    }

    /// `ItemTags` constant matching held tools of this kind.
    pub fn item_tag_constant(self) -> &'static str {
        match self {
            Self::Pickaxe => "PICKAXES",
            Self::Axe => "AXES",
            Self::Shovel => "SHOVELS",
            Self::Hoe => "HOES",
            Self::Sword => "SWORDS",
        }
    }

    /// Path of the vanilla block tag that marks blocks as mineable with this tool.
    pub fn mineable_tag_path(self) -> String {
        format!("tags/block/mineable/{}.json", self.as_str())
    }
}

impl FromStr for ToolType {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == raw)
            .ok_or_else(|| ValidationError::invalid_enum("tool type", raw, &Self::ALL.map(Self::as_str)))
    }
}

/// Minimum tool tier a block demands for drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MiningLevel {
    Stone,
    Iron,
    Diamond,
}

impl MiningLevel {
    pub const ALL: [MiningLevel; 3] = [Self::Stone, Self::Iron, Self::Diamond];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Iron => "iron",
            Self::Diamond => "diamond",
        }
    }

    pub fn needs_tag_path(self) -> String {
        format!("tags/block/needs_{}_tool.json", self.as_str())
    }
}

impl FromStr for MiningLevel {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == raw)
            .ok_or_else(|| {
                ValidationError::invalid_enum("mining level", raw, &Self::ALL.map(Self::as_str))
            })
    }
}

/// `BlockTags` constant listing blocks a tool of the given tier cannot harvest.
pub(crate) fn incorrect_for_tier_constant(tier: u32) -> &'static str {
    match tier {
        0 => "INCORRECT_FOR_WOODEN_TOOL",
        1 => "INCORRECT_FOR_STONE_TOOL",
        2 => "INCORRECT_FOR_IRON_TOOL",
        3 => "INCORRECT_FOR_DIAMOND_TOOL",
        _ => "INCORRECT_FOR_NETHERITE_TOOL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    #[test]
    fn parses_known_values() {
        for tool in ToolType::ALL {
            assert_eq!(tool.as_str().parse::<ToolType>(), Ok(tool));
        }
        assert_eq!("diamond".parse::<MiningLevel>(), Ok(MiningLevel::Diamond));
    }

    #[test]
    fn rejects_values_outside_the_enumeration() {
        for raw in ["Pickaxe", "shears", ""] {
            let error = raw.parse::<ToolType>().expect_err("invalid tool");
            assert_eq!(error.kind(), ValidationErrorKind::InvalidEnumValue);
        }
        let error = "netherite".parse::<MiningLevel>().expect_err("invalid level");
        assert!(error.to_string().contains("stone, iron, diamond"));
    }

    #[test]
    fn tiers_map_to_incorrect_for_tags() {
        assert_eq!(incorrect_for_tier_constant(0), "INCORRECT_FOR_WOODEN_TOOL");
        assert_eq!(incorrect_for_tier_constant(2), "INCORRECT_FOR_IRON_TOOL");
        assert_eq!(incorrect_for_tier_constant(9), "INCORRECT_FOR_NETHERITE_TOOL");
    }
}
