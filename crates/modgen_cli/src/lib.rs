use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use modgen::{
    actions, message, ActionError, Block, BuildDriver, CompileError, CompileOptions, CompileReport, DriverError,
    DropCount, ExistingDirectory, FileAction, FoodProperties, Fragment, GitTemplate, GradleDriver,
    GroupIcon, GroupRef, HookEvent, Item, ItemGroup, LootTable, MiningLevel, ModConfig,
    ProjectSkeleton, Recipe, ToolProperties, ToolType, ValidationError, VanillaGroup,
    DEFAULT_TEMPLATE_URL,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

pub const PROJECT_DIR_ENV_VAR: &str = "MODGEN_PROJECT_DIR";
pub const DEFAULT_PROJECT_DIR: &str = "generated_mod";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse manifest {path} at {json_path}: {message}")]
    ParseManifest {
        path: PathBuf,
        json_path: String,
        message: String,
    },
    #[error("invalid manifest entry '{id}': {message}")]
    InvalidEntry { id: String, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Declarative description of a whole mod, mirroring the entity model.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModManifest {
    pub mod_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub base_package: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
    #[serde(default)]
    pub loot_tables: Vec<NamedLootTableSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntrySpec {
    Item(ItemSpec),
    Block(BlockSpec),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub max_stack_size: Option<u32>,
    #[serde(default)]
    pub texture: Option<PathBuf>,
    #[serde(default)]
    pub group: Option<GroupSpec>,
    #[serde(default)]
    pub recipe: Option<Value>,
    #[serde(default)]
    pub food: Option<FoodSpec>,
    #[serde(default)]
    pub tool: Option<ToolSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodSpec {
    pub nutrition: u32,
    pub saturation: f32,
    #[serde(default)]
    pub always_edible: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolSpec {
    #[serde(default)]
    pub kind: Option<String>,
    pub durability: u32,
    pub mining_speed_multiplier: f32,
    pub attack_damage: f32,
    pub mining_level: u32,
    pub enchantability: u32,
    #[serde(default)]
    pub repair_ingredient: Option<String>,
}

/// A vanilla tab name, or a custom group declared inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupSpec {
    Vanilla(String),
    Custom {
        id: String,
        name: String,
        #[serde(default)]
        icon: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub max_stack_size: Option<u32>,
    #[serde(default)]
    pub block_texture: Option<PathBuf>,
    #[serde(default)]
    pub inventory_texture: Option<PathBuf>,
    #[serde(default)]
    pub group: Option<GroupSpec>,
    #[serde(default)]
    pub recipe: Option<Value>,
    #[serde(default)]
    pub loot: Option<LootSpec>,
    #[serde(default)]
    pub hardness: Option<f32>,
    #[serde(default)]
    pub resistance: Option<f32>,
    #[serde(default)]
    pub requires_tool: Option<bool>,
    #[serde(default)]
    pub tool_type: Option<String>,
    #[serde(default)]
    pub mining_level: Option<String>,
    #[serde(default)]
    pub mining_speeds: BTreeMap<String, f32>,
    #[serde(default)]
    pub on_left_click: Vec<HookSpec>,
    #[serde(default)]
    pub on_right_click: Vec<HookSpec>,
    #[serde(default)]
    pub on_break: Vec<HookSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum LootSpec {
    DropsSelf,
    DropsNothing,
    DropsItem {
        item: String,
        #[serde(default)]
        count: Option<u32>,
        #[serde(default)]
        min: Option<u32>,
        #[serde(default)]
        max: Option<u32>,
    },
    SilkTouch {
        #[serde(default)]
        silk_touch_item: Option<String>,
        #[serde(default)]
        fallback_item: Option<String>,
        #[serde(default = "one")]
        fallback_count: u32,
    },
    Fortune {
        item: String,
        #[serde(default = "one")]
        min_count: u32,
        #[serde(default = "one")]
        max_count: u32,
        #[serde(default = "yes")]
        silk_touch_drops_self: bool,
    },
    Raw {
        table: Value,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedLootTableSpec {
    pub name: String,
    pub table: Value,
    #[serde(default)]
    pub category: Option<String>,
}

/// Raw Java statements, or one of the built-in actions.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookSpec {
    Code(String),
    Action(ActionSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionSpec {
    ReplaceBlock {
        block: String,
    },
    TeleportPlayer {
        x: f64,
        y: f64,
        z: f64,
    },
    TeleportPlayerRelative {
        dx: f64,
        dy: f64,
        dz: f64,
    },
    LaunchPlayer {
        dx: f64,
        dy: f64,
        dz: f64,
    },
    ApplyEffect {
        effect: String,
        duration_ticks: u32,
        #[serde(default)]
        amplifier: u32,
    },
    PlaySound {
        sound: String,
        #[serde(default = "one_f32")]
        volume: f32,
        #[serde(default = "one_f32")]
        pitch: f32,
    },
    SummonLightning,
    DropItem {
        item: String,
        #[serde(default = "one")]
        count: u32,
    },
    PlaceFire {
        #[serde(default = "yes")]
        above: bool,
    },
    ExtinguishArea {
        radius: u32,
    },
    GiveXp {
        amount: i32,
    },
    RemoveXp {
        amount: i32,
    },
    DamageNearby {
        amount: f32,
        radius: f64,
        #[serde(default = "yes")]
        exclude_player: bool,
    },
    HealNearby {
        amount: f32,
        radius: f64,
    },
    DelayedAction {
        ticks: u32,
        then: Vec<HookSpec>,
    },
    SculkEvent {
        event: String,
    },
    SendMessage {
        message: String,
    },
    SendActionBarMessage {
        message: String,
    },
    ConsolePrint {
        message: String,
    },
}

fn one() -> u32 {
    1
}

fn one_f32() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

pub fn load_manifest(path: &Path) -> Result<ModManifest, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&raw, path)
}

pub fn parse_manifest(raw: &str, path: &Path) -> Result<ModManifest, CliError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, ModManifest>(&mut deserializer).map_err(|error| {
        let json_path = error.path().to_string();
        CliError::ParseManifest {
            path: path.to_path_buf(),
            json_path,
            message: error.into_inner().to_string(),
        }
    })
}

/// Builds the content graph a manifest describes, registering entries in file order.
pub fn build_mod_config(manifest: &ModManifest) -> Result<ModConfig, CliError> {
    let mut config = ModConfig::new(&manifest.mod_id, &manifest.name).authors(manifest.authors.iter().cloned());
    if let Some(description) = &manifest.description {
        config = config.description(description);
    }
    if let Some(version) = &manifest.version {
        config = config.version(version);
    }

    for entry in &manifest.entries {
        match entry {
            EntrySpec::Item(declared) => {
                let is_food = declared.food.is_some();
                let item = build_item(declared)?;
                if is_food {
                    config.register_food_item(item)?;
                } else {
                    config.register_item(item)?;
                }
            }
            EntrySpec::Block(declared) => config.register_block(build_block(declared)?)?,
        }
    }

    for declared in &manifest.loot_tables {
        let mut table = LootTable::from_value(declared.table.clone())
            .map_err(|error| invalid(&declared.name, error))?;
        if let Some(category) = &declared.category {
            table = table.with_category(category);
        }
        config.register_loot_table(&declared.name, table)?;
    }
    Ok(config)
}

fn build_item(declared: &ItemSpec) -> Result<Item, CliError> {
    let mut item = match (&declared.food, &declared.tool) {
        (Some(_), Some(_)) => {
            return Err(invalid(&declared.id, "an item cannot be both food and a tool"));
        }
        (Some(food), None) => {
            let mut properties = FoodProperties::new(food.nutrition, food.saturation);
            if food.always_edible {
                properties = properties.always_edible();
            }
            Item::food(&declared.id, &declared.name, properties)
        }
        (None, Some(tool)) => Item::tool(&declared.id, &declared.name, build_tool(tool)?),
        (None, None) => Item::new(&declared.id, &declared.name),
    };
    if let Some(size) = declared.max_stack_size {
        item = item.max_stack_size(size);
    }
    if let Some(texture) = &declared.texture {
        item = item.texture(texture);
    }
    if let Some(group) = &declared.group {
        item = item.group(build_group(group)?);
    }
    if let Some(recipe) = &declared.recipe {
        item = item.recipe(build_recipe(&declared.id, recipe)?);
    }
    Ok(item)
}

fn build_tool(declared: &ToolSpec) -> Result<ToolProperties, CliError> {
    let kind = match &declared.kind {
        Some(raw) => ToolType::from_str(raw)?,
        None => ToolProperties::default().kind,
    };
    Ok(ToolProperties {
        kind,
        durability: declared.durability,
        mining_speed_multiplier: declared.mining_speed_multiplier,
        attack_damage: declared.attack_damage,
        mining_level: declared.mining_level,
        enchantability: declared.enchantability,
        repair_ingredient: declared.repair_ingredient.clone(),
    })
}

fn build_block(declared: &BlockSpec) -> Result<Block, CliError> {
    let mut block = Block::new(&declared.id, &declared.name);
    if let Some(size) = declared.max_stack_size {
        block = block.max_stack_size(size);
    }
    if let Some(texture) = &declared.block_texture {
        block = block.block_texture(texture);
    }
    if let Some(texture) = &declared.inventory_texture {
        block = block.inventory_texture(texture);
    }
    if let Some(group) = &declared.group {
        block = block.group(build_group(group)?);
    }
    if let Some(recipe) = &declared.recipe {
        block = block.recipe(build_recipe(&declared.id, recipe)?);
    }
    if let Some(loot) = &declared.loot {
        block = block.loot_table(build_block_loot(&declared.id, loot)?);
    }
    if let Some(hardness) = declared.hardness {
        block = block.hardness(hardness);
    }
    if let Some(resistance) = declared.resistance {
        block = block.resistance(resistance);
    }
    if let Some(requires_tool) = declared.requires_tool {
        block = block.requires_tool(requires_tool);
    }
    if let Some(tool) = &declared.tool_type {
        block = block.tool_type(ToolType::from_str(tool)?);
    }
    if let Some(level) = &declared.mining_level {
        block = block.mining_level(MiningLevel::from_str(level)?);
    }
    for (tool, speed) in &declared.mining_speeds {
        block = block.mining_speed(ToolType::from_str(tool)?, *speed);
    }

    let hooks = [
        (HookEvent::LeftClick, &declared.on_left_click),
        (HookEvent::RightClick, &declared.on_right_click),
        (HookEvent::Break, &declared.on_break),
    ];
    for (event, specs) in hooks {
        if !specs.is_empty() {
            let fragments = specs
                .iter()
                .map(hook_fragment)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|error| invalid(&declared.id, error))?;
            block = block.on_event(event, fragments);
        }
    }
    Ok(block)
}

fn build_group(declared: &GroupSpec) -> Result<GroupRef, CliError> {
    match declared {
        GroupSpec::Vanilla(raw) => Ok(GroupRef::from(VanillaGroup::from_str(raw)?)),
        GroupSpec::Custom { id, name, icon } => {
            let mut group = ItemGroup::new(id, name);
            if let Some(icon) = icon {
                group = group.icon(GroupIcon::Entity(icon.clone()));
            }
            Ok(GroupRef::from(group))
        }
    }
}

fn build_recipe(owner: &str, recipe: &Value) -> Result<Recipe, CliError> {
    Recipe::from_value(recipe.clone()).map_err(|error| invalid(owner, error))
}

fn build_block_loot(block_id: &str, declared: &LootSpec) -> Result<LootTable, CliError> {
    Ok(match declared {
        LootSpec::DropsSelf => LootTable::drops_self(block_id),
        LootSpec::DropsNothing => LootTable::drops_nothing(),
        LootSpec::DropsItem {
            item,
            count,
            min,
            max,
        } => {
            let count = match (count, min, max) {
                (Some(count), None, None) => DropCount::Fixed(*count),
                (None, Some(min), Some(max)) => DropCount::Uniform {
                    min: *min,
                    max: *max,
                },
                (None, None, None) => DropCount::Fixed(1),
                _ => {
                    return Err(invalid(
                        block_id,
                        "drops_item takes either 'count' or both 'min' and 'max'",
                    ))
                }
            };
            LootTable::drops_item(item, count)
        }
        LootSpec::SilkTouch {
            silk_touch_item,
            fallback_item,
            fallback_count,
        } => LootTable::drops_with_silk_touch(
            block_id,
            silk_touch_item.as_deref(),
            fallback_item.as_deref().map(|item| (item, *fallback_count)),
        ),
        LootSpec::Fortune {
            item,
            min_count,
            max_count,
            silk_touch_drops_self,
        } => LootTable::drops_with_fortune(block_id, item, *min_count, *max_count, *silk_touch_drops_self),
        LootSpec::Raw { table } => {
            LootTable::from_value(table.clone()).map_err(|error| invalid(block_id, error))?
        }
    })
}

fn hook_fragment(declared: &HookSpec) -> Result<Fragment, ActionError> {
    match declared {
        HookSpec::Code(code) => Ok(Fragment::raw(code.as_str())),
        HookSpec::Action(action) => action_fragment(action),
    }
}

fn action_fragment(action: &ActionSpec) -> Result<Fragment, ActionError> {
    Ok(match action {
        ActionSpec::ReplaceBlock { block } => actions::replace_block(block)?,
        ActionSpec::TeleportPlayer { x, y, z } => actions::teleport_player(*x, *y, *z)?,
        ActionSpec::TeleportPlayerRelative { dx, dy, dz } => {
            actions::teleport_player_relative(*dx, *dy, *dz)?
        }
        ActionSpec::LaunchPlayer { dx, dy, dz } => actions::launch_player(*dx, *dy, *dz)?,
        ActionSpec::ApplyEffect {
            effect,
            duration_ticks,
            amplifier,
        } => actions::apply_effect(effect, *duration_ticks, *amplifier)?,
        ActionSpec::PlaySound {
            sound,
            volume,
            pitch,
        } => actions::play_sound(sound, *volume, *pitch)?,
        ActionSpec::SummonLightning => actions::summon_lightning(),
        ActionSpec::DropItem { item, count } => actions::drop_item(item, *count)?,
        ActionSpec::PlaceFire { above } => actions::place_fire(*above),
        ActionSpec::ExtinguishArea { radius } => actions::extinguish_area(*radius),
        ActionSpec::GiveXp { amount } => actions::give_xp(*amount),
        ActionSpec::RemoveXp { amount } => actions::remove_xp(*amount),
        ActionSpec::DamageNearby {
            amount,
            radius,
            exclude_player,
        } => actions::damage_nearby(*amount, *radius, *exclude_player)?,
        ActionSpec::HealNearby { amount, radius } => actions::heal_nearby(*amount, *radius)?,
        ActionSpec::DelayedAction { ticks, then } => {
            let inner = then.iter().map(hook_fragment).collect::<Result<Vec<_>, _>>()?;
            actions::delayed_action(Fragment::join(inner), *ticks)
        }
        ActionSpec::SculkEvent { event } => actions::sculk_event(event)?,
        ActionSpec::SendMessage { message } => message::send_message(message),
        ActionSpec::SendActionBarMessage { message } => message::send_action_bar_message(message),
        ActionSpec::ConsolePrint { message } => message::console_print(message),
    })
}

fn invalid(id: &str, message: impl ToString) -> CliError {
    CliError::InvalidEntry {
        id: id.to_string(),
        message: message.to_string(),
    }
}

/// How the project directory is obtained before compiling into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonChoice {
    Template(String),
    ExistingDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonOptions {
    pub project_dir: PathBuf,
    pub skeleton: SkeletonChoice,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
            skeleton: SkeletonChoice::Template(DEFAULT_TEMPLATE_URL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Compile { manifest: PathBuf },
    Build,
    Run,
}

pub fn run<W: Write>(kind: CommandKind, opts: CommonOptions, stdout: &mut W) -> Result<(), CliError> {
    match kind {
        CommandKind::Compile { manifest } => {
            let parsed = load_manifest(&manifest)?;
            let config = build_mod_config(&parsed)?;
            let mut options = CompileOptions::default();
            if let Some(base_package) = &parsed.base_package {
                options.base_package = base_package.clone();
            }
            let skeleton: Box<dyn ProjectSkeleton> = match &opts.skeleton {
                SkeletonChoice::Template(url) => Box::new(GitTemplate::new(url.as_str())),
                SkeletonChoice::ExistingDirectory => Box::new(ExistingDirectory),
            };
            let report = config.compile_with(skeleton.as_ref(), &opts.project_dir, &options)?;
            write_report(stdout, config.mod_id(), &report).map_err(CliError::Output)
        }
        CommandKind::Build => {
            info!(project_dir = %opts.project_dir.display(), "mod_build_requested");
            GradleDriver.build(&opts.project_dir)?;
            Ok(())
        }
        CommandKind::Run => {
            info!(project_dir = %opts.project_dir.display(), "mod_run_requested");
            GradleDriver.run(&opts.project_dir)?;
            Ok(())
        }
    }
}

fn write_report<W: Write>(stdout: &mut W, mod_id: &str, report: &CompileReport) -> io::Result<()> {
    for file in &report.files {
        if file.action != FileAction::Unchanged {
            writeln!(stdout, "{:<9} {}", file.action.as_str(), file.path)?;
        }
    }
    writeln!(
        stdout,
        "compiled {mod_id} into {}: {} created, {} updated, {} unchanged, {} removed",
        report.project_dir.display(),
        report.count(FileAction::Create),
        report.count(FileAction::Update),
        report.count(FileAction::Unchanged),
        report.count(FileAction::Remove)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgen::ValidationErrorKind;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "mod_id": "mining-demo",
        "name": "Mining Demo",
        "authors": ["ana"],
        "entries": [
            {"kind": "item", "id": "mining-demo:ruby", "name": "Ruby", "group": "ingredients"},
            {"kind": "item", "id": "mining-demo:ruby_apple", "name": "Ruby Apple",
             "food": {"nutrition": 6, "saturation": 0.8, "always_edible": true},
             "group": {"id": "gems", "name": "Gems", "icon": "mining-demo:ruby"}},
            {"kind": "item", "id": "mining-demo:ruby_pickaxe", "name": "Ruby Pickaxe",
             "tool": {"durability": 900, "mining_speed_multiplier": 8.0, "attack_damage": 3.0,
                      "mining_level": 3, "enchantability": 15, "repair_ingredient": "mining-demo:ruby"}},
            {"kind": "block", "id": "mining-demo:ruby_ore", "name": "Ruby Ore",
             "tool_type": "pickaxe", "mining_level": "iron", "hardness": 3.0,
             "mining_speeds": {"shovel": 2.0},
             "loot": {"preset": "fortune", "item": "mining-demo:ruby", "max_count": 2},
             "on_right_click": [
                 "player.push(0.0, 1.0, 0.0)",
                 {"action": "give_xp", "amount": 100},
                 {"action": "delayed_action", "ticks": 40, "then": [{"action": "summon_lightning"}]}
             ]}
        ],
        "loot_tables": [
            {"name": "bonus_chest", "table": {"type": "minecraft:chest",
             "pools": [{"rolls": 1, "entries": [{"type": "minecraft:item", "name": "mining-demo:ruby"}]}]}}
        ]
    }"#;

    fn manifest() -> ModManifest {
        parse_manifest(MANIFEST, Path::new("mod.json")).expect("manifest")
    }

    #[test]
    fn manifest_builds_graph_in_order() {
        let config = build_mod_config(&manifest()).expect("config");
        let ids = config
            .registrations()
            .iter()
            .map(|registration| registration.id().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                "mining-demo:ruby",
                "mining-demo:ruby_apple",
                "mining-demo:ruby_pickaxe",
                "mining-demo:ruby_ore"
            ]
        );
        let ore = config.blocks().next().expect("ore");
        assert_eq!(ore.tool(), Some(ToolType::Pickaxe));
        assert_eq!(ore.level(), Some(MiningLevel::Iron));
        assert!(ore.effective_requires_tool());
        let hooks = ore.hook_fragments(HookEvent::RightClick).expect("hooks");
        assert_eq!(hooks.len(), 3);
        assert!(hooks[2].code().contains("LightningBolt"));
        assert_eq!(config.loot_tables().count(), 1);
    }

    #[test]
    fn parse_errors_report_the_json_path() {
        let raw = r#"{"mod_id": "m", "name": "M", "entries": [{"kind": "item", "id": "m:a", "name": 3}]}"#;
        let error = parse_manifest(raw, Path::new("mod.json")).expect_err("bad name");
        match error {
            CliError::ParseManifest { json_path, .. } => assert!(json_path.starts_with("entries[0]")),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let raw = r#"{"mod_id": "m", "name": "M", "entries": [
            {"kind": "block", "id": "m:b", "name": "B", "tool_type": "spoon"}]}"#;
        let error = build_mod_config(&parse_manifest(raw, Path::new("mod.json")).expect("parse"))
            .expect_err("spoon");
        match error {
            CliError::Validation(error) => assert_eq!(error.kind(), ValidationErrorKind::InvalidEnumValue),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn food_and_tool_together_are_rejected() {
        let raw = r#"{"mod_id": "m", "name": "M", "entries": [
            {"kind": "item", "id": "m:odd", "name": "Odd",
             "food": {"nutrition": 1, "saturation": 0.1},
             "tool": {"durability": 1, "mining_speed_multiplier": 1.0, "attack_damage": 1.0,
                      "mining_level": 0, "enchantability": 1}}]}"#;
        let error = build_mod_config(&parse_manifest(raw, Path::new("mod.json")).expect("parse"))
            .expect_err("both");
        assert!(matches!(error, CliError::InvalidEntry { .. }));
    }

    #[test]
    fn action_names_are_checked_before_compiling() {
        let raw = r#"{"mod_id": "m", "name": "M", "entries": [
            {"kind": "block", "id": "m:trap", "name": "Trap", "on_break": [
                {"action": "delayed_action", "ticks": 5, "then": [
                    {"action": "drop_item", "item": "diamond); System.exit(0"}]}]}]}"#;
        let error = build_mod_config(&parse_manifest(raw, Path::new("mod.json")).expect("parse"))
            .expect_err("item name");
        match error {
            CliError::InvalidEntry { id, message } => {
                assert_eq!(id, "m:trap");
                assert!(message.contains("diamond); System.exit(0"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn compile_command_writes_project_and_summary() {
        let dir = TempDir::new().expect("temp dir");
        let manifest_path = dir.path().join("mod.json");
        fs::write(&manifest_path, MANIFEST).expect("write manifest");
        let project_dir = dir.path().join("project");
        let opts = CommonOptions {
            project_dir: project_dir.clone(),
            skeleton: SkeletonChoice::ExistingDirectory,
        };

        let mut out = Vec::new();
        run(
            CommandKind::Compile {
                manifest: manifest_path.clone(),
            },
            opts.clone(),
            &mut out,
        )
        .expect("compile");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("create    src/main/java/com/example/mining_demo/MiningDemoRegistry.java"));
        assert!(text.contains("compiled mining-demo into"));
        assert!(project_dir
            .join("src/main/resources/data/mining-demo/loot_table/chests/bonus_chest.json")
            .exists());
        assert!(project_dir
            .join("src/main/java/com/example/mining_demo/block/RubyOreBlock.java")
            .exists());

        let mut again = Vec::new();
        run(CommandKind::Compile { manifest: manifest_path }, opts, &mut again).expect("recompile");
        let text = String::from_utf8(again).expect("utf8");
        assert!(text.contains(" 0 created, 0 updated,"));
    }
}
