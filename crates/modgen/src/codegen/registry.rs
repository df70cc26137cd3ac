use std::collections::BTreeSet;

use super::java::{float_literal, string_literal, SourceWriter};
use super::imports as classes;
use crate::compile::plan::{
    BlockClass, CustomTab, IconSource, ModPlan, PlannedBlock, PlannedEntry, PlannedItem,
    PlannedTool, TabTarget,
};
use crate::ids::ContentId;
use crate::model::{
    incorrect_for_tier_constant, FoodProperties, ItemKind, ToolProperties, ToolType,
    DEFAULT_STACK_SIZE,
};
use crate::naming::translation_key;
use crate::snippets::SCHEDULER_TYPE;

/// The aggregate unit: every registry field in registration order plus `initialize()`.
pub(crate) fn render_registry(plan: &ModPlan<'_>) -> String {
    let mut imports = base_imports();
    let mut body = SourceWriter::new();
    body.open(format!("public final class {} {{", plan.registry_type));

    for entry in &plan.entries {
        match entry {
            PlannedEntry::Item(item) => write_item(&mut body, &mut imports, item),
            PlannedEntry::Block(block) => write_block(&mut body, &mut imports, plan, block),
        }
    }
    for tab in &plan.tabs {
        if let TabTarget::Custom(custom) = &tab.target {
            write_custom_tab(&mut body, &mut imports, custom);
        }
    }

    body.blank();
    body.line(format!("private {}() {{}}", plan.registry_type));
    write_helpers(&mut body);
    write_initialize(&mut body, &mut imports, plan);
    body.close("}");

    let mut unit = SourceWriter::new();
    unit.header(&plan.package, &imports);
    let mut source = unit.finish();
    source.push_str(&body.finish());
    source
}

fn base_imports() -> BTreeSet<String> {
    [
        classes::FUNCTION,
        classes::REGISTRY,
        classes::BUILT_IN_REGISTRIES,
        classes::REGISTRIES,
        classes::RESOURCE_KEY,
        classes::RESOURCE_LOCATION,
        classes::ITEM,
        classes::BLOCK_ITEM,
        classes::BLOCK,
        classes::BLOCK_BEHAVIOUR,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn write_item(body: &mut SourceWriter, imports: &mut BTreeSet<String>, planned: &PlannedItem<'_>) {
    let item = planned.item;
    let (namespace, path) = id_args(&planned.id);
    match (item.kind(), &planned.tool) {
        (ItemKind::Tool(tool), Some(material)) => {
            write_tool_material(body, imports, tool, material);
            let (factory, properties) = tool_factory(imports, tool, material);
            body.line(format!(
                "public static final Item {} = registerItem({namespace}, {path}, {factory}, {properties});",
                planned.field
            ));
        }
        (kind, _) => {
            let mut properties = "new Item.Properties()".to_string();
            if let ItemKind::Food(food) = kind {
                imports.insert(classes::FOOD_PROPERTIES.to_string());
                properties.push_str(&format!(".food({})", food_expression(food)));
            }
            if item.stack_size() != DEFAULT_STACK_SIZE {
                properties.push_str(&format!(".stacksTo({})", item.stack_size()));
            }
            body.line(format!(
                "public static final Item {} = registerItem({namespace}, {path}, Item::new, {properties});",
                planned.field
            ));
        }
    }
}

fn food_expression(food: &FoodProperties) -> String {
    let mut expression = format!(
        "new FoodProperties.Builder().nutrition({}).saturationModifier({})",
        food.nutrition,
        float_literal(food.saturation)
    );
    if food.always_edible {
        expression.push_str(".alwaysEdible()");
    }
    expression.push_str(".build()");
    expression
}

fn write_tool_material(
    body: &mut SourceWriter,
    imports: &mut BTreeSet<String>,
    tool: &ToolProperties,
    material: &PlannedTool,
) {
    imports.extend(
        [classes::TAG_KEY, classes::BLOCK_TAGS, classes::TOOL_MATERIAL]
            .into_iter()
            .map(String::from),
    );
    let repair = &material.repair;
    let (tag_namespace, tag_path) = id_args(&repair.tag_id);
    body.line(format!(
        "public static final TagKey<Item> {} = TagKey.create(Registries.ITEM, ResourceLocation.fromNamespaceAndPath({tag_namespace}, {tag_path}));",
        repair.field
    ));
    body.line(format!(
        "public static final ToolMaterial {} = new ToolMaterial(BlockTags.{}, {}, {}, 0.0f, {}, {});",
        material.material_field,
        incorrect_for_tier_constant(tool.mining_level),
        tool.durability,
        float_literal(tool.mining_speed_multiplier),
        tool.enchantability,
        repair.field
    ));
}

/// Pickaxes and swords configure plain items; the remaining tools have dedicated classes.
fn tool_factory(
    imports: &mut BTreeSet<String>,
    tool: &ToolProperties,
    material: &PlannedTool,
) -> (String, String) {
    let damage = float_literal(tool.attack_damage);
    let material_field = &material.material_field;
    let class_factory = |class: &str, import: &str, speed: &str, imports: &mut BTreeSet<String>| {
        imports.insert(import.to_string());
        (
            format!("properties -> new {class}({material_field}, {damage}, {speed}, properties)"),
            "new Item.Properties()".to_string(),
        )
    };
    match tool.kind {
        ToolType::Pickaxe => (
            "Item::new".to_string(),
            format!("new Item.Properties().pickaxe({material_field}, {damage}, -2.8f)"),
        ),
        ToolType::Sword => (
            "Item::new".to_string(),
            format!("new Item.Properties().sword({material_field}, {damage}, -2.4f)"),
        ),
        ToolType::Axe => class_factory("AxeItem", classes::AXE_ITEM, "-3.0f", imports),
        ToolType::Shovel => class_factory("ShovelItem", classes::SHOVEL_ITEM, "-3.0f", imports),
        ToolType::Hoe => class_factory("HoeItem", classes::HOE_ITEM, "-1.0f", imports),
    }
}

fn write_block(
    body: &mut SourceWriter,
    imports: &mut BTreeSet<String>,
    plan: &ModPlan<'_>,
    planned: &PlannedBlock<'_>,
) {
    let block = planned.block;
    let (namespace, path) = id_args(&planned.id);
    let factory = match &planned.class {
        BlockClass::Default => "Block::new".to_string(),
        BlockClass::Specialized(specialized) => {
            imports.insert(format!("{}.block.{}", plan.package, specialized.type_name));
            format!("{}::new", specialized.type_name)
        }
    };
    let mut properties = format!(
        "BlockBehaviour.Properties.of().strength({}, {})",
        float_literal(block.effective_hardness()),
        float_literal(block.effective_resistance())
    );
    if block.effective_requires_tool() {
        properties.push_str(".requiresCorrectToolForDrops()");
    }
    body.line(format!(
        "public static final Block {} = registerBlock({namespace}, {path}, {factory}, {properties});",
        planned.field
    ));

    let mut item_properties = "new Item.Properties()".to_string();
    if block.stack_size() != DEFAULT_STACK_SIZE {
        item_properties.push_str(&format!(".stacksTo({})", block.stack_size()));
    }
    body.line(format!(
        "public static final Item {} = registerBlockItem({namespace}, {path}, {}, {item_properties});",
        planned.item_field, planned.field
    ));
}

fn write_custom_tab(body: &mut SourceWriter, imports: &mut BTreeSet<String>, tab: &CustomTab<'_>) {
    imports.extend(
        [
            classes::CREATIVE_MODE_TAB,
            classes::FABRIC_ITEM_GROUP,
            classes::ITEM_STACK,
            classes::COMPONENT,
        ]
        .into_iter()
        .map(String::from),
    );
    let (namespace, path) = id_args(&tab.id);
    let icon = match &tab.icon {
        IconSource::Field(field) => field.clone(),
        IconSource::Registry(id) => format!(
            "BuiltInRegistries.ITEM.getValue(ResourceLocation.parse({}))",
            string_literal(id)
        ),
    };
    body.line(format!(
        "public static final ResourceKey<CreativeModeTab> {} = ResourceKey.create(Registries.CREATIVE_MODE_TAB, ResourceLocation.fromNamespaceAndPath({namespace}, {path}));",
        tab.key_field
    ));
    body.line(format!(
        "public static final CreativeModeTab {} = FabricItemGroup.builder()",
        tab.field
    ));
    body.line(format!("        .icon(() -> new ItemStack({icon}))"));
    body.line(format!(
        "        .title(Component.translatable({}))",
        string_literal(&translation_key("itemGroup", &tab.id))
    ));
    body.line("        .build();");
}

fn write_helpers(body: &mut SourceWriter) {
    body.blank();
    body.open("private static Item registerItem(String namespace, String path, Function<Item.Properties, Item> factory, Item.Properties properties) {");
    body.line("ResourceKey<Item> key = ResourceKey.create(Registries.ITEM, ResourceLocation.fromNamespaceAndPath(namespace, path));");
    body.line("return Registry.register(BuiltInRegistries.ITEM, key, factory.apply(properties.setId(key)));");
    body.close("}");
    body.blank();
    body.open("private static Block registerBlock(String namespace, String path, Function<BlockBehaviour.Properties, Block> factory, BlockBehaviour.Properties properties) {");
    body.line("ResourceKey<Block> key = ResourceKey.create(Registries.BLOCK, ResourceLocation.fromNamespaceAndPath(namespace, path));");
    body.line("return Registry.register(BuiltInRegistries.BLOCK, key, factory.apply(properties.setId(key)));");
    body.close("}");
    body.blank();
    body.open("private static Item registerBlockItem(String namespace, String path, Block block, Item.Properties properties) {");
    body.line("ResourceKey<Item> key = ResourceKey.create(Registries.ITEM, ResourceLocation.fromNamespaceAndPath(namespace, path));");
    body.line("return Registry.register(BuiltInRegistries.ITEM, key, new BlockItem(block, properties.setId(key).useBlockDescriptionPrefix()));");
    body.close("}");
}

fn write_initialize(body: &mut SourceWriter, imports: &mut BTreeSet<String>, plan: &ModPlan<'_>) {
    body.blank();
    body.open("public static void initialize() {");
    for tab in &plan.tabs {
        if let TabTarget::Custom(custom) = &tab.target {
            body.line(format!(
                "Registry.register(BuiltInRegistries.CREATIVE_MODE_TAB, {}, {});",
                custom.key_field, custom.field
            ));
        }
    }
    for tab in &plan.tabs {
        imports.insert(classes::ITEM_GROUP_EVENTS.to_string());
        let key = match &tab.target {
            TabTarget::Vanilla(vanilla) => {
                imports.insert(classes::CREATIVE_MODE_TABS.to_string());
                format!("CreativeModeTabs.{}", vanilla.java_constant())
            }
            TabTarget::Custom(custom) => custom.key_field.clone(),
        };
        body.open(format!(
            "ItemGroupEvents.modifyEntriesEvent({key}).register(entries -> {{"
        ));
        for member in &tab.members {
            body.line(format!("entries.accept({member});"));
        }
        body.close("});");
    }
    if plan.uses_scheduler {
        body.line(format!("{SCHEDULER_TYPE}.register();"));
    }
    for (_, specialized) in plan.specialized_blocks() {
        if !specialized.hooks.is_empty() {
            body.line(format!("{}.registerEvents();", specialized.type_name));
        }
    }
    body.close("}");
}

fn id_args(id: &ContentId) -> (String, String) {
    (string_literal(id.namespace()), string_literal(id.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::plan::plan;
    use crate::compile::CompileOptions;
    use crate::mod_config::ModConfig;
    use crate::model::{Block, FoodProperties, Item, ItemGroup, VanillaGroup};
    use crate::snippets::actions;

    fn render(config: &ModConfig) -> String {
        let plan = plan(config, &CompileOptions::default()).expect("plan");
        render_registry(&plan)
    }

    fn position(source: &str, needle: &str) -> usize {
        source
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle}"))
    }

    #[test]
    fn entries_follow_registration_order_with_companion_items() {
        let mut config = ModConfig::new("m", "M");
        config.register_item(Item::new("m:ruby", "Ruby")).expect("ruby");
        config.register_block(Block::new("m:ruby_block", "Ruby Block")).expect("block");
        config
            .register_food_item(Item::food("m:apple", "Apple", FoodProperties::new(4, 0.3)))
            .expect("apple");
        let source = render(&config);

        let block_line = "public static final Block RUBY_BLOCK = registerBlock(\"m\", \"ruby_block\", Block::new, BlockBehaviour.Properties.of().strength(1.5f, 6.0f));\n";
        let companion_line = "    public static final Item RUBY_BLOCK_ITEM = registerBlockItem(\"m\", \"ruby_block\", RUBY_BLOCK, new Item.Properties());\n";
        assert!(source.contains(&format!("{block_line}{companion_line}")));
        assert!(position(&source, "Item RUBY =") < position(&source, "Block RUBY_BLOCK ="));
        assert!(position(&source, "Item RUBY_BLOCK_ITEM =") < position(&source, "Item APPLE ="));
        assert!(source.contains(
            ".food(new FoodProperties.Builder().nutrition(4).saturationModifier(0.3f).build())"
        ));
        assert!(source.contains("import net.minecraft.world.food.FoodProperties;"));
    }

    #[test]
    fn tool_type_implies_correct_tool_requirement() {
        let mut config = ModConfig::new("m", "M");
        config
            .register_block(Block::new("m:ore", "Ore").tool_type(ToolType::Pickaxe).hardness(3.0))
            .expect("ore");
        config
            .register_block(
                Block::new("m:soft", "Soft")
                    .tool_type(ToolType::Shovel)
                    .requires_tool(false),
            )
            .expect("soft");
        let source = render(&config);
        assert!(source.contains("strength(3.0f, 6.0f).requiresCorrectToolForDrops());"));
        assert!(source.contains("\"soft\", Block::new, BlockBehaviour.Properties.of().strength(1.5f, 6.0f));"));
    }

    #[test]
    fn tools_get_material_and_repair_tag() {
        let mut config = ModConfig::new("m", "M");
        let tool = ToolProperties {
            kind: ToolType::Axe,
            durability: 500,
            mining_speed_multiplier: 7.0,
            attack_damage: 5.0,
            mining_level: 2,
            enchantability: 14,
            repair_ingredient: Some("m:ruby".to_string()),
        };
        config.register_item(Item::tool("m:ruby_axe", "Ruby Axe", tool)).expect("axe");
        let source = render(&config);
        assert!(source.contains("TagKey<Item> RUBY_AXE_REPAIR_MATERIALS = TagKey.create(Registries.ITEM, ResourceLocation.fromNamespaceAndPath(\"m\", \"ruby_axe_repair_materials\"));"));
        assert!(source.contains("ToolMaterial RUBY_AXE_MATERIAL = new ToolMaterial(BlockTags.INCORRECT_FOR_IRON_TOOL, 500, 7.0f, 0.0f, 14, RUBY_AXE_REPAIR_MATERIALS);"));
        assert!(source.contains("registerItem(\"m\", \"ruby_axe\", properties -> new AxeItem(RUBY_AXE_MATERIAL, 5.0f, -3.0f, properties), new Item.Properties());"));
        assert!(source.contains("import net.minecraft.world.item.AxeItem;"));
    }

    #[test]
    fn tabs_collect_members_in_order() {
        let mut config = ModConfig::new("m", "M");
        let gems = ItemGroup::new("gems", "Gems");
        config
            .register_item(Item::new("m:ruby", "Ruby").group(gems.clone()))
            .expect("ruby");
        config
            .register_item(Item::new("m:bread", "Bread").group(VanillaGroup::FoodAndDrink))
            .expect("bread");
        config
            .register_block(Block::new("m:ruby_block", "Ruby Block").group(gems))
            .expect("block");
        let source = render(&config);

        assert!(source.contains("CreativeModeTab GEMS_TAB = FabricItemGroup.builder()"));
        assert!(source.contains("        .icon(() -> new ItemStack(RUBY))"));
        assert!(source.contains(".title(Component.translatable(\"itemGroup.m.gems\"))"));
        assert!(source.contains("Registry.register(BuiltInRegistries.CREATIVE_MODE_TAB, GEMS_TAB_KEY, GEMS_TAB);"));
        assert!(source.contains(
            "ItemGroupEvents.modifyEntriesEvent(GEMS_TAB_KEY).register(entries -> {\n            entries.accept(RUBY);\n            entries.accept(RUBY_BLOCK_ITEM);\n        });"
        ));
        assert!(source.contains("modifyEntriesEvent(CreativeModeTabs.FOOD_AND_DRINKS)"));
    }

    #[test]
    fn hooked_blocks_register_their_events() {
        let mut config = ModConfig::new("m", "M");
        config
            .register_block(Block::new("m:bell", "Bell").on_right_click("player.giveExperiencePoints(1);"))
            .expect("bell");
        let source = render(&config);
        assert!(source.contains("registerBlock(\"m\", \"bell\", BellBlock::new,"));
        assert!(source.contains("import com.example.m.block.BellBlock;"));
        assert!(source.contains("        BellBlock.registerEvents();\n"));
        assert!(!source.contains("DelayedTasks"));
    }

    #[test]
    fn delayed_hooks_register_the_task_queue_first() {
        let mut config = ModConfig::new("m", "M");
        config
            .register_block(Block::new("m:storm", "Storm").on_break(actions::delayed_action(actions::summon_lightning(), 40)))
            .expect("storm");
        let source = render(&config);
        assert!(source.contains("        DelayedTasks.register();\n        StormBlock.registerEvents();\n"));
    }
}
