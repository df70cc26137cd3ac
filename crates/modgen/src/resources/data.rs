use std::collections::BTreeMap;

use serde_json::json;

use crate::compile::output::GeneratedFile;
use crate::compile::plan::{ModPlan, PlannedEntry};
use crate::error::CompileError;
use crate::ids::ContentId;
use crate::model::{MiningLevel, Recipe, ToolType};

const DATA_ROOT: &str = "src/main/resources/data";

/// One file per recipe, named after the recipe's result when it has one.
pub(crate) fn recipe_files(plan: &ModPlan<'_>) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for entry in &plan.entries {
        let (id, recipe) = match entry {
            PlannedEntry::Item(item) => (&item.id, item.item.recipe_ref()),
            PlannedEntry::Block(block) => (&block.id, block.block.recipe_ref()),
        };
        if let Some(recipe) = recipe {
            files.push(GeneratedFile::text(
                format!("{DATA_ROOT}/{}/recipe/{}.json", id.namespace(), recipe_file_stem(id, recipe)),
                format!("recipe of {id}"),
                &terminated(recipe.text()),
            ));
        }
    }
    files
}

fn recipe_file_stem(owner: &ContentId, recipe: &Recipe) -> String {
    recipe
        .result_id()
        .and_then(|raw| ContentId::parse(raw).ok())
        .map(|result| result.path().to_string())
        .unwrap_or_else(|| owner.path().to_string())
}

pub(crate) fn loot_table_files(plan: &ModPlan<'_>) -> Vec<GeneratedFile> {
    plan.loot_tables
        .iter()
        .map(|planned| {
            GeneratedFile::text(
                format!("src/main/resources/{}", planned.path),
                format!("loot table of {}", planned.owner),
                &terminated(planned.table.text()),
            )
        })
        .collect()
}

/// Mining tags grouped across every block, plus the repair tag of each tool that names an ingredient.
pub(crate) fn tag_files(plan: &ModPlan<'_>) -> Result<Vec<GeneratedFile>, CompileError> {
    let mut mineable: BTreeMap<ToolType, Vec<String>> = BTreeMap::new();
    let mut needs: BTreeMap<MiningLevel, Vec<String>> = BTreeMap::new();
    let mut files = Vec::new();

    for entry in &plan.entries {
        match entry {
            PlannedEntry::Block(planned) => {
                let block = planned.block;
                let id = planned.id.to_string();
                let tools = block
                    .tool()
                    .into_iter()
                    .chain(block.speed_overrides().keys().copied());
                for tool in tools {
                    push_unique(mineable.entry(tool).or_default(), &id);
                }
                if let Some(level) = block.level() {
                    push_unique(needs.entry(level).or_default(), &id);
                }
            }
            PlannedEntry::Item(planned) => {
                let Some(tool) = &planned.tool else {
                    continue;
                };
                let Some(ingredient) = &tool.repair.ingredient else {
                    continue;
                };
                let tag = &tool.repair.tag_id;
                files.push(tag_file(
                    format!("{DATA_ROOT}/{}/tags/item/{}.json", tag.namespace(), tag.path()),
                    format!("repair tag of {}", planned.id),
                    &[ingredient.to_string()],
                )?);
            }
        }
    }

    for (tool, blocks) in &mineable {
        files.push(tag_file(
            format!("{DATA_ROOT}/minecraft/{}", tool.mineable_tag_path()),
            format!("mineable/{} tag", tool.as_str()),
            blocks,
        )?);
    }
    for (level, blocks) in &needs {
        files.push(tag_file(
            format!("{DATA_ROOT}/minecraft/{}", level.needs_tag_path()),
            format!("needs_{}_tool tag", level.as_str()),
            blocks,
        )?);
    }
    Ok(files)
}

fn tag_file(path: String, owner: String, values: &[String]) -> Result<GeneratedFile, CompileError> {
    GeneratedFile::json(path, owner, &json!({ "replace": false, "values": values }))
}

fn push_unique(values: &mut Vec<String>, id: &str) {
    if !values.iter().any(|value| value == id) {
        values.push(id.to_string());
    }
}

fn terminated(text: &str) -> String {
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::plan::plan;
    use crate::compile::CompileOptions;
    use crate::mod_config::ModConfig;
    use crate::model::{Block, Item, Recipe};
    use serde_json::Value;

    fn values(file: &GeneratedFile) -> Vec<String> {
        let value: Value = serde_json::from_slice(&file.bytes).expect("tag json");
        assert_eq!(value["replace"], Value::Bool(false));
        value["values"]
            .as_array()
            .expect("values")
            .iter()
            .map(|v| v.as_str().expect("string").to_string())
            .collect()
    }

    fn find<'a>(files: &'a [GeneratedFile], suffix: &str) -> &'a GeneratedFile {
        files
            .iter()
            .find(|file| file.path.ends_with(suffix))
            .unwrap_or_else(|| panic!("no file ending in {suffix}"))
    }

    #[test]
    fn mining_tags_group_blocks_by_tool_and_exact_tier() {
        let mut config = ModConfig::new("m", "M");
        config
            .register_block(
                Block::new("m:b1", "B1")
                    .tool_type(ToolType::Pickaxe)
                    .mining_level(MiningLevel::Iron),
            )
            .expect("b1");
        config
            .register_block(
                Block::new("m:b2", "B2")
                    .tool_type(ToolType::Pickaxe)
                    .mining_level(MiningLevel::Stone)
                    .mining_speed(ToolType::Shovel, 2.0),
            )
            .expect("b2");
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let files = tag_files(&plan).expect("tags");

        assert_eq!(values(find(&files, "mineable/pickaxe.json")), vec!["m:b1", "m:b2"]);
        assert_eq!(values(find(&files, "mineable/shovel.json")), vec!["m:b2"]);
        assert_eq!(values(find(&files, "needs_iron_tool.json")), vec!["m:b1"]);
        assert_eq!(values(find(&files, "needs_stone_tool.json")), vec!["m:b2"]);
        assert!(files.iter().all(|file| !file.path.ends_with("needs_diamond_tool.json")));
        assert_eq!(
            find(&files, "mineable/pickaxe.json").path,
            "src/main/resources/data/minecraft/tags/block/mineable/pickaxe.json"
        );
    }

    #[test]
    fn recipes_are_named_after_their_result() {
        let recipe = Recipe::from_json(
            r#"{"type":"minecraft:smelting","ingredient":"m:raw_ruby","result":{"id":"m:ruby_ingot"}}"#,
        )
        .expect("recipe");
        let mut config = ModConfig::new("m", "M");
        config
            .register_item(Item::new("m:ruby", "Ruby").recipe(recipe.clone()))
            .expect("item");
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let files = recipe_files(&plan);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/main/resources/data/m/recipe/ruby_ingot.json");
        assert_eq!(files[0].bytes, format!("{}\n", recipe.text()).into_bytes());
    }
}
