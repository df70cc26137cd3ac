use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::compile::output::GeneratedFile;
use crate::compile::plan::{ModPlan, PlannedEntry, TabTarget};
use crate::error::CompileError;
use crate::ids::ContentId;
use crate::model::ItemKind;
use crate::naming::translation_key;

const ASSETS_ROOT: &str = "src/main/resources/assets";

pub(crate) fn lang_file(plan: &ModPlan<'_>) -> Result<GeneratedFile, CompileError> {
    let mut entries = Map::new();
    for entry in &plan.entries {
        let (key, name) = match entry {
            PlannedEntry::Item(item) => (translation_key("item", &item.id), item.item.name()),
            PlannedEntry::Block(block) => (translation_key("block", &block.id), block.block.name()),
        };
        entries.insert(key, Value::String(name.to_string()));
    }
    for tab in &plan.tabs {
        if let TabTarget::Custom(custom) = &tab.target {
            entries.insert(
                translation_key("itemGroup", &custom.id),
                Value::String(custom.group.name().to_string()),
            );
        }
    }
    GeneratedFile::json(
        format!("{ASSETS_ROOT}/{}/lang/en_us.json", plan.mod_id()),
        format!("translations of {}", plan.mod_id()),
        &Value::Object(entries),
    )
}

/// Textures, models, item definitions and blockstates for every entity with a usable texture.
pub(crate) fn model_files(plan: &ModPlan<'_>) -> Result<Vec<GeneratedFile>, CompileError> {
    let mut files = Vec::new();
    for entry in &plan.entries {
        match entry {
            PlannedEntry::Item(planned) => {
                let Some(texture) = planned.item.texture_path() else {
                    continue;
                };
                let Some(bytes) = load_texture(&planned.id, texture)? else {
                    continue;
                };
                let parent = match planned.item.kind() {
                    ItemKind::Tool(_) => "minecraft:item/handheld",
                    ItemKind::Plain | ItemKind::Food(_) => "minecraft:item/generated",
                };
                push_item_assets(&mut files, &planned.id, bytes, parent)?;
            }
            PlannedEntry::Block(planned) => {
                let block = planned.block;
                let id = &planned.id;
                if let Some(texture) = block.block_texture_path() {
                    if let Some(bytes) = load_texture(id, texture)? {
                        push_block_assets(&mut files, id, bytes)?;
                    }
                }
                if let Some(texture) = block.inventory_texture_path() {
                    if let Some(bytes) = load_texture(id, texture)? {
                        push_item_assets(&mut files, id, bytes, "minecraft:item/generated")?;
                    }
                }
            }
        }
    }
    Ok(files)
}

fn push_item_assets(
    files: &mut Vec<GeneratedFile>,
    id: &ContentId,
    texture: Vec<u8>,
    parent: &str,
) -> Result<(), CompileError> {
    let (namespace, path) = (id.namespace(), id.path());
    let owner = format!("item model of {id}");
    files.push(GeneratedFile {
        path: format!("{ASSETS_ROOT}/{namespace}/textures/item/{path}.png"),
        owner: owner.clone(),
        bytes: texture,
    });
    files.push(GeneratedFile::json(
        format!("{ASSETS_ROOT}/{namespace}/models/item/{path}.json"),
        owner.clone(),
        &json!({
            "parent": parent,
            "textures": { "layer0": format!("{namespace}:item/{path}") },
        }),
    )?);
    files.push(GeneratedFile::json(
        format!("{ASSETS_ROOT}/{namespace}/items/{path}.json"),
        owner,
        &json!({
            "model": { "type": "minecraft:model", "model": format!("{namespace}:item/{path}") },
        }),
    )?);
    Ok(())
}

fn push_block_assets(files: &mut Vec<GeneratedFile>, id: &ContentId, texture: Vec<u8>) -> Result<(), CompileError> {
    let (namespace, path) = (id.namespace(), id.path());
    let owner = format!("block model of {id}");
    files.push(GeneratedFile {
        path: format!("{ASSETS_ROOT}/{namespace}/textures/block/{path}.png"),
        owner: owner.clone(),
        bytes: texture,
    });
    files.push(GeneratedFile::json(
        format!("{ASSETS_ROOT}/{namespace}/models/block/{path}.json"),
        owner.clone(),
        &json!({
            "parent": "minecraft:block/cube_all",
            "textures": { "all": format!("{namespace}:block/{path}") },
        }),
    )?);
    files.push(GeneratedFile::json(
        format!("{ASSETS_ROOT}/{namespace}/blockstates/{path}.json"),
        owner,
        &json!({
            "variants": { "": { "model": format!("{namespace}:block/{path}") } },
        }),
    )?);
    Ok(())
}

/// Missing or undecodable textures are skipped, and so are the models that would reference them.
fn load_texture(id: &ContentId, path: &Path) -> Result<Option<Vec<u8>>, CompileError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(id = %id, path = %path.display(), "texture_missing_skipped");
            return Ok(None);
        }
        Err(source) => {
            return Err(CompileError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let dimensions = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|error| error.to_string())
        .and_then(|reader| reader.into_dimensions().map_err(|error| error.to_string()));
    match dimensions {
        Ok(_) => Ok(Some(bytes)),
        Err(error) => {
            warn!(id = %id, path = %path.display(), error = %error, "texture_undecodable_skipped");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::plan::plan;
    use crate::compile::CompileOptions;
    use crate::mod_config::ModConfig;
    use crate::model::{Block, Item, ItemGroup, ToolProperties};
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        image::RgbaImage::new(16, 16).save(path).expect("write png");
    }

    #[test]
    fn lang_file_names_items_blocks_and_custom_groups() {
        let mut config = ModConfig::new("m", "M");
        let group = ItemGroup::new("m:gems", "Gems");
        config
            .register_item(Item::new("m:ruby", "Ruby").group(group.clone()))
            .expect("item");
        config
            .register_block(Block::new("m:ores/ruby_ore", "Ruby Ore").group(group))
            .expect("block");
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let file = lang_file(&plan).expect("lang");
        assert_eq!(file.path, "src/main/resources/assets/m/lang/en_us.json");
        let value: Value = serde_json::from_slice(&file.bytes).expect("json");
        assert_eq!(value["item.m.ruby"], "Ruby");
        assert_eq!(value["block.m.ores.ruby_ore"], "Ruby Ore");
        assert_eq!(value["itemGroup.m.gems"], "Gems");
    }

    #[test]
    fn textures_produce_models_and_missing_ones_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let ore = dir.path().join("ore.png");
        write_png(&ore);
        let broken = dir.path().join("broken.png");
        fs::write(&broken, b"not a png").expect("write");

        let mut config = ModConfig::new("m", "M");
        config
            .register_item(Item::tool("m:pick", "Pick", ToolProperties::default()).texture(&ore))
            .expect("tool");
        config
            .register_item(Item::new("m:ghost", "Ghost").texture(dir.path().join("absent.png")))
            .expect("ghost");
        config
            .register_item(Item::new("m:broken", "Broken").texture(&broken))
            .expect("broken");
        config
            .register_block(Block::new("m:ore", "Ore").block_texture(&ore))
            .expect("block");
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let files = model_files(&plan).expect("models");
        let paths = files.iter().map(|file| file.path.as_str()).collect::<Vec<_>>();

        assert!(paths.contains(&"src/main/resources/assets/m/textures/item/pick.png"));
        assert!(paths.contains(&"src/main/resources/assets/m/textures/block/ore.png"));
        assert!(paths.contains(&"src/main/resources/assets/m/blockstates/ore.json"));
        assert!(paths.contains(&"src/main/resources/assets/m/items/ore.json"));
        assert!(paths.iter().all(|path| !path.contains("ghost") && !path.contains("broken")));

        let pick_model = files
            .iter()
            .find(|file| file.path.ends_with("models/item/pick.json"))
            .expect("pick model");
        let model: Value = serde_json::from_slice(&pick_model.bytes).expect("json");
        assert_eq!(model["parent"], "minecraft:item/handheld");
        assert_eq!(model["textures"]["layer0"], "m:item/pick");
    }
}
