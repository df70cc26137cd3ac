use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::codegen::entrypoint_class;
use crate::compile::output::GeneratedFile;
use crate::compile::plan::ModPlan;
use crate::error::CompileError;

const FABRIC_MOD_JSON: &str = "src/main/resources/fabric.mod.json";

/// Merges the mod's identity and entrypoint into the skeleton's `fabric.mod.json`,
/// keeping every other key the skeleton declares.
pub(crate) fn fabric_mod_json(plan: &ModPlan<'_>, project_dir: &Path) -> Result<GeneratedFile, CompileError> {
    let path = project_dir.join(FABRIC_MOD_JSON);
    let mut document = match fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(CompileError::InvalidProjectFile {
                    path,
                    message: "expected a JSON object".to_string(),
                })
            }
            Err(error) => {
                return Err(CompileError::InvalidProjectFile {
                    path,
                    message: error.to_string(),
                })
            }
        },
        Err(error) if error.kind() == ErrorKind::NotFound => default_document(),
        Err(source) => return Err(CompileError::Io { path, source }),
    };

    let config = plan.config;
    document.insert("id".to_string(), json!(config.mod_id()));
    document.insert("name".to_string(), json!(config.name()));
    document.insert("version".to_string(), json!(config.version_text()));
    document.insert("description".to_string(), json!(config.description_text()));
    document.insert("authors".to_string(), json!(config.author_list()));
    add_main_entrypoint(&mut document, &entrypoint_class(plan), &path)?;

    GeneratedFile::json(
        FABRIC_MOD_JSON.to_string(),
        format!("metadata of {}", config.mod_id()),
        &Value::Object(document),
    )
}

fn add_main_entrypoint(
    document: &mut Map<String, Value>,
    class: &str,
    path: &Path,
) -> Result<(), CompileError> {
    let invalid = |message: &str| CompileError::InvalidProjectFile {
        path: path.to_path_buf(),
        message: message.to_string(),
    };
    let entrypoints = document
        .entry("entrypoints")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| invalid("'entrypoints' must be an object"))?;
    let main = entrypoints
        .entry("main")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| invalid("'entrypoints.main' must be an array"))?;
    if !main.iter().any(|entry| entry.as_str() == Some(class)) {
        main.push(json!(class));
    }
    Ok(())
}

fn default_document() -> Map<String, Value> {
    let document = json!({
        "schemaVersion": 1,
        "environment": "*",
        "depends": {
            "fabricloader": ">=0.16.0",
            "minecraft": "~1.21",
            "java": ">=21",
            "fabric-api": "*",
        },
    });
    match document {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::plan::plan;
    use crate::compile::CompileOptions;
    use crate::mod_config::ModConfig;
    use tempfile::TempDir;

    fn config() -> ModConfig {
        ModConfig::new("mining-demo", "Mining Demo")
            .description("Ores")
            .version("2.0.0")
            .authors(["ana"])
    }

    #[test]
    fn merges_into_existing_metadata() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(FABRIC_MOD_JSON);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            r#"{"schemaVersion":1,"id":"modid","mixins":["modid.mixins.json"],
               "entrypoints":{"main":["com.example.ExampleMod"],"client":["com.example.ExampleModClient"]}}"#,
        )
        .expect("write");

        let config = config();
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let file = fabric_mod_json(&plan, dir.path()).expect("merge");
        let value: Value = serde_json::from_slice(&file.bytes).expect("json");
        assert_eq!(value["id"], "mining-demo");
        assert_eq!(value["version"], "2.0.0");
        assert_eq!(value["authors"], json!(["ana"]));
        assert_eq!(value["mixins"], json!(["modid.mixins.json"]));
        assert_eq!(
            value["entrypoints"]["main"],
            json!(["com.example.ExampleMod", "com.example.mining_demo.MiningDemoMod"])
        );
        assert_eq!(value["entrypoints"]["client"], json!(["com.example.ExampleModClient"]));
    }

    #[test]
    fn entrypoint_is_not_duplicated_and_missing_file_gets_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config = config();
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let first = fabric_mod_json(&plan, dir.path()).expect("create");
        let value: Value = serde_json::from_slice(&first.bytes).expect("json");
        assert_eq!(value["depends"]["minecraft"], "~1.21");

        let path = dir.path().join(FABRIC_MOD_JSON);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, &first.bytes).expect("write");
        let second = fabric_mod_json(&plan, dir.path()).expect("merge");
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn unparseable_metadata_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(FABRIC_MOD_JSON);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "{ not json").expect("write");
        let config = config();
        let plan = plan(&config, &CompileOptions::default()).expect("plan");
        let error = fabric_mod_json(&plan, dir.path()).expect_err("invalid");
        assert!(matches!(error, CompileError::InvalidProjectFile { .. }));
    }
}
